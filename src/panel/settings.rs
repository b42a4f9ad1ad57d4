//! Control panel option table

use crate::settings::{SettingSpec, SettingType, SettingValue, Settings};

pub const SHOW_TOOLBOX: &str = "showToolbox";
pub const SHOW_BOOKMARK: &str = "showBookmark";
pub const DEVELOPER_MODE: &str = "developerMode";
pub const HOVER_REVEAL: &str = "hoverReveal";

/// Options recognized by the control panel, with their defaults
pub static CONTROL_PANEL_SETTINGS: [SettingSpec; 4] = [
    SettingSpec {
        name: SHOW_TOOLBOX,
        kind: SettingType::Boolean,
        default: SettingValue::Boolean(true),
    },
    SettingSpec {
        name: SHOW_BOOKMARK,
        kind: SettingType::Boolean,
        default: SettingValue::Boolean(true),
    },
    SettingSpec {
        name: DEVELOPER_MODE,
        kind: SettingType::Boolean,
        default: SettingValue::Boolean(false),
    },
    SettingSpec {
        name: HOVER_REVEAL,
        kind: SettingType::Boolean,
        default: SettingValue::Boolean(false),
    },
];

/// Typed view of the resolved control panel options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSettings {
    pub show_toolbox: bool,
    pub show_bookmark: bool,
    pub developer_mode: bool,
    pub hover_reveal: bool,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            show_toolbox: true,
            show_bookmark: true,
            developer_mode: false,
            hover_reveal: false,
        }
    }
}

impl PanelSettings {
    pub fn from_settings(settings: &Settings) -> Self {
        let defaults = Self::default();
        let flag = |name: &str, default: bool| {
            settings
                .get(name)
                .and_then(SettingValue::as_bool)
                .unwrap_or(default)
        };
        Self {
            show_toolbox: flag(SHOW_TOOLBOX, defaults.show_toolbox),
            show_bookmark: flag(SHOW_BOOKMARK, defaults.show_bookmark),
            developer_mode: flag(DEVELOPER_MODE, defaults.developer_mode),
            hover_reveal: flag(HOVER_REVEAL, defaults.hover_reveal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::collect_settings;
    use serde_json::json;

    #[test]
    fn test_table_matches_typed_defaults() {
        let mut settings = Settings::new();
        collect_settings(&json!({}), &CONTROL_PANEL_SETTINGS, &mut settings);
        assert_eq!(PanelSettings::from_settings(&settings), PanelSettings::default());
        assert_eq!(settings.len(), 4);
    }

    #[test]
    fn test_missing_keys_fall_back() {
        let settings = Settings::new();
        assert_eq!(PanelSettings::from_settings(&settings), PanelSettings::default());
    }
}
