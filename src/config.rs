//! Panel configuration persistence
//!
//! Stores panel options in `~/.config/control-panel/panel.yaml`. Keys use
//! the same camelCase names as structured configuration objects, so a loaded
//! file converts directly into the object `ControlPanel::create` consumes.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::panel::{DEVELOPER_MODE, HOVER_REVEAL, SHOW_BOOKMARK, SHOW_TOOLBOX};
use crate::ui_context::COLLECTION_ID_KEY;

/// Panel options; unset fields fall back to the option table defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_toolbox: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_bookmark: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_reveal: Option<bool>,
    /// Collection the panel is scoped to
    #[serde(
        default,
        rename = "collectionID",
        skip_serializing_if = "Option::is_none"
    )]
    pub collection_id: Option<String>,
}

impl PanelConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config at {}: {:#}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Write config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Structured configuration object holding only the fields that are set
    pub fn to_configuration(&self) -> Value {
        let mut map = Map::new();
        let flags = [
            (SHOW_TOOLBOX, self.show_toolbox),
            (SHOW_BOOKMARK, self.show_bookmark),
            (DEVELOPER_MODE, self.developer_mode),
            (HOVER_REVEAL, self.hover_reveal),
        ];
        for (name, value) in flags {
            if let Some(value) = value {
                map.insert(name.to_string(), Value::Bool(value));
            }
        }
        if let Some(id) = &self.collection_id {
            map.insert(COLLECTION_ID_KEY.to_string(), Value::String(id.clone()));
        }
        Value::Object(map)
    }
}
