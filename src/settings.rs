//! Settings resolution
//!
//! Components declare their options as a table of [`SettingSpec`]s. The
//! resolver fills a [`Settings`] map from the table defaults, then overrides
//! them from a configuration source: either a structured JSON object or the
//! declarative attributes of an [`Element`].
//!
//! Malformed values never fail resolution; they are logged and the default
//! is kept.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::dom::Element;

/// Attribute carrying a JSON configuration blob on declarative markup
pub const CONFIGURATION_ATTRIBUTE: &str = "configuration";

/// Declared type of an option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingType {
    Boolean,
    Int,
    Float,
    Text,
    /// Text restricted to one of the given choices
    Enum(&'static [&'static str]),
}

/// Resolved option value
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Boolean(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl SettingValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SettingValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            SettingValue::Float(f) => Some(*f),
            SettingValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// One entry of a component's option table
#[derive(Debug, Clone, PartialEq)]
pub struct SettingSpec {
    pub name: &'static str,
    pub kind: SettingType,
    pub default: SettingValue,
}

/// Resolved option name -> value map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    values: BTreeMap<String, SettingValue>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&SettingValue> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: &str, value: SettingValue) {
        self.values.insert(name.to_string(), value);
    }

    /// Boolean value, `false` when absent or not a boolean
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(SettingValue::as_bool).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Populate `out` from `specs` defaults overridden by a structured configuration object.
///
/// Keys not named in `specs` are ignored. A non-object configuration yields defaults.
/// Defaults only fill options `out` does not hold yet, so sources can be layered.
pub fn collect_settings(configuration: &Value, specs: &[SettingSpec], out: &mut Settings) {
    for spec in specs {
        let value = configuration
            .get(spec.name)
            .filter(|v| !v.is_null())
            .and_then(|raw| coerce_json(spec, raw));
        apply(spec, value, out);
    }
}

/// Populate `out` from `specs` defaults overridden by declarative attributes on `element`.
pub fn collect_settings_from_dom(element: &Element, specs: &[SettingSpec], out: &mut Settings) {
    for spec in specs {
        let value = element
            .ex_attribute(spec.name)
            .and_then(|raw| coerce_text(spec, &raw));
        apply(spec, value, out);
    }
}

fn apply(spec: &SettingSpec, value: Option<SettingValue>, out: &mut Settings) {
    match value {
        Some(value) => out.set(spec.name, value),
        None if out.get(spec.name).is_none() => out.set(spec.name, spec.default.clone()),
        None => {}
    }
}

/// Read the structured configuration embedded in declarative markup.
///
/// Returns an empty object when the element carries none or it does not parse.
pub fn get_configuration_from_dom(element: &Element) -> Value {
    let Some(raw) = element.ex_attribute(CONFIGURATION_ATTRIBUTE) else {
        return Value::Object(Default::default());
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(value @ Value::Object(_)) => value,
        Ok(_) => {
            tracing::warn!("Declarative configuration is not an object, ignoring");
            Value::Object(Default::default())
        }
        Err(e) => {
            tracing::warn!("Malformed declarative configuration: {}", e);
            Value::Object(Default::default())
        }
    }
}

fn coerce_json(spec: &SettingSpec, raw: &Value) -> Option<SettingValue> {
    let value = match (spec.kind, raw) {
        (SettingType::Boolean, Value::Bool(b)) => Some(SettingValue::Boolean(*b)),
        (SettingType::Int, Value::Number(n)) => n.as_i64().map(SettingValue::Int),
        (SettingType::Float, Value::Number(n)) => n.as_f64().map(SettingValue::Float),
        (_, Value::String(s)) => return coerce_text(spec, s),
        _ => None,
    };
    if value.is_none() {
        malformed(spec, &raw.to_string());
    }
    value
}

fn coerce_text(spec: &SettingSpec, raw: &str) -> Option<SettingValue> {
    let trimmed = raw.trim();
    let value = match spec.kind {
        SettingType::Boolean => parse_bool(trimmed).map(SettingValue::Boolean),
        SettingType::Int => trimmed.parse().ok().map(SettingValue::Int),
        SettingType::Float => trimmed.parse().ok().map(SettingValue::Float),
        SettingType::Text => Some(SettingValue::Text(raw.to_string())),
        SettingType::Enum(choices) => choices
            .iter()
            .find(|c| **c == trimmed)
            .map(|c| SettingValue::Text((*c).to_string())),
    };
    if value.is_none() {
        malformed(spec, raw);
    }
    value
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn malformed(spec: &SettingSpec, raw: &str) {
    tracing::warn!(
        "Malformed value {} for setting {} ({:?}), ignoring (default {:?})",
        raw,
        spec.name,
        spec.kind,
        spec.default
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static SPECS: [SettingSpec; 4] = [
        SettingSpec {
            name: "enabled",
            kind: SettingType::Boolean,
            default: SettingValue::Boolean(true),
        },
        SettingSpec {
            name: "count",
            kind: SettingType::Int,
            default: SettingValue::Int(3),
        },
        SettingSpec {
            name: "ratio",
            kind: SettingType::Float,
            default: SettingValue::Float(0.5),
        },
        SettingSpec {
            name: "mode",
            kind: SettingType::Enum(&["list", "grid"]),
            default: SettingValue::Text(String::new()),
        },
    ];

    #[test]
    fn test_defaults_when_empty() {
        let mut out = Settings::new();
        collect_settings(&json!({}), &SPECS, &mut out);
        assert_eq!(out.len(), 4);
        assert!(out.flag("enabled"));
        assert_eq!(out.get("count"), Some(&SettingValue::Int(3)));
    }

    #[test]
    fn test_json_overrides() {
        let mut out = Settings::new();
        collect_settings(
            &json!({"enabled": false, "count": 9, "ratio": 2, "mode": "grid", "extra": 1}),
            &SPECS,
            &mut out,
        );
        assert!(!out.flag("enabled"));
        assert_eq!(out.get("count"), Some(&SettingValue::Int(9)));
        assert_eq!(out.get("ratio"), Some(&SettingValue::Float(2.0)));
        assert_eq!(out.get("mode").and_then(|v| v.as_text()), Some("grid"));
        assert!(out.get("extra").is_none());
    }

    #[test]
    fn test_string_booleans_coerced() {
        let mut out = Settings::new();
        collect_settings(&json!({"enabled": "FALSE"}), &SPECS, &mut out);
        assert!(!out.flag("enabled"));
    }

    #[test]
    fn test_malformed_keeps_default() {
        let mut out = Settings::new();
        collect_settings(
            &json!({"enabled": "maybe", "count": "x", "mode": "table"}),
            &SPECS,
            &mut out,
        );
        assert!(out.flag("enabled"));
        assert_eq!(out.get("count"), Some(&SettingValue::Int(3)));
        assert_eq!(out.get("mode").and_then(|v| v.as_text()), Some(""));
    }

    #[test]
    fn test_dom_attributes() {
        let el = Element::new("div")
            .with_attribute("data-ex-enabled", "false")
            .with_attribute("ex:count", " 12 ");
        let mut out = Settings::new();
        collect_settings_from_dom(&el, &SPECS, &mut out);
        assert!(!out.flag("enabled"));
        assert_eq!(out.get("count"), Some(&SettingValue::Int(12)));
        assert_eq!(out.get("ratio"), Some(&SettingValue::Float(0.5)));
    }

    #[test]
    fn test_sources_layer() {
        let el = Element::new("div").with_attribute("ex:count", "5");
        let mut out = Settings::new();
        collect_settings(&json!({"enabled": false, "count": 1}), &SPECS, &mut out);
        collect_settings_from_dom(&el, &SPECS, &mut out);
        assert!(!out.flag("enabled"));
        assert_eq!(out.get("count"), Some(&SettingValue::Int(5)));
    }

    #[test]
    fn test_configuration_from_dom() {
        let el = Element::new("div").with_attribute("data-ex-configuration", r#"{"a": 1}"#);
        assert_eq!(get_configuration_from_dom(&el), json!({"a": 1}));

        let el = Element::new("div").with_attribute("ex:configuration", "not json");
        assert_eq!(get_configuration_from_dom(&el), json!({}));

        assert_eq!(get_configuration_from_dom(&Element::new("div")), json!({}));
    }
}
