//! Command-line argument parsing for the demo binary
//!
//! Supports:
//! - Loading panel options from a YAML file
//! - Overriding individual options with flags
//! - Replaying pointer positions against the panel's hover behavior

use std::path::PathBuf;

use clap::Parser;
use serde_json::Value;

use crate::config::PanelConfig;
use crate::geometry::Rect;

/// Build a control panel and replay pointer movement against it
#[derive(Parser, Debug)]
#[command(name = "control-panel", version, about = "Control panel demo")]
pub struct CliArgs {
    /// Panel configuration file (defaults to the user config file)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Hide the panel until the pointer hovers over it
    #[arg(long)]
    pub hover_reveal: bool,

    /// Add the reset-history widget
    #[arg(long)]
    pub developer_mode: bool,

    /// Do not add the toolbox widget
    #[arg(long)]
    pub no_toolbox: bool,

    /// Do not add the bookmark widget
    #[arg(long)]
    pub no_bookmark: bool,

    /// Container id (otherwise one is generated)
    #[arg(long, value_name = "ID")]
    pub id: Option<String>,

    /// Container bounds in page coordinates
    #[arg(long, value_name = "L,T,W,H", value_parser = parse_bounds, default_value = "0,0,200,40")]
    pub bounds: Rect,

    /// Pointer position to replay; repeat for a path
    #[arg(long = "pointer", value_name = "X,Y", value_parser = parse_point)]
    pub pointers: Vec<(f32, f32)>,
}

impl CliArgs {
    /// Merge flags over the file configuration
    pub fn configuration(&self, base: &PanelConfig) -> Value {
        let mut config = base.clone();
        if self.hover_reveal {
            config.hover_reveal = Some(true);
        }
        if self.developer_mode {
            config.developer_mode = Some(true);
        }
        if self.no_toolbox {
            config.show_toolbox = Some(false);
        }
        if self.no_bookmark {
            config.show_bookmark = Some(false);
        }
        config.to_configuration()
    }
}

fn parse_numbers(raw: &str, expected: usize) -> Result<Vec<f32>, String> {
    let numbers = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f32>()
                .map_err(|e| format!("invalid number {:?}: {}", part, e))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if numbers.len() != expected {
        return Err(format!(
            "expected {} comma-separated numbers, got {}",
            expected,
            numbers.len()
        ));
    }
    Ok(numbers)
}

fn parse_bounds(raw: &str) -> Result<Rect, String> {
    let n = parse_numbers(raw, 4)?;
    Ok(Rect::new(n[0], n[1], n[2], n[3]))
}

fn parse_point(raw: &str) -> Result<(f32, f32), String> {
    let n = parse_numbers(raw, 2)?;
    Ok((n[0], n[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("control-panel").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert!(args.config.is_none());
        assert_eq!(args.bounds, Rect::new(0.0, 0.0, 200.0, 40.0));
        assert!(args.pointers.is_empty());
        assert_eq!(args.configuration(&PanelConfig::default()), json!({}));
    }

    #[test]
    fn test_pointer_path() {
        let args = parse(&["--pointer", "1,2", "--pointer", "3.5, 4"]);
        assert_eq!(args.pointers, vec![(1.0, 2.0), (3.5, 4.0)]);
    }

    #[test]
    fn test_bad_bounds_rejected() {
        assert!(CliArgs::try_parse_from(["control-panel", "--bounds", "1,2,3"]).is_err());
        assert!(CliArgs::try_parse_from(["control-panel", "--bounds", "a,b,c,d"]).is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let base = PanelConfig {
            show_toolbox: Some(true),
            hover_reveal: Some(false),
            ..Default::default()
        };
        let args = parse(&["--hover-reveal", "--no-toolbox"]);
        assert_eq!(
            args.configuration(&base),
            json!({"showToolbox": false, "hoverReveal": true})
        );
    }
}
