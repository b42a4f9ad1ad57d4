//! Control panel - hover-revealed holder for exhibit-wide controls
//!
//! This crate provides the control panel component of an exhibit-style
//! presentation framework: a container that hosts pluggable widgets, keeps a
//! slot in the exhibit's component registry, and can hide itself until the
//! pointer hovers over it.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod dom;
pub mod error;
pub mod exhibit;
pub mod geometry;
pub mod panel;
pub mod registry;
pub mod settings;
pub mod tracing;
pub mod ui_context;
pub mod widgets;

// Re-export commonly used types
pub use dom::{Document, Element, PointerEvent};
pub use error::PanelError;
pub use exhibit::Exhibit;
pub use panel::{ControlPanel, PanelLink, RevealState};
pub use registry::Registry;
pub use ui_context::UiContext;
