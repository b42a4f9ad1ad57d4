//! Error types for panel construction and registry membership

use thiserror::Error;

/// Failures surfaced to callers of panel and UI-context constructors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    /// The registry has no namespace for this key (bootstrap has not run)
    #[error("no registry namespace for key `{0}`")]
    UnknownRegistry(String),

    /// A component already occupies this slot
    #[error("`{id}` is already registered under `{key}`")]
    AlreadyRegistered { key: String, id: String },

    /// Configuration named a collection the exhibit does not have
    #[error("unknown collection `{0}`")]
    UnknownCollection(String),

    /// The object was disposed and is inert
    #[error("operation on a disposed component")]
    Disposed,
}

pub type Result<T> = std::result::Result<T, PanelError>;
