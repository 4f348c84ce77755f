//! Shared error type across rrdemo crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, DemoError>;

/// Unified error type used by core and node.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("invalid config: {0}")]
    Config(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialize: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("internal: {0}")]
    Internal(String),
}

impl DemoError {
    /// Short stable label, used for metrics and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            DemoError::Config(_) => "config",
            DemoError::Io(_) => "io",
            DemoError::Serialize(_) => "serialize",
            DemoError::Internal(_) => "internal",
        }
    }
}
