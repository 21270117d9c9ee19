//! Error types for the TUI.

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum TuiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Catalog client setup failed: {0}")]
    Catalog(String),
    #[error("Logging setup failed: {0}")]
    Logging(String),
}
