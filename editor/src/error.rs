use std::path::PathBuf;

use seed_core::abstract_editor::EditActionError;
use thiserror::Error;

/// Editor error type
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Failed to read {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Script error at line {line}: {message}")]
    Script { line: usize, message: String },
    #[error("Action failed: {0}")]
    Action(#[from] EditActionError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for editor operations
pub type EditorResult<T = ()> = Result<T, EditorError>;
