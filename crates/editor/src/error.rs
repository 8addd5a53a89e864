// Chunk: docs/chunks/editor_config - Editor configuration and theme loading

use std::path::PathBuf;

use quill_syntax::ThemeError;
use thiserror::Error;

/// A configuration that cannot produce a working controller.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tab width must be at least 1")]
    InvalidTabWidth,

    #[error("line height multiple must be a positive number, got {0}")]
    InvalidLineHeightMultiple(f64),

    #[error("invalid font: {reason}")]
    InvalidFont { reason: String },

    #[error("unknown theme '{0}'")]
    UnknownTheme(String),

    #[error(transparent)]
    Theme(#[from] ThemeError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors returned by the editor's public entry points.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::InvalidLineHeightMultiple(-1.0).to_string(),
            "line height multiple must be a positive number, got -1"
        );
        assert_eq!(ConfigError::UnknownTheme("neon".into()).to_string(), "unknown theme 'neon'");
    }

    #[test]
    fn test_editor_error_wraps_config() {
        let err: EditorError = ConfigError::InvalidTabWidth.into();
        assert_eq!(err.to_string(), "configuration error: tab width must be at least 1");
    }
}
