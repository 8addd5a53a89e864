// Chunk: docs/chunks/parse_state - Tree-sitter grammars, themes and parse state

use quill_surface::ColorParseError;
use thiserror::Error;

use crate::theme::ThemeRole;

/// Why a grammar or highlight query could not be provided for a language.
///
/// These never abort reconciliation: the parse state manager logs them and
/// falls back to unhighlighted text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("no grammar registered for language '{0}'")]
    UnknownLanguage(String),

    #[error("grammar for '{language}' is incompatible with this tree-sitter: {message}")]
    IncompatibleGrammar { language: String, message: String },

    #[error("highlight query for '{language}' does not compile: {message}")]
    InvalidQuery { language: String, message: String },

    #[error("parser for '{0}' produced no tree")]
    ParseFailed(String),
}

/// A theme definition that cannot be turned into a usable theme.
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("theme is missing required color '{0}'")]
    MissingRole(ThemeRole),

    #[error("theme color for '{key}' is invalid: {source}")]
    InvalidColor {
        key: String,
        #[source]
        source: ColorParseError,
    },

    #[error("theme JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
