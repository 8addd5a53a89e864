// Chunk: docs/chunks/parse_state - Tree-sitter grammars, themes and parse state

//! quill-syntax: tree-sitter parse state and themes for quill.
//!
//! # Overview
//!
//! The main types are:
//!
//! - [`ParseStateManager`]: owns the parser, highlight query and tree for the
//!   active [`Language`]; reparses incrementally after each [`TextEdit`].
//!
//! - [`GrammarProvider`] / [`LanguageRegistry`]: hand out parsers and compiled
//!   highlight queries by language identifier.
//!
//! - [`Theme`]: surface colors by role plus highlight styles by capture name.
//!   Catppuccin Mocha and Latte are built in.
//!
//! # Example
//!
//! ```
//! use quill_syntax::{Language, LanguageRegistry, ParseStateManager, Theme};
//!
//! let registry = LanguageRegistry::new();
//! let source = "fn main() {}";
//! let manager = ParseStateManager::new(Language::new("rust"), source, &registry);
//! let theme = Theme::catppuccin_mocha();
//!
//! for highlight in manager.highlights(0..source.len()) {
//!     let _style = theme.resolve_capture(highlight.name);
//! }
//! ```
//!
//! [`TextEdit`]: quill_surface::TextEdit

mod edit;
mod error;
mod highlighter;
mod language;
mod parse_state;
mod registry;
mod theme;

pub use edit::{input_edit, point_at};
pub use error::{GrammarError, ThemeError};
pub use highlighter::{collect_highlights, Highlight};
pub use language::Language;
pub use parse_state::{ParseState, ParseStateManager, Reparse};
pub use registry::{GrammarProvider, LanguageConfig, LanguageRegistry};
pub use theme::{HighlightDefinition, RoleDefinitions, Theme, ThemeColors, ThemeDefinition, ThemeRole};
