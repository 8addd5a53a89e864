// Chunk: docs/chunks/reconciliation - Dependency reconciliation for the text surface
//!
//! quill: keeps a code-editing surface styled for its language, theme and font.
//!
//! The host owns the real text widget, ruler and key monitor and hands them
//! to a [`ReconciliationController`] through the traits in `quill-surface`
//! and `quill-input`. The controller then:
//!
//! - rebuilds the tree-sitter parse state when the language changes
//! - recomputes [`Metrics`] when the font or line-height multiple changes
//! - restyles the surface and ruler when any of them change
//! - restyles only the affected lines after a text edit
//! - expands tab presses into spaces through its input interceptor
//!
//! ```
//! use quill::{EditorConfig, ReconciliationController};
//! use quill_surface::{AttributedBuffer, RulerState, TextSurface};
//! use quill_syntax::{Language, LanguageRegistry, Theme};
//!
//! let config = EditorConfig::new(
//!     "fn main() {}\n",
//!     Language::new("rust"),
//!     Theme::catppuccin_mocha(),
//!     quill::default_font(),
//! );
//! let mut controller = ReconciliationController::new(
//!     config,
//!     AttributedBuffer::new(""),
//!     RulerState::new(),
//!     LanguageRegistry::new(),
//! )
//! .unwrap();
//!
//! controller.set_theme(Theme::catppuccin_latte());
//! assert_eq!(controller.surface().text(), "fn main() {}\n");
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod render;
pub mod style;

pub use config::{default_font, ConfigFile, EditorConfig, ThemeSetting};
pub use controller::{plan, ReconcileAction, ReconcilePlan, ReconcileReport, ReconciliationController, SlotChange, Slots};
pub use error::{ConfigError, EditorError, Result};
pub use metrics::{compute_metrics, Metrics};
pub use style::{base_attributes, StyleApplicator};
