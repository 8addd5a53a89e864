// Chunk: docs/chunks/surface_model - Presentation types and text surface collaborators
//!
//! Collaborator traits for the host's text widget and ruler.
//!
//! The host implements these over its real widgets (an `NSTextView` and its
//! `NSRulerView`, a GTK `TextView` and gutter, ...). Every call is made on the
//! UI thread from inside a single reconciliation pass, so implementations
//! never see a half-applied state between two calls from different passes.

use std::ops::Range;

use crate::style::{Attributes, Color};
use crate::types::TextEdit;

/// Surface-wide colors that are not attached to any run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceAppearance {
    pub background: Color,
    pub insertion_point: Color,
    pub selection: Color,
    pub line_highlight: Color,
    pub invisibles: Color,
}

/// The mutable text/attribute store of the host's editing widget.
///
/// Ranges are byte ranges into [`text`](TextSurface::text). Implementations
/// clamp ranges to the text length.
///
/// Text mutations made by the user are reported back by the host calling the
/// controller's `text_did_change` with the [`TextEdit`] that happened. Edits
/// made through [`insert_at_caret`](TextSurface::insert_at_caret) are returned
/// to the caller instead and must not be reported a second time.
pub trait TextSurface {
    /// Returns the current text.
    fn text(&self) -> &str;

    /// Replaces the whole text. Existing attributes are discarded.
    fn set_text(&mut self, text: &str);

    /// Replaces every attribute over `range` with `attributes`.
    fn set_attributes(&mut self, range: Range<usize>, attributes: &Attributes);

    /// Overlays the specified fields of `attributes` over `range`.
    fn add_attributes(&mut self, range: Range<usize>, attributes: &Attributes);

    /// Inserts `text` at the caret, moving the caret past it.
    fn insert_at_caret(&mut self, text: &str) -> TextEdit;

    /// Applies the surface-wide colors.
    fn set_appearance(&mut self, appearance: &SurfaceAppearance);

    /// Invalidates the whole visible area so layout and glyphs are redone.
    fn reload_display(&mut self);
}

/// The line-number ruler drawn beside the text surface.
pub trait RulerView {
    fn set_background_color(&mut self, color: Color);
    fn set_separator_color(&mut self, color: Color);
    /// Keeps line numbers aligned with the body text baseline.
    fn set_baseline_offset(&mut self, offset: f64);
}
