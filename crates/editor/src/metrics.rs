// Chunk: docs/chunks/line_metrics - Line height and baseline metrics
//!
//! Line metrics derived from a font and a line-height multiple.
//!
//! The surface draws each line in a box `computed_line_height` tall. The
//! glyphs keep the font's natural height, so they are nudged down by half
//! the extra space to sit centered in the box:
//!
//! ```text
//! computed_line_height = font_line_height * line_height_multiple
//! baseline_offset      = (computed_line_height - font_line_height) / 2
//! ```
//!
//! Metrics are never cached: they are recomputed whenever the font or the
//! multiple changes.

use quill_surface::Font;

/// Vertical metrics for laying out lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// The font's natural line height (ascent + descent + leading)
    pub font_line_height: f64,
    pub line_height_multiple: f64,
    /// Height of each line box
    pub computed_line_height: f64,
    /// How far glyphs are moved within the line box
    pub baseline_offset: f64,
}

/// Computes line metrics. Pure and total.
pub fn compute_metrics(font: &Font, line_height_multiple: f64) -> Metrics {
    let font_line_height = font.line_height();
    let computed_line_height = font_line_height * line_height_multiple;
    Metrics {
        font_line_height,
        line_height_multiple,
        computed_line_height,
        baseline_offset: (computed_line_height - font_line_height) / 2.0,
    }
}
