// Chunk: docs/chunks/style_applicator - Writing theme and syntax attributes to the surface
//!
//! Style application.
//!
//! A style pass over a range happens in two layers:
//!
//! 1. Base attributes replace everything in the range: font, text color,
//!    regular weight and slant, baseline offset and line height.
//! 2. Each highlight in the range overlays its capture's color, weight and
//!    slant. Captures the theme has no style for get the text color.
//!
//! A full pass also writes the surface-wide appearance and restyles the
//! ruler. Passes only depend on their inputs, so repeating one with the same
//! theme, metrics and parse state leaves the surface unchanged.

use std::ops::Range;

use quill_surface::{Attributes, Font, RulerView, TextSurface};
use quill_syntax::{ParseStateManager, Theme};

use crate::metrics::Metrics;

/// The attributes every character starts from before highlighting.
pub fn base_attributes(theme: &Theme, font: &Font, metrics: &Metrics) -> Attributes {
    Attributes {
        font: Some(font.clone()),
        foreground: Some(theme.colors.text),
        bold: Some(false),
        italic: Some(false),
        baseline_offset: Some(metrics.baseline_offset),
        line_height: Some(metrics.computed_line_height),
    }
}

/// Writes presentation attributes onto the text surface and ruler.
#[derive(Debug, Default)]
pub struct StyleApplicator {
    full_passes: usize,
    range_passes: usize,
}

impl StyleApplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Styles the whole document, the surface appearance and the ruler.
    pub fn apply_full_style(
        &mut self,
        surface: &mut dyn TextSurface,
        ruler: &mut dyn RulerView,
        theme: &Theme,
        font: &Font,
        metrics: &Metrics,
        parse: &ParseStateManager,
    ) {
        self.full_passes += 1;
        surface.set_appearance(&theme.appearance());

        let len = surface.text().len();
        let highlighted = paint(surface, theme, font, metrics, parse, 0..len);

        ruler.set_background_color(theme.colors.background);
        ruler.set_separator_color(theme.colors.editor_separator);
        ruler.set_baseline_offset(metrics.baseline_offset);

        tracing::debug!(
            theme = theme.name(),
            language = %parse.language(),
            bytes = len,
            highlights = highlighted,
            "applied full style"
        );
    }

    /// Restyles `range` only, leaving the appearance and ruler alone.
    ///
    /// Produces the same attributes over `range` that a full pass would, as
    /// long as `range` starts and ends on line boundaries.
    pub fn apply_range_style(
        &mut self,
        surface: &mut dyn TextSurface,
        theme: &Theme,
        font: &Font,
        metrics: &Metrics,
        parse: &ParseStateManager,
        range: Range<usize>,
    ) {
        self.range_passes += 1;
        let highlighted = paint(surface, theme, font, metrics, parse, range.clone());
        tracing::trace!(?range, highlights = highlighted, "applied range style");
    }

    /// Number of full passes run so far.
    pub fn full_passes(&self) -> usize {
        self.full_passes
    }

    /// Number of range passes run so far.
    pub fn range_passes(&self) -> usize {
        self.range_passes
    }
}

/// Resets `range` to base attributes and overlays its highlights.
/// Returns the number of highlights applied.
fn paint(
    surface: &mut dyn TextSurface,
    theme: &Theme,
    font: &Font,
    metrics: &Metrics,
    parse: &ParseStateManager,
    range: Range<usize>,
) -> usize {
    surface.set_attributes(range.clone(), &base_attributes(theme, font, metrics));

    let highlights = parse.highlights(range);
    for highlight in &highlights {
        let style = theme.resolve_capture(highlight.name);
        surface.add_attributes(highlight.range.clone(), &Attributes::from_style(&style));
    }
    highlights.len()
}
