// Chunk: docs/chunks/surface_model - Presentation types and text surface collaborators

use crate::style::Color;
use crate::surface::RulerView;

/// An in-memory [`RulerView`] that records what was set on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RulerState {
    pub background: Option<Color>,
    pub separator: Option<Color>,
    pub baseline_offset: f64,
    /// Number of setter calls received
    pub updates: usize,
}

impl RulerState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RulerView for RulerState {
    fn set_background_color(&mut self, color: Color) {
        self.background = Some(color);
        self.updates += 1;
    }

    fn set_separator_color(&mut self, color: Color) {
        self.separator = Some(color);
        self.updates += 1;
    }

    fn set_baseline_offset(&mut self, offset: f64) {
        self.baseline_offset = offset;
        self.updates += 1;
    }
}
