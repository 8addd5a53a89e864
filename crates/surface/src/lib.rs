// Chunk: docs/chunks/surface_model - Presentation types and text surface collaborators

//! quill-surface: the presentation side of the quill editing core.
//!
//! This crate describes what the reconciliation engine writes to, without
//! owning any of it. The text widget, its line-number ruler, and the fonts
//! they render with all live in the host application; quill only sees them
//! through two small traits.
//!
//! # Overview
//!
//! - [`TextSurface`]: the mutable text/attribute store of the host widget.
//! - [`RulerView`]: the companion line-number view.
//! - [`Attributes`]: a partial set of display attributes applied over a byte range.
//! - [`Color`], [`Font`], [`Style`]: the values those attributes are made of.
//!
//! In-memory implementations ([`AttributedBuffer`], [`RulerState`]) are
//! provided so the engine can run headless and be tested without a GUI.
//!
//! # Example
//!
//! ```
//! use quill_surface::{Attributes, AttributedBuffer, Color, TextSurface};
//!
//! let mut surface = AttributedBuffer::new("let x = 1;");
//! let red = Color::rgb(0xf3, 0x8b, 0xa8);
//! surface.add_attributes(0..3, &Attributes::foreground(red));
//!
//! assert_eq!(surface.attributes_at(0).and_then(|a| a.foreground), Some(red));
//! assert_eq!(surface.attributes_at(4).and_then(|a| a.foreground), None);
//! ```

mod attributed_buffer;
mod ruler;
mod style;
mod surface;
mod types;

pub use attributed_buffer::AttributedBuffer;
pub use ruler::RulerState;
pub use style::{Attributes, Color, ColorParseError, Font, Style};
pub use surface::{RulerView, SurfaceAppearance, TextSurface};
pub use types::{expand_to_lines, TextEdit};
