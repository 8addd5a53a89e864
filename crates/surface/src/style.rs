// Chunk: docs/chunks/surface_model - Presentation types and text surface collaborators
//!
//! Display attribute values.
//!
//! Everything the engine can say about how a run of text looks is expressed
//! with the types in this module:
//! - [`Color`]: a 24-bit RGB color, serialized as `#rrggbb`
//! - [`Font`]: a font face with the metrics needed for line layout
//! - [`Style`]: the look of one highlight capture (color plus weight/slant)
//! - [`Attributes`]: a partial attribute set applied over a range

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Color
// =============================================================================

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Error returned when a color string is not of the form `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{value}': expected #rrggbb")]
pub struct ColorParseError {
    pub value: String,
}

impl Color {
    /// Creates a color from its components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#rrggbb` (or `rrggbb`) hex string.
    ///
    /// ```
    /// use quill_surface::Color;
    ///
    /// assert_eq!(Color::from_hex("#cba6f7").unwrap(), Color::rgb(0xcb, 0xa6, 0xf7));
    /// assert!(Color::from_hex("#cba6").is_err());
    /// ```
    pub fn from_hex(value: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError {
            value: value.to_string(),
        };
        let digits = value.strip_prefix('#').unwrap_or(value);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(err());
        }
        let component = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| err());
        Ok(Self {
            r: component(0)?,
            g: component(2)?,
            b: component(4)?,
        })
    }

    /// Formats the color as a lowercase `#rrggbb` string.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

// =============================================================================
// Font
// =============================================================================

/// A font face and the vertical metrics the host measured for it.
///
/// The host loads the real font (Core Text, fontconfig, ...) and reports its
/// metrics here; quill never rasterizes anything itself. All metrics are in
/// the same units as `point_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Face name as the host understands it (e.g., "Menlo-Regular")
    pub name: String,
    /// Point size
    pub point_size: f64,
    /// Distance from baseline to top of glyph (positive)
    pub ascent: f64,
    /// Distance from baseline to bottom of glyph (positive)
    pub descent: f64,
    /// Extra spacing between lines
    #[serde(default)]
    pub leading: f64,
}

impl Font {
    pub fn new(name: impl Into<String>, point_size: f64, ascent: f64, descent: f64, leading: f64) -> Self {
        Self {
            name: name.into(),
            point_size,
            ascent,
            descent,
            leading,
        }
    }

    /// Natural height of a line set in this font: ascent + descent + leading.
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }

    /// Returns the same face at another size, scaling metrics proportionally.
    pub fn with_point_size(&self, point_size: f64) -> Self {
        let scale = if self.point_size == 0.0 {
            0.0
        } else {
            point_size / self.point_size
        };
        Self {
            name: self.name.clone(),
            point_size,
            ascent: self.ascent * scale,
            descent: self.descent * scale,
            leading: self.leading * scale,
        }
    }
}

// =============================================================================
// Style
// =============================================================================

/// How text matched by one highlight capture is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Foreground color.
    pub foreground: Color,
    /// Bold weight.
    pub bold: bool,
    /// Italic slant.
    pub italic: bool,
}

impl Style {
    /// A plain style with just a foreground color.
    pub const fn color(foreground: Color) -> Self {
        Self {
            foreground,
            bold: false,
            italic: false,
        }
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

// =============================================================================
// Attributes
// =============================================================================

/// A partial set of display attributes.
///
/// `None` means "not specified". Applying attributes with
/// [`TextSurface::add_attributes`](crate::TextSurface::add_attributes)
/// only overwrites the fields that are `Some`; applying them with
/// [`TextSurface::set_attributes`](crate::TextSurface::set_attributes)
/// replaces everything in the range.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attributes {
    pub font: Option<Font>,
    pub foreground: Option<Color>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    /// Vertical nudge of the glyph baseline within the line box.
    pub baseline_offset: Option<f64>,
    /// Fixed height of each line box.
    pub line_height: Option<f64>,
}

impl Attributes {
    /// Attributes carrying only a foreground color.
    pub fn foreground(color: Color) -> Self {
        Self {
            foreground: Some(color),
            ..Self::default()
        }
    }

    /// Attributes carrying a highlight style's color, weight and slant.
    pub fn from_style(style: &Style) -> Self {
        Self {
            foreground: Some(style.foreground),
            bold: Some(style.bold),
            italic: Some(style.italic),
            ..Self::default()
        }
    }

    /// Returns true if no attribute is specified.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlays every specified field of `other` onto `self`.
    pub fn merge(&mut self, other: &Attributes) {
        if let Some(font) = &other.font {
            self.font = Some(font.clone());
        }
        if other.foreground.is_some() {
            self.foreground = other.foreground;
        }
        if other.bold.is_some() {
            self.bold = other.bold;
        }
        if other.italic.is_some() {
            self.italic = other.italic;
        }
        if other.baseline_offset.is_some() {
            self.baseline_offset = other.baseline_offset;
        }
        if other.line_height.is_some() {
            self.line_height = other.line_height;
        }
    }
}
