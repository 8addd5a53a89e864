// Chunk: docs/chunks/parse_state - Tree-sitter grammars, themes and parse state
//!
//! Editor themes.
//!
//! A [`Theme`] has two parts:
//! - surface roles (text, background, insertion point, ...) that every theme
//!   must define, stored in [`ThemeColors`]
//! - highlight styles keyed by tree-sitter capture name
//!
//! Capture names are matched exactly. A capture with no style of its own is
//! drawn in the theme's text color, so a sparse theme still renders every
//! character.
//!
//! Themes are either built in (Catppuccin Mocha and Latte) or loaded from a
//! JSON definition:
//!
//! ```json
//! {
//!   "name": "my-theme",
//!   "colors": {
//!     "text": "#cdd6f4", "background": "#1e1e2e", "insertion_point": "#f5e0dc",
//!     "selection": "#585b70", "line_highlight": "#313244",
//!     "invisibles": "#6c7086", "editor_separator": "#45475a"
//!   },
//!   "highlights": {
//!     "keyword": "#cba6f7",
//!     "comment": { "color": "#6c7086", "italic": true }
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::fmt;

use quill_surface::{Color, Style, SurfaceAppearance};
use serde::Deserialize;

use crate::error::ThemeError;

// =============================================================================
// Roles
// =============================================================================

/// The surface-wide color roles a theme must define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeRole {
    Text,
    Background,
    InsertionPoint,
    Selection,
    LineHighlight,
    Invisibles,
    EditorSeparator,
}

impl ThemeRole {
    pub const ALL: [ThemeRole; 7] = [
        ThemeRole::Text,
        ThemeRole::Background,
        ThemeRole::InsertionPoint,
        ThemeRole::Selection,
        ThemeRole::LineHighlight,
        ThemeRole::Invisibles,
        ThemeRole::EditorSeparator,
    ];

    /// The key used for this role in theme definitions.
    pub fn key(&self) -> &'static str {
        match self {
            ThemeRole::Text => "text",
            ThemeRole::Background => "background",
            ThemeRole::InsertionPoint => "insertion_point",
            ThemeRole::Selection => "selection",
            ThemeRole::LineHighlight => "line_highlight",
            ThemeRole::Invisibles => "invisibles",
            ThemeRole::EditorSeparator => "editor_separator",
        }
    }
}

impl fmt::Display for ThemeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One color per [`ThemeRole`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub text: Color,
    pub background: Color,
    pub insertion_point: Color,
    pub selection: Color,
    pub line_highlight: Color,
    pub invisibles: Color,
    pub editor_separator: Color,
}

impl ThemeColors {
    pub fn get(&self, role: ThemeRole) -> Color {
        match role {
            ThemeRole::Text => self.text,
            ThemeRole::Background => self.background,
            ThemeRole::InsertionPoint => self.insertion_point,
            ThemeRole::Selection => self.selection,
            ThemeRole::LineHighlight => self.line_highlight,
            ThemeRole::Invisibles => self.invisibles,
            ThemeRole::EditorSeparator => self.editor_separator,
        }
    }
}

// =============================================================================
// Theme
// =============================================================================

/// A complete editor theme.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    name: String,
    pub colors: ThemeColors,
    highlights: HashMap<String, Style>,
}

impl Theme {
    pub fn new(name: impl Into<String>, colors: ThemeColors) -> Self {
        Self {
            name: name.into(),
            colors,
            highlights: HashMap::new(),
        }
    }

    /// Adds a highlight style for a capture name.
    pub fn with_highlight(mut self, capture: impl Into<String>, style: Style) -> Self {
        self.highlights.insert(capture.into(), style);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the style defined for exactly this capture name.
    pub fn style_for_capture(&self, capture: &str) -> Option<&Style> {
        self.highlights.get(capture)
    }

    /// Returns the style to draw a capture with, falling back to the text color.
    pub fn resolve_capture(&self, capture: &str) -> Style {
        self.style_for_capture(capture)
            .copied()
            .unwrap_or(Style::color(self.colors.text))
    }

    /// Iterates over the capture names this theme styles.
    pub fn highlight_names(&self) -> impl Iterator<Item = &str> {
        self.highlights.keys().map(String::as_str)
    }

    /// The surface-wide colors of this theme.
    pub fn appearance(&self) -> SurfaceAppearance {
        SurfaceAppearance {
            background: self.colors.background,
            insertion_point: self.colors.insertion_point,
            selection: self.colors.selection,
            line_highlight: self.colors.line_highlight,
            invisibles: self.colors.invisibles,
        }
    }

    /// Names accepted by [`Theme::builtin`].
    pub const BUILTIN_NAMES: [&'static str; 2] = ["catppuccin-mocha", "catppuccin-latte"];

    /// Looks up a built-in theme by name.
    pub fn builtin(name: &str) -> Option<Theme> {
        match name.trim().to_lowercase().as_str() {
            "catppuccin-mocha" | "mocha" => Some(Self::catppuccin_mocha()),
            "catppuccin-latte" | "latte" => Some(Self::catppuccin_latte()),
            _ => None,
        }
    }

    /// Catppuccin Mocha, the default dark theme.
    pub fn catppuccin_mocha() -> Self {
        catppuccin("catppuccin-mocha", &MOCHA)
    }

    /// Catppuccin Latte, the light counterpart of Mocha.
    pub fn catppuccin_latte() -> Self {
        catppuccin("catppuccin-latte", &LATTE)
    }

    /// Parses a JSON theme definition.
    pub fn from_json(json: &str) -> Result<Self, ThemeError> {
        let definition: ThemeDefinition = serde_json::from_str(json)?;
        definition.into_theme()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::catppuccin_mocha()
    }
}

// =============================================================================
// Definitions
// =============================================================================

/// A theme as written in a JSON file, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeDefinition {
    pub name: String,
    pub colors: RoleDefinitions,
    #[serde(default)]
    pub highlights: HashMap<String, HighlightDefinition>,
}

/// Role colors as written; any of them may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleDefinitions {
    pub text: Option<String>,
    pub background: Option<String>,
    pub insertion_point: Option<String>,
    pub selection: Option<String>,
    pub line_highlight: Option<String>,
    pub invisibles: Option<String>,
    pub editor_separator: Option<String>,
}

impl RoleDefinitions {
    fn value(&self, role: ThemeRole) -> Option<&str> {
        let value = match role {
            ThemeRole::Text => &self.text,
            ThemeRole::Background => &self.background,
            ThemeRole::InsertionPoint => &self.insertion_point,
            ThemeRole::Selection => &self.selection,
            ThemeRole::LineHighlight => &self.line_highlight,
            ThemeRole::Invisibles => &self.invisibles,
            ThemeRole::EditorSeparator => &self.editor_separator,
        };
        value.as_deref()
    }

    fn resolve(&self, role: ThemeRole) -> Result<Color, ThemeError> {
        let value = self.value(role).ok_or(ThemeError::MissingRole(role))?;
        parse_color(role.key(), value)
    }
}

/// A highlight entry: either a bare color or a color with font traits.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HighlightDefinition {
    Color(String),
    Style {
        color: String,
        #[serde(default)]
        bold: bool,
        #[serde(default)]
        italic: bool,
    },
}

impl HighlightDefinition {
    fn to_style(&self, capture: &str) -> Result<Style, ThemeError> {
        match self {
            HighlightDefinition::Color(color) => Ok(Style::color(parse_color(capture, color)?)),
            HighlightDefinition::Style { color, bold, italic } => Ok(Style {
                foreground: parse_color(capture, color)?,
                bold: *bold,
                italic: *italic,
            }),
        }
    }
}

fn parse_color(key: &str, value: &str) -> Result<Color, ThemeError> {
    Color::from_hex(value).map_err(|source| ThemeError::InvalidColor {
        key: key.to_string(),
        source,
    })
}

impl ThemeDefinition {
    /// Validates the definition, requiring every role to have a color.
    pub fn into_theme(self) -> Result<Theme, ThemeError> {
        let roles = &self.colors;
        let colors = ThemeColors {
            text: roles.resolve(ThemeRole::Text)?,
            background: roles.resolve(ThemeRole::Background)?,
            insertion_point: roles.resolve(ThemeRole::InsertionPoint)?,
            selection: roles.resolve(ThemeRole::Selection)?,
            line_highlight: roles.resolve(ThemeRole::LineHighlight)?,
            invisibles: roles.resolve(ThemeRole::Invisibles)?,
            editor_separator: roles.resolve(ThemeRole::EditorSeparator)?,
        };

        let highlights = self
            .highlights
            .iter()
            .map(|(name, def)| Ok((name.clone(), def.to_style(name)?)))
            .collect::<Result<HashMap<_, _>, ThemeError>>()?;

        Ok(Theme {
            name: self.name,
            colors,
            highlights,
        })
    }
}

// =============================================================================
// Catppuccin
// =============================================================================

/// The subset of a Catppuccin flavor quill uses.
struct Palette {
    text: Color,
    subtext0: Color,
    overlay0: Color,
    surface0: Color,
    surface1: Color,
    surface2: Color,
    base: Color,
    rosewater: Color,
    mauve: Color,
    red: Color,
    maroon: Color,
    peach: Color,
    yellow: Color,
    green: Color,
    sky: Color,
    sapphire: Color,
    blue: Color,
    lavender: Color,
    pink: Color,
}

const MOCHA: Palette = Palette {
    text: Color::rgb(0xcd, 0xd6, 0xf4),
    subtext0: Color::rgb(0xa6, 0xad, 0xc8),
    overlay0: Color::rgb(0x6c, 0x70, 0x86),
    surface0: Color::rgb(0x31, 0x32, 0x44),
    surface1: Color::rgb(0x45, 0x47, 0x5a),
    surface2: Color::rgb(0x58, 0x5b, 0x70),
    base: Color::rgb(0x1e, 0x1e, 0x2e),
    rosewater: Color::rgb(0xf5, 0xe0, 0xdc),
    mauve: Color::rgb(0xcb, 0xa6, 0xf7),
    red: Color::rgb(0xf3, 0x8b, 0xa8),
    maroon: Color::rgb(0xeb, 0xa0, 0xac),
    peach: Color::rgb(0xfa, 0xb3, 0x87),
    yellow: Color::rgb(0xf9, 0xe2, 0xaf),
    green: Color::rgb(0xa6, 0xe3, 0xa1),
    sky: Color::rgb(0x89, 0xdc, 0xeb),
    sapphire: Color::rgb(0x74, 0xc7, 0xec),
    blue: Color::rgb(0x89, 0xb4, 0xfa),
    lavender: Color::rgb(0xb4, 0xbe, 0xfe),
    pink: Color::rgb(0xf5, 0xc2, 0xe7),
};

const LATTE: Palette = Palette {
    text: Color::rgb(0x4c, 0x4f, 0x69),
    subtext0: Color::rgb(0x6c, 0x6f, 0x85),
    overlay0: Color::rgb(0x9c, 0xa0, 0xb0),
    surface0: Color::rgb(0xcc, 0xd0, 0xda),
    surface1: Color::rgb(0xbc, 0xc0, 0xcc),
    surface2: Color::rgb(0xac, 0xb0, 0xbe),
    base: Color::rgb(0xef, 0xf1, 0xf5),
    rosewater: Color::rgb(0xdc, 0x8a, 0x78),
    mauve: Color::rgb(0x88, 0x39, 0xef),
    red: Color::rgb(0xd2, 0x0f, 0x39),
    maroon: Color::rgb(0xe6, 0x45, 0x53),
    peach: Color::rgb(0xfe, 0x64, 0x0b),
    yellow: Color::rgb(0xdf, 0x8e, 0x1d),
    green: Color::rgb(0x40, 0xa0, 0x2b),
    sky: Color::rgb(0x04, 0xa5, 0xe5),
    sapphire: Color::rgb(0x20, 0x9f, 0xb5),
    blue: Color::rgb(0x1e, 0x66, 0xf5),
    lavender: Color::rgb(0x72, 0x87, 0xfd),
    pink: Color::rgb(0xea, 0x76, 0xcb),
};

fn catppuccin(name: &str, p: &Palette) -> Theme {
    let colors = ThemeColors {
        text: p.text,
        background: p.base,
        insertion_point: p.rosewater,
        selection: p.surface2,
        line_highlight: p.surface0,
        invisibles: p.overlay0,
        editor_separator: p.surface1,
    };

    let styles = [
        ("keyword", Style::color(p.mauve)),
        ("function", Style::color(p.blue)),
        ("function.method", Style::color(p.blue)),
        ("function.builtin", Style::color(p.blue)),
        ("function.macro", Style::color(p.mauve)),
        ("type", Style::color(p.yellow)),
        ("type.builtin", Style::color(p.yellow).italic()),
        ("constructor", Style::color(p.sapphire)),
        ("string", Style::color(p.green)),
        ("string.special", Style::color(p.pink)),
        ("escape", Style::color(p.pink)),
        ("constant", Style::color(p.peach)),
        ("constant.builtin", Style::color(p.peach)),
        ("number", Style::color(p.peach)),
        ("comment", Style::color(p.overlay0).italic()),
        ("comment.documentation", Style::color(p.overlay0).italic()),
        ("variable.parameter", Style::color(p.maroon).italic()),
        ("variable.builtin", Style::color(p.red)),
        ("property", Style::color(p.lavender)),
        ("label", Style::color(p.sapphire).italic()),
        ("tag", Style::color(p.mauve)),
        ("punctuation.bracket", Style::color(p.subtext0)),
        ("punctuation.delimiter", Style::color(p.subtext0)),
        ("punctuation.special", Style::color(p.subtext0)),
        ("operator", Style::color(p.sky)),
        ("attribute", Style::color(p.yellow)),
        ("text.title", Style::color(p.mauve).bold()),
        ("text.literal", Style::color(p.green)),
        ("text.uri", Style::color(p.blue)),
        ("text.reference", Style::color(p.lavender)),
    ];

    styles
        .into_iter()
        .fold(Theme::new(name, colors), |theme, (capture, style)| theme.with_highlight(capture, style))
}
