// Chunk: docs/chunks/editor_config - Editor configuration and theme loading
//!
//! Editor configuration.
//!
//! [`EditorConfig`] is what a controller is constructed from: the document
//! text, the initial language, theme and font, the tab width and the
//! line-height multiple. It is validated before any reconciliation runs, so
//! a controller never exists in a half-configured state.
//!
//! [`ConfigFile`] is the on-disk form, a JSON document where every field is
//! optional:
//!
//! ```json
//! {
//!   "language": "rust",
//!   "theme": "catppuccin-latte",
//!   "tab_width": 2,
//!   "line_height_multiple": 1.4,
//!   "font": { "name": "Menlo-Regular", "point_size": 13, "ascent": 12, "descent": 3 }
//! }
//! ```
//!
//! `theme` is either a built-in theme name or an inline theme definition.
//! The default location is `<config_dir>/quill/editor.json`.

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use quill_surface::Font;
use quill_syntax::{Language, Theme, ThemeDefinition};
use serde::Deserialize;

use crate::error::ConfigError;

/// Spaces inserted per tab when nothing else is configured.
pub const DEFAULT_TAB_WIDTH: NonZeroUsize = match NonZeroUsize::new(4) {
    Some(width) => width,
    None => unreachable!(),
};

/// Line-height multiple used when nothing else is configured.
pub const DEFAULT_LINE_HEIGHT_MULTIPLE: f64 = 1.0;

/// The font used when nothing else is configured: Menlo at 14pt.
pub fn default_font() -> Font {
    Font::new("Menlo-Regular", 14.0, 13.0, 3.25, 0.0)
}

// =============================================================================
// EditorConfig
// =============================================================================

/// Everything a reconciliation controller is constructed from.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    pub text: String,
    pub language: Language,
    pub theme: Theme,
    /// Spaces per tab
    pub tab_width: NonZeroUsize,
    pub line_height_multiple: f64,
    pub font: Font,
}

impl EditorConfig {
    /// Creates a config with the default tab width and line-height multiple.
    pub fn new(text: impl Into<String>, language: Language, theme: Theme, font: Font) -> Self {
        Self {
            text: text.into(),
            language,
            theme,
            tab_width: DEFAULT_TAB_WIDTH,
            line_height_multiple: DEFAULT_LINE_HEIGHT_MULTIPLE,
            font,
        }
    }

    pub fn with_tab_width(mut self, tab_width: NonZeroUsize) -> Self {
        self.tab_width = tab_width;
        self
    }

    pub fn with_line_height_multiple(mut self, multiple: f64) -> Self {
        self.line_height_multiple = multiple;
        self
    }

    /// Checks the numeric settings. Languages and themes are always valid
    /// once constructed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_line_height_multiple(self.line_height_multiple)?;
        validate_font(&self.font)
    }
}

/// Rejects multiples that are not finite and positive.
pub fn validate_line_height_multiple(multiple: f64) -> Result<(), ConfigError> {
    if multiple.is_finite() && multiple > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidLineHeightMultiple(multiple))
    }
}

/// Rejects fonts whose size or line height is not finite and positive.
pub fn validate_font(font: &Font) -> Result<(), ConfigError> {
    let positive = |value: f64| value.is_finite() && value > 0.0;
    if !positive(font.point_size) {
        return Err(ConfigError::InvalidFont {
            reason: format!("point size {} of '{}' is not positive", font.point_size, font.name),
        });
    }
    if !positive(font.line_height()) {
        return Err(ConfigError::InvalidFont {
            reason: format!("line height {} of '{}' is not positive", font.line_height(), font.name),
        });
    }
    Ok(())
}

// =============================================================================
// ConfigFile
// =============================================================================

/// A theme given by built-in name or defined inline.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ThemeSetting {
    Named(String),
    Inline(ThemeDefinition),
}

impl ThemeSetting {
    pub fn resolve(self) -> Result<Theme, ConfigError> {
        match self {
            ThemeSetting::Named(name) => resolve_theme(&name),
            ThemeSetting::Inline(definition) => Ok(definition.into_theme()?),
        }
    }
}

/// The on-disk configuration; every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub language: Option<String>,
    pub theme: Option<ThemeSetting>,
    pub tab_width: Option<usize>,
    pub line_height_multiple: Option<f64>,
    pub font: Option<Font>,
}

impl ConfigFile {
    /// `<config_dir>/quill/editor.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("quill").join("editor.json"))
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Builds a validated config for `text`.
    ///
    /// `fallback_language` is used when the file names no language, typically
    /// the language picked from the document's file extension.
    pub fn into_config(self, text: impl Into<String>, fallback_language: Language) -> Result<EditorConfig, ConfigError> {
        let language = self.language.as_deref().map(Language::new).unwrap_or(fallback_language);
        let theme = match self.theme {
            Some(setting) => setting.resolve()?,
            None => Theme::default(),
        };
        let font = self.font.unwrap_or_else(default_font);

        let mut config = EditorConfig::new(text, language, theme, font);
        if let Some(width) = self.tab_width {
            config.tab_width = NonZeroUsize::new(width).ok_or(ConfigError::InvalidTabWidth)?;
        }
        if let Some(multiple) = self.line_height_multiple {
            config.line_height_multiple = multiple;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Looks up a built-in theme, or loads a theme file if `name` is a path to one.
pub fn resolve_theme(name: &str) -> Result<Theme, ConfigError> {
    if let Some(theme) = Theme::builtin(name) {
        return Ok(theme);
    }
    let path = Path::new(name);
    if path.extension().is_some_and(|ext| ext == "json") {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        return Ok(Theme::from_json(&contents)?);
    }
    Err(ConfigError::UnknownTheme(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_syntax::ThemeError;

    #[test]
    fn test_new_applies_defaults() {
        let config = EditorConfig::new("", Language::plain_text(), Theme::default(), default_font());
        assert_eq!(config.tab_width.get(), 4);
        assert_eq!(config.line_height_multiple, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_multiples() {
        for bad in [0.0, -1.5, f64::NAN, f64::INFINITY] {
            let config = EditorConfig::new("", Language::plain_text(), Theme::default(), default_font())
                .with_line_height_multiple(bad);
            assert!(matches!(config.validate(), Err(ConfigError::InvalidLineHeightMultiple(_))), "{}", bad);
        }
    }

    #[test]
    fn test_validate_rejects_bad_fonts() {
        let zero_size = Font::new("Menlo", 0.0, 10.0, 2.0, 0.0);
        assert!(matches!(validate_font(&zero_size), Err(ConfigError::InvalidFont { .. })));
        let flat = Font::new("Menlo", 12.0, 0.0, 0.0, 0.0);
        assert!(matches!(validate_font(&flat), Err(ConfigError::InvalidFont { .. })));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ConfigFile::from_json("{}")
            .unwrap()
            .into_config("text", Language::new("rust"))
            .unwrap();
        assert_eq!(config.language, Language::new("rust"));
        assert_eq!(config.theme.name(), "catppuccin-mocha");
        assert_eq!(config.font, default_font());
        assert_eq!(config.text, "text");
    }

    #[test]
    fn test_file_overrides() {
        let json = r#"{
            "language": "Python",
            "theme": "catppuccin-latte",
            "tab_width": 2,
            "line_height_multiple": 1.4,
            "font": { "name": "Iosevka", "point_size": 13, "ascent": 12, "descent": 3 }
        }"#;
        let config = ConfigFile::from_json(json)
            .unwrap()
            .into_config("", Language::plain_text())
            .unwrap();
        assert_eq!(config.language, Language::new("python"));
        assert_eq!(config.theme.name(), "catppuccin-latte");
        assert_eq!(config.tab_width.get(), 2);
        assert_eq!(config.line_height_multiple, 1.4);
        assert_eq!(config.font.name, "Iosevka");
        assert_eq!(config.font.leading, 0.0);
    }

    #[test]
    fn test_zero_tab_width_is_rejected() {
        let result = ConfigFile::from_json(r#"{ "tab_width": 0 }"#)
            .unwrap()
            .into_config("", Language::plain_text());
        assert!(matches!(result, Err(ConfigError::InvalidTabWidth)));
    }

    #[test]
    fn test_unknown_theme_name() {
        let result = ConfigFile::from_json(r#"{ "theme": "solarized" }"#)
            .unwrap()
            .into_config("", Language::plain_text());
        assert!(matches!(result, Err(ConfigError::UnknownTheme(name)) if name == "solarized"));
    }

    #[test]
    fn test_inline_theme_missing_role() {
        let json = r##"{ "theme": { "name": "half", "colors": { "text": "#ffffff" } } }"##;
        let result = ConfigFile::from_json(json)
            .unwrap()
            .into_config("", Language::plain_text());
        assert!(matches!(result, Err(ConfigError::Theme(ThemeError::MissingRole(_)))));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.json");
        fs::write(&path, r#"{ "tab_width": 8 }"#).unwrap();

        let config = ConfigFile::load(&path).unwrap();
        assert_eq!(config.tab_width, Some(8));

        let missing = ConfigFile::load(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_resolve_theme_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mine.json");
        fs::write(
            &path,
            r##"{ "name": "mine", "colors": {
                "text": "#111111", "background": "#222222", "insertion_point": "#333333",
                "selection": "#444444", "line_highlight": "#555555",
                "invisibles": "#666666", "editor_separator": "#777777" } }"##,
        )
        .unwrap();

        let theme = resolve_theme(path.to_str().unwrap()).unwrap();
        assert_eq!(theme.name(), "mine");
    }
}
