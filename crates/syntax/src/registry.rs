// Chunk: docs/chunks/parse_state - Tree-sitter grammars, themes and parse state
//!
//! Grammar provider and the built-in language registry.
//!
//! The reconciliation engine never names a grammar crate directly: it asks a
//! [`GrammarProvider`] for a parser and a compiled highlight query by
//! language identifier. [`LanguageRegistry`] is the provider backed by the
//! tree-sitter grammars bundled with quill.

use std::collections::HashMap;
use std::path::Path;

use tree_sitter::{Parser, Query};

use crate::error::GrammarError;
use crate::language::Language;

/// Source of parsers and highlight queries, keyed by language identifier.
pub trait GrammarProvider {
    /// Returns a parser configured for the language's grammar.
    fn request_parser(&self, language_id: &str) -> Result<Parser, GrammarError>;

    /// Returns the compiled highlight query for the language.
    fn request_query(&self, language_id: &str) -> Result<Query, GrammarError>;
}

/// Configuration for one language's grammar and highlighting.
#[derive(Clone)]
pub struct LanguageConfig {
    /// Canonical identifier
    pub id: &'static str,
    /// The tree-sitter grammar
    pub grammar: tree_sitter::Language,
    /// Highlight query sources, concatenated in order when compiled.
    ///
    /// Some grammars only ship the captures they add on top of a base
    /// language (C++ over C, TypeScript over JavaScript), so the base
    /// query comes first.
    pub highlight_queries: Vec<&'static str>,
    /// File extensions, without the leading dot
    pub extensions: &'static [&'static str],
    /// Other names the language goes by ("golang", "c++", ...)
    pub aliases: &'static [&'static str],
}

impl LanguageConfig {
    pub fn new(id: &'static str, grammar: tree_sitter::Language, highlights: &'static str) -> Self {
        Self {
            id,
            grammar,
            highlight_queries: vec![highlights],
            extensions: &[],
            aliases: &[],
        }
    }

    /// Puts a base query in front of this language's own highlights.
    pub fn layered_on(mut self, base_highlights: &'static str) -> Self {
        self.highlight_queries.insert(0, base_highlights);
        self
    }

    pub fn with_extensions(mut self, extensions: &'static [&'static str]) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    /// The full highlight query source.
    pub fn highlights_source(&self) -> String {
        self.highlight_queries.join("\n")
    }
}

/// Registry mapping language identifiers, aliases and file extensions to
/// grammar configurations.
pub struct LanguageRegistry {
    /// Canonical id -> config
    configs: HashMap<&'static str, LanguageConfig>,
    /// Id or alias -> canonical id
    names: HashMap<&'static str, &'static str>,
    /// Extension -> canonical id
    extensions: HashMap<&'static str, &'static str>,
}

impl LanguageRegistry {
    /// Creates an empty registry.
    pub fn empty() -> Self {
        Self {
            configs: HashMap::new(),
            names: HashMap::new(),
            extensions: HashMap::new(),
        }
    }

    /// Creates a registry with every bundled grammar.
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register(
            LanguageConfig::new("rust", tree_sitter_rust::LANGUAGE.into(), tree_sitter_rust::HIGHLIGHTS_QUERY)
                .with_extensions(&["rs"]),
        );
        registry.register(
            LanguageConfig::new("c", tree_sitter_c::LANGUAGE.into(), tree_sitter_c::HIGHLIGHT_QUERY)
                .with_extensions(&["c"]),
        );
        // The C++ query only covers C++-specific constructs; types, keywords
        // and functions come from the C query.
        registry.register(
            LanguageConfig::new("cpp", tree_sitter_cpp::LANGUAGE.into(), tree_sitter_cpp::HIGHLIGHT_QUERY)
                .layered_on(tree_sitter_c::HIGHLIGHT_QUERY)
                .with_extensions(&["cpp", "cc", "cxx", "hpp", "h"])
                .with_aliases(&["c++"]),
        );
        registry.register(
            LanguageConfig::new("python", tree_sitter_python::LANGUAGE.into(), tree_sitter_python::HIGHLIGHTS_QUERY)
                .with_extensions(&["py", "pyi"]),
        );
        registry.register(
            LanguageConfig::new(
                "javascript",
                tree_sitter_javascript::LANGUAGE.into(),
                tree_sitter_javascript::HIGHLIGHT_QUERY,
            )
            .with_extensions(&["js", "jsx", "mjs"]),
        );
        // Same layering as C/C++: TypeScript extends the JavaScript captures.
        registry.register(
            LanguageConfig::new(
                "typescript",
                tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
                tree_sitter_typescript::HIGHLIGHTS_QUERY,
            )
            .layered_on(tree_sitter_javascript::HIGHLIGHT_QUERY)
            .with_extensions(&["ts"]),
        );
        registry.register(
            LanguageConfig::new(
                "tsx",
                tree_sitter_typescript::LANGUAGE_TSX.into(),
                tree_sitter_typescript::HIGHLIGHTS_QUERY,
            )
            .layered_on(tree_sitter_javascript::HIGHLIGHT_QUERY)
            .with_extensions(&["tsx"]),
        );
        registry.register(
            LanguageConfig::new("go", tree_sitter_go::LANGUAGE.into(), tree_sitter_go::HIGHLIGHTS_QUERY)
                .with_extensions(&["go"])
                .with_aliases(&["golang"]),
        );
        registry.register(
            LanguageConfig::new("json", tree_sitter_json::LANGUAGE.into(), tree_sitter_json::HIGHLIGHTS_QUERY)
                .with_extensions(&["json"]),
        );
        registry.register(
            LanguageConfig::new("toml", tree_sitter_toml_ng::LANGUAGE.into(), tree_sitter_toml_ng::HIGHLIGHTS_QUERY)
                .with_extensions(&["toml"]),
        );
        registry.register(
            LanguageConfig::new("markdown", tree_sitter_md::LANGUAGE.into(), tree_sitter_md::HIGHLIGHT_QUERY_BLOCK)
                .with_extensions(&["md", "markdown"]),
        );
        registry.register(
            LanguageConfig::new("html", tree_sitter_html::LANGUAGE.into(), tree_sitter_html::HIGHLIGHTS_QUERY)
                .with_extensions(&["html", "htm"]),
        );
        registry.register(
            LanguageConfig::new("css", tree_sitter_css::LANGUAGE.into(), tree_sitter_css::HIGHLIGHTS_QUERY)
                .with_extensions(&["css"]),
        );
        registry.register(
            LanguageConfig::new("bash", tree_sitter_bash::LANGUAGE.into(), tree_sitter_bash::HIGHLIGHT_QUERY)
                .with_extensions(&["sh", "bash", "zsh"])
                .with_aliases(&["shell", "sh"]),
        );

        registry
    }

    /// Adds (or replaces) a language.
    pub fn register(&mut self, config: LanguageConfig) {
        let id = config.id;
        self.names.insert(id, id);
        for &alias in config.aliases {
            self.names.insert(alias, id);
        }
        for &ext in config.extensions {
            self.extensions.insert(ext, id);
        }
        self.configs.insert(id, config);
    }

    /// Returns the configuration for a language identifier or alias.
    pub fn config(&self, name: &str) -> Option<&LanguageConfig> {
        let name = name.trim().to_lowercase();
        let id = self.names.get(name.as_str())?;
        self.configs.get(id)
    }

    /// Returns the configuration for a file extension.
    ///
    /// The extension can be with or without a leading dot (e.g., ".rs" or "rs").
    pub fn config_for_extension(&self, ext: &str) -> Option<&LanguageConfig> {
        let ext = ext.strip_prefix('.').unwrap_or(ext).to_lowercase();
        let id = self.extensions.get(ext.as_str())?;
        self.configs.get(id)
    }

    /// Picks a language from a file name's extension.
    ///
    /// Unknown or missing extensions give [`Language::plain_text`].
    pub fn language_for_path(&self, path: &Path) -> Language {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.config_for_extension(ext))
            .map(|config| Language::new(config.id))
            .unwrap_or_else(Language::plain_text)
    }

    /// Iterates over the canonical identifiers of all registered languages.
    pub fn language_ids(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().copied()
    }

    fn require(&self, language_id: &str) -> Result<&LanguageConfig, GrammarError> {
        self.config(language_id)
            .ok_or_else(|| GrammarError::UnknownLanguage(language_id.to_string()))
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GrammarProvider for LanguageRegistry {
    fn request_parser(&self, language_id: &str) -> Result<Parser, GrammarError> {
        let config = self.require(language_id)?;
        let mut parser = Parser::new();
        parser
            .set_language(&config.grammar)
            .map_err(|e| GrammarError::IncompatibleGrammar {
                language: config.id.to_string(),
                message: e.to_string(),
            })?;
        Ok(parser)
    }

    fn request_query(&self, language_id: &str) -> Result<Query, GrammarError> {
        let config = self.require(language_id)?;
        Query::new(&config.grammar, &config.highlights_source()).map_err(|e| GrammarError::InvalidQuery {
            language: config.id.to_string(),
            message: e.to_string(),
        })
    }
}
