// Chunk: docs/chunks/parse_state - Tree-sitter grammars, themes and parse state

use std::fmt;

/// Identifies the grammar a document is parsed with.
///
/// A `Language` is just a normalized identifier ("rust", "python", ...).
/// Its grammar and highlight query are looked up by that identifier through
/// a [`GrammarProvider`](crate::GrammarProvider) each time the language
/// becomes active.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language {
    id: String,
}

impl Language {
    /// Identifier of the language with no grammar.
    pub const PLAIN_TEXT: &'static str = "plaintext";

    /// Creates a language from an identifier, lowercased and trimmed.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.trim().to_lowercase(),
        }
    }

    /// The language used when no grammar applies.
    pub fn plain_text() -> Self {
        Self::new(Self::PLAIN_TEXT)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_plain_text(&self) -> bool {
        self.id == Self::PLAIN_TEXT
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::plain_text()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
