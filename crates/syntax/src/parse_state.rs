// Chunk: docs/chunks/parse_state - Tree-sitter grammars, themes and parse state
//!
//! Parse state for the active language.
//!
//! [`ParseStateManager`] owns the parser, the compiled highlight query and the
//! current tree. All three are built together when the language changes and
//! dropped together when any of them cannot be built, so a parser and query
//! for different languages are never seen side by side.
//!
//! When no grammar is available the manager sits in [`ParseState::Absent`]
//! and the document is drawn with base attributes only. This is a degraded
//! mode, not an error: it is logged and otherwise absorbed.

use std::fmt;
use std::ops::Range;

use quill_surface::TextEdit;
use tree_sitter::{Parser, Query, Tree};

use crate::edit::input_edit;
use crate::error::GrammarError;
use crate::highlighter::{collect_highlights, Highlight};
use crate::language::Language;
use crate::registry::GrammarProvider;

/// Parser, query and tree for one language, or nothing at all.
pub enum ParseState {
    /// No highlighting: the language has no usable grammar.
    Absent,
    Ready { parser: Parser, query: Query, tree: Tree },
}

impl ParseState {
    /// Builds a ready state for `language` and parses `source` from scratch.
    pub fn build(language: &Language, source: &str, grammars: &dyn GrammarProvider) -> Result<Self, GrammarError> {
        let mut parser = grammars.request_parser(language.id())?;
        let query = grammars.request_query(language.id())?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| GrammarError::ParseFailed(language.id().to_string()))?;
        Ok(ParseState::Ready { parser, query, tree })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ParseState::Ready { .. })
    }

    pub fn tree(&self) -> Option<&Tree> {
        match self {
            ParseState::Ready { tree, .. } => Some(tree),
            ParseState::Absent => None,
        }
    }

    pub fn query(&self) -> Option<&Query> {
        match self {
            ParseState::Ready { query, .. } => Some(query),
            ParseState::Absent => None,
        }
    }
}

impl fmt::Debug for ParseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseState::Absent => f.write_str("Absent"),
            ParseState::Ready { query, tree, .. } => f
                .debug_struct("Ready")
                .field("captures", &query.capture_names().len())
                .field("root", &tree.root_node().kind())
                .finish(),
        }
    }
}

/// What a reparse after a text edit produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reparse {
    /// There is no tree; only base attributes apply.
    Unstyled,
    /// The tree was updated incrementally. Holds the byte ranges of the new
    /// text whose syntax changed, which may be empty.
    Incremental(Vec<Range<usize>>),
    /// The tree had to be rebuilt from scratch; every range may have changed.
    Full,
}

/// Owns the [`ParseState`] and the text snapshot it was parsed from.
pub struct ParseStateManager {
    language: Language,
    state: ParseState,
    source: String,
    rebuilds: usize,
}

impl ParseStateManager {
    /// Creates a manager for `language` and parses `source`.
    pub fn new(language: Language, source: &str, grammars: &dyn GrammarProvider) -> Self {
        let mut manager = Self::default();
        manager.set_language(language, source, grammars);
        manager
    }

    /// Replaces the parse state with one built for `language`.
    ///
    /// The old parser, query and tree are discarded first. If the grammar or
    /// query for the new language cannot be provided the manager stays
    /// [`ParseState::Absent`].
    pub fn set_language(&mut self, language: Language, source: &str, grammars: &dyn GrammarProvider) {
        self.state = ParseState::Absent;
        self.source = source.to_string();
        self.rebuilds += 1;

        match ParseState::build(&language, &self.source, grammars) {
            Ok(state) => {
                tracing::debug!(language = %language, "parse state rebuilt");
                self.state = state;
            }
            Err(err) if language.is_plain_text() => {
                tracing::debug!(language = %language, "no grammar for plain text: {}", err);
            }
            Err(err) => {
                tracing::warn!(language = %language, "highlighting disabled: {}", err);
            }
        }
        self.language = language;
    }

    /// Reparses after the host replaced the whole text.
    pub fn replace_source(&mut self, source: &str) {
        self.source = source.to_string();
        let outcome = match &mut self.state {
            ParseState::Absent => return,
            ParseState::Ready { parser, tree, .. } => {
                parser.reset();
                parser.parse(source, None).map(|new_tree| *tree = new_tree)
            }
        };
        if outcome.is_none() {
            tracing::warn!(language = %self.language, "full parse failed, highlighting disabled");
            self.state = ParseState::Absent;
        }
    }

    /// Updates the tree for `edit`, which turned the previous text into
    /// `new_source`.
    ///
    /// Uses tree-sitter's incremental reparse. If that produces no tree the
    /// parser is reset and the text parsed from scratch; if that fails too
    /// the manager drops to [`ParseState::Absent`].
    pub fn reparse(&mut self, edit: &TextEdit, new_source: &str) -> Reparse {
        let input = input_edit(&self.source, edit);
        self.source = new_source.to_string();

        let outcome = match &mut self.state {
            ParseState::Absent => return Reparse::Unstyled,
            ParseState::Ready { parser, tree, .. } => {
                tree.edit(&input);
                match parser.parse(new_source, Some(&*tree)) {
                    Some(new_tree) => {
                        let changed = tree
                            .changed_ranges(&new_tree)
                            .map(|r| r.start_byte..r.end_byte)
                            .collect();
                        *tree = new_tree;
                        Some(Reparse::Incremental(changed))
                    }
                    None => {
                        parser.reset();
                        parser.parse(new_source, None).map(|new_tree| {
                            *tree = new_tree;
                            Reparse::Full
                        })
                    }
                }
            }
        };

        match outcome {
            Some(Reparse::Full) => {
                tracing::warn!(language = %self.language, "incremental reparse failed, reparsed from scratch");
                Reparse::Full
            }
            Some(reparse) => reparse,
            None => {
                tracing::warn!(language = %self.language, "reparse failed, highlighting disabled");
                self.state = ParseState::Absent;
                Reparse::Unstyled
            }
        }
    }

    /// Highlights within `range` of the current text, empty when absent.
    pub fn highlights(&self, range: Range<usize>) -> Vec<Highlight<'_>> {
        match &self.state {
            ParseState::Ready { query, tree, .. } => collect_highlights(query, tree, &self.source, range),
            ParseState::Absent => Vec::new(),
        }
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn state(&self) -> &ParseState {
        &self.state
    }

    /// The latest tree; `None` means render unstyled.
    pub fn current_tree(&self) -> Option<&Tree> {
        self.state.tree()
    }

    /// The text the current tree was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// How many times the parse state has been rebuilt for a language.
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }
}

impl Default for ParseStateManager {
    /// A plain-text manager with nothing parsed and no rebuilds yet.
    fn default() -> Self {
        Self {
            language: Language::plain_text(),
            state: ParseState::Absent,
            source: String::new(),
            rebuilds: 0,
        }
    }
}

impl fmt::Debug for ParseStateManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseStateManager")
            .field("language", &self.language)
            .field("state", &self.state)
            .field("rebuilds", &self.rebuilds)
            .finish()
    }
}
