// Chunk: docs/chunks/surface_model - Presentation types and text surface collaborators

use std::ops::Range;

/// A single text mutation, expressed against the text *before* the edit.
///
/// `range` is the byte range that was replaced and `new_text` is what
/// replaced it. Pure insertions have an empty range, pure deletions an
/// empty `new_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range<usize>,
    pub new_text: String,
}

impl TextEdit {
    pub fn new(range: Range<usize>, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }

    /// An insertion of `text` at byte offset `at`.
    pub fn insertion(at: usize, text: impl Into<String>) -> Self {
        Self::new(at..at, text)
    }

    /// A deletion of the bytes in `range`.
    pub fn deletion(range: Range<usize>) -> Self {
        Self::new(range, String::new())
    }

    /// Byte offset where the replacement text ends, in the text after the edit.
    pub fn new_end(&self) -> usize {
        self.range.start + self.new_text.len()
    }

    /// The byte range occupied by the replacement text after the edit.
    pub fn inserted_range(&self) -> Range<usize> {
        self.range.start..self.new_end()
    }

    /// Applies the edit to `text`.
    ///
    /// Returns false (leaving `text` untouched) if the range is out of bounds
    /// or does not fall on character boundaries.
    pub fn apply_to(&self, text: &mut String) -> bool {
        let Range { start, end } = self.range;
        if start > end || end > text.len() || !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            return false;
        }
        text.replace_range(start..end, &self.new_text);
        true
    }
}

/// Widens a byte range so that it covers whole lines of `text`.
///
/// The result starts at the beginning of the line containing `range.start`
/// and ends just past the newline terminating the line containing
/// `range.end` (or at the end of the text). The range is clamped to the text.
///
/// ```
/// use quill_surface::expand_to_lines;
///
/// let text = "one\ntwo\nthree";
/// assert_eq!(expand_to_lines(text, 5..6), 4..8);
/// assert_eq!(expand_to_lines(text, 9..9), 8..13);
/// ```
pub fn expand_to_lines(text: &str, range: Range<usize>) -> Range<usize> {
    let bytes = text.as_bytes();
    let end = range.end.min(bytes.len());
    let start = range.start.min(end);

    let line_start = bytes[..start]
        .iter()
        .rposition(|b| *b == b'\n')
        .map(|i| i + 1)
        .unwrap_or(0);
    let line_end = bytes[end..]
        .iter()
        .position(|b| *b == b'\n')
        .map(|i| end + i + 1)
        .unwrap_or(bytes.len());

    line_start..line_end
}
