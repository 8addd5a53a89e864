// Chunk: docs/chunks/parse_state - Tree-sitter grammars, themes and parse state

//! Edit translation between surface edits and tree-sitter.
//!
//! The surface reports edits as byte ranges of the old text plus the
//! replacement string. Tree-sitter also wants (row, column) points for the
//! start and both ends, with columns counted in bytes.

use quill_surface::TextEdit;
use tree_sitter::{InputEdit, Point};

/// Returns the tree-sitter point for a byte offset in `source`.
///
/// Offsets past the end clamp to the end of the source. Columns are byte
/// counts from the start of the line.
pub fn point_at(source: &str, byte_offset: usize) -> Point {
    let offset = byte_offset.min(source.len());
    let before = &source.as_bytes()[..offset];
    let row = before.iter().filter(|&&b| b == b'\n').count();
    let line_start = before.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
    Point {
        row,
        column: offset - line_start,
    }
}

/// Point reached by writing `text` starting at `start`.
fn advance(start: Point, text: &str) -> Point {
    match text.rfind('\n') {
        Some(last_newline) => Point {
            row: start.row + text.matches('\n').count(),
            column: text.len() - last_newline - 1,
        },
        None => Point {
            row: start.row,
            column: start.column + text.len(),
        },
    }
}

/// Describes `edit`, applied to `old_source`, in tree-sitter terms.
///
/// The edit's range is clamped to `old_source`.
pub fn input_edit(old_source: &str, edit: &TextEdit) -> InputEdit {
    let start_byte = edit.range.start.min(old_source.len());
    let old_end_byte = edit.range.end.clamp(start_byte, old_source.len());
    let new_end_byte = start_byte + edit.new_text.len();

    let start_position = point_at(old_source, start_byte);
    InputEdit {
        start_byte,
        old_end_byte,
        new_end_byte,
        start_position,
        old_end_position: point_at(old_source, old_end_byte),
        new_end_position: advance(start_position, &edit.new_text),
    }
}
