// Chunk: docs/chunks/parse_state - Tree-sitter grammars, themes and parse state

//! Highlight collection from a parse tree.
//!
//! Runs the highlight query over a byte range with a `QueryCursor` limited
//! by `set_byte_range()`, so a restyle after a small edit only touches the
//! nodes near the edit.
//!
//! Tree-sitter can return several captures for overlapping nodes (nested
//! nodes, or the layered C/C++ and JS/TS queries). The resulting highlights
//! never overlap: the capture that starts first wins, and among captures
//! starting at the same byte the one the query reports first wins.

use std::ops::Range;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Query, QueryCursor, Tree};

/// A byte range of the source tagged with a capture name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight<'q> {
    pub range: Range<usize>,
    /// Capture name from the highlight query, such as "keyword" or "function.method".
    pub name: &'q str,
}

/// Collects non-overlapping highlights within `range`.
///
/// Results are sorted by start, clamped to `range`, and never empty. Bytes
/// not covered by any highlight are left to the caller's base style.
///
/// Overlaps are resolved line by line, each line starting uncovered, and a
/// highlight never crosses a line boundary. Collecting a line-aligned
/// sub-range therefore yields exactly the highlights a whole-document
/// collection has on those lines.
pub fn collect_highlights<'q>(query: &'q Query, tree: &Tree, source: &str, range: Range<usize>) -> Vec<Highlight<'q>> {
    let start = range.start.min(source.len());
    let end = range.end.clamp(start, source.len());
    if start == end {
        return Vec::new();
    }

    // (start_byte, end_byte, capture index)
    let mut captures: Vec<(usize, usize, u32)> = Vec::new();
    let mut cursor = QueryCursor::new();
    cursor.set_byte_range(start..end);

    let mut iter = cursor.captures(query, tree.root_node(), source.as_bytes());
    while let Some((mat, capture_idx)) = iter.next() {
        let capture = &mat.captures[*capture_idx];
        captures.push((capture.node.start_byte(), capture.node.end_byte(), capture.index));
    }

    // Stable, so same-start captures keep the query's order
    captures.sort_by_key(|(cap_start, _, _)| *cap_start);

    let names = query.capture_names();
    let mut highlights = Vec::new();
    // Captures before this index ended before the current line
    let mut first = 0;
    let mut line_start = start;

    while line_start < end {
        let line_end = source[line_start..end]
            .find('\n')
            .map_or(end, |newline| line_start + newline + 1);
        while first < captures.len() && captures[first].1 <= line_start {
            first += 1;
        }

        let mut covered_until = line_start;
        for &(cap_start, cap_end, cap_idx) in &captures[first..] {
            if cap_start >= line_end {
                break;
            }
            let actual_start = cap_start.max(line_start);
            let actual_end = cap_end.min(line_end);
            if actual_end <= actual_start {
                continue;
            }

            // A capture reaching past the covered region leaves its tail
            // unhighlighted rather than restyling bytes another capture owns.
            if actual_start < covered_until {
                covered_until = covered_until.max(actual_end);
                continue;
            }

            let Some(&name) = names.get(cap_idx as usize) else {
                continue;
            };
            highlights.push(Highlight {
                range: actual_start..actual_end,
                name,
            });
            covered_until = actual_end;
        }

        line_start = line_end;
    }

    highlights
}
