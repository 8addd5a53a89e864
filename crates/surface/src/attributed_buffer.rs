// Chunk: docs/chunks/surface_model - Presentation types and text surface collaborators
//!
//! In-memory attributed text.
//!
//! `AttributedBuffer` stores text plus a run-length list of attributes, the
//! same shape an `NSTextStorage` has. It is the headless [`TextSurface`] used
//! by the `quill-render` CLI and by tests.
//!
//! Run invariants (restored after every mutation):
//! - run lengths sum to `text.len()`
//! - no run has length zero
//! - adjacent runs have different attributes

use std::ops::Range;

use crate::style::Attributes;
use crate::surface::{SurfaceAppearance, TextSurface};
use crate::types::TextEdit;

/// A run of `len` bytes sharing the same attributes.
type Run = (usize, Attributes);

#[derive(Debug, Clone, Default)]
pub struct AttributedBuffer {
    text: String,
    runs: Vec<Run>,
    /// Caret position as a byte offset
    caret: usize,
    appearance: Option<SurfaceAppearance>,
    display_reloads: usize,
    /// A run index and its start byte, where `split_at` resumes scanning.
    /// Style passes write in ascending order, so each lookup starts near
    /// the previous one.
    seek: (usize, usize),
}

impl AttributedBuffer {
    /// Creates a buffer holding `text` with no attributes and the caret at the end.
    pub fn new(text: &str) -> Self {
        let mut buffer = Self::default();
        buffer.set_text(text);
        buffer
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Moves the caret, clamping it to the text and snapping back to a char boundary.
    pub fn set_caret(&mut self, offset: usize) {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        self.caret = offset;
    }

    /// The last appearance applied, if any.
    pub fn appearance(&self) -> Option<&SurfaceAppearance> {
        self.appearance.as_ref()
    }

    /// Number of times [`TextSurface::reload_display`] was called.
    pub fn display_reloads(&self) -> usize {
        self.display_reloads
    }

    /// Returns the attributes of the byte at `offset`.
    pub fn attributes_at(&self, offset: usize) -> Option<&Attributes> {
        let mut pos = 0;
        for (len, attrs) in &self.runs {
            if offset < pos + len {
                return Some(attrs);
            }
            pos += len;
        }
        None
    }

    /// Iterates over attribute runs as (byte range, attributes).
    pub fn runs(&self) -> impl Iterator<Item = (Range<usize>, &Attributes)> + '_ {
        let mut pos = 0;
        self.runs.iter().map(move |(len, attrs)| {
            let start = pos;
            pos += len;
            (start..pos, attrs)
        })
    }

    /// Iterates over (text slice, attributes) pairs, one per run.
    pub fn styled_runs(&self) -> impl Iterator<Item = (&str, &Attributes)> + '_ {
        self.runs().map(move |(range, attrs)| (&self.text[range], attrs))
    }

    /// Replaces the bytes in `edit.range`, the way a user edit would.
    ///
    /// Inserted text takes the attributes of the first replaced byte, or of
    /// the byte before the edit for pure insertions. The caret moves to the
    /// end of the inserted text. Returns false if the edit does not fit the text.
    pub fn apply_edit(&mut self, edit: &TextEdit) -> bool {
        if !edit.apply_to(&mut self.text) {
            return false;
        }
        let Range { start, end } = edit.range;
        self.seek = (0, 0);

        let i = self.split_at(start);
        let j = self.split_at(end);
        let inherited = if i < j {
            self.runs[i].1.clone()
        } else if i > 0 {
            self.runs[i - 1].1.clone()
        } else if j < self.runs.len() {
            self.runs[j].1.clone()
        } else {
            Attributes::default()
        };

        let inserted = edit.new_text.len();
        let replacement = if inserted > 0 {
            vec![(inserted, inherited)]
        } else {
            Vec::new()
        };
        self.runs.splice(i..j, replacement);
        self.normalize(0..self.runs.len());
        self.seek = (0, 0);

        self.caret = edit.new_end();
        true
    }

    /// Clamps a range to the text.
    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let end = range.end.min(self.text.len());
        range.start.min(end)..end
    }

    /// Ensures a run boundary at byte `offset` and returns the index of the run
    /// starting there (`runs.len()` when `offset` is the end of the text).
    fn split_at(&mut self, offset: usize) -> usize {
        let (mut i, mut pos) = match self.seek {
            (index, start) if start <= offset && index <= self.runs.len() => (index, start),
            _ => (0, 0),
        };
        while i < self.runs.len() {
            let len = self.runs[i].0;
            if offset == pos {
                self.seek = (i, pos);
                return i;
            }
            if offset < pos + len {
                let head = offset - pos;
                let attrs = self.runs[i].1.clone();
                self.runs[i].0 = head;
                self.runs.insert(i + 1, (len - head, attrs));
                self.seek = (i + 1, offset);
                return i + 1;
            }
            pos += len;
            i += 1;
        }
        self.runs.len()
    }

    /// Restores the run invariants after runs `i..j` changed, where run `i`
    /// starts at byte `start`. Only the changed runs and their two
    /// neighbours are touched.
    fn normalize_around(&mut self, i: usize, j: usize, start: usize) {
        let (lo, lo_start) = if i > 0 {
            (i - 1, start - self.runs[i - 1].0)
        } else {
            (0, 0)
        };
        let hi = (j + 1).min(self.runs.len());
        self.normalize(lo..hi);
        self.seek = (lo, lo_start);
    }

    /// Drops empty runs and coalesces equal neighbours within `window`.
    fn normalize(&mut self, window: Range<usize>) {
        let mut merged: Vec<Run> = Vec::with_capacity(window.len());
        for (len, attrs) in self.runs.drain(window.clone()) {
            if len == 0 {
                continue;
            }
            if let Some(last) = merged.last_mut() {
                if last.1 == attrs {
                    last.0 += len;
                    continue;
                }
            }
            merged.push((len, attrs));
        }
        self.runs.splice(window.start..window.start, merged);
    }
}

impl TextSurface for AttributedBuffer {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.runs.clear();
        self.seek = (0, 0);
        if !text.is_empty() {
            self.runs.push((text.len(), Attributes::default()));
        }
        self.caret = text.len();
    }

    fn set_attributes(&mut self, range: Range<usize>, attributes: &Attributes) {
        let range = self.clamp(range);
        if range.is_empty() {
            return;
        }
        let i = self.split_at(range.start);
        let j = self.split_at(range.end);
        self.runs.splice(i..j, [(range.len(), attributes.clone())]);
        self.normalize_around(i, i + 1, range.start);
    }

    fn add_attributes(&mut self, range: Range<usize>, attributes: &Attributes) {
        let range = self.clamp(range);
        if range.is_empty() || attributes.is_empty() {
            return;
        }
        let i = self.split_at(range.start);
        let j = self.split_at(range.end);
        for (_, attrs) in &mut self.runs[i..j] {
            attrs.merge(attributes);
        }
        self.normalize_around(i, j, range.start);
    }

    fn insert_at_caret(&mut self, text: &str) -> TextEdit {
        let edit = TextEdit::insertion(self.caret, text);
        // the caret is always on a char boundary, so this cannot fail
        self.apply_edit(&edit);
        edit
    }

    fn set_appearance(&mut self, appearance: &SurfaceAppearance) {
        self.appearance = Some(*appearance);
    }

    fn reload_display(&mut self) {
        self.display_reloads += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    fn run_ranges(buf: &AttributedBuffer) -> Vec<Range<usize>> {
        buf.runs().map(|(r, _)| r).collect()
    }

    #[test]
    fn test_new_has_single_plain_run() {
        let buf = AttributedBuffer::new("hello");
        assert_eq!(run_ranges(&buf), vec![0..5]);
        assert!(buf.attributes_at(0).unwrap().is_empty());
        assert_eq!(buf.caret(), 5);
    }

    #[test]
    fn test_empty_text_has_no_runs() {
        let buf = AttributedBuffer::new("");
        assert_eq!(buf.runs().count(), 0);
        assert!(buf.attributes_at(0).is_none());
    }

    #[test]
    fn test_add_attributes_splits_runs() {
        let mut buf = AttributedBuffer::new("hello world");
        buf.add_attributes(6..11, &Attributes::foreground(RED));
        assert_eq!(run_ranges(&buf), vec![0..6, 6..11]);
        assert_eq!(buf.attributes_at(7).unwrap().foreground, Some(RED));
        assert_eq!(buf.attributes_at(2).unwrap().foreground, None);
    }

    #[test]
    fn test_add_attributes_in_the_middle() {
        let mut buf = AttributedBuffer::new("abcdef");
        buf.add_attributes(2..4, &Attributes::foreground(RED));
        assert_eq!(run_ranges(&buf), vec![0..2, 2..4, 4..6]);
    }

    #[test]
    fn test_set_attributes_replaces_and_coalesces() {
        let mut buf = AttributedBuffer::new("abcdef");
        buf.add_attributes(2..4, &Attributes::foreground(RED));
        buf.set_attributes(0..6, &Attributes::foreground(BLUE));
        assert_eq!(run_ranges(&buf), vec![0..6]);
        assert_eq!(buf.attributes_at(3).unwrap().foreground, Some(BLUE));
    }

    #[test]
    fn test_add_attributes_merges_over_existing() {
        let mut buf = AttributedBuffer::new("abc");
        let base = Attributes {
            baseline_offset: Some(1.5),
            foreground: Some(BLUE),
            ..Attributes::default()
        };
        buf.set_attributes(0..3, &base);
        buf.add_attributes(1..2, &Attributes::foreground(RED));

        let middle = buf.attributes_at(1).unwrap();
        assert_eq!(middle.foreground, Some(RED));
        assert_eq!(middle.baseline_offset, Some(1.5));
    }

    #[test]
    fn test_ranges_are_clamped() {
        let mut buf = AttributedBuffer::new("abc");
        buf.add_attributes(1..100, &Attributes::foreground(RED));
        assert_eq!(run_ranges(&buf), vec![0..1, 1..3]);
        buf.add_attributes(10..20, &Attributes::foreground(BLUE));
        assert_eq!(run_ranges(&buf), vec![0..1, 1..3]);
    }

    #[test]
    fn test_insert_at_caret_inherits_previous_attributes() {
        let mut buf = AttributedBuffer::new("ab");
        buf.set_attributes(0..2, &Attributes::foreground(RED));
        let edit = buf.insert_at_caret("    ");

        assert_eq!(edit, TextEdit::insertion(2, "    "));
        assert_eq!(buf.text(), "ab    ");
        assert_eq!(buf.caret(), 6);
        assert_eq!(run_ranges(&buf), vec![0..6]);
    }

    #[test]
    fn test_insert_at_caret_in_the_middle() {
        let mut buf = AttributedBuffer::new("ab");
        buf.set_caret(1);
        buf.insert_at_caret("xy");
        assert_eq!(buf.text(), "axyb");
        assert_eq!(buf.caret(), 3);
    }

    #[test]
    fn test_apply_edit_deletion_removes_runs() {
        let mut buf = AttributedBuffer::new("abcdef");
        buf.add_attributes(2..4, &Attributes::foreground(RED));
        assert!(buf.apply_edit(&TextEdit::deletion(2..4)));
        assert_eq!(buf.text(), "abef");
        assert_eq!(run_ranges(&buf), vec![0..4]);
    }

    #[test]
    fn test_apply_edit_replacement_takes_replaced_attributes() {
        let mut buf = AttributedBuffer::new("abcdef");
        buf.add_attributes(2..4, &Attributes::foreground(RED));
        assert!(buf.apply_edit(&TextEdit::new(2..4, "XYZ")));
        assert_eq!(buf.text(), "abXYZef");
        assert_eq!(buf.attributes_at(4).unwrap().foreground, Some(RED));
        assert_eq!(run_ranges(&buf), vec![0..2, 2..5, 5..7]);
    }

    #[test]
    fn test_apply_edit_out_of_bounds_is_rejected() {
        let mut buf = AttributedBuffer::new("abc");
        assert!(!buf.apply_edit(&TextEdit::deletion(2..9)));
        assert_eq!(buf.text(), "abc");
    }

    #[test]
    fn test_set_caret_snaps_to_char_boundary() {
        let mut buf = AttributedBuffer::new("h\u{e9}");
        buf.set_caret(2);
        assert_eq!(buf.caret(), 1);
        buf.set_caret(100);
        assert_eq!(buf.caret(), 3);
    }

    #[test]
    fn test_styled_runs() {
        let mut buf = AttributedBuffer::new("fn main");
        buf.add_attributes(0..2, &Attributes::foreground(RED));
        let texts: Vec<&str> = buf.styled_runs().map(|(t, _)| t).collect();
        assert_eq!(texts, vec!["fn", " main"]);
    }

    #[test]
    fn test_reload_and_appearance_are_recorded() {
        let mut buf = AttributedBuffer::new("");
        assert!(buf.appearance().is_none());
        buf.reload_display();
        buf.reload_display();
        assert_eq!(buf.display_reloads(), 2);

        let appearance = SurfaceAppearance {
            background: BLUE,
            insertion_point: RED,
            selection: RED,
            line_highlight: RED,
            invisibles: RED,
        };
        buf.set_appearance(&appearance);
        assert_eq!(buf.appearance(), Some(&appearance));
    }

    /// Checks the run invariants and compares every byte against a plain
    /// per-byte model.
    fn assert_matches_model(buf: &AttributedBuffer, model: &[Attributes]) {
        let runs: Vec<_> = buf.runs().collect();
        assert_eq!(runs.last().map_or(0, |(r, _)| r.end), model.len());
        for pair in runs.windows(2) {
            assert_ne!(pair[0].1, pair[1].1, "adjacent runs {:?} and {:?} are equal", pair[0].0, pair[1].0);
        }
        for (range, attrs) in runs {
            assert!(!range.is_empty());
            for offset in range {
                assert_eq!(attrs, &model[offset], "byte {}", offset);
            }
        }
    }

    #[test]
    fn test_overlays_in_any_order_keep_runs_consistent() {
        let text = "fn main() {\n    let x = 1;\n}\n";
        let mut buf = AttributedBuffer::new(text);
        let mut model = vec![Attributes::default(); text.len()];
        let red = Attributes::foreground(RED);
        let blue = Attributes::foreground(BLUE);

        let writes: [(Range<usize>, &Attributes, bool); 9] = [
            (0..text.len(), &red, true),
            (0..2, &blue, false),
            (3..7, &blue, false),
            (16..19, &blue, false),
            (8..9, &blue, false),
            (2..3, &blue, false),
            (20..40, &red, true),
            (1..5, &Attributes::default(), true),
            (0..12, &red, false),
        ];
        for (range, attrs, replace) in writes {
            if replace {
                buf.set_attributes(range.clone(), attrs);
            } else {
                buf.add_attributes(range.clone(), attrs);
            }
            let end = range.end.min(text.len());
            for slot in &mut model[range.start.min(end)..end] {
                if replace {
                    *slot = attrs.clone();
                } else {
                    slot.merge(attrs);
                }
            }
            assert_matches_model(&buf, &model);
        }

        assert!(buf.apply_edit(&TextEdit::new(4..8, "")));
        model.drain(4..8);
        assert_matches_model(&buf, &model);
        buf.add_attributes(10..12, &blue);
        for slot in &mut model[10..12] {
            slot.merge(&blue);
        }
        assert_matches_model(&buf, &model);
    }
}
