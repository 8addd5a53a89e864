// Chunk: docs/chunks/reconciliation - Dependency reconciliation for the text surface
//!
//! Integration tests for typing into a reconciled surface.
//!
//! These exercise the full path from KeyEvent or host edit, through the
//! incremental reparse, to the restyled attribute runs. A range-scoped
//! restyle must leave the surface exactly as a full restyle would.

use std::num::NonZeroUsize;
use std::ops::Range;

use quill::{default_font, EditorConfig, ReconcileAction, ReconciliationController};
use quill_input::{Key, KeyEvent, MonitorRegistry};
use quill_surface::{Attributes, AttributedBuffer, RulerState, TextEdit, TextSurface};
use quill_syntax::{Language, LanguageRegistry, Theme};

type Controller = ReconciliationController<AttributedBuffer, RulerState, LanguageRegistry>;

fn controller(text: &str, language: &str, tab_width: usize) -> Controller {
    let config = EditorConfig::new(text, Language::new(language), Theme::catppuccin_mocha(), default_font())
        .with_tab_width(NonZeroUsize::new(tab_width).unwrap());
    ReconciliationController::new(config, AttributedBuffer::new(""), RulerState::new(), LanguageRegistry::new())
        .unwrap()
}

fn snapshot(controller: &Controller) -> Vec<(Range<usize>, Attributes)> {
    controller.surface().runs().map(|(r, a)| (r, a.clone())).collect()
}

/// A controller freshly constructed over the same text, for comparison.
fn fresh_snapshot(controller: &Controller) -> Vec<(Range<usize>, Attributes)> {
    let text = controller.surface().text().to_string();
    let fresh = controller_like(controller, &text);
    snapshot(&fresh)
}

fn controller_like(controller: &Controller, text: &str) -> Controller {
    let config = EditorConfig::new(
        text,
        controller.language().clone(),
        controller.theme().clone(),
        controller.font().clone(),
    )
    .with_tab_width(controller.tab_width());
    ReconciliationController::new(config, AttributedBuffer::new(""), RulerState::new(), LanguageRegistry::new())
        .unwrap()
}

/// Applies a host edit to the surface and reports it, as the host's delegate would.
fn host_edit(controller: &mut Controller, edit: TextEdit) {
    assert!(controller.surface_mut().apply_edit(&edit));
    let report = controller.text_did_change(&edit);
    assert_eq!(report.actions[0], ReconcileAction::ReparseText);
}

#[test]
fn test_tab_inserts_configured_spaces() {
    let mut registry = MonitorRegistry::new();
    let mut c = controller("fn main() {\n}\n", "rust", 4);
    c.activate(&mut registry);
    c.surface_mut().set_caret(12);

    let edit = c.handle_key_event(&KeyEvent::press(Key::Tab));
    assert_eq!(edit, Some(TextEdit::insertion(12, "    ")));
    assert_eq!(c.surface().text(), "fn main() {\n    }\n");
    assert_eq!(c.surface().caret(), 16);
}

#[test]
fn test_holding_tab_inserts_once() {
    let mut registry = MonitorRegistry::new();
    let mut c = controller("", "plaintext", 4);
    c.activate(&mut registry);

    for _ in 0..20 {
        c.handle_key_event(&KeyEvent::press(Key::Tab));
    }
    assert_eq!(c.surface().text(), "    ");

    c.handle_key_event(&KeyEvent::release(Key::Tab));
    c.handle_key_event(&KeyEvent::press(Key::Tab));
    assert_eq!(c.surface().text(), " ".repeat(8));
}

#[test]
fn test_tab_width_change_applies_to_next_press() {
    let mut registry = MonitorRegistry::new();
    let mut c = controller("", "plaintext", 4);
    c.activate(&mut registry);
    c.set_tab_width(NonZeroUsize::new(2).unwrap());

    c.handle_key_event(&KeyEvent::press(Key::Tab));
    assert_eq!(c.surface().text(), "  ");
}

#[test]
fn test_inactive_controller_ignores_tabs() {
    let mut registry = MonitorRegistry::new();
    let mut c = controller("x", "plaintext", 4);
    assert!(c.handle_key_event(&KeyEvent::press(Key::Tab)).is_none());

    c.activate(&mut registry);
    assert!(c.is_active());
    c.deactivate(&mut registry);
    assert!(!c.is_active());
    assert_eq!(registry.active_count(), 0);
    assert!(c.handle_key_event(&KeyEvent::press(Key::Tab)).is_none());
    assert_eq!(c.surface().text(), "x");
}

#[test]
fn test_other_keys_pass_through() {
    let mut registry = MonitorRegistry::new();
    let mut c = controller("x", "plaintext", 4);
    c.activate(&mut registry);
    assert!(c.handle_key_event(&KeyEvent::char('a')).is_none());
    assert!(c.handle_key_event(&KeyEvent::release(Key::Char('a'))).is_none());
    assert_eq!(c.surface().text(), "x");
}

#[test]
fn test_inserted_spaces_are_styled() {
    let mut registry = MonitorRegistry::new();
    let mut c = controller("fn main() {\n}\n", "rust", 4);
    c.activate(&mut registry);
    c.surface_mut().set_caret(12);
    c.handle_key_event(&KeyEvent::press(Key::Tab));

    assert_eq!(snapshot(&c), fresh_snapshot(&c));
}

#[test]
fn test_range_restyle_matches_full_restyle() {
    let mut c = controller("fn main() {\n    let x = 1;\n}\n", "rust", 4);

    host_edit(&mut c, TextEdit::new(20..21, "total"));
    assert_eq!(snapshot(&c), fresh_snapshot(&c));

    host_edit(&mut c, TextEdit::insertion(0, "// entry point\n"));
    assert_eq!(snapshot(&c), fresh_snapshot(&c));

    host_edit(&mut c, TextEdit::deletion(0..15));
    assert_eq!(snapshot(&c), fresh_snapshot(&c));
}

#[test]
fn test_restyled_range_covers_whole_lines() {
    let mut c = controller("fn a() {}\nfn b() {}\nfn c() {}\n", "rust", 4);
    let edit = TextEdit::new(13..14, "bee");
    assert!(c.surface_mut().apply_edit(&edit));
    let report = c.text_did_change(&edit);

    assert!(report.contains(ReconcileAction::ApplyRangeStyle));
    let restyled = report.restyled.unwrap();
    assert!(restyled.start <= 10 && restyled.end >= 22, "{:?}", restyled);
    let text = c.surface().text();
    assert!(restyled.start == 0 || text.as_bytes()[restyled.start - 1] == b'\n');
    assert!(restyled.end == text.len() || text.as_bytes()[restyled.end - 1] == b'\n');
    assert_eq!(snapshot(&c), fresh_snapshot(&c));
}

#[test]
fn test_edits_inside_multiline_captures_match_full_restyle() {
    let samples = [
        ("toml", "[a]\nb = \"\"\"x\ny\"\"\"\nc = 1\n"),
        ("rust", "/* one\ntwo */\nfn f() {\n    let s = \"a\nb\";\n}\n"),
        ("python", "def f():\n    \"\"\"doc\n    more\"\"\"\n    return 1\n"),
    ];
    for (language, source) in samples {
        for offset in 0..=source.len() {
            let mut c = controller(source, language, 4);
            host_edit(&mut c, TextEdit::insertion(offset, "z"));
            assert_eq!(snapshot(&c), fresh_snapshot(&c), "{}: insert at {}", language, offset);

            if offset < source.len() {
                let mut c = controller(source, language, 4);
                host_edit(&mut c, TextEdit::deletion(offset..offset + 1));
                assert_eq!(snapshot(&c), fresh_snapshot(&c), "{}: delete at {}", language, offset);
            }
        }
    }
}

#[test]
fn test_edit_without_grammar_restyles_edited_lines() {
    let mut c = controller("one\ntwo\nthree\n", "plaintext", 4);
    let edit = TextEdit::insertion(5, "wo-t");
    assert!(c.surface_mut().apply_edit(&edit));
    let report = c.text_did_change(&edit);

    assert_eq!(report.restyled, Some(4..12));
    assert_eq!(snapshot(&c), fresh_snapshot(&c));
}

#[test]
fn test_json_typing_sequence() {
    let mut c = controller("{}", "json", 2);
    let mut offset = 1;
    for piece in ["\"", "k", "\"", ":", " ", "[", "1", ",", " ", "true", "]"] {
        host_edit(&mut c, TextEdit::insertion(offset, piece));
        offset += piece.len();
    }
    assert_eq!(c.surface().text(), "{\"k\": [1, true]}");
    assert_eq!(snapshot(&c), fresh_snapshot(&c));
}
