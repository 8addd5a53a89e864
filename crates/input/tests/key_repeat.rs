// Chunk: docs/chunks/tab_interceptor - Key event model and tab expansion

//! Integration tests for tab expansion over realistic key streams.
//!
//! Hosts deliver auto-repeat as repeated presses with no release in
//! between; these tests feed such streams and count what gets inserted.

use std::num::NonZeroUsize;

use quill_input::{InputInterceptor, Key, KeyEvent, MonitorRegistry};

fn run(interceptor: &mut InputInterceptor, events: &[KeyEvent]) -> String {
    events
        .iter()
        .filter_map(|e| interceptor.observe(e).insertion().map(str::to_string))
        .collect()
}

fn interceptor(width: usize, registry: &mut MonitorRegistry) -> InputInterceptor {
    let mut interceptor = InputInterceptor::new(NonZeroUsize::new(width).unwrap());
    interceptor.register(registry);
    interceptor
}

#[test]
fn test_two_separate_tab_strokes() {
    let mut registry = MonitorRegistry::new();
    let mut tabs = interceptor(4, &mut registry);
    let events = [
        KeyEvent::press(Key::Tab),
        KeyEvent::release(Key::Tab),
        KeyEvent::press(Key::Tab),
        KeyEvent::release(Key::Tab),
    ];
    assert_eq!(run(&mut tabs, &events), " ".repeat(8));
}

#[test]
fn test_long_hold_inserts_one_run() {
    let mut registry = MonitorRegistry::new();
    let mut tabs = interceptor(4, &mut registry);
    let mut events = vec![KeyEvent::press(Key::Tab); 50];
    events.push(KeyEvent::release(Key::Tab));
    assert_eq!(run(&mut tabs, &events), "    ");
}

#[test]
fn test_typing_between_tabs() {
    let mut registry = MonitorRegistry::new();
    let mut tabs = interceptor(2, &mut registry);
    let events = [
        KeyEvent::char('x'),
        KeyEvent::release(Key::Char('x')),
        KeyEvent::press(Key::Tab),
        KeyEvent::release(Key::Tab),
        KeyEvent::char('y'),
        KeyEvent::release(Key::Char('y')),
    ];
    assert_eq!(run(&mut tabs, &events), "  ");
}

#[test]
fn test_each_surface_has_its_own_guard() {
    let mut registry = MonitorRegistry::new();
    let mut left = interceptor(4, &mut registry);
    let mut right = interceptor(4, &mut registry);

    assert_eq!(run(&mut left, &[KeyEvent::press(Key::Tab)]), "    ");
    assert_eq!(run(&mut right, &[KeyEvent::press(Key::Tab)]), "    ");
    assert_eq!(registry.active_count(), 2);
}
