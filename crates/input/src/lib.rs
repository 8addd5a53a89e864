// Chunk: docs/chunks/tab_interceptor - Key event model and tab expansion
//!
//! Key event types and the input interceptor.
//!
//! These types abstract over the host's native key events (`NSEvent`,
//! `GdkEventKey`, ...) and provide a clean Rust-native interface. Unlike the
//! events a focused widget receives, every event here carries its transition
//! kind, because the interceptor observes both halves of a key stroke.

mod interceptor;
mod monitor;

pub use interceptor::{InputInterceptor, Interception};
pub use monitor::{KeyMonitor, MonitorHandle, MonitorRegistry};

/// Whether a key went down or came up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    Press,
    Release,
}

/// A keyboard event.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyEvent {
    /// The key involved
    pub key: Key,
    /// Modifier keys held during the event
    pub modifiers: Modifiers,
    /// Press or release
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Creates a new KeyEvent with the given key, modifiers and transition.
    pub fn new(key: Key, modifiers: Modifiers, kind: KeyEventKind) -> Self {
        Self {
            key,
            modifiers,
            kind,
        }
    }

    /// A press of `key` with no modifiers.
    pub fn press(key: Key) -> Self {
        Self::new(key, Modifiers::default(), KeyEventKind::Press)
    }

    /// A release of `key` with no modifiers.
    pub fn release(key: Key) -> Self {
        Self::new(key, Modifiers::default(), KeyEventKind::Release)
    }

    /// A press of a printable character with no modifiers.
    pub fn char(ch: char) -> Self {
        Self::press(Key::Char(ch))
    }

    pub fn is_press(&self) -> bool {
        self.kind == KeyEventKind::Press
    }

    /// Returns true if the key produces a tab character.
    ///
    /// Hosts report the tab key either as [`Key::Tab`] or as the `'\t'`
    /// character it types; both are the same physical key.
    pub fn is_tab(&self) -> bool {
        matches!(self.key, Key::Tab | Key::Char('\t'))
    }
}

/// Modifier keys that can be held during a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Shift key
    pub shift: bool,
    /// Command key (Cmd/⌘)
    pub command: bool,
    /// Option key (Alt/⌥)
    pub option: bool,
    /// Control key (Ctrl/⌃)
    pub control: bool,
}

impl Modifiers {
    /// Returns true if no modifier keys are held.
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.command && !self.option && !self.control
    }
}

/// Keys that can be pressed.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    /// A printable character (already accounts for shift state)
    Char(char),
    Backspace,
    Delete,
    Return,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Tab,
    Escape,
    PageUp,
    PageDown,
}
