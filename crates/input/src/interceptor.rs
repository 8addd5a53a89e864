// Chunk: docs/chunks/tab_interceptor - Key event model and tab expansion
//!
//! Tab expansion at the event-stream level.
//!
//! The interceptor watches every key transition the process receives and,
//! when the tab key goes down, asks for a run of spaces to be inserted at
//! the caret. It is a pass-through filter: the observed event is always
//! forwarded to the normal input pipeline afterwards.
//!
//! Key-repeat produces a stream of presses without releases. A single
//! "a key is down" guard turns that stream into exactly one insertion per
//! physical press: the first press sets the guard, later presses are
//! ignored until a release clears it.

use std::num::NonZeroUsize;

use crate::monitor::{KeyMonitor, MonitorHandle};
use crate::{KeyEvent, KeyEventKind};

/// What the interceptor decided for one observed event.
///
/// In both cases the event itself continues down the host's pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interception {
    /// Nothing to do besides forwarding the event.
    PassThrough,
    /// Insert this text at the caret, then forward the event.
    Insert(String),
}

impl Interception {
    /// The text to insert, if any.
    pub fn insertion(&self) -> Option<&str> {
        match self {
            Interception::PassThrough => None,
            Interception::Insert(text) => Some(text),
        }
    }
}

/// Expands tab presses into spaces, once per physical key press.
///
/// One interceptor belongs to one editing surface; the guard must not be
/// shared between surfaces.
#[derive(Debug)]
pub struct InputInterceptor {
    tab_width: NonZeroUsize,
    /// True while a key is held
    key_down: bool,
    /// Set while registered with the host's key monitor
    handle: Option<MonitorHandle>,
}

impl InputInterceptor {
    pub fn new(tab_width: NonZeroUsize) -> Self {
        Self {
            tab_width,
            key_down: false,
            handle: None,
        }
    }

    pub fn tab_width(&self) -> NonZeroUsize {
        self.tab_width
    }

    pub fn set_tab_width(&mut self, tab_width: NonZeroUsize) {
        self.tab_width = tab_width;
    }

    pub fn is_key_down(&self) -> bool {
        self.key_down
    }

    pub fn is_registered(&self) -> bool {
        self.handle.is_some()
    }

    /// Registers with the host's process-wide key monitor.
    ///
    /// Registering twice keeps the first registration.
    pub fn register(&mut self, monitor: &mut dyn KeyMonitor) {
        if self.handle.is_none() {
            let handle = monitor.add_monitor();
            tracing::debug!(monitor = handle.id(), "input interceptor registered");
            self.handle = Some(handle);
        }
    }

    /// Deregisters from the host's key monitor and clears the key guard.
    pub fn unregister(&mut self, monitor: &mut dyn KeyMonitor) {
        if let Some(handle) = self.handle.take() {
            monitor.remove_monitor(handle);
            tracing::debug!(monitor = handle.id(), "input interceptor deregistered");
        }
        self.key_down = false;
    }

    /// Observes one key transition.
    ///
    /// Events seen while unregistered are passed through untouched and do
    /// not affect the guard.
    pub fn observe(&mut self, event: &KeyEvent) -> Interception {
        if self.handle.is_none() {
            return Interception::PassThrough;
        }

        match event.kind {
            KeyEventKind::Press => {
                if self.key_down {
                    tracing::trace!(key = ?event.key, "press while key down, ignored");
                    return Interception::PassThrough;
                }
                self.key_down = true;
                if event.is_tab() {
                    let spaces = " ".repeat(self.tab_width.get());
                    tracing::trace!(width = self.tab_width.get(), "expanding tab");
                    Interception::Insert(spaces)
                } else {
                    Interception::PassThrough
                }
            }
            KeyEventKind::Release => {
                self.key_down = false;
                Interception::PassThrough
            }
        }
    }
}
