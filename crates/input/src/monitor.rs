// Chunk: docs/chunks/tab_interceptor - Key event model and tab expansion
//!
//! Process-wide key monitor registration.
//!
//! A key monitor sees every key transition the process receives, not just
//! the ones routed to the focused widget (compare `NSEvent`'s local
//! monitors). The host owns the real monitor list; the interceptor only
//! holds the handle it was given so it can deregister on teardown.

use std::collections::BTreeSet;

/// Opaque token identifying one registered monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonitorHandle(u64);

impl MonitorHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Host-side registry of process-wide key monitors.
pub trait KeyMonitor {
    /// Starts delivering key presses and releases to a new monitor.
    fn add_monitor(&mut self) -> MonitorHandle;

    /// Stops delivering events to `handle`. Unknown handles are ignored.
    fn remove_monitor(&mut self, handle: MonitorHandle);
}

/// An in-memory [`KeyMonitor`] that tracks which monitors are live.
#[derive(Debug, Default)]
pub struct MonitorRegistry {
    next_id: u64,
    active: BTreeSet<MonitorHandle>,
}

impl MonitorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, handle: MonitorHandle) -> bool {
        self.active.contains(&handle)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

impl KeyMonitor for MonitorRegistry {
    fn add_monitor(&mut self) -> MonitorHandle {
        let handle = MonitorHandle(self.next_id);
        self.next_id += 1;
        self.active.insert(handle);
        handle
    }

    fn remove_monitor(&mut self, handle: MonitorHandle) {
        self.active.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let mut registry = MonitorRegistry::new();
        let a = registry.add_monitor();
        let b = registry.add_monitor();
        assert_ne!(a, b);
        assert_eq!(registry.active_count(), 2);
    }

    #[test]
    fn test_remove_monitor() {
        let mut registry = MonitorRegistry::new();
        let a = registry.add_monitor();
        registry.remove_monitor(a);
        assert!(!registry.is_active(a));
        // removing twice is harmless
        registry.remove_monitor(a);
        assert_eq!(registry.active_count(), 0);
    }
}
