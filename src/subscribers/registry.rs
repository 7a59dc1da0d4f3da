//! # Per-event-name handler registry.
//!
//! Keeps, for every event name, the ordered list of subscribed [`Handler`]s.
//!
//! ## Architecture
//! ```text
//! add(name, h)      ──► [Entry{h, live}] appended to list(name)
//! remove(name, h)   ──► first entry with same identity removed, live := false
//! snapshot(name)    ──► Vec<Entry> sorted by Shape (stable), shares `live` flags
//! purge_stale(name) ──► drops direct entries whose subscriber is gone
//! ```
//!
//! ## Rules
//! - Registration order is preserved inside a shape; duplicates are kept.
//! - A snapshot is a copy: later adds are not visible to it, but removals are,
//!   through the shared `live` flag.
//! - Removing an unknown handler or from an unknown name is a no-op.
//! - Empty lists are dropped from the map.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::handler::Handler;

/// One registration of one handler under one name.
#[derive(Clone, Debug)]
pub(crate) struct Entry {
    handler: Handler,
    live: Arc<AtomicBool>,
}

impl Entry {
    fn new(handler: Handler) -> Self {
        Self {
            handler,
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    #[inline]
    pub(crate) fn handler(&self) -> &Handler {
        &self.handler
    }

    /// `false` once the registration has been removed.
    #[inline]
    pub(crate) fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn retire(&self) {
        self.live.store(false, Ordering::Release);
    }
}

/// Ordered handler lists keyed by event name.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    by_name: HashMap<String, Vec<Entry>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a handler and returns its entry (used for subscribe-time replay).
    pub(crate) fn add(&mut self, name: &str, handler: Handler) -> Entry {
        let entry = Entry::new(handler);
        match self.by_name.get_mut(name) {
            Some(list) => list.push(entry.clone()),
            None => {
                self.by_name.insert(name.to_owned(), vec![entry.clone()]);
            }
        }
        entry
    }

    /// Removes the earliest registration of `handler` under `name`.
    ///
    /// Returns `true` if something was removed.
    pub(crate) fn remove(&mut self, name: &str, handler: &Handler) -> bool {
        let Some(list) = self.by_name.get_mut(name) else {
            return false;
        };
        let Some(pos) = list.iter().position(|e| e.handler.same_as(handler)) else {
            return false;
        };

        let entry = list.remove(pos);
        entry.retire();
        if list.is_empty() {
            self.by_name.remove(name);
        }
        true
    }

    /// Copy of the handlers for `name`, ordered for dispatch.
    pub(crate) fn snapshot(&self, name: &str) -> Vec<Entry> {
        let mut entries = self.by_name.get(name).cloned().unwrap_or_default();
        entries.sort_by_key(|e| e.handler.shape());
        entries
    }

    /// Drops direct handlers whose subscriber no longer exists. Returns how many.
    pub(crate) fn purge_stale(&mut self, name: &str) -> usize {
        let Some(list) = self.by_name.get_mut(name) else {
            return 0;
        };
        let before = list.len();
        list.retain(|e| {
            let stale = e.handler.is_stale();
            if stale {
                e.retire();
            }
            !stale
        });
        let purged = before - list.len();
        if list.is_empty() {
            self.by_name.remove(name);
        }
        purged
    }

    /// Number of registrations under `name`, all shapes.
    pub(crate) fn count(&self, name: &str) -> usize {
        self.by_name.get(name).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandlerResult;
    use crate::events::{Payload, Sender};
    use crate::subscribers::{Shape, Subscriber};

    struct Noop;

    impl Subscriber for Noop {
        fn dispatch(&self, _: &str, _: Option<&Sender>, _: Option<&Payload>) -> HandlerResult {
            Ok(())
        }
    }

    #[test]
    fn test_snapshot_orders_by_shape_then_registration() {
        let mut reg = Registry::new();
        let bare = Handler::bare(|| Ok(()));
        let full_a = Handler::full(|_, _| Ok(()));
        let payload = Handler::payload(|_| Ok(()));
        let full_b = Handler::full(|_, _| Ok(()));
        let sub = Arc::new(Noop);

        reg.add("E", bare.clone());
        reg.add("E", full_a.clone());
        reg.add("E", payload.clone());
        reg.add("E", Handler::direct(&sub));
        reg.add("E", full_b.clone());

        let snap = reg.snapshot("E");
        let shapes: Vec<Shape> = snap.iter().map(|e| e.handler().shape()).collect();
        assert_eq!(
            shapes,
            vec![
                Shape::Direct,
                Shape::SenderAndPayload,
                Shape::SenderAndPayload,
                Shape::PayloadOnly,
                Shape::NoArgs
            ]
        );
        assert!(snap[1].handler().same_as(&full_a));
        assert!(snap[2].handler().same_as(&full_b));
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut reg = Registry::new();
        let h = Handler::bare(|| Ok(()));
        assert!(!reg.remove("nothing", &h));

        reg.add("E", Handler::bare(|| Ok(())));
        assert!(!reg.remove("E", &h));
        assert_eq!(reg.count("E"), 1);
    }

    #[test]
    fn test_remove_retires_snapshot_entry() {
        let mut reg = Registry::new();
        let h = Handler::bare(|| Ok(()));
        reg.add("E", h.clone());

        let snap = reg.snapshot("E");
        assert!(snap[0].is_live());

        assert!(reg.remove("E", &h));
        assert!(!snap[0].is_live());
        assert_eq!(reg.count("E"), 0);
        assert!(reg.snapshot("E").is_empty());
    }

    #[test]
    fn test_duplicates_removed_one_at_a_time() {
        let mut reg = Registry::new();
        let h = Handler::payload(|_| Ok(()));
        reg.add("E", h.clone());
        reg.add("E", h.clone());
        assert_eq!(reg.count("E"), 2);

        assert!(reg.remove("E", &h));
        assert_eq!(reg.count("E"), 1);
        assert!(reg.remove("E", &h));
        assert!(!reg.remove("E", &h));
    }

    #[test]
    fn test_purge_stale_keeps_live_handlers() {
        let mut reg = Registry::new();
        let alive = Arc::new(Noop);
        let gone = Arc::new(Noop);
        reg.add("E", Handler::direct(&gone));
        reg.add("E", Handler::direct(&alive));
        reg.add("E", Handler::bare(|| Ok(())));

        let snap = reg.snapshot("E");
        drop(gone);

        assert_eq!(reg.purge_stale("E"), 1);
        assert_eq!(reg.count("E"), 2);
        assert!(!snap[0].is_live());
        assert!(snap[1].is_live());
        assert_eq!(reg.purge_stale("unknown"), 0);
    }
}
