//! # Per-tick replay buffer.
//!
//! [`FrameEvents`] remembers every publish of the **current tick**, grouped by event name,
//! so that a handler subscribing later in the same tick can still observe them.
//!
//! ## Rules
//! - Events are appended in publish order per name; replay preserves that order.
//! - The whole buffer is cleared when the observed tick moves forward (never per name).
//! - A tick lower than or equal to the last observed one changes nothing.
//! - [`FrameEvents::clear`] drops everything regardless of ticks.

use std::collections::HashMap;

use super::event::RecordedEvent;

/// Events published during the current tick, keyed by event name.
#[derive(Debug, Default)]
pub struct FrameEvents {
    by_name: HashMap<String, Vec<RecordedEvent>>,
    last_tick: u64,
}

impl FrameEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the host tick. Returns `true` if the tick advanced and the buffer was cleared.
    pub fn observe_tick(&mut self, tick: u64) -> bool {
        if tick <= self.last_tick {
            return false;
        }
        self.last_tick = tick;
        self.by_name.clear();
        true
    }

    /// Appends a publish after any earlier ones for the same name.
    pub fn record(&mut self, name: &str, event: RecordedEvent) {
        match self.by_name.get_mut(name) {
            Some(list) => list.push(event),
            None => {
                self.by_name.insert(name.to_owned(), vec![event]);
            }
        }
    }

    /// Copies the events recorded for `name` this tick, oldest first.
    ///
    /// A copy is returned because replay runs user code that may publish again.
    pub fn backlog(&self, name: &str) -> Vec<RecordedEvent> {
        self.by_name.get(name).cloned().unwrap_or_default()
    }

    pub fn was_published(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn clear(&mut self) {
        self.by_name.clear();
    }

    /// Clears the buffer and restarts tick tracking from `tick` (used when the
    /// host swaps its tick source).
    pub fn reset(&mut self, tick: u64) {
        self.by_name.clear();
        self.last_tick = tick;
    }

    /// Total number of recorded events across all names.
    pub fn len(&self) -> usize {
        self.by_name.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    #[inline]
    pub fn last_tick(&self) -> u64 {
        self.last_tick
    }
}
