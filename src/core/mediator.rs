//! # Mediator: publish/subscribe with per-tick replay.
//!
//! [`Mediator`] decouples producers from consumers: both only know an event name.
//!
//! ## Publish pipeline
//! ```text
//! publish(name, sender, payload)
//!   ├─► sync tick (clear replay buffer if the host tick advanced)
//!   ├─► snapshot handlers for `name` (lock released afterwards)
//!   ├─► 1. direct subscribers, registration order (dead ones skipped)
//!   ├─► 2. purge dead direct subscribers
//!   ├─► 3. callbacks: (sender, payload) → (sender) → (payload) → ()
//!   └─► 4. record {sender, payload} in the replay buffer (same tick only)
//!
//! subscribe(name, handler)
//!   ├─► sync tick
//!   ├─► append handler
//!   └─► replay this tick's events for `name` to this handler only, oldest first
//! ```
//!
//! ## Rules
//! - All state sits behind one lock that is **never** held while user code runs, so
//!   handlers may subscribe, unsubscribe or publish from inside a dispatch.
//! - A publish pass works on a snapshot: handlers added during the pass are not called by
//!   it; handlers removed during the pass are skipped if not reached yet.
//! - The first handler error stops the pass and is returned as
//!   [`MediatorError::SubscriberFailed`]; the event is then not recorded.
//! - An event is recorded only if the tick it was published in is still current once
//!   dispatch ends.
//! - Concurrent publishes of one name from different threads may be delivered live in a
//!   different order than they are replayed. Publishes from a single thread always keep
//!   their order.
//! - Unsubscribing something never subscribed is a no-op.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::core::builder::MediatorBuilder;
use crate::core::config::MediatorConfig;
use crate::core::tick::{FrozenTick, TickSource};
use crate::error::{HandlerError, MediatorError};
use crate::events::{check_name, FrameEvents, Payload, RecordedEvent, Sender};
use crate::subscribers::{Delivery, Entry, Handler, Registry, Shape};

/// Everything the mediator mutates, guarded by a single lock.
struct State {
    config: MediatorConfig,
    ticks: Arc<dyn TickSource>,
    frame: FrameEvents,
    registry: Registry,
}

impl State {
    /// Clears the replay buffer if the host tick moved forward.
    fn sync_tick(&mut self) {
        if !self.config.tick_clearing_enabled() {
            return;
        }
        let tick = self.ticks.current_tick();
        if self.frame.observe_tick(tick) {
            debug!(tick, "tick advanced, replay buffer cleared");
        }
    }
}

/// In-process event mediator.
///
/// Create one per host (or use [`Mediator::global`]) and share it by reference or `Arc`.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use tickbus::{payload, Handler, Mediator, MediatorConfig};
///
/// let mediator = Mediator::with_config(MediatorConfig::headless());
///
/// // Published before anyone listens...
/// mediator.publish_payload("Spawn", payload! { "objectToSpawn" => "pill" }).unwrap();
///
/// // ...still delivered to a subscriber arriving in the same tick.
/// let hits = Arc::new(AtomicUsize::new(0));
/// let h = Arc::clone(&hits);
/// mediator
///     .subscribe("Spawn", Handler::payload(move |args| {
///         assert_eq!(args.unwrap()["objectToSpawn"].as_str(), Some("pill"));
///         h.fetch_add(1, Ordering::SeqCst);
///         Ok(())
///     }))
///     .unwrap();
///
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
pub struct Mediator {
    state: Mutex<State>,
}

impl Mediator {
    /// Mediator with default config and a [`FrozenTick`] source.
    pub fn new() -> Self {
        Self::new_internal(MediatorConfig::default(), Arc::new(FrozenTick))
    }

    pub fn with_config(config: MediatorConfig) -> Self {
        Self::new_internal(config, Arc::new(FrozenTick))
    }

    pub fn builder() -> MediatorBuilder {
        MediatorBuilder::new(MediatorConfig::default())
    }

    pub(crate) fn new_internal(config: MediatorConfig, ticks: Arc<dyn TickSource>) -> Self {
        Self {
            state: Mutex::new(State {
                config,
                ticks,
                frame: FrameEvents::new(),
                registry: Registry::new(),
            }),
        }
    }

    /// Subscribes `handler` to `name`.
    ///
    /// If `name` was already published during the current tick, the handler is
    /// immediately called once per recorded publish, oldest first, before this returns.
    /// Other handlers are not called again.
    ///
    /// ### Errors
    /// - [`MediatorError::EmptyEventName`] for an empty name.
    /// - [`MediatorError::SubscriberFailed`] if the handler fails during replay
    ///   (the subscription itself stays in place).
    pub fn subscribe(&self, name: &str, handler: impl Into<Handler>) -> Result<(), MediatorError> {
        check_name(name, "subscribe")?;
        let handler = handler.into();

        let (entry, backlog) = {
            let mut st = self.state.lock();
            st.sync_tick();
            let entry = st.registry.add(name, handler);
            (entry, st.frame.backlog(name))
        };
        trace!(
            event = name,
            shape = ?entry.handler().shape(),
            replay = backlog.len(),
            "subscribe"
        );

        for ev in &backlog {
            if !entry.is_live() {
                break;
            }
            match entry.handler().deliver(name, ev) {
                Delivery::Done(Ok(())) => {}
                Delivery::Done(Err(source)) => {
                    return Err(Self::failed(name, entry.handler(), source));
                }
                Delivery::Stale => {
                    self.state.lock().registry.purge_stale(name);
                    break;
                }
            }
        }
        Ok(())
    }

    /// Removes one registration of `handler` from `name`.
    ///
    /// Unknown names and handlers never subscribed are ignored. Safe to call from inside
    /// a handler currently being dispatched for `name`.
    ///
    /// ### Errors
    /// [`MediatorError::EmptyEventName`] for an empty name.
    pub fn unsubscribe(&self, name: &str, handler: impl Into<Handler>) -> Result<(), MediatorError> {
        check_name(name, "unsubscribe")?;
        let handler = handler.into();

        let mut st = self.state.lock();
        st.sync_tick();
        let removed = st.registry.remove(name, &handler);
        trace!(event = name, shape = ?handler.shape(), removed, "unsubscribe");
        Ok(())
    }

    /// Publishes `name` to every current subscriber, then records it for late subscribers.
    ///
    /// ### Errors
    /// - [`MediatorError::EmptyEventName`] for an empty name.
    /// - [`MediatorError::SubscriberFailed`] for the first failing handler; handlers after
    ///   it are not called and the event is not recorded.
    pub fn publish(
        &self,
        name: &str,
        sender: Option<Sender>,
        payload: Option<Payload>,
    ) -> Result<(), MediatorError> {
        check_name(name, "publish")?;
        let event = RecordedEvent::new(sender, payload);

        let (entries, tick) = {
            let mut st = self.state.lock();
            st.sync_tick();
            (st.registry.snapshot(name), st.frame.last_tick())
        };
        trace!(event = name, subscribers = entries.len(), tick, "publish");

        let split = entries.partition_point(|e| e.handler().shape() == Shape::Direct);
        let (direct, callbacks) = entries.split_at(split);

        self.dispatch_direct(name, direct, &event)?;

        for entry in callbacks {
            if !entry.is_live() {
                continue;
            }
            if let Delivery::Done(Err(source)) = entry.handler().deliver(name, &event) {
                return Err(Self::failed(name, entry.handler(), source));
            }
        }

        let mut st = self.state.lock();
        st.sync_tick();
        if st.frame.last_tick() == tick {
            st.frame.record(name, event);
        } else {
            debug!(event = name, tick, "tick advanced during dispatch, publish not recorded");
        }
        Ok(())
    }

    /// Publishes with a payload and no sender.
    pub fn publish_payload(&self, name: &str, payload: Payload) -> Result<(), MediatorError> {
        self.publish(name, None, Some(payload))
    }

    /// Publishes with neither sender nor payload.
    pub fn publish_bare(&self, name: &str) -> Result<(), MediatorError> {
        self.publish(name, None, None)
    }

    /// Steps 1 and 2 of a publish: direct subscribers, then purge of dead ones.
    ///
    /// The purge also runs when a subscriber fails.
    fn dispatch_direct(
        &self,
        name: &str,
        direct: &[Entry],
        event: &RecordedEvent,
    ) -> Result<(), MediatorError> {
        let mut stale = 0usize;
        let mut outcome = Ok(());

        for entry in direct {
            if !entry.is_live() {
                continue;
            }
            match entry.handler().deliver(name, event) {
                Delivery::Done(Ok(())) => {}
                Delivery::Done(Err(source)) => {
                    outcome = Err(Self::failed(name, entry.handler(), source));
                    break;
                }
                Delivery::Stale => stale += 1,
            }
        }

        if stale > 0 {
            let purged = self.state.lock().registry.purge_stale(name);
            debug!(event = name, purged, "dropped subscribers purged");
        }
        outcome
    }

    fn failed(name: &str, handler: &Handler, source: HandlerError) -> MediatorError {
        debug!(
            event = name,
            subscriber = handler.name(),
            error = %source,
            "subscriber failed, propagating to publisher"
        );
        MediatorError::SubscriberFailed {
            event: name.to_owned(),
            subscriber: handler.name(),
            source,
        }
    }

    /// Drops every event recorded for the current tick, regardless of the tick source.
    pub fn clear_frame_events(&self) {
        self.state.lock().frame.clear();
    }

    /// Returns `true` if `name` was published during the current tick.
    ///
    /// ### Errors
    /// [`MediatorError::EmptyEventName`] for an empty name.
    pub fn was_published_this_tick(&self, name: &str) -> Result<bool, MediatorError> {
        check_name(name, "was_published_this_tick")?;
        let mut st = self.state.lock();
        st.sync_tick();
        Ok(st.frame.was_published(name))
    }

    /// Number of registrations (all shapes) for `name`.
    ///
    /// Dropped direct subscribers count until the next publish of `name` purges them.
    ///
    /// ### Errors
    /// [`MediatorError::EmptyEventName`] for an empty name.
    pub fn subscriber_count(&self, name: &str) -> Result<usize, MediatorError> {
        check_name(name, "subscriber_count")?;
        Ok(self.state.lock().registry.count(name))
    }

    /// Number of events currently held for replay, all names.
    pub fn buffered_events(&self) -> usize {
        self.state.lock().frame.len()
    }

    /// Enables or disables tick-driven clearing at runtime.
    pub fn set_ignore_tick(&self, ignore: bool) {
        self.state.lock().config.ignore_tick = ignore;
    }

    pub fn ignores_tick(&self) -> bool {
        self.state.lock().config.ignore_tick
    }

    /// Returns a copy of the current configuration.
    pub fn config(&self) -> MediatorConfig {
        self.state.lock().config.clone()
    }

    /// Installs a new tick source.
    ///
    /// The replay buffer is cleared and tick tracking restarts from the new source's
    /// current value.
    pub fn set_tick_source(&self, ticks: Arc<dyn TickSource>) {
        let mut st = self.state.lock();
        let now = ticks.current_tick();
        st.ticks = ticks;
        st.frame.reset(now);
        debug!(tick = now, "tick source replaced");
    }
}

impl Default for Mediator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Mediator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let st = self.state.lock();
        f.debug_struct("Mediator")
            .field("config", &st.config)
            .field("last_tick", &st.frame.last_tick())
            .field("buffered_events", &st.frame.len())
            .finish_non_exhaustive()
    }
}
