//! # Direct subscriber trait.
//!
//! Provides [`Subscriber`], the capability-object way of receiving events: one object,
//! one generic `dispatch` entry point for every event name it is subscribed to.
//!
//! ## Rules
//! - The mediator keeps only a **weak** reference. Once the last `Arc` is dropped the
//!   subscriber is skipped and purged on the next publish of that name; explicit
//!   unsubscription is optional.
//! - `dispatch` runs inline on the publisher's thread; it may call back into the mediator.
//! - Returning `Err` stops the current publish pass and surfaces
//!   [`MediatorError::SubscriberFailed`](crate::MediatorError::SubscriberFailed) to the publisher.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use tickbus::{HandlerResult, Mediator, Payload, Sender, Subscriber};
//!
//! struct Spawner;
//!
//! impl Subscriber for Spawner {
//!     fn dispatch(&self, event: &str, _sender: Option<&Sender>, args: Option<&Payload>) -> HandlerResult {
//!         match event {
//!             "Spawn" => {
//!                 let _prefab = args.and_then(|a| a.get("objectToSpawn"));
//!                 Ok(())
//!             }
//!             _ => Ok(()),
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "spawner" }
//! }
//!
//! let mediator = Mediator::new();
//! let spawner = Arc::new(Spawner);
//! mediator.subscribe("Spawn", &spawner).unwrap();
//! mediator.publish_bare("Spawn").unwrap();
//! ```

use crate::error::HandlerResult;
use crate::events::{Payload, Sender};

/// Object receiving every event it is subscribed to through one entry point.
///
/// Subscribed to several names, the implementation branches on `event` itself.
pub trait Subscriber: Send + Sync + 'static {
    /// Handles one event.
    ///
    /// Called for live publishes and for replays of events published earlier in the
    /// current tick (right after subscribing).
    fn dispatch(
        &self,
        event: &str,
        sender: Option<&Sender>,
        payload: Option<&Payload>,
    ) -> HandlerResult;

    /// Returns the subscriber name used in logs and in `SubscriberFailed` errors.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
