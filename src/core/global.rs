//! # Process-wide default mediator.
//!
//! Most hosts want exactly one mediator shared by every component. [`Mediator::global`]
//! creates it lazily on first use and keeps it for the whole process; the free functions
//! below are shorthands for calling it.
//!
//! Tests and embedded hosts that need isolation should build their own [`Mediator`]
//! instead and pass it around.

use std::sync::OnceLock;

use crate::error::MediatorError;
use crate::events::{Payload, Sender};
use crate::subscribers::Handler;

use super::mediator::Mediator;

static GLOBAL: OnceLock<Mediator> = OnceLock::new();

impl Mediator {
    /// The process-wide instance (default config, [`FrozenTick`](crate::FrozenTick) source).
    ///
    /// Install a real clock with [`Mediator::set_tick_source`] during host startup.
    pub fn global() -> &'static Mediator {
        GLOBAL.get_or_init(Mediator::new)
    }
}

/// [`Mediator::subscribe`] on the global instance.
pub fn subscribe(name: &str, handler: impl Into<Handler>) -> Result<(), MediatorError> {
    Mediator::global().subscribe(name, handler)
}

/// [`Mediator::unsubscribe`] on the global instance.
pub fn unsubscribe(name: &str, handler: impl Into<Handler>) -> Result<(), MediatorError> {
    Mediator::global().unsubscribe(name, handler)
}

/// [`Mediator::publish`] on the global instance.
pub fn publish(
    name: &str,
    sender: Option<Sender>,
    payload: Option<Payload>,
) -> Result<(), MediatorError> {
    Mediator::global().publish(name, sender, payload)
}

/// [`Mediator::publish_payload`] on the global instance.
pub fn publish_payload(name: &str, payload: Payload) -> Result<(), MediatorError> {
    Mediator::global().publish_payload(name, payload)
}

/// [`Mediator::publish_bare`] on the global instance.
pub fn publish_bare(name: &str) -> Result<(), MediatorError> {
    Mediator::global().publish_bare(name)
}

/// [`Mediator::clear_frame_events`] on the global instance.
pub fn clear_frame_events() {
    Mediator::global().clear_frame_events();
}
