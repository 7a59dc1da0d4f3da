//! # Event subscribers.
//!
//! This module provides the [`Subscriber`] trait, the unified [`Handler`] wrapping every
//! supported calling convention, and the per-event-name registry the mediator keeps them in.
//!
//! ## Architecture
//! ```text
//! Mediator::publish(name) ──► Registry::snapshot(name)
//!                                  │
//!                                  ├──► Direct            subscriber.dispatch(name, sender, payload)
//!                                  ├──► SenderAndPayload  f(sender, payload)
//!                                  ├──► SenderOnly        f(sender)
//!                                  ├──► PayloadOnly       f(payload)
//!                                  └──► NoArgs            f()
//! ```
//!
//! ## Subscriber types
//! - **Direct subscribers** - objects implementing [`Subscriber`], held weakly and purged
//!   automatically once dropped
//! - **Callback subscribers** - closures wrapped with [`Handler::full`], [`Handler::sender`],
//!   [`Handler::payload`] or [`Handler::bare`]

mod handler;
#[cfg(feature = "logging")]
mod log;
mod registry;
mod subscriber;

pub(crate) use handler::Delivery;
pub use handler::{Handler, Shape};
#[cfg(feature = "logging")]
pub use log::LogWriter;
pub(crate) use registry::{Entry, Registry};
pub use subscriber::Subscriber;
