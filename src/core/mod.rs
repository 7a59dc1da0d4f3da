//! Mediator core: dispatch, replay and tick tracking.
//!
//! The public API from this module is [`Mediator`] plus the pieces a host uses to set it up.
//!
//! Internal modules:
//! - [`mediator`]: publish/subscribe/unsubscribe, dispatch passes, replay;
//! - [`builder`]: builds a mediator with a config and tick source;
//! - [`config`]: host-settable options;
//! - [`tick`]: host tick sources;
//! - [`global`]: process-wide default instance and free-function shorthands.

mod builder;
mod config;
mod global;
mod mediator;
mod tick;

pub use builder::MediatorBuilder;
pub use config::MediatorConfig;
pub use global::{
    clear_frame_events, publish, publish_bare, publish_payload, subscribe, unsubscribe,
};
pub use mediator::Mediator;
pub use tick::{FrozenTick, IntervalTicks, ManualTicks, TickSource};
