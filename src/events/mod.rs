//! Event data model and the per-tick replay buffer.
//!
//! ## Contents
//! - [`Sender`], [`Payload`], [`Value`] opaque event parts passed through unchanged
//! - [`RecordedEvent`] one publish as remembered for replay
//! - [`FrameEvents`] events of the current tick, grouped by name
//!
//! See `core/mod.rs` for how the mediator wires these together.

mod event;
mod frame;

pub(crate) use event::check_name;
pub use event::{same_object, Payload, RecordedEvent, Sender, Value};
pub use frame::FrameEvents;
