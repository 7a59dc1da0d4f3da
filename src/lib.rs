//! # tickbus
//!
//! **tickbus** is an in-process publish/subscribe mediator for tick-driven hosts
//! (game loops, simulations, UI frames).
//!
//! Producers and consumers only share an event name. On top of plain fan-out, the mediator
//! keeps a **per-tick replay buffer**: a handler that subscribes later in the same tick
//! still observes every event published earlier in that tick.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Button     │   │  Attacher    │   │  Host loop   │
//!     │ (publisher)  │   │ (publisher)  │   │ (tick source)│
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Mediator                                                         │
//! │  - Registry (ordered handlers per event name, all shapes)         │
//! │  - FrameEvents (events published during the current tick)         │
//! │  - TickSource (host clock, checked at every operation)            │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!   Subscriber::dispatch   f(sender, payload)   f(payload) / f(sender) / f()
//!   (direct, held weakly)  (callbacks, held by the registry)
//! ```
//!
//! ### Lifecycle
//! ```text
//! publish(name, sender, payload)
//!   ├─► tick advanced? ──► clear FrameEvents
//!   ├─► direct subscribers (dropped ones skipped, then purged)
//!   ├─► callbacks (sender+payload → sender → payload → none)
//!   └─► FrameEvents[name].push({sender, payload})
//!
//! subscribe(name, handler)
//!   ├─► tick advanced? ──► clear FrameEvents
//!   ├─► Registry[name].push(handler)
//!   └─► for ev in FrameEvents[name]: handler(ev)
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                       |
//! |-------------------|---------------------------------------------------------------|------------------------------------------|
//! | **Mediator**      | Publish, subscribe, unsubscribe, per-tick replay.             | [`Mediator`], [`MediatorBuilder`]         |
//! | **Subscribers**   | Capability objects and four callback shapes.                  | [`Subscriber`], [`Handler`], [`Shape`]    |
//! | **Events**        | Opaque sender and dynamically-typed payload.                  | [`Sender`], [`Payload`], [`Value`]        |
//! | **Ticks**         | Host-driven clocks deciding when the replay buffer resets.    | [`TickSource`], [`ManualTicks`]           |
//! | **Errors**        | Typed errors for bad input and failing subscribers.           | [`MediatorError`]                         |
//! | **Configuration** | Host-settable options.                                        | [`MediatorConfig`]                        |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! Internal diagnostics go through [`tracing`]; install any subscriber to see them.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use tickbus::{payload, Handler, Mediator, ManualTicks, Sender, Value};
//!
//! struct Button;
//! struct Pill;
//!
//! let ticks = Arc::new(ManualTicks::new());
//! let mediator = Mediator::builder().with_tick_source(ticks.clone()).build();
//!
//! // A button fires before the spawner is listening.
//! let button: Sender = Arc::new(Button);
//! let prefab: Sender = Arc::new(Pill);
//! mediator
//!     .publish("Spawn", Some(button), Some(payload! { "objectToSpawn" => Value::Object(prefab) }))
//!     .unwrap();
//!
//! // Same tick: the late spawner still sees the click.
//! let spawner = Handler::full(|_sender, args| {
//!     let pill = args.and_then(|a| a.get("objectToSpawn")).and_then(|v| v.object::<Pill>());
//!     assert!(pill.is_some());
//!     Ok(())
//! });
//! mediator.subscribe("Spawn", &spawner).unwrap();
//!
//! // Next tick: history is gone.
//! ticks.advance();
//! assert!(!mediator.was_published_this_tick("Spawn").unwrap());
//!
//! mediator.unsubscribe("Spawn", &spawner).unwrap();
//! ```
mod core;
mod error;
mod events;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{
    clear_frame_events, publish, publish_bare, publish_payload, subscribe, unsubscribe,
};
pub use crate::core::{
    FrozenTick, IntervalTicks, ManualTicks, Mediator, MediatorBuilder, MediatorConfig, TickSource,
};
pub use error::{HandlerError, HandlerResult, MediatorError};
pub use events::{same_object, FrameEvents, Payload, RecordedEvent, Sender, Value};
pub use subscribers::{Handler, Shape, Subscriber};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
