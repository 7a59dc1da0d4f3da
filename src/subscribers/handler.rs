//! # Unified handler representation.
//!
//! Every way of listening to an event - a direct [`Subscriber`] object or a callback of one
//! of four argument shapes - is stored as a [`Handler`]. The registry, dispatch loop and
//! stale-purge logic only ever deal with this one type.
//!
//! ## Shapes and dispatch order
//! ```text
//! Direct            subscriber.dispatch(event, sender, payload)
//! SenderAndPayload  f(sender, payload)
//! SenderOnly        f(sender)
//! PayloadOnly       f(payload)
//! NoArgs            f()
//! ```
//! Within one publish, shapes are visited in the order above; inside a shape,
//! in registration order.
//!
//! ## Identity
//! Unsubscribe matches by identity, not by value: two handlers are the same if they wrap
//! the same `Arc` (callbacks) or point at the same subscriber object (direct).
//! Keep the `Handler` (or the subscriber `Arc`) around to unsubscribe later.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::error::HandlerResult;
use crate::events::{Payload, RecordedEvent, Sender};

use super::Subscriber;

type FullFn = dyn Fn(Option<&Sender>, Option<&Payload>) -> HandlerResult + Send + Sync;
type SenderFn = dyn Fn(Option<&Sender>) -> HandlerResult + Send + Sync;
type PayloadFn = dyn Fn(Option<&Payload>) -> HandlerResult + Send + Sync;
type BareFn = dyn Fn() -> HandlerResult + Send + Sync;

/// Calling convention of a handler. Ordered by dispatch priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Shape {
    Direct,
    SenderAndPayload,
    SenderOnly,
    PayloadOnly,
    NoArgs,
}

impl Shape {
    /// Short stable label for logs and errors.
    pub fn as_label(&self) -> &'static str {
        match self {
            Shape::Direct => "direct",
            Shape::SenderAndPayload => "callback(sender, payload)",
            Shape::SenderOnly => "callback(sender)",
            Shape::PayloadOnly => "callback(payload)",
            Shape::NoArgs => "callback()",
        }
    }
}

#[derive(Clone)]
enum Kind {
    Direct(Weak<dyn Subscriber>),
    Full(Arc<FullFn>),
    Sender(Arc<SenderFn>),
    Payload(Arc<PayloadFn>),
    Bare(Arc<BareFn>),
}

/// Outcome of handing one event to one handler.
#[derive(Debug)]
pub(crate) enum Delivery {
    Done(HandlerResult),
    /// The direct subscriber behind this handler no longer exists.
    Stale,
}

/// A subscribed (or subscribable) handler of any shape.
///
/// Cheap to clone; clones share identity.
#[derive(Clone)]
pub struct Handler {
    kind: Kind,
}

impl Handler {
    /// Wraps a direct subscriber. Only a weak reference is kept.
    pub fn direct<S: Subscriber>(subscriber: &Arc<S>) -> Self {
        let strong: Arc<dyn Subscriber> = Arc::clone(subscriber) as Arc<dyn Subscriber>;
        Self::direct_dyn(&strong)
    }

    /// Same as [`Handler::direct`] for an already type-erased subscriber.
    pub fn direct_dyn(subscriber: &Arc<dyn Subscriber>) -> Self {
        Self {
            kind: Kind::Direct(Arc::downgrade(subscriber)),
        }
    }

    /// Callback receiving both sender and payload.
    pub fn full<F>(f: F) -> Self
    where
        F: Fn(Option<&Sender>, Option<&Payload>) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            kind: Kind::Full(Arc::new(f)),
        }
    }

    /// Callback receiving only the sender.
    pub fn sender<F>(f: F) -> Self
    where
        F: Fn(Option<&Sender>) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            kind: Kind::Sender(Arc::new(f)),
        }
    }

    /// Callback receiving only the payload.
    pub fn payload<F>(f: F) -> Self
    where
        F: Fn(Option<&Payload>) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            kind: Kind::Payload(Arc::new(f)),
        }
    }

    /// Callback without arguments.
    pub fn bare<F>(f: F) -> Self
    where
        F: Fn() -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            kind: Kind::Bare(Arc::new(f)),
        }
    }

    pub fn shape(&self) -> Shape {
        match &self.kind {
            Kind::Direct(_) => Shape::Direct,
            Kind::Full(_) => Shape::SenderAndPayload,
            Kind::Sender(_) => Shape::SenderOnly,
            Kind::Payload(_) => Shape::PayloadOnly,
            Kind::Bare(_) => Shape::NoArgs,
        }
    }

    /// Name reported in logs and errors: the subscriber's own name for direct
    /// handlers, the shape label for callbacks.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            Kind::Direct(w) => w.upgrade().map_or(Shape::Direct.as_label(), |s| s.name()),
            _ => self.shape().as_label(),
        }
    }

    /// `true` if this is a direct handler whose subscriber has been dropped.
    pub fn is_stale(&self) -> bool {
        match &self.kind {
            Kind::Direct(w) => w.strong_count() == 0,
            _ => false,
        }
    }

    /// Identity comparison (see module docs).
    pub fn same_as(&self, other: &Handler) -> bool {
        self.identity() == other.identity()
    }

    fn identity(&self) -> (Shape, *const ()) {
        let ptr = match &self.kind {
            Kind::Direct(w) => w.as_ptr() as *const (),
            Kind::Full(f) => Arc::as_ptr(f) as *const (),
            Kind::Sender(f) => Arc::as_ptr(f) as *const (),
            Kind::Payload(f) => Arc::as_ptr(f) as *const (),
            Kind::Bare(f) => Arc::as_ptr(f) as *const (),
        };
        (self.shape(), ptr)
    }

    /// Hands one event to the handler, adapting it to the handler's shape.
    pub(crate) fn deliver(&self, event: &str, ev: &RecordedEvent) -> Delivery {
        let res = match &self.kind {
            Kind::Direct(w) => match w.upgrade() {
                Some(sub) => sub.dispatch(event, ev.sender(), ev.payload()),
                None => return Delivery::Stale,
            },
            Kind::Full(f) => f(ev.sender(), ev.payload()),
            Kind::Sender(f) => f(ev.sender()),
            Kind::Payload(f) => f(ev.payload()),
            Kind::Bare(f) => f(),
        };
        Delivery::Done(res)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (shape, ptr) = self.identity();
        f.debug_struct("Handler")
            .field("shape", &shape)
            .field("ptr", &ptr)
            .field("stale", &self.is_stale())
            .finish()
    }
}

impl<S: Subscriber> From<&Arc<S>> for Handler {
    fn from(subscriber: &Arc<S>) -> Self {
        Handler::direct(subscriber)
    }
}

impl From<&Handler> for Handler {
    fn from(handler: &Handler) -> Self {
        handler.clone()
    }
}
