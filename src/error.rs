//! Error types used by the mediator and by subscriber handlers.
//!
//! - [`MediatorError`]: errors surfaced to the caller of a mediator operation.
//! - [`HandlerError`] / [`HandlerResult`]: what a subscriber returns from its handling code.
//!
//! Stale direct subscribers and unsubscribing an unknown handler are **not** errors;
//! they are handled silently by the mediator.

use thiserror::Error;

/// Boxed error returned by subscriber code.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type every handler shape returns.
pub type HandlerResult = Result<(), HandlerError>;

/// # Errors produced by mediator operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum MediatorError {
    /// An operation was called with an empty event name.
    #[error("{op}: event name must not be empty")]
    EmptyEventName {
        /// The operation that rejected the name.
        op: &'static str,
    },

    /// A subscriber returned an error while handling an event.
    ///
    /// The publish (or subscribe-time replay) pass stops at the first failure.
    #[error("subscriber {subscriber} failed on {event:?}: {source}")]
    SubscriberFailed {
        /// Event name being dispatched.
        event: String,
        /// Subscriber name (direct subscribers) or callback shape label.
        subscriber: &'static str,
        /// The error returned by the subscriber.
        #[source]
        source: HandlerError,
    },
}

impl MediatorError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use tickbus::MediatorError;
    ///
    /// let err = MediatorError::EmptyEventName { op: "publish" };
    /// assert_eq!(err.as_label(), "empty_event_name");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            MediatorError::EmptyEventName { .. } => "empty_event_name",
            MediatorError::SubscriberFailed { .. } => "subscriber_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            MediatorError::EmptyEventName { op } => format!("empty event name passed to {op}"),
            MediatorError::SubscriberFailed {
                event,
                subscriber,
                source,
            } => format!("event={event:?} subscriber={subscriber} error={source}"),
        }
    }

    /// Indicates whether the error originated in subscriber code.
    pub fn is_subscriber_failure(&self) -> bool {
        matches!(self, MediatorError::SubscriberFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let empty = MediatorError::EmptyEventName { op: "subscribe" };
        assert_eq!(empty.as_label(), "empty_event_name");
        assert!(!empty.is_subscriber_failure());
        assert_eq!(empty.to_string(), "subscribe: event name must not be empty");

        let failed = MediatorError::SubscriberFailed {
            event: "Spawn".into(),
            subscriber: "spawner",
            source: "boom".into(),
        };
        assert_eq!(failed.as_label(), "subscriber_failed");
        assert!(failed.is_subscriber_failure());
        assert!(failed.as_message().contains("boom"));
    }

    #[test]
    fn test_source_is_preserved() {
        use std::error::Error as _;

        let failed = MediatorError::SubscriberFailed {
            event: "Attach".into(),
            subscriber: "attacher",
            source: "detached".into(),
        };
        let src = failed.source().map(|s| s.to_string());
        assert_eq!(src.as_deref(), Some("detached"));
    }
}
