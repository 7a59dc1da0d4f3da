//! # LogWriter: simple event printer
//!
//! A minimal direct subscriber that prints every event it receives to stdout.
//! Use it for test or demo; subscribe it to each event name you want traced.
//!
//! ## Example output
//! ```text
//! [event] name="Attach" sender=0x6000024a8010 payload=-
//! [event] name="Spawn" sender=0x6000024a8010 payload=[objectToSpawn]
//! [event] name="Tick" sender=- payload=-
//! ```

use std::sync::Arc;

use crate::error::HandlerResult;
use crate::events::{Payload, Sender};
use crate::subscribers::Subscriber;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Formats one event the way it is printed.
    pub fn line(event: &str, sender: Option<&Sender>, payload: Option<&Payload>) -> String {
        let sender = sender.map_or_else(
            || "-".to_string(),
            |s| format!("{:p}", Arc::as_ptr(s) as *const ()),
        );
        let payload = payload.map_or_else(
            || "-".to_string(),
            |p| {
                let mut keys: Vec<&str> = p.keys().map(String::as_str).collect();
                keys.sort_unstable();
                format!("[{}]", keys.join(","))
            },
        );
        format!("[event] name={event:?} sender={sender} payload={payload}")
    }
}

impl Subscriber for LogWriter {
    fn dispatch(
        &self,
        event: &str,
        sender: Option<&Sender>,
        payload: Option<&Payload>,
    ) -> HandlerResult {
        println!("{}", Self::line(event, sender, payload));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
