//! # Host tick sources.
//!
//! The mediator never generates ticks; it asks a [`TickSource`] at the start of every
//! operation and clears its replay buffer whenever the answer grows.
//!
//! Provided sources:
//! - [`FrozenTick`]: always `0` (default; the buffer only clears explicitly)
//! - [`ManualTicks`]: counter advanced by the host loop
//! - [`IntervalTicks`]: wall-clock buckets of a fixed period
//!
//! Any `Fn() -> u64 + Send + Sync + 'static` is a tick source too.
//!
//! ## Rules
//! - Ticks are expected to be non-decreasing; a lower value is ignored by the mediator.
//! - The source is called while the mediator's state is locked: it must not call back
//!   into the mediator.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Supplies the host's current tick.
pub trait TickSource: Send + Sync + 'static {
    fn current_tick(&self) -> u64;
}

impl<F> TickSource for F
where
    F: Fn() -> u64 + Send + Sync + 'static,
{
    fn current_tick(&self) -> u64 {
        self()
    }
}

/// Tick source that never advances.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrozenTick;

impl TickSource for FrozenTick {
    fn current_tick(&self) -> u64 {
        0
    }
}

/// Tick counter driven explicitly by the host (one `advance` per simulation step).
///
/// ## Example
/// ```rust
/// use tickbus::{ManualTicks, TickSource};
///
/// let ticks = ManualTicks::new();
/// assert_eq!(ticks.current_tick(), 0);
/// assert_eq!(ticks.advance(), 1);
/// ticks.set(10);
/// ticks.set(4); // never goes backwards
/// assert_eq!(ticks.current(), 10);
/// ```
#[derive(Debug, Default)]
pub struct ManualTicks {
    tick: AtomicU64,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves to the next tick and returns it.
    pub fn advance(&self) -> u64 {
        self.tick.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Jumps to `tick` if it is ahead of the current one.
    pub fn set(&self, tick: u64) {
        self.tick.fetch_max(tick, Ordering::AcqRel);
    }

    #[inline]
    pub fn current(&self) -> u64 {
        self.tick.load(Ordering::Acquire)
    }
}

impl TickSource for ManualTicks {
    fn current_tick(&self) -> u64 {
        self.current()
    }
}

/// Wall-clock tick: number of whole `period`s elapsed since creation.
#[derive(Debug, Clone)]
pub struct IntervalTicks {
    origin: Instant,
    period: Duration,
}

impl IntervalTicks {
    /// Minimum period (a zero period is clamped to this).
    pub const MIN_PERIOD: Duration = Duration::from_millis(1);

    pub fn new(period: Duration) -> Self {
        Self {
            origin: Instant::now(),
            period: period.max(Self::MIN_PERIOD),
        }
    }

    /// Ticks per second, e.g. `IntervalTicks::per_second(60)` for a 60 Hz frame clock.
    ///
    /// `0` is treated as `1`.
    pub fn per_second(rate: u32) -> Self {
        Self::new(Duration::from_secs(1) / rate.max(1))
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl TickSource for IntervalTicks {
    fn current_tick(&self) -> u64 {
        let elapsed = self.origin.elapsed().as_nanos();
        let tick = elapsed / self.period.as_nanos();
        u64::try_from(tick).unwrap_or(u64::MAX)
    }
}
