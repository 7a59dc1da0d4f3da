//! # Mediator configuration.
//!
//! Provides [`MediatorConfig`], the settings a host passes when building a
//! [`Mediator`](crate::Mediator). Every field can also be changed at runtime through
//! the matching mediator setter.

/// Configuration for a mediator instance.
///
/// ## Field semantics
/// - `ignore_tick`: when `true`, the host tick is never consulted and the replay buffer
///   only clears through [`Mediator::clear_frame_events`](crate::Mediator::clear_frame_events).
///   Use it for deterministic tests or hosts without a clock.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MediatorConfig {
    /// Disables tick-driven clearing of the replay buffer.
    ///
    /// Default: `false`.
    pub ignore_tick: bool,
}

impl MediatorConfig {
    /// Configuration for headless/test use: tick source ignored.
    pub fn headless() -> Self {
        Self { ignore_tick: true }
    }

    /// Returns `true` if advancing ticks clears the replay buffer.
    #[inline]
    pub fn tick_clearing_enabled(&self) -> bool {
        !self.ignore_tick
    }
}
