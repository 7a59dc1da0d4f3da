use std::sync::Arc;

use crate::core::config::MediatorConfig;
use crate::core::tick::{FrozenTick, TickSource};

use super::mediator::Mediator;

/// Builder for constructing a [`Mediator`] with a host tick source.
pub struct MediatorBuilder {
    cfg: MediatorConfig,
    ticks: Arc<dyn TickSource>,
}

impl MediatorBuilder {
    /// Creates a new builder with the given configuration and a [`FrozenTick`] source.
    pub fn new(cfg: MediatorConfig) -> Self {
        Self {
            cfg,
            ticks: Arc::new(FrozenTick),
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, cfg: MediatorConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Disables (or re-enables) tick-driven clearing of the replay buffer.
    pub fn ignore_tick(mut self, ignore: bool) -> Self {
        self.cfg.ignore_tick = ignore;
        self
    }

    /// Sets the host tick source.
    ///
    /// Keep a clone of the `Arc` to drive it (e.g. [`ManualTicks::advance`](crate::ManualTicks::advance)).
    pub fn with_tick_source(mut self, ticks: Arc<dyn TickSource>) -> Self {
        self.ticks = ticks;
        self
    }

    /// Builds the mediator. Registries and replay buffer start empty.
    pub fn build(self) -> Mediator {
        Mediator::new_internal(self.cfg, self.ticks)
    }
}

impl Default for MediatorBuilder {
    fn default() -> Self {
        Self::new(MediatorConfig::default())
    }
}
