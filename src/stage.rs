//! The explicit context object a page (or a headless driver) talks to.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::StageConfig;
use crate::foundation::core::{ElementId, EraKey, ScrollDirection};
use crate::generators::random::{SharedRng, rng_from_seed};
use crate::lifecycle::Vignette;
use crate::lifecycle::controller::LifecycleState;
use crate::lifecycle::registry::Registry;
use crate::surface::Surface;
use crate::timeline::scheduler::Scheduler;

/// Outcome of one [`Stage::tick`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TickReport {
    /// Time of this tick.
    pub now_ms: f64,
    /// Eras whose play completed during this tick.
    pub completed: Vec<EraKey>,
    /// Timed events dispatched.
    pub events: usize,
    /// Frame-task invocations.
    pub frames: usize,
}

/// Snapshot of one era for reports and debugging.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EraReport {
    /// Era key.
    pub era: EraKey,
    /// Container element.
    pub root: ElementId,
    /// Lifecycle state.
    pub state: LifecycleState,
    /// Outstanding scheduled tasks.
    pub pending: usize,
    /// Counters of the current play.
    pub counters: BTreeMap<&'static str, u64>,
}

/// Surface, scheduler, registry and randomness, driven by scroll events and frame ticks.
pub struct Stage<S: Surface> {
    surface: S,
    scheduler: Scheduler,
    registry: Registry,
    config: StageConfig,
    rng: SharedRng,
}

impl<S: Surface> std::fmt::Debug for Stage<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("scheduler", &self.scheduler)
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S: Surface> Stage<S> {
    /// Stage over `surface`; randomness follows `config.seed`.
    pub fn new(surface: S, config: StageConfig) -> Self {
        let rng = rng_from_seed(config.seed);
        Self::with_rng(surface, config, rng)
    }

    /// Stage with an injected random source.
    pub fn with_rng(surface: S, config: StageConfig, rng: SharedRng) -> Self {
        Self {
            surface,
            scheduler: Scheduler::new(),
            registry: Registry::new(),
            config,
            rng,
        }
    }

    /// Bind `vignette` to its configured container. See [`Registry::install`].
    pub fn install(&mut self, vignette: Box<dyn Vignette>) -> bool {
        let selector = self.config.selector(vignette.era());
        self.registry
            .install(&selector, vignette, &mut self.surface)
    }

    /// Bind all five built-in vignettes; returns how many found their container.
    pub fn install_builtin(&mut self) -> usize {
        crate::vignettes::builtin()
            .into_iter()
            .map(|vignette| self.install(vignette))
            .filter(|installed| *installed)
            .count()
    }

    /// A section scrolled into view: play its visualization (once).
    #[tracing::instrument(skip(self))]
    pub fn on_enter(&mut self, era: &str, direction: ScrollDirection) -> bool {
        let now_ms = self.scheduler.now_ms();
        match self.registry.get_mut(era) {
            Some(controller) => {
                controller.play(now_ms, &mut self.scheduler, &mut self.surface, &self.rng)
            }
            None => {
                tracing::debug!("no bound visualization");
                false
            }
        }
    }

    /// A section scrolled out of view: reset it when configured to.
    #[tracing::instrument(skip(self))]
    pub fn on_exit(&mut self, era: &str, direction: ScrollDirection) -> bool {
        if !self.config.reset_on_exit {
            return false;
        }
        match self.registry.get_mut(era) {
            Some(controller) => {
                controller.reset(&mut self.scheduler, &mut self.surface);
                true
            }
            None => false,
        }
    }

    /// Advance the frame clock to `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> TickReport {
        let report = self.scheduler.advance(now_ms, &mut self.surface);
        let completed = report
            .completed
            .into_iter()
            .filter_map(|program| self.registry.route_completion(program))
            .collect();
        TickReport {
            now_ms: self.scheduler.now_ms(),
            completed,
            events: report.events,
            frames: report.frames,
        }
    }

    /// Teardown: reset every visualization.
    #[tracing::instrument(skip(self))]
    pub fn reset_all(&mut self) {
        self.registry
            .reset_all(&mut self.scheduler, &mut self.surface);
    }

    /// Lifecycle state of `era`, `None` when not bound.
    pub fn state(&self, era: &str) -> Option<LifecycleState> {
        self.registry.get(era).map(|c| c.state())
    }

    /// Report for `era`, `None` when not bound.
    pub fn report(&self, era: &str) -> Option<EraReport> {
        self.registry.get(era).map(|controller| EraReport {
            era: controller.era().clone(),
            root: controller.root(),
            state: controller.state(),
            pending: controller.pending(&self.scheduler),
            counters: controller.counters(),
        })
    }

    /// Current frame-clock time.
    pub fn now_ms(&self) -> f64 {
        self.scheduler.now_ms()
    }

    /// Surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable surface, for host-side edits between ticks.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Scheduler.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Configuration.
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Give the surface back.
    pub fn into_surface(self) -> S {
        self.surface
    }
}
