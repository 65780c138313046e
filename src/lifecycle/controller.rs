use std::collections::BTreeMap;

use serde::Serialize;

use crate::foundation::core::{ElementId, EraKey};
use crate::foundation::error::{StrataError, StrataResult};
use crate::generators::random::SharedRng;
use crate::lifecycle::Vignette;
use crate::surface::Surface;
use crate::surface::snapshot::SurfaceSnapshot;
use crate::timeline::scheduler::{ProgramHandle, Scheduler};

/// Where a visualization is in its play-once cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Bound and untouched, or reset.
    #[default]
    Idle,
    /// Tasks scheduled and running.
    Playing,
    /// Every bounded task finished; continuous tasks may still be running.
    Complete,
}

/// Play-once/reset state machine for one bound vignette.
pub struct Controller {
    era: EraKey,
    root: ElementId,
    state: LifecycleState,
    programs: Vec<ProgramHandle>,
    snapshot: SurfaceSnapshot,
    vignette: Box<dyn Vignette>,
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("era", &self.era)
            .field("root", &self.root)
            .field("state", &self.state)
            .field("programs", &self.programs)
            .finish_non_exhaustive()
    }
}

impl Controller {
    /// Resolve `selector`, mount the vignette under it, and capture the reset snapshot.
    pub fn bind(
        selector: &str,
        mut vignette: Box<dyn Vignette>,
        surface: &mut dyn Surface,
    ) -> StrataResult<Self> {
        let era = EraKey::new(vignette.era());
        let root = surface
            .select(selector)
            .ok_or_else(|| StrataError::missing_container(era.as_str(), selector))?;
        vignette.mount(surface, root)?;
        let snapshot = SurfaceSnapshot::capture(surface, root);
        tracing::debug!(%era, selector, elements = snapshot.len(), "bound vignette");
        Ok(Self {
            era,
            root,
            state: LifecycleState::Idle,
            programs: Vec::new(),
            snapshot,
            vignette,
        })
    }

    /// Start the vignette once. Returns `false` (and does nothing) unless idle.
    pub fn play(
        &mut self,
        now_ms: f64,
        scheduler: &mut Scheduler,
        surface: &mut dyn Surface,
        rng: &SharedRng,
    ) -> bool {
        if self.state != LifecycleState::Idle {
            tracing::debug!(era = %self.era, state = ?self.state, "play ignored");
            return false;
        }

        let tracks = match self.vignette.compose(surface, rng) {
            Ok(tracks) => tracks,
            Err(err) => {
                tracing::warn!(era = %self.era, error = %err, "compose failed; staying idle");
                self.snapshot.restore(surface);
                self.vignette.clear();
                return false;
            }
        };

        let program = scheduler.submit(now_ms, tracks);
        self.programs.push(program);
        self.state = if scheduler.is_complete(program) {
            LifecycleState::Complete
        } else {
            LifecycleState::Playing
        };
        tracing::debug!(era = %self.era, program = ?program, state = ?self.state, "play");
        true
    }

    /// Cancel all outstanding work, restore the bind-time snapshot, and return to idle.
    pub fn reset(&mut self, scheduler: &mut Scheduler, surface: &mut dyn Surface) {
        let cancelled: usize = self
            .programs
            .drain(..)
            .map(|program| scheduler.cancel_program(program))
            .sum();
        self.snapshot.restore(surface);
        self.vignette.clear();
        if self.state != LifecycleState::Idle || cancelled > 0 {
            tracing::debug!(era = %self.era, cancelled, "reset");
        }
        self.state = LifecycleState::Idle;
    }

    /// Scheduler completion hook. Returns `true` when `program` belongs to this controller.
    pub fn on_program_complete(&mut self, program: ProgramHandle) -> bool {
        if !self.programs.contains(&program) {
            return false;
        }
        if self.state == LifecycleState::Playing {
            self.state = LifecycleState::Complete;
            tracing::debug!(era = %self.era, "complete");
        }
        true
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Era key.
    pub fn era(&self) -> &EraKey {
        &self.era
    }

    /// Container element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Programs submitted since the last reset.
    pub fn programs(&self) -> &[ProgramHandle] {
        &self.programs
    }

    /// Outstanding tasks across this controller's programs.
    pub fn pending(&self, scheduler: &Scheduler) -> usize {
        self.programs
            .iter()
            .map(|program| scheduler.pending(*program))
            .sum()
    }

    /// Bind-time snapshot.
    pub fn snapshot(&self) -> &SurfaceSnapshot {
        &self.snapshot
    }

    /// Counters of the current play.
    pub fn counters(&self) -> BTreeMap<&'static str, u64> {
        self.vignette.counters()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/controller.rs"]
mod tests;
