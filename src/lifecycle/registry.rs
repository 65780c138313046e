use std::collections::BTreeMap;

use crate::foundation::core::EraKey;
use crate::lifecycle::Vignette;
use crate::lifecycle::controller::Controller;
use crate::surface::Surface;
use crate::timeline::scheduler::{ProgramHandle, Scheduler};

/// Era key to controller. An era whose container was missing keeps an absent entry.
#[derive(Debug, Default)]
pub struct Registry {
    entries: BTreeMap<EraKey, Option<Controller>>,
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `vignette` under `selector` and register it under its era.
    ///
    /// Bind failures are logged and leave an absent entry; returns whether a controller was
    /// installed. An era that is already bound keeps its controller and the new vignette is
    /// dropped unmounted; an absent entry may be bound again.
    pub fn install(
        &mut self,
        selector: &str,
        vignette: Box<dyn Vignette>,
        surface: &mut dyn Surface,
    ) -> bool {
        let era = EraKey::new(vignette.era());
        if self.get(era.as_str()).is_some() {
            tracing::warn!(%era, selector, "era already bound; install ignored");
            return false;
        }
        let controller = match Controller::bind(selector, vignette, surface) {
            Ok(controller) => Some(controller),
            Err(err) if err.is_missing_container() => {
                tracing::warn!(%era, selector, "container not found; era disabled");
                None
            }
            Err(err) => {
                tracing::warn!(%era, selector, error = %err, "bind failed; era disabled");
                None
            }
        };
        let installed = controller.is_some();
        self.entries.insert(era, controller);
        installed
    }

    /// Controller for `era`, if registered and bound.
    pub fn get(&self, era: &str) -> Option<&Controller> {
        self.entries.get(era).and_then(Option::as_ref)
    }

    /// Mutable controller for `era`, if registered and bound.
    pub fn get_mut(&mut self, era: &str) -> Option<&mut Controller> {
        self.entries.get_mut(era).and_then(Option::as_mut)
    }

    /// `true` when `era` has an entry, bound or absent.
    pub fn is_registered(&self, era: &str) -> bool {
        self.entries.contains_key(era)
    }

    /// Registered eras in key order.
    pub fn eras(&self) -> impl Iterator<Item = &EraKey> {
        self.entries.keys()
    }

    /// Bound controllers in era order.
    pub fn controllers(&self) -> impl Iterator<Item = &Controller> {
        self.entries.values().flatten()
    }

    /// Hand a finished program to its controller; returns the owning era.
    pub fn route_completion(&mut self, program: ProgramHandle) -> Option<EraKey> {
        self.entries
            .values_mut()
            .flatten()
            .find_map(|controller| {
                controller
                    .on_program_complete(program)
                    .then(|| controller.era().clone())
            })
    }

    /// Reset every bound controller.
    pub fn reset_all(&mut self, scheduler: &mut Scheduler, surface: &mut dyn Surface) {
        for controller in self.entries.values_mut().flatten() {
            controller.reset(scheduler, surface);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/registry.rs"]
mod tests;
