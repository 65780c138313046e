//! Play-once lifecycle: one [`Controller`] per bound vignette, collected in a [`Registry`].

pub(crate) mod controller;
pub(crate) mod registry;

use std::collections::BTreeMap;

use crate::foundation::core::ElementId;
use crate::foundation::error::StrataResult;
use crate::generators::random::SharedRng;
use crate::surface::Surface;
use crate::timeline::track::Track;

/// One era's visualization, expressed as generators plus tracks.
///
/// A vignette never touches the scheduler directly. It builds its persistent elements once
/// in [`mount`](Self::mount) and returns the tracks for one play from
/// [`compose`](Self::compose); the [`Controller`](controller::Controller) owns everything
/// else.
pub trait Vignette {
    /// Era key this vignette plays for (`"punch"`, `"tape"`, ...).
    fn era(&self) -> &'static str;

    /// Create the persistent mutable elements under `root` with their initial attributes.
    fn mount(&mut self, surface: &mut dyn Surface, root: ElementId) -> StrataResult<()>;

    /// Compute this play's data, apply play-time setup, and return the tracks to schedule.
    fn compose(&mut self, surface: &mut dyn Surface, rng: &SharedRng)
    -> StrataResult<Vec<Track>>;

    /// Drop per-play state (counters, particles, selections).
    fn clear(&mut self);

    /// Counters of the current play, by name.
    fn counters(&self) -> BTreeMap<&'static str, u64> {
        BTreeMap::new()
    }
}
