//! Strata drives the scroll-triggered vignettes of a storage-history page: punch card,
//! magnetic tape, hard-disk platter, NAND flash cell, and replicated object store.
//!
//! The crate owns what every vignette shares: a play-once/reset lifecycle per
//! visualization, a timeline scheduler for chained, delayed and eased transitions, and the
//! procedural generators (particle paths, counters, randomized selection) that decide what
//! each play animates. Drawing is delegated to a [`Surface`]; the page (or the `strata`
//! binary) feeds scroll events and frame ticks into a [`Stage`].
//!
//! # Flow
//!
//! 1. **Bind**: [`Stage::install`] resolves a vignette's container, mounts its mutable
//!    elements, and snapshots them.
//! 2. **Play**: [`Stage::on_enter`] composes the vignette into [`Track`]s and submits them
//!    to the [`Scheduler`], once.
//! 3. **Tick**: [`Stage::tick`] advances the frame clock; tasks mutate the surface.
//! 4. **Reset**: [`Stage::on_exit`] / [`Stage::reset_all`] cancel outstanding work and
//!    restore the snapshot.
//!
//! Everything is single-threaded and cooperative: time moves only when the host ticks.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod config;
mod foundation;
mod generators;
mod lifecycle;
mod path;
mod stage;
mod surface;
mod timeline;

/// The five built-in storage-era vignettes.
pub mod vignettes;

pub use animation::ease::Ease;
pub use animation::lerp::Lerp;
pub use config::{ERAS, StageConfig};
pub use foundation::core::{
    Affine, AttrValue, ElementId, EraKey, Line, Point, Rgb8, ScrollDirection, Vec2,
};
pub use foundation::error::{StrataError, StrataResult};
pub use generators::counter::{
    Counter, DURABILITY, LabelTable, format_bytes, format_tape_bytes, ramp_steps,
};
pub use generators::particle::{Particle, Polarity, any_within, spawn_particles};
pub use generators::random::{
    SequenceRng, SharedRng, draw, draw_index, index_below, rng_from_seed, shared_rng, unit_f64,
};
pub use generators::selection::{ActiveCell, select_cells};
pub use lifecycle::Vignette;
pub use lifecycle::controller::{Controller, LifecycleState};
pub use lifecycle::registry::Registry;
pub use path::{PathModel, PathSegment};
pub use stage::{EraReport, Stage, TickReport};
pub use surface::memory::{ElementDump, MemorySurface};
pub use surface::snapshot::SurfaceSnapshot;
pub use surface::{Surface, SurfaceExt};
pub use timeline::scheduler::{AdvanceReport, ProgramHandle, Scheduler, TaskHandle};
pub use timeline::task::{
    Chain, PeriodicFn, Repeat, ScheduledTask, TaskCtx, TaskFn, TaskKind, Tween, TweenTarget,
};
pub use timeline::track::Track;
