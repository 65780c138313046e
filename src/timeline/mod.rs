//! Timeline scheduling: tasks, tracks, and the cooperative scheduler that runs them.
//!
//! A program is the set of tracks submitted together (one `play()`); tracks run concurrently,
//! tasks inside a track chain sequentially unless marked parallel. Time only moves when the
//! host calls [`Scheduler::advance`], once per rendering frame.

pub(crate) mod scheduler;
pub(crate) mod task;
pub(crate) mod track;
