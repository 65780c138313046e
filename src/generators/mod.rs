//! Procedural generators: the pure (or seeded-random) functions that decide what each
//! vignette animates.

pub(crate) mod counter;
pub(crate) mod particle;
pub(crate) mod random;
pub(crate) mod selection;
