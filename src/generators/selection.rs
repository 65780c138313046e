use rand::RngCore;

use crate::generators::random::unit_f64;

/// One cell chosen to light up, with its reveal delay.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ActiveCell {
    /// Position in the fixed cell grid (row-major).
    pub index: usize,
    /// `index * step`: reveal order follows grid order, not selection order.
    pub delay_ms: f64,
}

/// Randomly choose which of `count` fixed cells are active.
///
/// Each cell draws once and is active when the draw exceeds `threshold`, so any subset,
/// including none or all, can come out. Result is sorted by index.
pub fn select_cells(
    count: usize,
    threshold: f64,
    step_ms: f64,
    rng: &mut dyn RngCore,
) -> Vec<ActiveCell> {
    (0..count)
        .filter(|_| unit_f64(rng) > threshold)
        .map(|index| ActiveCell {
            index,
            delay_ms: index as f64 * step_ms,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/generators/selection.rs"]
mod tests;
