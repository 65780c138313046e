use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Random source shared between a vignette and the task closures it schedules.
pub type SharedRng = Rc<RefCell<Box<dyn RngCore>>>;

/// Wrap any generator for sharing.
pub fn shared_rng(rng: impl RngCore + 'static) -> SharedRng {
    Rc::new(RefCell::new(Box::new(rng)))
}

/// Seeded [`StdRng`] when `seed` is set, OS entropy otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> SharedRng {
    match seed {
        Some(seed) => shared_rng(StdRng::seed_from_u64(seed)),
        None => shared_rng(StdRng::from_entropy()),
    }
}

/// Uniform `f64` in `[0, 1)`.
pub fn unit_f64(rng: &mut dyn RngCore) -> f64 {
    rng.r#gen::<f64>()
}

/// Uniform index in `0..len`; `None` for an empty range.
pub fn index_below(rng: &mut dyn RngCore, len: usize) -> Option<usize> {
    (len > 0).then(|| rng.gen_range(0..len))
}

/// [`unit_f64`] from a shared source.
pub fn draw(rng: &SharedRng) -> f64 {
    unit_f64(&mut **rng.borrow_mut())
}

/// [`index_below`] from a shared source.
pub fn draw_index(rng: &SharedRng, len: usize) -> Option<usize> {
    index_below(&mut **rng.borrow_mut(), len)
}

/// Deterministic stub that replays a fixed list of unit values.
///
/// Each value becomes one `next_u64` whose top 53 bits are the value's binary fraction, so a
/// standard `f64` draw returns it unchanged. Values are clamped into `[0, 1)` and cycle once
/// exhausted; an empty list yields zeros.
#[derive(Clone, Debug)]
pub struct SequenceRng {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRng {
    /// Replay `values` in order.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
    }
}

impl RngCore for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        const FRACTION: f64 = (1u64 << 53) as f64;
        let bits = ((self.next_unit() * FRACTION) as u64).min((1u64 << 53) - 1);
        bits << 11
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generators/random.rs"]
mod tests;
