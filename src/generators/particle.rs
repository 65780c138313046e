use rand::RngCore;

use crate::foundation::core::Rgb8;
use crate::foundation::palette;
use crate::generators::random::unit_f64;

/// Magnetic orientation of a particle; the two values render as mirrored markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Polarity {
    /// North-first.
    Forward,
    /// South-first.
    Reverse,
}

impl Polarity {
    /// Marker color for this orientation.
    pub fn marker(self) -> Rgb8 {
        match self {
            Self::Forward => palette::CORAL,
            Self::Reverse => palette::TEAL,
        }
    }

    /// The opposite orientation.
    pub fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

/// A marker travelling along a [`crate::PathModel`] at normalized position `t`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Particle {
    t: f64,
    /// Orientation, fixed for the particle's life.
    pub polarity: Polarity,
}

impl Particle {
    /// Particle at `t` (wrapped into `[0, 1)`).
    pub fn new(t: f64, polarity: Polarity) -> Self {
        Self {
            t: wrap_unit(t),
            polarity,
        }
    }

    /// Current position, always in `[0, 1)`.
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Move forward by `step`, wrapping at 1.
    pub fn advance(&mut self, step: f64) {
        self.t = wrap_unit(self.t + step);
    }
}

fn wrap_unit(t: f64) -> f64 {
    if !t.is_finite() {
        return 0.0;
    }
    let w = t.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs.
    if w >= 1.0 { 0.0 } else { w }
}

/// `count` particles spaced evenly along the path with random polarity.
pub fn spawn_particles(count: usize, rng: &mut dyn RngCore) -> Vec<Particle> {
    (0..count)
        .map(|i| {
            let polarity = if unit_f64(rng) > 0.5 {
                Polarity::Forward
            } else {
                Polarity::Reverse
            };
            Particle::new(i as f64 / count as f64, polarity)
        })
        .collect()
}

/// `true` when any particle sits strictly inside `(lo, hi)`.
pub fn any_within(particles: &[Particle], lo: f64, hi: f64) -> bool {
    particles.iter().any(|p| p.t > lo && p.t < hi)
}

#[cfg(test)]
#[path = "../../tests/unit/generators/particle.rs"]
mod tests;
