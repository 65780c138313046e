/// Easing curve applied to a normalized transition progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Quadratic acceleration from zero velocity.
    InQuad,
    /// Quadratic deceleration to zero velocity.
    OutQuad,
    /// Quadratic acceleration then deceleration.
    InOutQuad,
    /// Cubic acceleration from zero velocity.
    InCubic,
    /// Cubic deceleration to zero velocity.
    OutCubic,
    /// Cubic acceleration then deceleration; the default for attribute transitions.
    #[default]
    InOutCubic,
}

impl Ease {
    /// Map linear progress `t` in `[0, 1]` to eased progress in `[0, 1]`.
    ///
    /// Input is clamped, so out-of-range progress never overshoots the target value.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }

    /// Every curve, in declaration order.
    pub const ALL: [Ease; 7] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
    ];
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
