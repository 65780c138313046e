use crate::foundation::core::{Affine, AttrValue, Point, Rgb8};

/// Interpolation contract for attribute value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

impl Lerp for Rgb8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
        }
    }
}

impl Lerp for Affine {
    // Coefficient-wise; adequate for the translate/rotate pairs the vignettes tween.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let ca = a.as_coeffs();
        let cb = b.as_coeffs();
        let mut out = [0.0; 6];
        for (i, v) in out.iter_mut().enumerate() {
            *v = ca[i] + (cb[i] - ca[i]) * t;
        }
        Affine::new(out)
    }
}

impl Lerp for AttrValue {
    /// Values of the same kind interpolate; text and mismatched kinds hold `a` and snap to
    /// `b` once the transition completes.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Self::Number(x), Self::Number(y)) => Self::Number(<f64 as Lerp>::lerp(x, y, t)),
            (Self::Color(x), Self::Color(y)) => Self::Color(<Rgb8 as Lerp>::lerp(x, y, t)),
            (Self::Transform(x), Self::Transform(y)) => {
                Self::Transform(<Affine as Lerp>::lerp(x, y, t))
            }
            _ => {
                if t >= 1.0 {
                    b.clone()
                } else {
                    a.clone()
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/lerp.rs"]
mod tests;
