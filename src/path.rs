//! Arclength parametrization of piecewise-linear paths.

use crate::foundation::core::{Line, Point};
use crate::foundation::error::{StrataError, StrataResult};

/// One straight piece of a [`PathModel`] with its share of the unit parameter range.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PathSegment {
    /// Segment start point.
    pub start: Point,
    /// Segment end point.
    pub end: Point,
    /// Euclidean length.
    pub length: f64,
    /// Inclusive start of this segment's parameter interval.
    pub start_t: f64,
    /// Exclusive end of this segment's parameter interval.
    pub end_t: f64,
}

/// Immutable multi-segment path addressed by normalized arclength `t` in `[0, 1)`.
///
/// Segment intervals partition `[0, 1)` contiguously and monotonically; a zero-length segment
/// keeps its place but owns an empty interval.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PathModel {
    segments: Vec<PathSegment>,
    total_length: f64,
}

impl PathModel {
    /// Build from a polyline: consecutive points become segments.
    pub fn from_points(points: &[Point]) -> StrataResult<Self> {
        if points.len() < 2 {
            return Err(StrataError::validation(
                "path needs at least two points to form a segment",
            ));
        }
        Self::from_segments(points.windows(2).map(|w| (w[0], w[1])))
    }

    /// Build from explicit `(start, end)` pairs, in travel order.
    pub fn from_segments(pairs: impl IntoIterator<Item = (Point, Point)>) -> StrataResult<Self> {
        let lines: Vec<Line> = pairs.into_iter().map(|(a, b)| Line::new(a, b)).collect();
        if lines.is_empty() {
            return Err(StrataError::validation("path needs at least one segment"));
        }
        if lines
            .iter()
            .any(|l| !(l.p0.is_finite() && l.p1.is_finite()))
        {
            return Err(StrataError::validation("path points must be finite"));
        }

        let lengths: Vec<f64> = lines.iter().map(|l| l.p0.distance(l.p1)).collect();
        let total_length: f64 = lengths.iter().sum();
        if total_length <= 0.0 {
            return Err(StrataError::validation("path total length must be > 0"));
        }

        let mut segments = Vec::with_capacity(lines.len());
        let mut cumulative = 0.0;
        for (line, length) in lines.iter().zip(&lengths) {
            let start_t = cumulative / total_length;
            cumulative += length;
            let end_t = cumulative / total_length;
            segments.push(PathSegment {
                start: line.p0,
                end: line.p1,
                length: *length,
                start_t,
                end_t,
            });
        }
        // Pin the final bound so the partition closes exactly at 1.
        if let Some(last) = segments.last_mut() {
            last.end_t = 1.0;
        }

        Ok(Self {
            segments,
            total_length,
        })
    }

    /// Segments in travel order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Sum of segment lengths.
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Start of the first segment.
    pub fn start_point(&self) -> Point {
        self.segments[0].start
    }

    /// End of the last segment.
    pub fn end_point(&self) -> Point {
        self.segments[self.segments.len() - 1].end
    }

    /// Point at normalized arclength `t`.
    ///
    /// Defined on `[0, 1)`. Anything else (drift past 1, negatives, NaN) resolves to the
    /// path's final point.
    pub fn resolve(&self, t: f64) -> Point {
        if !(0.0..1.0).contains(&t) {
            return self.end_point();
        }
        for seg in &self.segments {
            if t >= seg.start_t && t < seg.end_t {
                let span = seg.end_t - seg.start_t;
                let local = (t - seg.start_t) / span;
                return seg.start.lerp(seg.end, local);
            }
        }
        self.end_point()
    }
}

#[cfg(test)]
#[path = "../tests/unit/path/model.rs"]
mod tests;
