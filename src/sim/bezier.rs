//! Quadratic Bézier geometry for curved bullets
//!
//! A curve is defined by three control points:
//! - p0: start (the emitter)
//! - p1: bent control point that gives the arc its sweep
//! - p2: end point on the target circle
//!
//! P(t) = (1-t)²·p0 + 2(1-t)t·p1 + t²·p2

use glam::DVec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadBezier {
    pub p0: DVec2,
    pub p1: DVec2,
    pub p2: DVec2,
}

impl QuadBezier {
    pub fn new(p0: DVec2, p1: DVec2, p2: DVec2) -> Self {
        Self { p0, p1, p2 }
    }

    /// Point on the curve; exact at t = 0 and t = 1
    #[inline]
    pub fn point_at(&self, t: f64) -> DVec2 {
        let inv = 1.0 - t;
        self.p0 * (inv * inv) + self.p1 * (2.0 * inv * t) + self.p2 * (t * t)
    }

    /// Unit direction of the exit leg p1 -> p2
    ///
    /// Falls back to the chord p0 -> p2 when the control point sits on the end.
    pub fn exit_direction(&self) -> DVec2 {
        (self.p2 - self.p1)
            .try_normalize()
            .or_else(|| (self.p2 - self.p0).try_normalize())
            .unwrap_or(DVec2::ZERO)
    }
}
