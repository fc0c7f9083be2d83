//! Cubic Bézier curve utilities: evaluation, extrema, projection and subdivision.
//!
//! Quadratic segments are elevated to cubics before they reach any of these
//! helpers, so the rest of the crate only ever deals with one curve degree.

use crate::geometry::tolerance::{clamp01, near_zero, safe_div, EPS_DENOM, EPS_T};
use crate::model::Vec2;

/// Control points of a cubic Bézier curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub p0: Vec2, // Start point
    pub p1: Vec2, // First control point
    pub p2: Vec2, // Second control point
    pub p3: Vec2, // End point
}

impl CubicBezier {
    pub fn new(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Exact degree elevation of the quadratic (p0, c, p2).
    pub fn from_quadratic(p0: Vec2, c: Vec2, p2: Vec2) -> Self {
        const TWO_THIRDS: f64 = 2.0 / 3.0;
        let c1 = Vec2 {
            x: p0.x + TWO_THIRDS * (c.x - p0.x),
            y: p0.y + TWO_THIRDS * (c.y - p0.y),
        };
        let c2 = Vec2 {
            x: p2.x + TWO_THIRDS * (c.x - p2.x),
            y: p2.y + TWO_THIRDS * (c.y - p2.y),
        };
        Self::new(p0, c1, c2, p2)
    }

    /// Evaluate the curve at parameter t ∈ [0, 1].
    pub fn eval(&self, t: f64) -> Vec2 {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        Vec2 {
            x: mt3 * self.p0.x + 3.0 * mt2 * t * self.p1.x + 3.0 * mt * t2 * self.p2.x + t3 * self.p3.x,
            y: mt3 * self.p0.y + 3.0 * mt2 * t * self.p1.y + 3.0 * mt * t2 * self.p2.y + t3 * self.p3.y,
        }
    }

    /// Evaluate the tangent (derivative) at parameter t.
    pub fn tangent(&self, t: f64) -> Vec2 {
        let t2 = t * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;

        Vec2 {
            x: 3.0 * mt2 * (self.p1.x - self.p0.x)
                + 6.0 * mt * t * (self.p2.x - self.p1.x)
                + 3.0 * t2 * (self.p3.x - self.p2.x),
            y: 3.0 * mt2 * (self.p1.y - self.p0.y)
                + 6.0 * mt * t * (self.p2.y - self.p1.y)
                + 3.0 * t2 * (self.p3.y - self.p2.y),
        }
    }

    fn second_derivative(&self, t: f64) -> Vec2 {
        let mt = 1.0 - t;
        Vec2 {
            x: 6.0 * mt * (self.p2.x - 2.0 * self.p1.x + self.p0.x)
                + 6.0 * t * (self.p3.x - 2.0 * self.p2.x + self.p1.x),
            y: 6.0 * mt * (self.p2.y - 2.0 * self.p1.y + self.p0.y)
                + 6.0 * t * (self.p3.y - 2.0 * self.p2.y + self.p1.y),
        }
    }

    /// Split the curve at parameter t using de Casteljau subdivision.
    ///
    /// Returns two cubic curves: the first from 0..t, the second from t..1.
    pub fn split_at(&self, t: f64) -> (CubicBezier, CubicBezier) {
        let p01 = self.p0.lerp(self.p1, t);
        let p12 = self.p1.lerp(self.p2, t);
        let p23 = self.p2.lerp(self.p3, t);

        let p012 = p01.lerp(p12, t);
        let p123 = p12.lerp(p23, t);

        let p0123 = p012.lerp(p123, t); // The split point

        let first = CubicBezier::new(self.p0, p01, p012, p0123);
        let second = CubicBezier::new(p0123, p123, p23, self.p3);

        (first, second)
    }

    /// Parameters in (0, 1) where either coordinate's derivative vanishes.
    pub fn extrema(&self) -> Vec<f64> {
        let mut ts = axis_extrema(self.p0.x, self.p1.x, self.p2.x, self.p3.x);
        ts.extend(axis_extrema(self.p0.y, self.p1.y, self.p2.y, self.p3.y));
        ts
    }

    /// Tight axis-aligned extents as (min, max).
    pub fn extents(&self) -> (Vec2, Vec2) {
        let mut min = Vec2::new(self.p0.x.min(self.p3.x), self.p0.y.min(self.p3.y));
        let mut max = Vec2::new(self.p0.x.max(self.p3.x), self.p0.y.max(self.p3.y));
        for t in self.extrema() {
            let p = self.eval(t);
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }

    /// Project `p` onto the curve; returns (distance, t).
    ///
    /// Coarse sampling picks the basin, Newton iterations on
    /// `(B(t) - p) · B'(t) = 0` polish it. A Newton step is only kept when it
    /// brings the curve closer to `p`.
    pub fn nearest(&self, p: Vec2, samples: usize, iterations: usize) -> (f64, f64) {
        let n = samples.max(1);
        let mut best_t = 0.0;
        let mut best_d2 = f64::INFINITY;
        for i in 0..=n {
            let t = i as f64 / n as f64;
            let d2 = dist_sq(self.eval(t), p);
            if d2 < best_d2 {
                best_d2 = d2;
                best_t = t;
            }
        }

        let mut t = best_t;
        for _ in 0..iterations {
            let b = self.eval(t);
            let d1 = self.tangent(t);
            let d2v = self.second_derivative(t);
            let diff = b - p;
            let num = diff.x * d1.x + diff.y * d1.y;
            let den = d1.x * d1.x + d1.y * d1.y + diff.x * d2v.x + diff.y * d2v.y;
            if near_zero(den, EPS_DENOM) {
                break;
            }
            let next = clamp01(t - num / den);
            let next_d2 = dist_sq(self.eval(next), p);
            if next_d2 < best_d2 {
                best_d2 = next_d2;
                best_t = next;
            }
            if (next - t).abs() <= EPS_T {
                break;
            }
            t = next;
        }

        (best_d2.sqrt(), best_t)
    }
}

#[inline]
fn dist_sq(a: Vec2, b: Vec2) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Roots in (0, 1) of the derivative of one coordinate of a cubic.
fn axis_extrema(p0: f64, p1: f64, p2: f64, p3: f64) -> Vec<f64> {
    // B'(t)/3 = a t^2 + b t + c
    let a = -p0 + 3.0 * p1 - 3.0 * p2 + p3;
    let b = 2.0 * (p0 - 2.0 * p1 + p2);
    let c = p1 - p0;

    let mut roots = Vec::with_capacity(2);
    if a == 0.0 {
        if b != 0.0 {
            roots.push(-c / b);
        }
    } else {
        let disc = b * b - 4.0 * a * c;
        if disc >= 0.0 {
            // Cancellation-free form; elevated quadratics leave `a` at rounding noise.
            let q = -0.5 * (b + b.signum() * disc.sqrt());
            if q != 0.0 {
                roots.push(q / a);
                roots.push(c / q);
            } else {
                roots.push(0.0);
            }
        }
    }
    roots.retain(|t| *t > EPS_T && *t < 1.0 - EPS_T);
    roots
}

/// Clamped projection of `p` onto the segment a→b; returns (distance, t).
pub fn project_on_line(p: Vec2, a: Vec2, b: Vec2) -> (f64, f64) {
    let vx = b.x - a.x;
    let vy = b.y - a.y;
    let wx = p.x - a.x;
    let wy = p.y - a.y;
    let vv = vx * vx + vy * vy;
    let t = clamp01(safe_div(wx * vx + wy * vy, vv, 0.0));
    let proj = a.lerp(b, t);
    (proj.distance(p), t)
}
