// Centralized tolerances for curve math

pub const EPS_T: f64 = 1e-12;             // parameter-space slack when filtering roots
pub const EPS_DENOM: f64 = 1e-12;         // denominator guard for projections/Newton steps

#[inline] pub fn clamp01(x: f64) -> f64 { x.max(0.0).min(1.0) }
#[inline] pub fn near_zero(x: f64, eps: f64) -> bool { x.abs() <= eps }

#[inline]
pub fn safe_div(num: f64, den: f64, fallback: f64) -> f64 {
    if den.abs() <= EPS_DENOM { fallback } else { num/den }
}
