// Centralized ingestion limits to harden against untrusted input (path data / SVG)

pub const MAX_PATH_DATA_LEN: usize = 8 * 1024 * 1024; // characters in a 'd' string
pub const MAX_PATH_COMMANDS: usize = 500_000;          // emitted control points per path
pub const MAX_DOCUMENT_PATHS: usize = 10_000;

// Numeric bounds (JSON snapshot ingest)
pub const COORD_MIN: f64 = -1.0e9;
pub const COORD_MAX: f64 =  1.0e9;
pub const WIDTH_MAX: f64 = 10_000.0;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }

#[inline]
pub fn in_width_bounds(w: f64) -> bool { w.is_finite() && w >= 0.0 && w <= WIDTH_MAX }
