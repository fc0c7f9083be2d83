use crate::geometry::cubic::CubicBezier;
use crate::model::{ControlPoint, Rect, Vec2};

#[derive(Clone, Copy, Debug)]
struct Extents {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Extents {
    fn at(p: Vec2) -> Self {
        Extents { min_x: p.x, min_y: p.y, max_x: p.x, max_y: p.y }
    }

    fn include(&mut self, p: Vec2) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }
}

/// Tight model-space box of a control-point sequence.
///
/// Curves contribute their true extrema rather than their control polygon.
/// Returns `None` when nothing in the sequence has an anchor.
pub fn bounding_box(points: &[ControlPoint]) -> Option<Rect> {
    let mut ext: Option<Extents> = None;
    let mut include = |p: Vec2| {
        if let Some(e) = ext.as_mut() {
            e.include(p);
        } else {
            ext = Some(Extents::at(p));
        }
    };

    let mut anchor: Option<Vec2> = None;
    for cp in points {
        let curve = match (*cp, anchor) {
            (ControlPoint::ClosePath, _) => continue,
            (ControlPoint::MoveTo { x, y }, _) | (ControlPoint::LineTo { x, y }, _) => {
                include(Vec2::new(x, y));
                None
            }
            (ControlPoint::QuadraticCurveTo { x, y, cx, cy }, Some(p0)) => {
                Some(CubicBezier::from_quadratic(p0, Vec2::new(cx, cy), Vec2::new(x, y)))
            }
            (ControlPoint::CubicCurveTo { x, y, c1x, c1y, c2x, c2y }, Some(p0)) => Some(CubicBezier::new(
                p0,
                Vec2::new(c1x, c1y),
                Vec2::new(c2x, c2y),
                Vec2::new(x, y),
            )),
            // A curve with nothing before it only pins its own anchor.
            (ControlPoint::QuadraticCurveTo { x, y, .. }, None)
            | (ControlPoint::CubicCurveTo { x, y, .. }, None) => {
                include(Vec2::new(x, y));
                None
            }
        };
        if let Some(c) = curve {
            let (min, max) = c.extents();
            include(min);
            include(max);
        }
        // Close keeps the last anchor as the start of whatever follows.
        if let Some(a) = cp.anchor() {
            anchor = Some(a);
        }
    }

    ext.map(|e| Rect::from_extents(e.min_x, e.min_y, e.max_x, e.max_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_close_only_have_no_box() {
        assert_eq!(bounding_box(&[]), None);
        assert_eq!(bounding_box(&[ControlPoint::ClosePath]), None);
    }

    #[test]
    fn polyline_box_is_exact() {
        let pts = [
            ControlPoint::MoveTo { x: 3.0, y: -1.0 },
            ControlPoint::LineTo { x: -2.0, y: 4.0 },
            ControlPoint::LineTo { x: 7.0, y: 2.0 },
            ControlPoint::ClosePath,
        ];
        assert_eq!(bounding_box(&pts), Some(Rect { x: -2.0, y: -1.0, width: 9.0, height: 5.0 }));
    }

    #[test]
    fn cubic_box_uses_extrema_not_handles() {
        let pts = [
            ControlPoint::MoveTo { x: 0.0, y: 0.0 },
            ControlPoint::CubicCurveTo { x: 10.0, y: 0.0, c1x: 0.0, c1y: 10.0, c2x: 10.0, c2y: 10.0 },
        ];
        let b = bounding_box(&pts).unwrap();
        assert_eq!((b.x, b.y, b.width), (0.0, 0.0, 10.0));
        assert!((b.height - 7.5).abs() < 1e-9);
    }

    #[test]
    fn quadratic_is_elevated() {
        // Quadratic apex sits at half the control height.
        let pts = [
            ControlPoint::MoveTo { x: 0.0, y: 0.0 },
            ControlPoint::QuadraticCurveTo { x: 10.0, y: 0.0, cx: 5.0, cy: -10.0 },
        ];
        let b = bounding_box(&pts).unwrap();
        assert!((b.y + 5.0).abs() < 1e-9);
        assert!((b.height - 5.0).abs() < 1e-9);
    }

    #[test]
    fn curve_after_close_starts_from_last_anchor() {
        let pts = [
            ControlPoint::MoveTo { x: 0.0, y: 0.0 },
            ControlPoint::LineTo { x: 4.0, y: 0.0 },
            ControlPoint::ClosePath,
            ControlPoint::CubicCurveTo { x: 4.0, y: 0.0, c1x: 4.0, c1y: 8.0, c2x: 4.0, c2y: 8.0 },
        ];
        let b = bounding_box(&pts).unwrap();
        // Degenerate vertical loop from (4,0) peaks at y = 6.
        assert!((b.max_y() - 6.0).abs() < 1e-9);
    }
}
