use crate::geometry::cubic::{project_on_line, CubicBezier};
use crate::model::{ControlPoint, Vec2};

/// Drawable geometry of one (previous anchor, current point) pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SegmentGeometry {
    Line(Vec2, Vec2),
    Cubic(CubicBezier),
}

/// Tuning for cubic projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionOptions {
    /// Evenly spaced samples used to seed the search.
    pub samples: usize,
    /// Newton refinement steps after sampling.
    pub newton_iterations: usize,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        ProjectionOptions { samples: 32, newton_iterations: 8 }
    }
}

impl SegmentGeometry {
    /// `None` unless `previous` has an anchor and `current` is a line or curve.
    pub fn between(previous: &ControlPoint, current: &ControlPoint) -> Option<Self> {
        let p0 = previous.anchor()?;
        match *current {
            ControlPoint::LineTo { x, y } => Some(SegmentGeometry::Line(p0, Vec2::new(x, y))),
            ControlPoint::QuadraticCurveTo { x, y, cx, cy } => Some(SegmentGeometry::Cubic(
                CubicBezier::from_quadratic(p0, Vec2::new(cx, cy), Vec2::new(x, y)),
            )),
            ControlPoint::CubicCurveTo { x, y, c1x, c1y, c2x, c2y } => Some(SegmentGeometry::Cubic(
                CubicBezier::new(p0, Vec2::new(c1x, c1y), Vec2::new(c2x, c2y), Vec2::new(x, y)),
            )),
            ControlPoint::MoveTo { .. } | ControlPoint::ClosePath => None,
        }
    }

    pub fn eval(&self, t: f64) -> Vec2 {
        match self {
            SegmentGeometry::Line(a, b) => a.lerp(*b, t),
            SegmentGeometry::Cubic(c) => c.eval(t),
        }
    }

    /// (distance, t) of the closest point to `p`.
    pub fn project(&self, p: Vec2, opts: &ProjectionOptions) -> (f64, f64) {
        match self {
            SegmentGeometry::Line(a, b) => project_on_line(p, *a, *b),
            SegmentGeometry::Cubic(c) => c.nearest(p, opts.samples, opts.newton_iterations),
        }
    }
}

/// One entry of the segment enumeration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment<'a> {
    pub previous: Option<&'a ControlPoint>,
    pub current: &'a ControlPoint,
    pub index: usize,
}

impl<'a> Segment<'a> {
    /// Geometry of this segment, if it is drawable.
    pub fn geometry(&self) -> Option<SegmentGeometry> {
        SegmentGeometry::between(self.previous?, self.current)
    }
}

/// Lazy walk over a control-point slice, one [`Segment`] per point.
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    points: &'a [ControlPoint],
    next: usize,
}

impl<'a> Segments<'a> {
    pub fn new(points: &'a [ControlPoint]) -> Self {
        Segments { points, next: 0 }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        let index = self.next;
        let current = self.points.get(index)?;
        self.next += 1;
        let previous = index.checked_sub(1).map(|i| &self.points[i]);
        Some(Segment { previous, current, index })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.points.len().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Segments<'_> {}
