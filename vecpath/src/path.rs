use std::cell::Cell;

use crate::error::{Error, Result};
use crate::geometry::bounds;
use crate::geometry::cubic::CubicBezier;
use crate::geometry::nearest;
use crate::geometry::segment::{ProjectionOptions, SegmentGeometry, Segments};
use crate::mask::{SelectionMask, SLOTS_PER_POINT};
use crate::model::{ControlPoint, NearestSegment, PathStyle, Rect, Slot, Vec2};

/// An editable piecewise curve.
///
/// The control-point sequence is only ever replaced as a whole, which keeps
/// the cached bounding box to a single invalidation point.
#[derive(Clone, Debug, Default)]
pub struct Path {
    points: Vec<ControlPoint>,
    translation: Vec2,
    style: PathStyle,
    bbox: Cell<Option<Option<Rect>>>, // model space; outer None = stale
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points && self.translation == other.translation && self.style == other.style
    }
}

impl Path {
    pub fn new(points: Vec<ControlPoint>) -> Self {
        Path { points, ..Default::default() }
    }

    pub fn control_points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn set_control_points(&mut self, points: Vec<ControlPoint>) {
        self.points = points;
        self.bbox.set(None);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    pub fn set_translation(&mut self, translation: Vec2) {
        self.translation = translation;
    }

    pub fn style(&self) -> &PathStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: PathStyle) {
        self.style = style;
    }

    /// World-space bounding box.
    ///
    /// A path with no anchors reports a zero-size box at its translation.
    pub fn bounding_box(&self) -> Rect {
        let model = match self.bbox.get() {
            Some(cached) => cached,
            None => {
                let computed = bounds::bounding_box(&self.points);
                log::debug!("recomputed bounding box over {} points", self.points.len());
                self.bbox.set(Some(computed));
                computed
            }
        };
        model.unwrap_or_default().translated(self.translation)
    }

    pub fn segments(&self) -> Segments<'_> {
        Segments::new(&self.points)
    }

    /// Nearest drawable segment to a world-space point.
    pub fn closest_segment(&self, point: Vec2, threshold: f64) -> Option<NearestSegment> {
        self.closest_segment_with(point, threshold, &ProjectionOptions::default())
    }

    pub fn closest_segment_with(
        &self,
        point: Vec2,
        threshold: f64,
        opts: &ProjectionOptions,
    ) -> Option<NearestSegment> {
        nearest::closest_segment(&self.points, point - self.translation, threshold, opts)
    }

    /// World-space point at `t` along the segment named by `hit`.
    pub fn point_for_nearest_segment(&self, hit: &NearestSegment) -> Result<Vec2> {
        let geom = self.hit_geometry(hit)?;
        Ok(geom.eval(hit.t) + self.translation)
    }

    /// Subdivide the segment named by `hit` at its parameter.
    ///
    /// Lines gain a `LineTo` before `index`; curves are replaced by two
    /// cubics meeting at the split point. The sequence grows by one either way.
    pub fn add_nearest_segment(&mut self, hit: &NearestSegment) -> Result<()> {
        let geom = self.hit_geometry(hit)?;
        let mut points = Vec::with_capacity(self.points.len() + 1);
        points.extend_from_slice(&self.points[..hit.index]);
        match geom {
            SegmentGeometry::Line(a, b) => {
                let p = a.lerp(b, hit.t);
                points.push(ControlPoint::LineTo { x: p.x, y: p.y });
                points.push(self.points[hit.index]);
            }
            SegmentGeometry::Cubic(curve) => {
                let (left, right) = curve.split_at(hit.t);
                points.push(cubic_point(&left));
                points.push(cubic_point(&CubicBezier { p3: curve.p3, ..right }));
            }
        }
        points.extend_from_slice(&self.points[hit.index + 1..]);
        log::debug!("split segment {} at t={}", hit.index, hit.t);
        self.set_control_points(points);
        Ok(())
    }

    /// Move one anchor or handle, replacing the sequence.
    pub fn move_point(&mut self, index: usize, slot: Slot, to: Vec2) -> Result<()> {
        let cp = self.point(index)?;
        let moved = cp.with_slot(slot, to).ok_or(Error::UnsupportedControlPointType {
            index,
            kind: cp.kind(),
        })?;
        let mut points = self.points.clone();
        points[index] = moved;
        self.set_control_points(points);
        Ok(())
    }

    /// Offset every selected slot by (dx, dy); returns how many moved.
    ///
    /// Selected slots a point does not have are ignored.
    pub fn translate_selected(&mut self, mask: &SelectionMask, dx: f64, dy: f64) -> Result<usize> {
        let expected = [self.points.len(), SLOTS_PER_POINT];
        if mask.shape() != expected {
            return Err(Error::ShapeMismatch {
                expected: expected.to_vec(),
                got: mask.shape().to_vec(),
            });
        }
        let mut moved = 0;
        let mut points = self.points.clone();
        for (cp, row) in points.iter_mut().zip(mask.rows()) {
            for (slot, _) in Slot::ALL.iter().zip(row).filter(|(_, sel)| **sel) {
                if let Some(at) = cp.slot(*slot) {
                    if let Some(next) = cp.with_slot(*slot, Vec2::new(at.x + dx, at.y + dy)) {
                        *cp = next;
                        moved += 1;
                    }
                }
            }
        }
        if moved > 0 {
            self.set_control_points(points);
        }
        Ok(moved)
    }

    fn point(&self, index: usize) -> Result<&ControlPoint> {
        self.points.get(index).ok_or(Error::InvalidIndex { index, len: self.points.len() })
    }

    /// Segment geometry for `hit`, with `t` required to lie in [0, 1].
    fn hit_geometry(&self, hit: &NearestSegment) -> Result<SegmentGeometry> {
        let geom = self.segment_geometry(hit.index)?;
        if !(0.0..=1.0).contains(&hit.t) {
            return Err(Error::ParameterOutOfRange { name: "t", value: hit.t });
        }
        Ok(geom)
    }

    fn segment_geometry(&self, index: usize) -> Result<SegmentGeometry> {
        let current = self.point(index)?;
        if matches!(current, ControlPoint::MoveTo { .. } | ControlPoint::ClosePath) {
            return Err(Error::UnsupportedControlPointType { index, kind: current.kind() });
        }
        let previous = index
            .checked_sub(1)
            .map(|i| &self.points[i])
            .filter(|p| p.is_drawable_predecessor())
            .ok_or(Error::InvalidAdjacency { index })?;
        SegmentGeometry::between(previous, current).ok_or(Error::InvalidAdjacency { index })
    }
}

fn cubic_point(c: &CubicBezier) -> ControlPoint {
    ControlPoint::CubicCurveTo {
        x: c.p3.x,
        y: c.p3.y,
        c1x: c.p1.x,
        c1y: c.p1.y,
        c2x: c.p2.x,
        c2y: c.p2.y,
    }
}
