use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn lerp(self, other: Vec2, t: f64) -> Vec2 {
        Vec2 {
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
        }
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Reflection of `self` through `center`.
    #[inline]
    pub fn reflect_through(self, center: Vec2) -> Vec2 {
        Vec2 {
            x: 2.0 * center.x - self.x,
            y: 2.0 * center.y - self.y,
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, o: Vec2) -> Vec2 {
        Vec2 { x: self.x + o.x, y: self.y + o.y }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, o: Vec2) -> Vec2 {
        Vec2 { x: self.x - o.x, y: self.y - o.y }
    }
}

/// Axis-aligned box as origin + extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn from_extents(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Rect {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    pub fn translated(self, by: Vec2) -> Rect {
        Rect { x: self.x + by.x, y: self.y + by.y, ..self }
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Inclusive containment.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.max_x() && p.y >= self.y && p.y <= self.max_y()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointKind {
    MoveTo,
    LineTo,
    QuadraticCurveTo,
    CubicCurveTo,
    ClosePath,
}

/// One drawing instruction of a path.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ControlPoint {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    QuadraticCurveTo {
        x: f64,
        y: f64,
        #[serde(rename = "controlX")]
        cx: f64,
        #[serde(rename = "controlY")]
        cy: f64,
    },
    CubicCurveTo {
        x: f64,
        y: f64,
        #[serde(rename = "controlX1")]
        c1x: f64,
        #[serde(rename = "controlY1")]
        c1y: f64,
        #[serde(rename = "controlX2")]
        c2x: f64,
        #[serde(rename = "controlY2")]
        c2y: f64,
    },
    ClosePath,
}

impl ControlPoint {
    pub fn kind(&self) -> PointKind {
        match self {
            ControlPoint::MoveTo { .. } => PointKind::MoveTo,
            ControlPoint::LineTo { .. } => PointKind::LineTo,
            ControlPoint::QuadraticCurveTo { .. } => PointKind::QuadraticCurveTo,
            ControlPoint::CubicCurveTo { .. } => PointKind::CubicCurveTo,
            ControlPoint::ClosePath => PointKind::ClosePath,
        }
    }

    /// On-curve endpoint; `None` for `ClosePath`.
    pub fn anchor(&self) -> Option<Vec2> {
        match *self {
            ControlPoint::MoveTo { x, y }
            | ControlPoint::LineTo { x, y }
            | ControlPoint::QuadraticCurveTo { x, y, .. }
            | ControlPoint::CubicCurveTo { x, y, .. } => Some(Vec2 { x, y }),
            ControlPoint::ClosePath => None,
        }
    }

    /// Whether a segment may start from this point's anchor.
    pub fn is_drawable_predecessor(&self) -> bool {
        !matches!(self, ControlPoint::ClosePath)
    }

    /// Position held in a selection slot, if this point has that slot.
    pub fn slot(&self, slot: Slot) -> Option<Vec2> {
        match (*self, slot) {
            (ControlPoint::ClosePath, _) => None,
            (p, Slot::Anchor) => p.anchor(),
            (ControlPoint::QuadraticCurveTo { cx, cy, .. }, Slot::Control1) => Some(Vec2::new(cx, cy)),
            (ControlPoint::CubicCurveTo { c1x, c1y, .. }, Slot::Control1) => Some(Vec2::new(c1x, c1y)),
            (ControlPoint::CubicCurveTo { c2x, c2y, .. }, Slot::Control2) => Some(Vec2::new(c2x, c2y)),
            _ => None,
        }
    }

    /// Copy of this point with one slot moved to `to`; `None` if the slot does not exist.
    pub fn with_slot(&self, slot: Slot, to: Vec2) -> Option<ControlPoint> {
        let mut p = *self;
        match (&mut p, slot) {
            (ControlPoint::ClosePath, _) => return None,
            (
                ControlPoint::MoveTo { x, y }
                | ControlPoint::LineTo { x, y }
                | ControlPoint::QuadraticCurveTo { x, y, .. }
                | ControlPoint::CubicCurveTo { x, y, .. },
                Slot::Anchor,
            ) => {
                *x = to.x;
                *y = to.y;
            }
            (ControlPoint::QuadraticCurveTo { cx, cy, .. }, Slot::Control1) => {
                *cx = to.x;
                *cy = to.y;
            }
            (ControlPoint::CubicCurveTo { c1x, c1y, .. }, Slot::Control1) => {
                *c1x = to.x;
                *c1y = to.y;
            }
            (ControlPoint::CubicCurveTo { c2x, c2y, .. }, Slot::Control2) => {
                *c2x = to.x;
                *c2y = to.y;
            }
            _ => return None,
        }
        Some(p)
    }
}

/// Column of the selection mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Anchor = 0,
    Control1 = 1,
    Control2 = 2,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Anchor, Slot::Control1, Slot::Control2];

    pub fn from_index(i: usize) -> Option<Slot> {
        Slot::ALL.get(i).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathStyle {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: f64,
}

impl Default for PathStyle {
    fn default() -> Self {
        PathStyle {
            fill: None,
            stroke: None,
            stroke_width: 1.0,
        }
    }
}

/// Result of a nearest-segment query.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NearestSegment {
    pub index: usize,
    pub t: f64,
    pub distance: f64,
}

impl NearestSegment {
    pub fn new(index: usize, t: f64) -> Self {
        NearestSegment { index, t, distance: 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_follow_point_shape() {
        let q = ControlPoint::QuadraticCurveTo { x: 4.0, y: 0.0, cx: 2.0, cy: 3.0 };
        assert_eq!(q.slot(Slot::Anchor), Some(Vec2::new(4.0, 0.0)));
        assert_eq!(q.slot(Slot::Control1), Some(Vec2::new(2.0, 3.0)));
        assert_eq!(q.slot(Slot::Control2), None);
        assert_eq!(ControlPoint::ClosePath.slot(Slot::Anchor), None);
    }

    #[test]
    fn with_slot_leaves_original_untouched() {
        let c = ControlPoint::CubicCurveTo { x: 3.0, y: 0.0, c1x: 1.0, c1y: 1.0, c2x: 2.0, c2y: 1.0 };
        let moved = c.with_slot(Slot::Control2, Vec2::new(9.0, 9.0)).unwrap();
        assert_eq!(moved.slot(Slot::Control2), Some(Vec2::new(9.0, 9.0)));
        assert_eq!(c.slot(Slot::Control2), Some(Vec2::new(2.0, 1.0)));
        assert!(ControlPoint::LineTo { x: 0.0, y: 0.0 }.with_slot(Slot::Control1, Vec2::ZERO).is_none());
    }

    #[test]
    fn serde_uses_tagged_camel_case() {
        let p = ControlPoint::QuadraticCurveTo { x: 1.0, y: 2.0, cx: 3.0, cy: 4.0 };
        let v = serde_json::to_value(p).unwrap();
        assert_eq!(v["type"], "quadraticCurveTo");
        assert_eq!(v["controlX"], 3.0);
        let back: ControlPoint = serde_json::from_value(v).unwrap();
        assert_eq!(back, p);
    }
}
