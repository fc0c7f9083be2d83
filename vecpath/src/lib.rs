pub mod error;
pub mod model;
pub mod geometry {
    pub mod bounds;
    pub mod cubic;
    pub mod limits;
    pub mod nearest;
    pub mod segment;
    pub mod tolerance;
}
pub mod editing;
pub mod element;
pub mod json;
pub mod mask;
pub mod path;
pub mod svg;

pub use editing::CurveEditor;
pub use error::{Error, Result};
pub use geometry::segment::{ProjectionOptions, Segment, SegmentGeometry, Segments};
pub use mask::{NdArray, SelectionMask};
pub use model::{ControlPoint, NearestSegment, PathStyle, PointKind, Rect, Slot, Vec2};
pub use path::Path;
pub use svg::{ParseWarning, ParsedPath};

impl Path {
    /// Path data string (`d` attribute) for this path.
    pub fn to_path_data(&self) -> String {
        svg::serialize(self.control_points())
    }

    /// Build a path from a `d` string; warnings are logged.
    pub fn from_path_data(d: &str) -> Result<Path> {
        svg::parse_points(d).map(Path::new)
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_value(self)
    }

    pub fn from_json_value(v: serde_json::Value) -> Result<Path> {
        json::from_json_value(v)
    }
}
