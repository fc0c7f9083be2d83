use crate::error::{Error, Result};
use crate::geometry::limits;
use crate::model::{ControlPoint, PathStyle, Slot, Vec2};
use crate::path::Path;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DOC_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct PathDoc {
    version: u32,
    points: Vec<ControlPoint>,
    #[serde(default)]
    translation: Vec2,
    #[serde(default)]
    style: PathStyle,
}

pub fn to_json_value(path: &Path) -> Value {
    let doc = PathDoc {
        version: DOC_VERSION,
        points: path.control_points().to_vec(),
        translation: path.translation(),
        style: path.style().clone(),
    };
    serde_json::to_value(doc).expect("path snapshot has only string keys")
}

pub fn from_json_value(v: Value) -> Result<Path> {
    let doc: PathDoc = serde_json::from_value(v).map_err(|e| Error::malformed(e.to_string()))?;
    if doc.version != DOC_VERSION {
        return Err(Error::malformed(format!("unsupported document version {}", doc.version)));
    }
    validate(&doc)?;
    let mut path = Path::new(doc.points);
    path.set_translation(doc.translation);
    path.set_style(doc.style);
    Ok(path)
}

fn validate(doc: &PathDoc) -> Result<()> {
    if doc.points.len() > limits::MAX_PATH_COMMANDS {
        return Err(Error::malformed("too many control points"));
    }
    let in_bounds = |v: Vec2| limits::in_coord_bounds(v.x) && limits::in_coord_bounds(v.y);
    for (i, cp) in doc.points.iter().enumerate() {
        if !Slot::ALL.iter().filter_map(|s| cp.slot(*s)).all(in_bounds) {
            return Err(Error::malformed(format!("coordinate out of range at point {}", i)));
        }
    }
    if !in_bounds(doc.translation) {
        return Err(Error::malformed("translation out of range"));
    }
    if !limits::in_width_bounds(doc.style.stroke_width) {
        return Err(Error::malformed("stroke width out of range"));
    }
    Ok(())
}
