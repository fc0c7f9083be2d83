use crate::geometry::segment::{ProjectionOptions, Segments};
use crate::model::{ControlPoint, NearestSegment, Vec2};

/// Closest drawable segment to `p` within `threshold`.
///
/// Segments without a drawable predecessor are skipped, not reported. A later
/// segment only wins on a strictly smaller distance, so ties keep the earlier
/// index.
pub fn closest_segment(
    points: &[ControlPoint],
    p: Vec2,
    threshold: f64,
    opts: &ProjectionOptions,
) -> Option<NearestSegment> {
    let mut best: Option<NearestSegment> = None;
    for seg in Segments::new(points) {
        let Some(geom) = seg.geometry() else {
            continue;
        };
        let (distance, t) = geom.project(p, opts);
        if distance <= threshold && best.map_or(true, |b| distance < b.distance) {
            best = Some(NearestSegment { index: seg.index, t, distance });
        }
    }
    best
}
