use approx::assert_abs_diff_eq;
use vecpath::svg::{parse, parse_points, serialize};
use vecpath::{ControlPoint, Error, NearestSegment, Path, SelectionMask, Vec2};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn scenario_a_points() -> Vec<ControlPoint> {
    vec![
        ControlPoint::MoveTo { x: 100.0, y: 100.0 },
        ControlPoint::CubicCurveTo { x: 250.0, y: 100.0, c1x: 150.0, c1y: 50.0, c2x: 200.0, c2y: 150.0 },
        ControlPoint::LineTo { x: 300.0, y: 150.0 },
        ControlPoint::QuadraticCurveTo { x: 400.0, y: 150.0, cx: 350.0, cy: 200.0 },
        ControlPoint::ClosePath,
    ]
}

#[test]
fn scenario_a_absolute_path() {
    init_logs();
    let pts = parse_points("M 100 100 C 150 50 200 150 250 100 L 300 150 Q 350 200 400 150 Z").unwrap();
    assert_eq!(pts, scenario_a_points());
}

#[test]
fn scenario_b_relative_path_matches_absolute() {
    init_logs();
    let pts = parse_points("m 100 100 c 50 -50 100 50 150 0 l 50 50 q 50 50 100 0 z").unwrap();
    assert_eq!(pts, scenario_a_points());
}

#[test]
fn scenario_a_serializes_back() {
    let d = serialize(&scenario_a_points());
    assert_eq!(d, "M 100 100 C 150 50 200 150 250 100 L 300 150 Q 350 200 400 150 Z");
    assert_eq!(parse_points(&d).unwrap(), scenario_a_points());
}

#[test]
fn scenario_c_mask() {
    let mut mask = SelectionMask::new(&[3, 3]);
    mask.set(true, &[1, 2]).unwrap();
    assert_eq!(mask.get(&[1, 2]), Ok(true));
    for i in 0..3 {
        for j in 0..3 {
            if (i, j) != (1, 2) {
                assert_eq!(mask.get(&[i, j]), Ok(false), "cell ({}, {})", i, j);
            }
        }
    }
    assert!(matches!(mask.get(&[3, 0]), Err(Error::InvalidIndex { .. })));
}

#[test]
fn scenario_d_line_projection() {
    let path = Path::new(vec![ControlPoint::MoveTo { x: 0.0, y: 0.0 }, ControlPoint::LineTo { x: 10.0, y: 0.0 }]);
    let hit = path.closest_segment(Vec2::new(5.0, 3.0), 10.0).unwrap();
    assert_eq!(hit.index, 1);
    assert_abs_diff_eq!(hit.t, 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(hit.distance, 3.0, epsilon = 1e-9);
}

#[test]
fn split_cubic_of_scenario_a() {
    let mut path = Path::new(scenario_a_points());
    let hit = NearestSegment::new(1, 0.3);
    let at = path.point_for_nearest_segment(&hit).unwrap();
    path.add_nearest_segment(&hit).unwrap();
    let pts = path.control_points();
    assert_eq!(pts.len(), 6);
    let split = pts[1].anchor().unwrap();
    assert_abs_diff_eq!(split.x, at.x, epsilon = 1e-6);
    assert_abs_diff_eq!(split.y, at.y, epsilon = 1e-6);
    assert_eq!(pts[2].anchor(), Some(Vec2::new(250.0, 100.0)));
    assert_eq!(pts[3..], scenario_a_points()[2..]);
}

#[test]
fn bounding_box_of_scenario_a_covers_curve_extrema() {
    let path = Path::new(scenario_a_points());
    let b = path.bounding_box();
    assert_eq!(b.x, 100.0);
    assert_eq!(b.max_x(), 400.0);
    // The cubic dips above y=100 and the quadratic peaks at y=175.
    assert!(b.y < 100.0 && b.y > 50.0);
    assert_abs_diff_eq!(b.max_y(), 175.0, epsilon = 1e-9);
}

#[test]
fn arc_warning_surfaces_without_aborting() {
    init_logs();
    let parsed = parse("M 0 0 A 10 10 0 0 1 20 0 L 30 0").unwrap();
    assert_eq!(parsed.points.len(), 3);
    assert_eq!(parsed.warnings.len(), 1);
}

#[test]
fn path_data_helpers() {
    let path = Path::from_path_data("M 0 0 L 1 1").unwrap();
    assert_eq!(path.to_path_data(), "M 0 0 L 1 1");
    assert!(Path::from_path_data("").is_err());
}
