//! Path-data codec: control points to and from the SVG `d` mini-language.

use crate::error::{Error, Result};
use crate::geometry::limits;
use crate::model::{ControlPoint, Slot, Vec2};

/// Non-fatal issue raised while parsing.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseWarning {
    /// An elliptical arc was replaced by a straight line to its endpoint.
    ArcApproximated { command_index: usize },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedPath {
    pub points: Vec<ControlPoint>,
    pub warnings: Vec<ParseWarning>,
}

pub fn serialize(points: &[ControlPoint]) -> String {
    let mut d = String::new();
    for cp in points {
        let token = match *cp {
            ControlPoint::MoveTo { x, y } => format!("M {} {}", x, y),
            ControlPoint::LineTo { x, y } => format!("L {} {}", x, y),
            ControlPoint::QuadraticCurveTo { x, y, cx, cy } => format!("Q {} {} {} {}", cx, cy, x, y),
            ControlPoint::CubicCurveTo { x, y, c1x, c1y, c2x, c2y } => {
                format!("C {} {} {} {} {} {}", c1x, c1y, c2x, c2y, x, y)
            }
            ControlPoint::ClosePath => "Z".to_string(),
        };
        d.push_str(&token);
        d.push(' ');
    }
    d.trim_end().to_string()
}

fn is_command(c: u8) -> bool {
    matches!(c.to_ascii_uppercase(), b'M' | b'L' | b'H' | b'V' | b'C' | b'S' | b'Q' | b'T' | b'A' | b'Z')
}

fn skip_ws(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() {
        match bytes[*i] {
            b' ' | b'\n' | b'\r' | b'\t' | b',' => *i += 1,
            _ => break,
        }
    }
}

fn starts_number(bytes: &[u8], i: usize) -> bool {
    i < bytes.len() && matches!(bytes[i], b'0'..=b'9' | b'.' | b'-' | b'+')
}

fn parse_num(bytes: &[u8], i: &mut usize) -> Option<f64> {
    skip_ws(bytes, i);
    let start = *i;
    if *i < bytes.len() && matches!(bytes[*i], b'+' | b'-') {
        *i += 1;
    }
    let mut digits = 0;
    while *i < bytes.len() && bytes[*i].is_ascii_digit() {
        *i += 1;
        digits += 1;
    }
    if *i < bytes.len() && bytes[*i] == b'.' {
        *i += 1;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        *i = start;
        return None;
    }
    if *i < bytes.len() && matches!(bytes[*i], b'e' | b'E') {
        let mark = *i;
        *i += 1;
        if *i < bytes.len() && matches!(bytes[*i], b'+' | b'-') {
            *i += 1;
        }
        let exp_start = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        if *i == exp_start {
            *i = mark;
        }
    }
    let s = std::str::from_utf8(&bytes[start..*i]).ok()?;
    s.parse::<f64>().ok()
}

fn read_args<const N: usize>(bytes: &[u8], i: &mut usize, cmd: u8) -> Result<[f64; N]> {
    let mut out = [0.0; N];
    for (k, slot) in out.iter_mut().enumerate() {
        let v = parse_num(bytes, i).ok_or_else(|| {
            Error::malformed(format!("command '{}' expects {} numbers, found {}", cmd as char, N, k))
        })?;
        if !v.is_finite() {
            return Err(Error::malformed(format!("coordinate {} is not finite", v)));
        }
        *slot = v;
    }
    Ok(out)
}

/// Parse a `d` string into control points.
///
/// Tracks a running current point from (0, 0). `Z` leaves the current point
/// where it was. Arcs are not decomposed: each becomes a `LineTo` to its
/// endpoint and raises [`ParseWarning::ArcApproximated`].
pub fn parse(d: &str) -> Result<ParsedPath> {
    if d.len() > limits::MAX_PATH_DATA_LEN {
        return Err(Error::malformed("path data too long"));
    }
    let bytes = d.as_bytes();
    let mut i = 0usize;
    let mut out = ParsedPath::default();
    let mut cur = Vec2::ZERO;
    let mut last_cubic_ctrl: Option<Vec2> = None;
    let mut last_quad_ctrl: Option<Vec2> = None;
    let mut cmd_count = 0usize;

    loop {
        skip_ws(bytes, &mut i);
        if i >= bytes.len() {
            break;
        }
        let c = bytes[i];
        if !is_command(c) {
            return Err(Error::malformed(format!("unexpected '{}' at offset {}", c as char, i)));
        }
        i += 1;
        cmd_count += 1;
        let rel = c.is_ascii_lowercase();
        let base = |cur: Vec2| if rel { cur } else { Vec2::ZERO };
        let at = |cur: Vec2, x: f64, y: f64| Vec2::new(x, y) + base(cur);

        let mut first = true;
        loop {
            match c.to_ascii_uppercase() {
                b'M' => {
                    let [x, y] = read_args::<2>(bytes, &mut i, c)?;
                    let p = at(cur, x, y);
                    // Extra coordinate pairs after a moveto are implicit linetos.
                    out.points.push(if first {
                        ControlPoint::MoveTo { x: p.x, y: p.y }
                    } else {
                        ControlPoint::LineTo { x: p.x, y: p.y }
                    });
                    cur = p;
                    last_cubic_ctrl = None;
                    last_quad_ctrl = None;
                }
                b'L' => {
                    let [x, y] = read_args::<2>(bytes, &mut i, c)?;
                    cur = at(cur, x, y);
                    out.points.push(ControlPoint::LineTo { x: cur.x, y: cur.y });
                    last_cubic_ctrl = None;
                    last_quad_ctrl = None;
                }
                b'H' => {
                    let [x] = read_args::<1>(bytes, &mut i, c)?;
                    cur = Vec2::new(x + base(cur).x, cur.y);
                    out.points.push(ControlPoint::LineTo { x: cur.x, y: cur.y });
                    last_cubic_ctrl = None;
                    last_quad_ctrl = None;
                }
                b'V' => {
                    let [y] = read_args::<1>(bytes, &mut i, c)?;
                    cur = Vec2::new(cur.x, y + base(cur).y);
                    out.points.push(ControlPoint::LineTo { x: cur.x, y: cur.y });
                    last_cubic_ctrl = None;
                    last_quad_ctrl = None;
                }
                b'C' => {
                    let [x1, y1, x2, y2, x, y] = read_args::<6>(bytes, &mut i, c)?;
                    let c1 = at(cur, x1, y1);
                    let c2 = at(cur, x2, y2);
                    cur = at(cur, x, y);
                    out.points.push(cubic(cur, c1, c2));
                    last_cubic_ctrl = Some(c2);
                    last_quad_ctrl = None;
                }
                b'S' => {
                    let [x2, y2, x, y] = read_args::<4>(bytes, &mut i, c)?;
                    let c1 = last_cubic_ctrl.map_or(cur, |prev| prev.reflect_through(cur));
                    let c2 = at(cur, x2, y2);
                    cur = at(cur, x, y);
                    out.points.push(cubic(cur, c1, c2));
                    last_cubic_ctrl = Some(c2);
                    last_quad_ctrl = None;
                }
                b'Q' => {
                    let [x1, y1, x, y] = read_args::<4>(bytes, &mut i, c)?;
                    let ctrl = at(cur, x1, y1);
                    cur = at(cur, x, y);
                    out.points.push(quadratic(cur, ctrl));
                    last_quad_ctrl = Some(ctrl);
                    last_cubic_ctrl = None;
                }
                b'T' => {
                    let [x, y] = read_args::<2>(bytes, &mut i, c)?;
                    let ctrl = last_quad_ctrl.map_or(cur, |prev| prev.reflect_through(cur));
                    cur = at(cur, x, y);
                    out.points.push(quadratic(cur, ctrl));
                    last_quad_ctrl = Some(ctrl);
                    last_cubic_ctrl = None;
                }
                b'A' => {
                    let [_rx, _ry, _rot, _large, _sweep, x, y] = read_args::<7>(bytes, &mut i, c)?;
                    cur = at(cur, x, y);
                    out.points.push(ControlPoint::LineTo { x: cur.x, y: cur.y });
                    let command_index = out.points.len() - 1;
                    log::warn!("arc at point {} approximated as a straight line", command_index);
                    out.warnings.push(ParseWarning::ArcApproximated { command_index });
                    last_cubic_ctrl = None;
                    last_quad_ctrl = None;
                }
                _ => {
                    // Z: no arguments, current point unchanged
                    out.points.push(ControlPoint::ClosePath);
                    last_cubic_ctrl = None;
                    last_quad_ctrl = None;
                }
            }
            // Relative offsets can still overflow to infinity.
            if let Some(last) = out.points.last() {
                if !Slot::ALL.iter().filter_map(|s| last.slot(*s)).all(|p| p.x.is_finite() && p.y.is_finite()) {
                    return Err(Error::malformed("coordinate overflow"));
                }
            }
            if out.points.len() > limits::MAX_PATH_COMMANDS {
                return Err(Error::malformed("too many path commands"));
            }
            first = false;
            skip_ws(bytes, &mut i);
            if c.to_ascii_uppercase() == b'Z' || !starts_number(bytes, i) {
                break;
            }
        }
    }

    if cmd_count == 0 {
        return Err(Error::malformed("no path commands"));
    }
    Ok(out)
}

/// Parse, keeping only the points. Warnings have already been logged.
pub fn parse_points(d: &str) -> Result<Vec<ControlPoint>> {
    parse(d).map(|parsed| parsed.points)
}

fn cubic(end: Vec2, c1: Vec2, c2: Vec2) -> ControlPoint {
    ControlPoint::CubicCurveTo { x: end.x, y: end.y, c1x: c1.x, c1y: c1.y, c2x: c2.x, c2y: c2.y }
}

fn quadratic(end: Vec2, ctrl: Vec2) -> ControlPoint {
    ControlPoint::QuadraticCurveTo { x: end.x, y: end.y, cx: ctrl.x, cy: ctrl.y }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_uses_natural_numbers() {
        let pts = [
            ControlPoint::MoveTo { x: 1.0, y: -2.5 },
            ControlPoint::QuadraticCurveTo { x: 4.0, y: 0.0, cx: 2.0, cy: 3.0 },
            ControlPoint::ClosePath,
        ];
        assert_eq!(serialize(&pts), "M 1 -2.5 Q 2 3 4 0 Z");
        assert_eq!(serialize(&[]), "");
    }

    #[test]
    fn numbers_without_separators() {
        let pts = parse_points("M10-5L.5.5l-1e1,2.5E-1").unwrap();
        assert_eq!(
            pts,
            vec![
                ControlPoint::MoveTo { x: 10.0, y: -5.0 },
                ControlPoint::LineTo { x: 0.5, y: 0.5 },
                ControlPoint::LineTo { x: -9.5, y: 0.75 },
            ]
        );
    }

    #[test]
    fn implicit_repeats() {
        let pts = parse_points("m 1 1 2 0 l 0 2 0 2").unwrap();
        assert_eq!(
            pts,
            vec![
                ControlPoint::MoveTo { x: 1.0, y: 1.0 },
                ControlPoint::LineTo { x: 3.0, y: 1.0 },
                ControlPoint::LineTo { x: 3.0, y: 3.0 },
                ControlPoint::LineTo { x: 3.0, y: 5.0 },
            ]
        );
    }

    #[test]
    fn horizontal_and_vertical() {
        let pts = parse_points("M 5 5 H 10 v 3 h -1 V 0").unwrap();
        assert_eq!(
            pts[1..],
            [
                ControlPoint::LineTo { x: 10.0, y: 5.0 },
                ControlPoint::LineTo { x: 10.0, y: 8.0 },
                ControlPoint::LineTo { x: 9.0, y: 8.0 },
                ControlPoint::LineTo { x: 9.0, y: 0.0 },
            ]
        );
    }

    #[test]
    fn smooth_cubic_reflects_previous_handle() {
        let pts = parse_points("M 0 0 C 0 10 10 10 10 0 S 20 -10 20 0").unwrap();
        assert_eq!(
            pts[2],
            ControlPoint::CubicCurveTo { x: 20.0, y: 0.0, c1x: 10.0, c1y: -10.0, c2x: 20.0, c2y: -10.0 }
        );
    }

    #[test]
    fn smooth_without_previous_curve_uses_current_point() {
        let pts = parse_points("M 3 4 S 5 5 6 6").unwrap();
        assert_eq!(
            pts[1],
            ControlPoint::CubicCurveTo { x: 6.0, y: 6.0, c1x: 3.0, c1y: 4.0, c2x: 5.0, c2y: 5.0 }
        );
        let pts = parse_points("M 0 0 L 2 0 T 4 0").unwrap();
        assert_eq!(pts[2], ControlPoint::QuadraticCurveTo { x: 4.0, y: 0.0, cx: 2.0, cy: 0.0 });
    }

    #[test]
    fn smooth_quadratic_chain() {
        let pts = parse_points("M 0 0 Q 5 10 10 0 T 20 0 t 10 0").unwrap();
        assert_eq!(pts[2], ControlPoint::QuadraticCurveTo { x: 20.0, y: 0.0, cx: 15.0, cy: -10.0 });
        assert_eq!(pts[3], ControlPoint::QuadraticCurveTo { x: 30.0, y: 0.0, cx: 25.0, cy: 10.0 });
    }

    #[test]
    fn arc_becomes_line_with_warning() {
        let parsed = parse("M 0 0 a 5 5 0 0 1 10 0 Z").unwrap();
        assert_eq!(parsed.points[1], ControlPoint::LineTo { x: 10.0, y: 0.0 });
        assert_eq!(parsed.warnings, vec![ParseWarning::ArcApproximated { command_index: 1 }]);
        assert_eq!(parsed.points[2], ControlPoint::ClosePath);
    }

    #[test]
    fn close_keeps_current_point() {
        let pts = parse_points("M 10 10 L 20 10 Z l 5 5").unwrap();
        assert_eq!(pts[3], ControlPoint::LineTo { x: 25.0, y: 15.0 });
    }

    #[test]
    fn malformed_inputs() {
        for bad in ["", "   ", "10 10", "M 1", "M 1 2 X 3", "C 1 2 3", "Z 4", "M 1 2 L 1 nan"] {
            assert!(
                matches!(parse(bad), Err(Error::MalformedPathDescription(_))),
                "accepted {:?}",
                bad
            );
        }
        assert!(parse("M 1e400 0").is_err());
        assert!(parse("m 1e308 0 l 1e308 0").is_err());
    }

    #[test]
    fn large_finite_coordinates_round_trip() {
        let pts = vec![
            ControlPoint::MoveTo { x: 0.0, y: 0.0 },
            ControlPoint::LineTo { x: 2e9, y: 1.0 },
            ControlPoint::CubicCurveTo { x: -3.5e15, y: 1e-300, c1x: 1e300, c1y: -7e12, c2x: 4e9, c2y: 0.5 },
        ];
        let d = serialize(&pts);
        assert_eq!(parse_points(&d), Ok(pts));
    }
}
