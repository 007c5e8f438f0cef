use super::*;
use crate::geometry::path::PathSegment;

fn segs(d: &str) -> Vec<PathSegment> {
    parse_path_data(d).unwrap().segments().to_vec()
}

#[test]
fn absolute_and_relative_lines() {
    assert_eq!(
        segs("M10 10 L20 10 l0 10 H0 v-5 Z"),
        vec![
            PathSegment::MoveTo(Point::new(10.0, 10.0)),
            PathSegment::LineTo(Point::new(20.0, 10.0)),
            PathSegment::LineTo(Point::new(20.0, 20.0)),
            PathSegment::LineTo(Point::new(0.0, 20.0)),
            PathSegment::LineTo(Point::new(0.0, 15.0)),
            PathSegment::Close,
        ]
    );
}

#[test]
fn implicit_lineto_after_moveto() {
    assert_eq!(
        segs("m1 1 2 2 3 3"),
        vec![
            PathSegment::MoveTo(Point::new(1.0, 1.0)),
            PathSegment::LineTo(Point::new(3.0, 3.0)),
            PathSegment::LineTo(Point::new(6.0, 6.0)),
        ]
    );
    assert_eq!(segs("M0,0,10,0").len(), 2);
}

#[test]
fn relative_after_close_starts_from_subpath_start() {
    let s = segs("M10 10 l5 0 z m1 1");
    assert_eq!(s.last(), Some(&PathSegment::MoveTo(Point::new(11.0, 11.0))));
}

#[test]
fn smooth_cubic_reflects_previous_control() {
    let s = segs("M0 0 C0 10 10 10 10 0 S20 -10 20 0");
    assert_eq!(
        s[2],
        PathSegment::CubicTo(
            Point::new(10.0, -10.0),
            Point::new(20.0, -10.0),
            Point::new(20.0, 0.0)
        )
    );
    // Without a preceding cubic the first control point is the current point.
    let s = segs("M5 5 S10 10 15 5");
    assert_eq!(
        s[1],
        PathSegment::CubicTo(Point::new(5.0, 5.0), Point::new(10.0, 10.0), Point::new(15.0, 5.0))
    );
}

#[test]
fn smooth_quadratic_chains() {
    let s = segs("M0 0 Q5 10 10 0 T20 0");
    let mut expected = Path::new();
    expected
        .move_to((0.0, 0.0))
        .quad_to((5.0, 10.0), (10.0, 0.0))
        .quad_to((15.0, -10.0), (20.0, 0.0));
    assert_eq!(s, expected.segments());
}

#[test]
fn compact_arc_flags() {
    let p = parse_path_data("M0 0a10 10 0 1120 0").unwrap();
    assert_eq!(p.current_point(), Some(Point::new(20.0, 0.0)));
    let p = parse_path_data("M0 0 A10,10,0,0,0,20,0").unwrap();
    assert_eq!(p.current_point(), Some(Point::new(20.0, 0.0)));
}

#[test]
fn compact_numbers() {
    assert_eq!(
        segs("M.5.5L-1e1-2"),
        vec![
            PathSegment::MoveTo(Point::new(0.5, 0.5)),
            PathSegment::LineTo(Point::new(-10.0, -2.0)),
        ]
    );
}

#[test]
fn malformed_data_is_rejected_whole() {
    let cases = [
        "Z Z Z $$$",
        "L10 10",
        "M10",
        "M0 0 L10",
        "M0 0 X5 5",
        "M0 0 A1 1 0 2 0 5 5",
        "M0 0 Z 5 5",
    ];
    for d in cases {
        let err = parse_path_data(d).unwrap_err();
        assert!(matches!(err, DrawError::MalformedMarkup(_)), "{d}: {err}");
    }
}

#[test]
fn empty_data_is_an_empty_path() {
    assert!(parse_path_data("").unwrap().is_empty());
    assert!(parse_path_data("  \n").unwrap().is_empty());
}
