use super::*;
use crate::geometry::flatten::contours_bounding_box;

fn style(width: f64, cap: LineCap, join: LineJoin) -> StrokeStyle {
    StrokeStyle {
        width,
        cap,
        join,
        miter_limit: 4.0,
        tolerance: 0.1,
    }
}

fn open(points: &[(f64, f64)]) -> FlattenedContour {
    FlattenedContour {
        points: points.iter().map(|p| Point::new(p.0, p.1)).collect(),
        closed: false,
    }
}

#[test]
fn butt_segment_is_one_rectangle() {
    let line = open(&[(0.0, 0.0), (10.0, 0.0)]);
    let out = stroke_outline(&[line], &style(2.0, LineCap::Butt, LineJoin::Miter)).unwrap();
    assert_eq!(out.len(), 1);
    assert!((out[0].signed_area() - 20.0).abs() < 1e-9);
    let b = contours_bounding_box(&out).unwrap();
    assert_eq!((b.x0, b.y0, b.x1, b.y1), (0.0, -1.0, 10.0, 1.0));
}

#[test]
fn every_polygon_is_positively_oriented_and_closed() {
    let line = open(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 3.0)]);
    for join in [LineJoin::Miter, LineJoin::Round, LineJoin::Bevel] {
        for cap in [LineCap::Butt, LineCap::Round, LineCap::Square] {
            let out = stroke_outline(std::slice::from_ref(&line), &style(3.0, cap, join)).unwrap();
            for p in out {
                assert!(p.signed_area() > 0.0);
                assert!(p.closed);
                assert_eq!(p.points.first(), p.points.last());
            }
        }
    }
}

#[test]
fn square_cap_extends_by_half_width() {
    let line = open(&[(0.0, 0.0), (10.0, 0.0)]);
    let out = stroke_outline(&[line], &style(4.0, LineCap::Square, LineJoin::Miter)).unwrap();
    let b = contours_bounding_box(&out).unwrap();
    assert!((b.x0 + 2.0).abs() < 1e-9);
    assert!((b.x1 - 12.0).abs() < 1e-9);
}

#[test]
fn closed_square_gets_miter_corners_and_no_caps() {
    let square = FlattenedContour {
        points: vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(0.0, 0.0),
        ],
        closed: true,
    };
    let out = stroke_outline(&[square], &style(2.0, LineCap::Square, LineJoin::Miter)).unwrap();
    // Four bodies and four joins.
    assert_eq!(out.len(), 8);
    let b = contours_bounding_box(&out).unwrap();
    assert!((b.x0 + 1.0).abs() < 1e-9 && (b.y0 + 1.0).abs() < 1e-9);
    assert!((b.x1 - 11.0).abs() < 1e-9 && (b.y1 - 11.0).abs() < 1e-9);
}

#[test]
fn sharp_angle_falls_back_to_bevel() {
    let spike = open(&[(0.0, 0.0), (10.0, 0.0), (0.0, 1.0)]);
    let out = stroke_outline(&[spike], &style(2.0, LineCap::Butt, LineJoin::Miter)).unwrap();
    // Two bodies plus a three-vertex bevel (closed: four points).
    assert_eq!(out.len(), 3);
    assert_eq!(out[2].points.len(), 4);
    let b = contours_bounding_box(&out).unwrap();
    assert!(b.x1 < 11.5);
}

#[test]
fn zero_length_round_cap_draws_a_disc() {
    let dot = open(&[(5.0, 5.0), (5.0, 5.0)]);
    let out = stroke_outline(&[dot.clone()], &style(4.0, LineCap::Round, LineJoin::Miter)).unwrap();
    assert_eq!(out.len(), 1);
    let area = out[0].signed_area();
    let disc = std::f64::consts::PI * 4.0;
    assert!(area > 0.9 * disc && area <= disc);

    let butt = stroke_outline(&[dot], &style(4.0, LineCap::Butt, LineJoin::Miter)).unwrap();
    assert!(butt.is_empty());
}

#[test]
fn non_positive_width_strokes_nothing() {
    let line = open(&[(0.0, 0.0), (10.0, 0.0)]);
    for width in [0.0, f64::NAN] {
        let style = style(width, LineCap::Round, LineJoin::Round);
        let out = stroke_outline(std::slice::from_ref(&line), &style).unwrap();
        assert!(out.is_empty());
    }
}

#[test]
fn outline_vertex_count_is_bounded() {
    // Fifty dots with round caps, each a polygon of at least eight vertices.
    let dots: Vec<FlattenedContour> = (0..50)
        .map(|i| open(&[(f64::from(i) * 10.0, 0.0), (f64::from(i) * 10.0, 0.0)]))
        .collect();
    let round = style(4.0, LineCap::Round, LineJoin::Round);
    let out = outline_with_limit(&dots, &round, 10_000).unwrap();
    assert_eq!(out.len(), 50);
    let total: usize = out.iter().map(|c| c.points.len()).sum();

    let err = outline_with_limit(&dots, &round, total - 1).unwrap_err();
    assert!(matches!(err, DrawError::ResourceExhaustion(_)));
    assert!(outline_with_limit(&dots, &round, total).is_ok());
}
