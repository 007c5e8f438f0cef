use super::*;

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> FlattenedContour {
    FlattenedContour {
        points: vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
            Point::new(x0, y0),
        ],
        closed: true,
    }
}

fn poly(points: &[(f64, f64)]) -> FlattenedContour {
    FlattenedContour {
        points: points.iter().map(|p| Point::new(p.0, p.1)).collect(),
        closed: true,
    }
}

fn window(w: i32, h: i32) -> PixelRect {
    PixelRect::new(0, 0, w, h)
}

#[test]
fn integer_square_has_exact_coverage() {
    let square = rect(10.0, 10.0, 110.0, 110.0);
    let mask = rasterize(&[square], FillRule::NonZero, window(128, 128), true);
    let mut full = 0;
    let mut partial = 0;
    for y in 0..128 {
        for x in 0..128 {
            match mask.coverage_at(x, y) {
                c if c == 1.0 => full += 1,
                c if c == 0.0 => {}
                _ => partial += 1,
            }
        }
    }
    assert_eq!(full, 10_000);
    assert_eq!(partial, 0);
}

#[test]
fn fractional_square_conserves_area() {
    let mask = rasterize(&[rect(3.25, 4.5, 20.75, 11.1)], FillRule::NonZero, window(32, 32), true);
    let area = 17.5 * 6.6;
    assert!((mask.total() - area).abs() < 1e-3, "{}", mask.total());
}

#[test]
fn abutting_shapes_share_edges_without_seams() {
    let window = window(64, 64);
    let left = rasterize(&[rect(4.0, 4.0, 30.37, 60.0)], FillRule::NonZero, window, true);
    let right = rasterize(&[rect(30.37, 4.0, 60.0, 60.0)], FillRule::NonZero, window, true);
    for y in 4..60 {
        assert_eq!(left.coverage_at(30, y) + right.coverage_at(30, y), 1.0);
    }

    // Two triangles sharing a diagonal.
    let upper = poly(&[(0.0, 0.0), (40.0, 0.0), (0.0, 40.0)]);
    let lower = poly(&[(40.0, 0.0), (40.0, 40.0), (0.0, 40.0)]);
    let a = rasterize(&[upper], FillRule::NonZero, window, true);
    let b = rasterize(&[lower], FillRule::NonZero, window, true);
    for y in 0..40 {
        for x in 0..40 {
            let sum = a.coverage_at(x, y) + b.coverage_at(x, y);
            assert!((sum - 1.0).abs() < 1e-5, "({x},{y}) = {sum}");
        }
    }
}

#[test]
fn winding_direction_does_not_matter_for_nonzero() {
    let cw = rasterize(&[rect(2.5, 2.5, 9.5, 9.5)], FillRule::NonZero, window(12, 12), true);
    let mut reversed = rect(2.5, 2.5, 9.5, 9.5);
    reversed.points.reverse();
    let ccw = rasterize(&[reversed], FillRule::NonZero, window(12, 12), true);
    assert_eq!(cw, ccw);
}

#[test]
fn nested_squares_even_odd_leaves_a_hole() {
    let outer = rect(0.0, 0.0, 20.0, 20.0);
    let inner = rect(5.0, 5.0, 15.0, 15.0);
    let w = window(20, 20);
    let nz = rasterize(&[outer.clone(), inner.clone()], FillRule::NonZero, w, true);
    let eo = rasterize(&[outer, inner], FillRule::EvenOdd, w, true);
    assert_eq!(nz.coverage_at(10, 10), 1.0);
    assert_eq!(eo.coverage_at(10, 10), 0.0);
    assert_eq!(eo.coverage_at(2, 2), 1.0);
    assert_eq!(eo.total(), 300.0);
}

#[test]
fn geometry_outside_the_window_still_winds() {
    // Starts far left of the window: the interior still fills from column 0.
    let mask = rasterize(&[rect(-500.0, 2.0, 6.0, 4.0)], FillRule::NonZero, window(10, 10), true);
    assert_eq!(mask.coverage_at(0, 2), 1.0);
    assert_eq!(mask.coverage_at(5, 3), 1.0);
    assert_eq!(mask.coverage_at(6, 3), 0.0);
    assert_eq!(mask.total(), 12.0);

    let right = rasterize(&[rect(7.0, -50.0, 900.0, 3.0)], FillRule::NonZero, window(10, 10), true);
    assert_eq!(right.total(), 9.0);
}

#[test]
fn offset_window_uses_device_coordinates() {
    let w = PixelRect::new(100, 200, 110, 210);
    let mask = rasterize(&[rect(102.0, 202.0, 104.0, 205.0)], FillRule::NonZero, w, true);
    assert_eq!(mask.coverage_at(102, 202), 1.0);
    assert_eq!(mask.coverage_at(101, 202), 0.0);
    assert_eq!(mask.total(), 6.0);
}

#[test]
fn aliased_mode_thresholds() {
    let mask = rasterize(&[rect(0.0, 0.0, 4.6, 4.0)], FillRule::NonZero, window(8, 8), false);
    assert_eq!(mask.coverage_at(4, 0), 1.0);
    let mask = rasterize(&[rect(0.0, 0.0, 4.4, 4.0)], FillRule::NonZero, window(8, 8), false);
    assert_eq!(mask.coverage_at(4, 0), 0.0);
}

#[test]
fn degenerate_input_is_empty() {
    let line = FlattenedContour {
        points: vec![Point::new(1.0, 1.0), Point::new(5.0, 5.0)],
        closed: false,
    };
    assert!(rasterize(&[line], FillRule::NonZero, window(8, 8), true).is_empty());
    let nowhere = PixelRect::new(0, 0, 0, 0);
    assert!(rasterize(&[rect(1.0, 1.0, 3.0, 3.0)], FillRule::NonZero, nowhere, true).is_empty());
}

#[test]
fn spans_skip_uncovered_pixels() {
    let mask = rasterize(
        &[rect(1.0, 1.0, 3.0, 2.0), rect(5.0, 1.0, 6.0, 2.0)],
        FillRule::NonZero,
        window(8, 4),
        true,
    );
    let spans: Vec<_> = mask.spans().collect();
    assert_eq!(spans.len(), 2);
    assert_eq!((spans[0].x, spans[0].y, spans[0].coverage.len()), (1, 1, 2));
    assert_eq!((spans[1].x, spans[1].y, spans[1].coverage.len()), (5, 1, 1));
}
