use super::*;

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn tuple_layout_matches_standard_convention() {
    // x' = a*x + c*y + e; y' = b*x + d*y + f
    let t = from_coeffs([2.0, 3.0, 5.0, 7.0, 11.0, 13.0]);
    let p = apply(t, Point::new(1.0, 10.0));
    assert!(close(p, Point::new(2.0 + 50.0 + 11.0, 3.0 + 70.0 + 13.0)));
}

#[test]
fn compose_applies_first_then_second() {
    let scale = Affine::scale(2.0);
    let shift = Affine::translate((10.0, 0.0));
    let p = Point::new(1.0, 1.0);
    assert!(close(apply(compose(scale, shift), p), Point::new(12.0, 2.0)));
    assert!(close(apply(compose(shift, scale), p), Point::new(22.0, 2.0)));
}

#[test]
fn checked_inverse_rejects_degenerate() {
    let flat = from_coeffs([1.0, 2.0, 2.0, 4.0, 0.0, 0.0]);
    assert!(is_degenerate(flat));
    let err = checked_inverse(flat).unwrap_err();
    assert!(matches!(err, DrawError::Configuration(_)));

    let nan = from_coeffs([f64::NAN, 0.0, 0.0, 1.0, 0.0, 0.0]);
    assert!(checked_inverse(nan).is_err());
}

#[test]
fn checked_inverse_roundtrips() {
    let t = from_coeffs([2.0, 0.5, -1.0, 3.0, 4.0, -7.0]);
    let inv = checked_inverse(t).unwrap();
    let p = Point::new(3.5, -2.25);
    assert!(close(apply(inv, apply(t, p)), p));
}

#[test]
fn mean_scale_of_uniform_scale() {
    assert!((mean_scale(Affine::scale(3.0)) - 3.0).abs() < 1e-12);
    assert!((mean_scale(Affine::rotate(0.7)) - 1.0).abs() < 1e-12);
}

#[test]
fn rect_bbox_under_rotation() {
    let r = Rect::new(0.0, 0.0, 2.0, 2.0);
    let b = transform_rect_bbox(Affine::rotate(std::f64::consts::FRAC_PI_4), r);
    let diag = 2.0 * std::f64::consts::SQRT_2;
    assert!((b.width() - diag).abs() < 1e-9);
    assert!((b.height() - diag).abs() < 1e-9);
}
