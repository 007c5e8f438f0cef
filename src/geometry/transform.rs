use crate::foundation::core::{Affine, Point, Rect};
use crate::foundation::error::{DrawError, DrawResult};

/// Determinants with a magnitude below this are treated as non-invertible.
pub const DEGENERATE_DETERMINANT: f64 = 1e-12;

/// Build an affine transform from the `(a, b, c, d, e, f)` tuple layout.
///
/// `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
pub fn from_coeffs(coeffs: [f64; 6]) -> Affine {
    Affine::new(coeffs)
}

/// Compose two transforms: the result applies `first`, then `then`.
pub fn compose(first: Affine, then: Affine) -> Affine {
    then * first
}

/// Return `true` when every coefficient is finite.
pub fn is_finite(t: Affine) -> bool {
    t.as_coeffs().iter().all(|c| c.is_finite())
}

/// Return `true` when `t` has no usable inverse.
pub fn is_degenerate(t: Affine) -> bool {
    !is_finite(t) || t.determinant().abs() < DEGENERATE_DETERMINANT
}

/// Invert `t`, rejecting degenerate matrices instead of dividing by ~0.
pub fn checked_inverse(t: Affine) -> DrawResult<Affine> {
    if is_degenerate(t) {
        return Err(DrawError::config(format!(
            "transform {:?} is not invertible",
            t.as_coeffs()
        )));
    }
    Ok(t.inverse())
}

/// Geometric-mean scale factor of the linear part; used to convert device tolerances into
/// user-space tolerances.
pub fn mean_scale(t: Affine) -> f64 {
    t.determinant().abs().sqrt()
}

/// Transform `p` by `t`.
pub fn apply(t: Affine, p: Point) -> Point {
    t * p
}

/// Axis-aligned bounds of `rect` after transforming its four corners.
pub fn transform_rect_bbox(t: Affine, rect: Rect) -> Rect {
    let corners = [
        t * Point::new(rect.x0, rect.y0),
        t * Point::new(rect.x1, rect.y0),
        t * Point::new(rect.x1, rect.y1),
        t * Point::new(rect.x0, rect.y1),
    ];
    let mut out = Rect::from_points(corners[0], corners[0]);
    for c in &corners[1..] {
        out = out.union_pt(*c);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/transform.rs"]
mod tests;
