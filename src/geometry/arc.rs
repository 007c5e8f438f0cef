use crate::foundation::core::{Point, Vec2};
use crate::geometry::path::Path;

/// Accuracy used when approximating arcs with cubics (in user units).
const ARC_TOLERANCE: f64 = 0.05;

/// Append an elliptical arc around `center` as cubic segments.
///
/// Angles are in radians, measured from the positive x axis towards positive y (clockwise on
/// a y-down surface). When `connect` is set the arc start is joined to the current point with
/// a line; otherwise it starts a new subpath.
pub fn append_arc(
    path: &mut Path,
    center: Point,
    radii: Vec2,
    start_angle: f64,
    sweep_angle: f64,
    connect: bool,
) {
    let arc = kurbo::Arc {
        center,
        radii,
        start_angle,
        sweep_angle,
        x_rotation: 0.0,
    };
    let start = center + Vec2::new(radii.x * start_angle.cos(), radii.y * start_angle.sin());
    if connect && path.current_point().is_some() {
        path.line_to(start);
    } else {
        path.move_to(start);
    }
    path.extend_elements(arc.append_iter(ARC_TOLERANCE));
}

/// Append an SVG endpoint-parameterized arc from the current point to `to`.
///
/// Degenerate radii fall back to a straight line, as SVG requires. `x_rotation` is in
/// degrees.
pub fn append_svg_arc(
    path: &mut Path,
    radii: Vec2,
    x_rotation: f64,
    large_arc: bool,
    sweep: bool,
    to: Point,
) {
    let Some(from) = path.current_point() else {
        path.line_to(to);
        return;
    };
    let svg_arc = kurbo::SvgArc {
        from,
        to,
        radii: Vec2::new(radii.x.abs(), radii.y.abs()),
        x_rotation: x_rotation.to_radians(),
        large_arc,
        sweep,
    };
    match kurbo::Arc::from_svg_arc(&svg_arc) {
        Some(arc) => {
            let mut els: Vec<kurbo::PathEl> = arc.append_iter(ARC_TOLERANCE).collect();
            // Land exactly on `to` so relative commands that follow do not drift.
            if let Some(kurbo::PathEl::CurveTo(_, _, end)) = els.last_mut() {
                *end = to;
            }
            path.extend_elements(els);
        }
        None => {
            path.line_to(to);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/arc.rs"]
mod tests;
