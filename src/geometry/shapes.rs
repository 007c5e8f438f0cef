use kurbo::Shape as _;

use crate::foundation::core::{Point, Rect, Vec2};
use crate::geometry::arc::append_arc;
use crate::geometry::path::Path;

const SHAPE_TOLERANCE: f64 = 0.05;

/// Closed axis-aligned rectangle, wound clockwise (y-down) from `(x0, y0)`.
pub fn rectangle(rect: Rect) -> Path {
    let r = rect.abs();
    let mut p = Path::new();
    p.move_to((r.x0, r.y0))
        .line_to((r.x1, r.y0))
        .line_to((r.x1, r.y1))
        .line_to((r.x0, r.y1))
        .close();
    p
}

/// Rectangle with circular corners of `radius` (clamped to half the shorter side).
pub fn rounded_rectangle(rect: Rect, radius: f64) -> Path {
    let r = rect.abs();
    let radius = radius.max(0.0).min(r.width().min(r.height()) * 0.5);
    if radius <= 0.0 {
        return rectangle(r);
    }
    let mut p = Path::new();
    p.extend_elements(kurbo::RoundedRect::from_rect(r, radius).path_elements(SHAPE_TOLERANCE));
    p
}

/// Rounded rectangle with independent x/y corner radii, as SVG `rect` uses.
pub fn rounded_rectangle_xy(rect: Rect, rx: f64, ry: f64) -> Path {
    let r = rect.abs();
    let rx = rx.max(0.0).min(r.width() * 0.5);
    let ry = ry.max(0.0).min(r.height() * 0.5);
    if rx <= 0.0 || ry <= 0.0 {
        return rectangle(r);
    }
    if (rx - ry).abs() <= f64::EPSILON {
        return rounded_rectangle(r, rx);
    }
    let radii = Vec2::new(rx, ry);
    let half_pi = std::f64::consts::FRAC_PI_2;
    let mut p = Path::new();
    p.move_to((r.x0 + rx, r.y0)).line_to((r.x1 - rx, r.y0));
    append_arc(&mut p, Point::new(r.x1 - rx, r.y0 + ry), radii, -half_pi, half_pi, true);
    p.line_to((r.x1, r.y1 - ry));
    append_arc(&mut p, Point::new(r.x1 - rx, r.y1 - ry), radii, 0.0, half_pi, true);
    p.line_to((r.x0 + rx, r.y1));
    append_arc(&mut p, Point::new(r.x0 + rx, r.y1 - ry), radii, half_pi, half_pi, true);
    p.line_to((r.x0, r.y0 + ry));
    let pi = std::f64::consts::PI;
    append_arc(&mut p, Point::new(r.x0 + rx, r.y0 + ry), radii, pi, half_pi, true);
    p.close();
    p
}

/// Ellipse inscribed in `rect`.
pub fn ellipse(rect: Rect) -> Path {
    let r = rect.abs();
    let mut p = Path::new();
    if r.width() <= 0.0 && r.height() <= 0.0 {
        return p;
    }
    p.extend_elements(kurbo::Ellipse::from_rect(r).path_elements(SHAPE_TOLERANCE));
    p
}

/// Circle of `radius` around `center`.
pub fn circle(center: Point, radius: f64) -> Path {
    let r = radius.abs();
    ellipse(Rect::new(center.x - r, center.y - r, center.x + r, center.y + r))
}

/// Closed polygon through `points`; fewer than two points yield an empty path.
pub fn polygon(points: &[Point]) -> Path {
    let mut p = polyline(points);
    if !p.is_empty() {
        p.close();
    }
    p
}

/// Open polyline through `points`; fewer than two points yield an empty path.
pub fn polyline(points: &[Point]) -> Path {
    let mut p = Path::new();
    if points.len() < 2 {
        return p;
    }
    p.move_to(points[0]);
    for pt in &points[1..] {
        p.line_to(*pt);
    }
    p
}

/// Sweep in radians from `start` to `end` degrees, always going clockwise (y-down).
fn sweep_radians(start_deg: f64, end_deg: f64) -> f64 {
    let mut sweep = end_deg - start_deg;
    if sweep.abs() >= 360.0 {
        sweep = 360.0;
    } else if sweep < 0.0 {
        sweep += 360.0;
    }
    sweep.to_radians()
}

fn radii_of(r: Rect) -> (Point, Vec2) {
    (r.center(), Vec2::new(r.width() * 0.5, r.height() * 0.5))
}

/// Open elliptical arc inscribed in `rect`, from `start` to `end` degrees.
///
/// Angles start at 3 o'clock and grow clockwise on a y-down surface.
pub fn arc(rect: Rect, start_deg: f64, end_deg: f64) -> Path {
    let (center, radii) = radii_of(rect.abs());
    let mut p = Path::new();
    append_arc(
        &mut p,
        center,
        radii,
        start_deg.to_radians(),
        sweep_radians(start_deg, end_deg),
        false,
    );
    p
}

/// Arc closed by the straight chord between its end points.
pub fn chord(rect: Rect, start_deg: f64, end_deg: f64) -> Path {
    let mut p = arc(rect, start_deg, end_deg);
    p.close();
    p
}

/// Arc closed through the ellipse center ("pie slice").
pub fn pieslice(rect: Rect, start_deg: f64, end_deg: f64) -> Path {
    let (center, radii) = radii_of(rect.abs());
    let mut p = Path::new();
    p.move_to(center);
    append_arc(
        &mut p,
        center,
        radii,
        start_deg.to_radians(),
        sweep_radians(start_deg, end_deg),
        true,
    );
    p.close();
    p
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/shapes.rs"]
mod tests;
