use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{DrawError, DrawResult};
use crate::geometry::flatten::{FlattenedContour, polygon_signed_area};
use crate::style::pen::{LineCap, LineJoin, Pen};

/// Points closer than this are merged before stroking.
const MERGE_EPSILON: f64 = 1e-9;
const MAX_ROUND_SEGMENTS: usize = 256;

/// Upper bound on outline vertices produced by one [`stroke_outline`] call.
pub const MAX_OUTLINE_POINTS: usize = 1 << 24;

/// Geometry-only part of a pen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Full stroke width; must be > 0.
    pub width: f64,
    /// End cap.
    pub cap: LineCap,
    /// Corner join.
    pub join: LineJoin,
    /// Miter limit relative to the width.
    pub miter_limit: f64,
    /// Flattening tolerance for round caps and joins.
    pub tolerance: f64,
}

impl StrokeStyle {
    /// Stroke style of `pen` at `width` (the pen width may be rescaled by the caller).
    pub fn from_pen(pen: &Pen, width: f64, tolerance: f64) -> Self {
        Self {
            width,
            cap: pen.cap,
            join: pen.join,
            miter_limit: pen.miter_limit,
            tolerance,
        }
    }
}

/// Expand centerlines into outline polygons to be filled with the nonzero rule.
///
/// Every emitted polygon is closed and has a positive signed area, so overlapping pieces
/// (segment bodies, joins, caps) union instead of cancelling. Fails with a resource error
/// once the outline would exceed [`MAX_OUTLINE_POINTS`] vertices.
pub fn stroke_outline(
    contours: &[FlattenedContour],
    style: &StrokeStyle,
) -> DrawResult<Vec<FlattenedContour>> {
    outline_with_limit(contours, style, MAX_OUTLINE_POINTS)
}

fn outline_with_limit(
    contours: &[FlattenedContour],
    style: &StrokeStyle,
    max_points: usize,
) -> DrawResult<Vec<FlattenedContour>> {
    let mut out = Outline {
        polygons: Vec::new(),
        points: 0,
        max_points,
    };
    if style.width <= 0.0 || !style.width.is_finite() {
        return Ok(out.polygons);
    }
    let hw = style.width * 0.5;
    for contour in contours {
        let pts = dedup(&contour.points);
        // Closed contours repeat their start point; drop the duplicate.
        let closed = contour.closed && pts.len() >= 3;
        let pts = if closed && pts.first() == pts.last() {
            &pts[..pts.len() - 1]
        } else {
            &pts[..]
        };

        if pts.len() == 1 {
            if !contour.closed {
                dot(pts[0], hw, style, &mut out)?;
            }
            continue;
        }
        if pts.len() < 2 {
            continue;
        }

        let seg_count = if closed { pts.len() } else { pts.len() - 1 };
        let dirs: Vec<Vec2> = (0..seg_count)
            .map(|i| unit(pts[(i + 1) % pts.len()] - pts[i]))
            .collect();

        for (i, d) in dirs.iter().enumerate() {
            let a = pts[i];
            let b = pts[(i + 1) % pts.len()];
            let n = normal(*d) * hw;
            out.push(vec![a + n, b + n, b - n, a - n])?;
        }

        let join_range = if closed { 0..seg_count } else { 1..seg_count };
        for i in join_range {
            let prev = dirs[(i + seg_count - 1) % seg_count];
            join(pts[i], prev, dirs[i], hw, style, &mut out)?;
        }

        if !closed {
            let last = pts.len() - 1;
            cap(pts[0], -dirs[0], hw, style, &mut out)?;
            cap(pts[last], dirs[seg_count - 1], hw, style, &mut out)?;
        }
    }
    Ok(out.polygons)
}

/// Outline polygons collected so far, with a running vertex count.
struct Outline {
    polygons: Vec<FlattenedContour>,
    points: usize,
    max_points: usize,
}

impl Outline {
    /// Orient `points` positively and close them; slivers are dropped.
    fn push(&mut self, mut points: Vec<Point>) -> DrawResult<()> {
        let area = polygon_signed_area(&points);
        if area.abs() <= f64::EPSILON {
            return Ok(());
        }
        self.points += points.len() + 1;
        if self.points > self.max_points {
            return Err(DrawError::exhausted(format!(
                "stroke outline exceeds {} vertices",
                self.max_points
            )));
        }
        if area < 0.0 {
            points.reverse();
        }
        let first = points[0];
        points.push(first);
        self.polygons.push(FlattenedContour {
            points,
            closed: true,
        });
        Ok(())
    }
}

fn dedup(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        match out.last() {
            Some(last) if last.distance(*p) <= MERGE_EPSILON => {}
            _ => out.push(*p),
        }
    }
    out
}

fn unit(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len > 0.0 { v / len } else { Vec2::new(1.0, 0.0) }
}

/// Left-hand normal in a y-down frame.
fn normal(d: Vec2) -> Vec2 {
    Vec2::new(-d.y, d.x)
}

fn join(
    v: Point,
    d0: Vec2,
    d1: Vec2,
    hw: f64,
    style: &StrokeStyle,
    out: &mut Outline,
) -> DrawResult<()> {
    let cross = d0.cross(d1);
    let dot = d0.dot(d1);
    if cross.abs() <= 1e-12 && dot > 0.0 {
        return Ok(());
    }
    // Outer side of the turn.
    let s = if cross > 0.0 { -1.0 } else { 1.0 };
    let n0 = normal(d0) * (hw * s);
    let n1 = normal(d1) * (hw * s);
    match style.join {
        LineJoin::Round => out.push(circle(v, hw, style.tolerance)),
        LineJoin::Bevel => out.push(vec![v, v + n0, v + n1]),
        LineJoin::Miter => {
            let half_cos = ((1.0 + dot) * 0.5).max(0.0).sqrt();
            if half_cos <= 1e-12 || 1.0 / half_cos > style.miter_limit {
                return out.push(vec![v, v + n0, v + n1]);
            }
            let bisector = unit(n0 + n1);
            let tip = v + bisector * (hw / half_cos);
            out.push(vec![v, v + n0, tip, v + n1])
        }
    }
}

/// Cap at `p` for a stroke leaving in direction `d`.
fn cap(p: Point, d: Vec2, hw: f64, style: &StrokeStyle, out: &mut Outline) -> DrawResult<()> {
    match style.cap {
        LineCap::Butt => Ok(()),
        LineCap::Round => out.push(circle(p, hw, style.tolerance)),
        LineCap::Square => {
            let n = normal(d) * hw;
            let e = d * hw;
            out.push(vec![p + n, p + n + e, p - n + e, p - n])
        }
    }
}

/// Zero-length stroke: round and square caps still draw.
fn dot(p: Point, hw: f64, style: &StrokeStyle, out: &mut Outline) -> DrawResult<()> {
    match style.cap {
        LineCap::Butt => Ok(()),
        LineCap::Round => out.push(circle(p, hw, style.tolerance)),
        LineCap::Square => out.push(vec![
            Point::new(p.x - hw, p.y - hw),
            Point::new(p.x + hw, p.y - hw),
            Point::new(p.x + hw, p.y + hw),
            Point::new(p.x - hw, p.y + hw),
        ]),
    }
}

fn circle(c: Point, r: f64, tolerance: f64) -> Vec<Point> {
    let tol = tolerance.clamp(1e-3, r.max(1e-3));
    let step = 2.0 * (1.0 - tol / r).clamp(-1.0, 1.0).acos();
    let n = if step > 0.0 {
        ((std::f64::consts::TAU / step).ceil() as usize).clamp(8, MAX_ROUND_SEGMENTS)
    } else {
        8
    };
    (0..n)
        .map(|i| {
            let a = std::f64::consts::TAU * i as f64 / n as f64;
            Point::new(c.x + r * a.cos(), c.y + r * a.sin())
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/style/stroke.rs"]
mod tests;
