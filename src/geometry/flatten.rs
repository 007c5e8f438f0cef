use crate::foundation::core::{Affine, Point, Rect};
use crate::foundation::error::{DrawError, DrawResult};
use crate::geometry::path::{Path, PathSegment};

/// Coordinates beyond this magnitude are rejected before rasterization.
pub const MAX_COORDINATE: f64 = 1.0e7;

/// Polyline approximation of one subpath.
///
/// Closed contours repeat their first point as their last point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlattenedContour {
    /// Vertices in drawing order.
    pub points: Vec<Point>,
    /// Whether the subpath was explicitly closed.
    pub closed: bool,
}

impl FlattenedContour {
    /// Total polyline length.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    /// Shoelace area; positive for clockwise contours in y-down space.
    pub fn signed_area(&self) -> f64 {
        polygon_signed_area(&self.points)
    }

    /// Bounds of the vertices; `None` when empty.
    pub fn bounding_box(&self) -> Option<Rect> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold(Rect::from_points(first, first), |r, p| r.union_pt(*p)),
        )
    }

    /// Apply `t` to every vertex.
    pub fn transform(&self, t: Affine) -> Self {
        Self {
            points: self.points.iter().map(|p| t * *p).collect(),
            closed: self.closed,
        }
    }
}

pub(crate) fn polygon_signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        acc += a.x * b.y - b.x * a.y;
    }
    acc * 0.5
}

/// Union of the bounds of every contour.
pub fn contours_bounding_box(contours: &[FlattenedContour]) -> Option<Rect> {
    contours
        .iter()
        .filter_map(FlattenedContour::bounding_box)
        .reduce(|a, b| a.union(b))
}

/// Reject non-finite or out-of-range vertices.
pub fn check_range(contours: &[FlattenedContour]) -> DrawResult<()> {
    for c in contours {
        for p in &c.points {
            check_point(*p)?;
        }
    }
    Ok(())
}

fn check_point(p: Point) -> DrawResult<()> {
    if !p.x.is_finite() || !p.y.is_finite() {
        return Err(DrawError::geometry(format!(
            "non-finite coordinate ({}, {})",
            p.x, p.y
        )));
    }
    if p.x.abs() > MAX_COORDINATE || p.y.abs() > MAX_COORDINATE {
        return Err(DrawError::geometry(format!(
            "coordinate ({}, {}) exceeds +/-{MAX_COORDINATE}",
            p.x, p.y
        )));
    }
    Ok(())
}

/// Flattening statistics, mostly useful for tests and logging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlattenStats {
    /// Cubic segments whose subdivision hit the depth ceiling.
    pub truncated_curves: usize,
}

/// Flatten `path` into polylines whose deviation from the curves stays below `tolerance`.
///
/// Subdivision stops at `max_depth` levels; such curves are finished with their chord and
/// counted in the returned stats.
pub fn flatten(path: &Path, tolerance: f64, max_depth: u32) -> DrawResult<Vec<FlattenedContour>> {
    flatten_with_stats(path, tolerance, max_depth).map(|(c, _)| c)
}

/// [`flatten`], also returning [`FlattenStats`].
pub fn flatten_with_stats(
    path: &Path,
    tolerance: f64,
    max_depth: u32,
) -> DrawResult<(Vec<FlattenedContour>, FlattenStats)> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(DrawError::config(format!(
            "flattening tolerance must be finite and > 0 (got {tolerance})"
        )));
    }
    path.validate()?;

    let mut out = Vec::new();
    let mut stats = FlattenStats::default();
    let mut current = FlattenedContour::default();
    let mut start = Point::ORIGIN;

    fn finish(out: &mut Vec<FlattenedContour>, c: &mut FlattenedContour) {
        let c = std::mem::take(c);
        if c.points.len() >= 2 {
            out.push(c);
        }
    }

    for seg in path.segments() {
        match *seg {
            PathSegment::MoveTo(p) => {
                check_point(p)?;
                finish(&mut out, &mut current);
                current.points.push(p);
                start = p;
            }
            PathSegment::LineTo(p) => {
                check_point(p)?;
                if current.points.is_empty() {
                    current.points.push(start);
                }
                current.points.push(p);
            }
            PathSegment::CubicTo(c1, c2, p) => {
                check_point(c1)?;
                check_point(c2)?;
                check_point(p)?;
                if current.points.is_empty() {
                    current.points.push(start);
                }
                let p0 = *current.points.last().unwrap_or(&start);
                let tol_sq = tolerance * tolerance;
                subdivide(
                    [p0, c1, c2, p],
                    tol_sq,
                    max_depth,
                    &mut current.points,
                    &mut stats,
                );
            }
            PathSegment::Close => {
                if current.points.is_empty() {
                    continue;
                }
                let first = current.points[0];
                if current.points.last() != Some(&first) {
                    current.points.push(first);
                }
                current.closed = true;
                finish(&mut out, &mut current);
                start = first;
            }
        }
    }
    finish(&mut out, &mut current);

    if stats.truncated_curves > 0 {
        tracing::debug!(
            truncated = stats.truncated_curves,
            max_depth,
            "curve flattening hit the depth ceiling"
        );
    }
    Ok((out, stats))
}

fn subdivide(
    p: [Point; 4],
    tol_sq: f64,
    depth_left: u32,
    out: &mut Vec<Point>,
    stats: &mut FlattenStats,
) {
    if flat_enough(&p, tol_sq) {
        out.push(p[3]);
        return;
    }
    if depth_left == 0 {
        stats.truncated_curves += 1;
        out.push(p[3]);
        return;
    }
    let (left, right) = split_cubic(p);
    subdivide(left, tol_sq, depth_left - 1, out, stats);
    subdivide(right, tol_sq, depth_left - 1, out, stats);
}

/// Both control points lie within `sqrt(tol_sq)` of the chord.
fn flat_enough(p: &[Point; 4], tol_sq: f64) -> bool {
    dist_sq_to_segment(p[1], p[0], p[3]) <= tol_sq && dist_sq_to_segment(p[2], p[0], p[3]) <= tol_sq
}

fn dist_sq_to_segment(q: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.hypot2();
    if len_sq <= f64::EPSILON {
        return (q - a).hypot2();
    }
    let t = ((q - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (q - (a + ab * t)).hypot2()
}

pub(crate) fn split_cubic(p: [Point; 4]) -> ([Point; 4], [Point; 4]) {
    let p01 = p[0].midpoint(p[1]);
    let p12 = p[1].midpoint(p[2]);
    let p23 = p[2].midpoint(p[3]);
    let p012 = p01.midpoint(p12);
    let p123 = p12.midpoint(p23);
    let mid = p012.midpoint(p123);
    ([p[0], p01, p012, mid], [mid, p123, p23, p[3]])
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/flatten.rs"]
mod tests;
