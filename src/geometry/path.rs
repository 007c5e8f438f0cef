use crate::foundation::core::{Affine, Point, Rect, Vec2};
use crate::foundation::error::{DrawError, DrawResult};

/// One drawing instruction of a [`Path`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PathSegment {
    /// Start a new subpath at the point.
    MoveTo(Point),
    /// Straight line from the current point.
    LineTo(Point),
    /// Cubic Bézier from the current point: `(ctrl1, ctrl2, end)`.
    CubicTo(Point, Point, Point),
    /// Close the current subpath back to its start point.
    Close,
}

impl PathSegment {
    /// End point of the segment, if it has one.
    pub fn end_point(self) -> Option<Point> {
        match self {
            Self::MoveTo(p) | Self::LineTo(p) | Self::CubicTo(_, _, p) => Some(p),
            Self::Close => None,
        }
    }

    fn map(self, t: Affine) -> Self {
        match self {
            Self::MoveTo(p) => Self::MoveTo(t * p),
            Self::LineTo(p) => Self::LineTo(t * p),
            Self::CubicTo(c1, c2, p) => Self::CubicTo(t * c1, t * c2, t * p),
            Self::Close => Self::Close,
        }
    }
}

/// An ordered list of segments forming zero or more subpaths.
///
/// The builder methods never fail; [`Path::validate`] rejects paths whose segments have no
/// current point to start from, and every drawing call validates before using a path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
    current: Option<Point>,
    subpath_start: Option<Point>,
}

impl Path {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a path from raw segments.
    pub fn from_segments(segments: impl IntoIterator<Item = PathSegment>) -> Self {
        let mut path = Self::new();
        for seg in segments {
            path.push(seg);
        }
        path
    }

    /// The segments in order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Return `true` when the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Current point, if any segment established one.
    pub fn current_point(&self) -> Option<Point> {
        self.current
    }

    /// Number of subpaths (each `MoveTo` starts one).
    pub fn subpath_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, PathSegment::MoveTo(_)))
            .count()
    }

    /// Append a raw segment.
    pub fn push(&mut self, seg: PathSegment) -> &mut Self {
        match seg {
            PathSegment::MoveTo(p) => {
                self.current = Some(p);
                self.subpath_start = Some(p);
            }
            PathSegment::LineTo(p) | PathSegment::CubicTo(_, _, p) => {
                self.current = Some(p);
            }
            PathSegment::Close => {
                self.current = self.subpath_start;
            }
        }
        self.segments.push(seg);
        self
    }

    /// Start a new subpath at `p`.
    pub fn move_to(&mut self, p: impl Into<Point>) -> &mut Self {
        self.push(PathSegment::MoveTo(p.into()))
    }

    /// Straight line to `p`.
    pub fn line_to(&mut self, p: impl Into<Point>) -> &mut Self {
        self.push(PathSegment::LineTo(p.into()))
    }

    /// Cubic Bézier to `p` with control points `c1`, `c2`.
    pub fn curve_to(
        &mut self,
        c1: impl Into<Point>,
        c2: impl Into<Point>,
        p: impl Into<Point>,
    ) -> &mut Self {
        self.push(PathSegment::CubicTo(c1.into(), c2.into(), p.into()))
    }

    /// Quadratic Bézier to `p` with control point `c`, stored as the equivalent cubic.
    pub fn quad_to(&mut self, c: impl Into<Point>, p: impl Into<Point>) -> &mut Self {
        let c = c.into();
        let p = p.into();
        // Without a current point the segment is kept anyway so `validate` can reject it.
        let p0 = self.current.unwrap_or(c);
        let c1 = p0 + (c - p0) * (2.0 / 3.0);
        let c2 = p + (c - p) * (2.0 / 3.0);
        self.push(PathSegment::CubicTo(c1, c2, p))
    }

    /// Close the current subpath.
    pub fn close(&mut self) -> &mut Self {
        self.push(PathSegment::Close)
    }

    /// Move relative to the current point (or the origin when there is none).
    pub fn rel_move_to(&mut self, d: impl Into<Vec2>) -> &mut Self {
        let base = self.current.unwrap_or(Point::ORIGIN);
        self.move_to(base + d.into())
    }

    /// Line relative to the current point.
    pub fn rel_line_to(&mut self, d: impl Into<Vec2>) -> &mut Self {
        let base = self.current.unwrap_or(Point::ORIGIN);
        self.line_to(base + d.into())
    }

    /// Cubic Bézier with all points relative to the current point.
    pub fn rel_curve_to(
        &mut self,
        c1: impl Into<Vec2>,
        c2: impl Into<Vec2>,
        p: impl Into<Vec2>,
    ) -> &mut Self {
        let base = self.current.unwrap_or(Point::ORIGIN);
        self.curve_to(base + c1.into(), base + c2.into(), base + p.into())
    }

    /// Append every segment of `other`.
    pub fn extend(&mut self, other: &Path) -> &mut Self {
        for seg in &other.segments {
            self.push(*seg);
        }
        self
    }

    /// Append kurbo path elements, elevating quadratics to cubics.
    pub fn extend_elements(&mut self, els: impl IntoIterator<Item = kurbo::PathEl>) -> &mut Self {
        for el in els {
            match el {
                kurbo::PathEl::MoveTo(p) => self.move_to(p),
                kurbo::PathEl::LineTo(p) => self.line_to(p),
                kurbo::PathEl::QuadTo(c, p) => self.quad_to(c, p),
                kurbo::PathEl::CurveTo(c1, c2, p) => self.curve_to(c1, c2, p),
                kurbo::PathEl::ClosePath => self.close(),
            };
        }
        self
    }

    /// Reject segments that have no current point to start from.
    pub fn validate(&self) -> DrawResult<()> {
        let mut has_current = false;
        for (i, seg) in self.segments.iter().enumerate() {
            match seg {
                PathSegment::MoveTo(_) => has_current = true,
                PathSegment::LineTo(_) | PathSegment::CubicTo(..) | PathSegment::Close => {
                    if !has_current {
                        return Err(DrawError::geometry(format!(
                            "segment {i} ({seg:?}) has no current point; \
                             paths must start with MoveTo"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Apply `t` to every control point.
    pub fn transform(&self, t: Affine) -> Path {
        Path {
            segments: self.segments.iter().map(|s| s.map(t)).collect(),
            current: self.current.map(|p| t * p),
            subpath_start: self.subpath_start.map(|p| t * p),
        }
    }

    /// Loose bounds over every control point; `None` for an empty path.
    pub fn bounding_box(&self) -> Option<Rect> {
        let mut out: Option<Rect> = None;
        let mut add = |p: Point| {
            out = Some(match out {
                Some(r) => r.union_pt(p),
                None => Rect::from_points(p, p),
            });
        };
        for seg in &self.segments {
            match *seg {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => add(p),
                PathSegment::CubicTo(c1, c2, p) => {
                    add(c1);
                    add(c2);
                    add(p);
                }
                PathSegment::Close => {}
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/path.rs"]
mod tests;
