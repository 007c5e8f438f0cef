use crate::foundation::core::{PixelRect, Point};
use crate::geometry::flatten::FlattenedContour;
use crate::raster::mask::CoverageMask;
use crate::style::brush::FillRule;

/// Signed-area accumulation rasterizer over a fixed device window.
///
/// Each edge deposits its signed coverage delta into the cells it crosses; a prefix sum along
/// each row turns the deltas into winding-weighted coverage. The accumulation is based on
/// font-rs (<https://github.com/raphlinus/font-rs>).
#[derive(Clone, Debug)]
pub struct Rasterizer {
    window: PixelRect,
    width: usize,
    height: usize,
    /// Row stride; two extra cells take the deltas of edges at the right window limit.
    stride: usize,
    acc: Vec<f32>,
}

impl Rasterizer {
    /// Rasterizer covering `window` (device pixels).
    pub fn new(window: PixelRect) -> Self {
        let width = window.width() as usize;
        let height = window.height() as usize;
        let stride = width + 2;
        Self {
            window,
            width,
            height,
            stride,
            acc: vec![0.0; stride * height],
        }
    }

    /// Add the edges of `contour`, implicitly closing it.
    pub fn add_contour(&mut self, contour: &FlattenedContour) {
        let pts = &contour.points;
        if pts.len() < 2 {
            return;
        }
        for w in pts.windows(2) {
            self.add_line(w[0], w[1]);
        }
        let (first, last) = (pts[0], pts[pts.len() - 1]);
        if first != last {
            self.add_line(last, first);
        }
    }

    /// Add one directed edge in device coordinates.
    pub fn add_line(&mut self, a: Point, b: Point) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let ox = f64::from(self.window.x0);
        let oy = f64::from(self.window.y0);
        let a = Point::new(a.x - ox, a.y - oy);
        let b = Point::new(b.x - ox, b.y - oy);
        if !(a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite()) {
            return;
        }
        if a.y == b.y {
            return;
        }
        let h = self.height as f64;
        if a.y.max(b.y) <= 0.0 || a.y.min(b.y) >= h {
            return;
        }

        // Rows outside the window contribute nothing; clip them off in f64.
        let x_at = |y: f64| a.x + (b.x - a.x) * ((y - a.y) / (b.y - a.y));
        let clip_y = |p: Point| {
            if p.y < 0.0 {
                Point::new(x_at(0.0), 0.0)
            } else if p.y > h {
                Point::new(x_at(h), h)
            } else {
                p
            }
        };
        let (a, b) = (clip_y(a), clip_y(b));

        // Geometry left of the window still adds its winding at column 0, geometry to the
        // right lands in the spare columns.
        let w = self.width as f64;
        let mut cuts = [0.0, 1.0, 1.0, 1.0];
        let mut n = 1;
        for limit in [0.0, w] {
            if (a.x - limit) * (b.x - limit) < 0.0 {
                cuts[n] = (limit - a.x) / (b.x - a.x);
                n += 1;
            }
        }
        cuts[n] = 1.0;
        cuts[1..n].sort_by(f64::total_cmp);
        let lerp = |t: f64| Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t);
        for i in 0..n {
            let p = lerp(cuts[i]);
            let q = if i + 1 == n { b } else { lerp(cuts[i + 1]) };
            let p0 = (p.x.clamp(0.0, w) as f32, p.y as f32);
            let p1 = (q.x.clamp(0.0, w) as f32, q.y as f32);
            self.accumulate(p0, p1);
        }
    }

    fn accumulate(&mut self, from: (f32, f32), to: (f32, f32)) {
        if from.1 == to.1 {
            return;
        }
        let (dir, p0, p1) = if from.1 < to.1 {
            (1.0_f32, from, to)
        } else {
            (-1.0_f32, to, from)
        };
        let dxdy = (p1.0 - p0.0) / (p1.1 - p0.1);
        let mut x = p0.0;
        let y_start = p0.1.max(0.0) as usize;
        let y_end = (p1.1.ceil().max(0.0) as usize).min(self.height);
        for y in y_start..y_end {
            let line = y * self.stride;
            let dy = ((y + 1) as f32).min(p1.1) - (y as f32).max(p0.1);
            if dy <= 0.0 {
                continue;
            }
            let xnext = x + dxdy * dy;
            let d = dy * dir;
            let (x0, x1) = if x < xnext { (x, xnext) } else { (xnext, x) };
            let x0floor = x0.floor();
            let x0i = x0floor as usize;
            let x1ceil = x1.ceil();
            let x1i = x1ceil as usize;
            if x1i <= x0i + 1 {
                // The edge stays within one cell on this row.
                let xmf = 0.5 * (x + xnext) - x0floor;
                self.acc[line + x0i] += d - d * xmf;
                self.acc[line + x0i + 1] += d * xmf;
            } else {
                let s = (x1 - x0).recip();
                let x0f = x0 - x0floor;
                let a0 = 0.5 * s * (1.0 - x0f) * (1.0 - x0f);
                let x1f = x1 - x1ceil + 1.0;
                let am = 0.5 * s * x1f * x1f;
                self.acc[line + x0i] += d * a0;
                if x1i == x0i + 2 {
                    self.acc[line + x0i + 1] += d * (1.0 - a0 - am);
                } else {
                    let a1 = s * (1.5 - x0f);
                    self.acc[line + x0i + 1] += d * (a1 - a0);
                    for xi in x0i + 2..x1i - 1 {
                        self.acc[line + xi] += d * s;
                    }
                    let a2 = a1 + (x1i - x0i - 3) as f32 * s;
                    self.acc[line + x1i - 1] += d * (1.0 - a2 - am);
                }
                self.acc[line + x1i] += d * am;
            }
            x = xnext;
        }
    }

    /// Resolve accumulated deltas into coverage.
    pub fn finish(self, rule: FillRule, antialias: bool) -> CoverageMask {
        let mut out = Vec::with_capacity(self.width * self.height);
        for row in self.acc.chunks_exact(self.stride) {
            let mut sum = 0.0_f32;
            for delta in &row[..self.width] {
                sum += *delta;
                let mut c = match rule {
                    FillRule::NonZero => sum.abs().min(1.0),
                    FillRule::EvenOdd => {
                        let m = sum.abs() % 2.0;
                        if m > 1.0 { 2.0 - m } else { m }
                    }
                };
                if !antialias {
                    c = if c >= 0.5 { 1.0 } else { 0.0 };
                }
                out.push(c);
            }
        }
        CoverageMask::from_parts(self.window, out)
    }
}

/// Rasterize `contours` (implicitly closed) into a mask over `window`.
pub fn rasterize(
    contours: &[FlattenedContour],
    rule: FillRule,
    window: PixelRect,
    antialias: bool,
) -> CoverageMask {
    if window.is_empty() {
        return CoverageMask::empty();
    }
    let mut r = Rasterizer::new(window);
    for c in contours {
        r.add_contour(c);
    }
    r.finish(rule, antialias)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/rasterizer.rs"]
mod tests;
