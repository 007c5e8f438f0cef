use crate::foundation::core::PixelRect;

/// Per-pixel coverage in `[0, 1]` over a device-space window.
#[derive(Clone, Debug, PartialEq)]
pub struct CoverageMask {
    rect: PixelRect,
    coverage: Vec<f32>,
}

/// A run of non-zero coverage on one row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span<'a> {
    /// Device row.
    pub y: i32,
    /// Device column of `coverage[0]`.
    pub x: i32,
    /// Coverage values, all non-zero.
    pub coverage: &'a [f32],
}

impl CoverageMask {
    pub(crate) fn from_parts(rect: PixelRect, coverage: Vec<f32>) -> Self {
        debug_assert_eq!(coverage.len(), rect.width() as usize * rect.height() as usize);
        Self { rect, coverage }
    }

    /// Mask that covers nothing.
    pub fn empty() -> Self {
        Self {
            rect: PixelRect::new(0, 0, 0, 0),
            coverage: Vec::new(),
        }
    }

    /// Device-space window of the mask.
    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    /// Coverage at device pixel `(x, y)`; 0 outside the window.
    pub fn coverage_at(&self, x: i32, y: i32) -> f32 {
        let r = self.rect;
        if x < r.x0 || x >= r.x1 || y < r.y0 || y >= r.y1 {
            return 0.0;
        }
        let w = r.width() as usize;
        self.coverage[(y - r.y0) as usize * w + (x - r.x0) as usize]
    }

    /// One window row, starting at column `rect().x0`.
    pub fn row(&self, y: i32) -> Option<&[f32]> {
        let r = self.rect;
        if y < r.y0 || y >= r.y1 {
            return None;
        }
        let w = r.width() as usize;
        let start = (y - r.y0) as usize * w;
        Some(&self.coverage[start..start + w])
    }

    /// Return `true` when no pixel has coverage.
    pub fn is_empty(&self) -> bool {
        self.coverage.iter().all(|c| *c == 0.0)
    }

    /// Sum of all coverage values (covered area in pixels).
    pub fn total(&self) -> f64 {
        self.coverage.iter().map(|c| f64::from(*c)).sum()
    }

    /// Runs of non-zero coverage, row by row.
    pub fn spans(&self) -> impl Iterator<Item = Span<'_>> + '_ {
        let r = self.rect;
        let w = r.width() as usize;
        (r.y0..r.y1).flat_map(move |y| {
            let start = (y - r.y0) as usize * w;
            let row = &self.coverage[start..start + w];
            RowRuns { row, pos: 0 }.map(move |(x, run)| Span {
                y,
                x: r.x0 + x as i32,
                coverage: run,
            })
        })
    }
}

struct RowRuns<'a> {
    row: &'a [f32],
    pos: usize,
}

impl<'a> Iterator for RowRuns<'a> {
    type Item = (usize, &'a [f32]);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.row[self.pos..];
        let skip = rest.iter().position(|c| *c != 0.0)?;
        let start = self.pos + skip;
        let len = self.row[start..]
            .iter()
            .position(|c| *c == 0.0)
            .unwrap_or(self.row.len() - start);
        self.pos = start + len;
        Some((start, &self.row[start..start + len]))
    }
}
