use std::sync::Arc;

use skrifa::instance::{LocationRef, Size};
use skrifa::outline::OutlinePen;
use skrifa::{FontRef, MetadataProvider};

use crate::foundation::error::DrawResult;
use crate::geometry::path::Path;
use crate::text::glyphs::{FontMetrics, GlyphOutline, GlyphSource};

/// [`GlyphSource`] over TrueType/OpenType font bytes, producing unhinted outlines.
#[derive(Clone, Debug)]
pub struct SkrifaGlyphSource {
    data: Arc<[u8]>,
    index: u32,
    metrics: FontMetrics,
}

impl SkrifaGlyphSource {
    /// Parse the first font in `data`.
    pub fn new(data: impl Into<Arc<[u8]>>) -> DrawResult<Self> {
        Self::from_index(data, 0)
    }

    /// Parse font `index` of a collection.
    pub fn from_index(data: impl Into<Arc<[u8]>>, index: u32) -> DrawResult<Self> {
        let data = data.into();
        let font = FontRef::from_index(&data, index)
            .map_err(|err| anyhow::anyhow!("cannot read font {index}: {err}"))?;
        let m = font.metrics(Size::unscaled(), LocationRef::default());
        let metrics = FontMetrics {
            units_per_em: f64::from(m.units_per_em.max(1)),
            ascent: f64::from(m.ascent),
            descent: f64::from(m.descent),
        };
        Ok(Self { data, index, metrics })
    }

    fn font(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(&self.data, self.index).ok()
    }
}

impl GlyphSource for SkrifaGlyphSource {
    fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn glyph(&self, ch: char) -> Option<GlyphOutline> {
        let font = self.font()?;
        let gid = font.charmap().map(ch)?;
        let advance = font
            .glyph_metrics(Size::unscaled(), LocationRef::default())
            .advance_width(gid)
            .unwrap_or(0.0);
        let mut pen = PathPen(Path::new());
        if let Some(outline) = font.outline_glyphs().get(gid) {
            if let Err(err) = outline.draw(Size::unscaled(), &mut pen) {
                tracing::debug!(?ch, error = %err, "glyph outline unreadable; drawing it blank");
                pen.0 = Path::new();
            }
        }
        Some(GlyphOutline {
            path: pen.0,
            advance: f64::from(advance),
        })
    }
}

struct PathPen(Path);

impl OutlinePen for PathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to((f64::from(x), f64::from(y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to((f64::from(x), f64::from(y)));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.0
            .quad_to((f64::from(cx0), f64::from(cy0)), (f64::from(x), f64::from(y)));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.0.curve_to(
            (f64::from(cx0), f64::from(cy0)),
            (f64::from(cx1), f64::from(cy1)),
            (f64::from(x), f64::from(y)),
        );
    }

    fn close(&mut self) {
        self.0.close();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/skrifa_source.rs"]
mod tests;
