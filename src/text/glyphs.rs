use std::fmt;
use std::sync::Arc;

use crate::foundation::core::{Affine, Point};
use crate::foundation::error::{DrawError, DrawResult};
use crate::foundation::math::clamp_unit;
use crate::geometry::path::Path;
use crate::style::color::Color;

/// Vertical font metrics in font units (y up).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontMetrics {
    /// Design units per em.
    pub units_per_em: f64,
    /// Distance from the baseline to the top of the line box.
    pub ascent: f64,
    /// Distance from the baseline to the bottom of the line box; usually negative.
    pub descent: f64,
}

/// Outline and advance of one glyph, in font units (y up, origin on the baseline).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphOutline {
    /// Glyph outline; empty for blank glyphs such as spaces.
    pub path: Path,
    /// Horizontal advance.
    pub advance: f64,
}

/// Provider of glyph outlines, typically backed by a font file.
pub trait GlyphSource: Send + Sync {
    /// Metrics shared by every glyph.
    fn metrics(&self) -> FontMetrics;

    /// Outline for `ch`, or `None` when the font has no glyph for it.
    fn glyph(&self, ch: char) -> Option<GlyphOutline>;
}

/// A glyph source at a size, with a fill color.
#[derive(Clone)]
pub struct Font {
    /// Outline provider.
    pub source: Arc<dyn GlyphSource>,
    /// Em size in user units.
    pub size: f64,
    /// Fill color.
    pub color: Color,
    /// Opacity multiplier in [0, 1].
    pub opacity: f64,
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("size", &self.size)
            .field("color", &self.color)
            .field("opacity", &self.opacity)
            .finish_non_exhaustive()
    }
}

impl Font {
    /// Font of `size` user units per em; the size must be finite and positive.
    pub fn new(
        source: Arc<dyn GlyphSource>,
        size: f64,
        color: impl Into<Color>,
    ) -> DrawResult<Self> {
        if !size.is_finite() || size <= 0.0 {
            return Err(DrawError::config(format!("font size must be finite and > 0 (got {size})")));
        }
        let metrics = source.metrics();
        if !metrics.units_per_em.is_finite() || metrics.units_per_em <= 0.0 {
            return Err(DrawError::config(format!(
                "font reports invalid units per em {}",
                metrics.units_per_em
            )));
        }
        Ok(Self {
            source,
            size,
            color: color.into(),
            opacity: 1.0,
        })
    }

    /// Set the opacity (clamped to [0, 1]).
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = clamp_unit(opacity);
        self
    }

    fn scale(&self, metrics: &FontMetrics) -> f64 {
        self.size / metrics.units_per_em
    }

    /// Width and line height of `text` in user units.
    pub fn measure(&self, text: &str) -> (f64, f64) {
        let metrics = self.source.metrics();
        let scale = self.scale(&metrics);
        let width: f64 = text
            .chars()
            .filter(|c| !c.is_control())
            .map(|c| self.advance_of(c, &metrics))
            .sum();
        (width * scale, (metrics.ascent - metrics.descent) * scale)
    }

    /// Outline of `text` laid out on one line, with the top of the line box at `origin`.
    ///
    /// Glyphs are placed one after another by advance; characters the source cannot map take
    /// half an em of blank space.
    pub fn outline(&self, origin: Point, text: &str) -> Path {
        let metrics = self.source.metrics();
        let scale = self.scale(&metrics);
        let baseline = origin.y + metrics.ascent * scale;
        let mut pen_x = origin.x;
        let mut out = Path::new();
        for ch in text.chars().filter(|c| !c.is_control()) {
            match self.source.glyph(ch) {
                Some(glyph) => {
                    if !glyph.path.is_empty() {
                        // Font units are y-up; flip onto the y-down surface.
                        let t = Affine::translate((pen_x, baseline))
                            * Affine::scale_non_uniform(scale, -scale);
                        out.extend(&glyph.path.transform(t));
                    }
                    pen_x += glyph.advance * scale;
                }
                None => {
                    tracing::debug!(?ch, "no glyph for character");
                    pen_x += missing_advance(&metrics) * scale;
                }
            }
        }
        out
    }

    fn advance_of(&self, ch: char, metrics: &FontMetrics) -> f64 {
        self.source
            .glyph(ch)
            .map_or_else(|| missing_advance(metrics), |g| g.advance)
    }
}

fn missing_advance(metrics: &FontMetrics) -> f64 {
    metrics.units_per_em * 0.5
}

#[cfg(test)]
#[path = "../../tests/unit/text/glyphs.rs"]
mod tests;
