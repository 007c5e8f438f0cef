use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::foundation::error::{DrawError, DrawResult};
use crate::foundation::math::clamp_unit;
use crate::style::color::Color;

/// Default miter limit, matching SVG.
pub const DEFAULT_MITER_LIMIT: f64 = 4.0;

/// Shape drawn at the open ends of a stroke.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    /// Stop exactly at the end point.
    #[default]
    Butt,
    /// Half-disc around the end point.
    Round,
    /// Half-square extending past the end point.
    Square,
}

/// Shape drawn where two stroked segments meet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineJoin {
    /// Sharp corner, replaced by a bevel beyond the miter limit.
    #[default]
    Miter,
    /// Circular corner.
    Round,
    /// Flat corner.
    Bevel,
}

/// Alternating on/off lengths, starting with "on".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashPattern {
    /// On/off interval lengths in user units.
    pub intervals: SmallVec<[f64; 4]>,
    /// Distance into the pattern at which every contour starts.
    #[serde(default)]
    pub offset: f64,
}

impl DashPattern {
    /// Build a pattern; see [`DashPattern::validate`] for the accepted values.
    pub fn new(intervals: impl IntoIterator<Item = f64>, offset: f64) -> DrawResult<Self> {
        let pattern = Self {
            intervals: intervals.into_iter().collect(),
            offset,
        };
        pattern.validate()?;
        Ok(pattern)
    }

    /// Intervals must be finite and non-negative with a positive sum; the offset must be
    /// finite.
    pub fn validate(&self) -> DrawResult<()> {
        if self.intervals.is_empty() {
            return Err(DrawError::geometry("dash pattern is empty"));
        }
        if let Some(bad) = self.intervals.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(DrawError::geometry(format!(
                "dash interval {bad} must be finite and >= 0"
            )));
        }
        if self.intervals.iter().sum::<f64>() <= 0.0 {
            return Err(DrawError::geometry("dash pattern must have a positive total length"));
        }
        if !self.offset.is_finite() {
            return Err(DrawError::geometry("dash offset must be finite"));
        }
        Ok(())
    }

    /// Intervals with odd-length patterns repeated once so on/off alternate.
    pub fn normalized_intervals(&self) -> SmallVec<[f64; 4]> {
        let mut out = self.intervals.clone();
        if out.len() % 2 == 1 {
            out.extend_from_slice(&self.intervals);
        }
        out
    }

    /// Scale every length (used when stroking in device space).
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            intervals: self.intervals.iter().map(|v| v * factor).collect(),
            offset: self.offset * factor,
        }
    }
}

/// Stroke style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pen {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in user units; 0 draws a one-device-pixel hairline.
    pub width: f64,
    /// End cap.
    pub cap: LineCap,
    /// Corner join.
    pub join: LineJoin,
    /// Miter length limit relative to the stroke width.
    pub miter_limit: f64,
    /// Optional dash pattern.
    pub dash: Option<DashPattern>,
    /// Opacity multiplier in [0, 1].
    pub opacity: f64,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            miter_limit: DEFAULT_MITER_LIMIT,
            dash: None,
            opacity: 1.0,
        }
    }
}

impl Pen {
    /// Solid pen of `width`; a negative or non-finite width is malformed geometry.
    pub fn new(color: impl Into<Color>, width: f64) -> DrawResult<Self> {
        let pen = Self {
            color: color.into(),
            width,
            ..Self::default()
        };
        pen.validate()?;
        Ok(pen)
    }

    /// One-device-pixel pen.
    pub fn hairline(color: impl Into<Color>) -> Self {
        Self {
            color: color.into(),
            width: 0.0,
            ..Self::default()
        }
    }

    /// Set the end cap.
    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    /// Set the corner join.
    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    /// Set the miter limit.
    pub fn with_miter_limit(mut self, limit: f64) -> Self {
        self.miter_limit = limit;
        self
    }

    /// Set the dash pattern.
    pub fn with_dash(mut self, dash: DashPattern) -> Self {
        self.dash = Some(dash);
        self
    }

    /// Set the opacity (clamped to [0, 1]).
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = clamp_unit(opacity);
        self
    }

    /// Return `true` for a zero-width pen.
    pub fn is_hairline(&self) -> bool {
        self.width == 0.0
    }

    /// Check width, miter limit and dash pattern.
    pub fn validate(&self) -> DrawResult<()> {
        if !self.width.is_finite() || self.width < 0.0 {
            return Err(DrawError::geometry(format!(
                "stroke width must be finite and >= 0 (got {})",
                self.width
            )));
        }
        if !self.miter_limit.is_finite() || self.miter_limit < 1.0 {
            return Err(DrawError::geometry(format!(
                "miter limit must be finite and >= 1 (got {})",
                self.miter_limit
            )));
        }
        if let Some(dash) = &self.dash {
            dash.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/pen.rs"]
mod tests;
