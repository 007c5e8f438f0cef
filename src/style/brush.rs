use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::foundation::math::clamp_unit;
use crate::style::color::Color;
use crate::style::gradient::Gradient;

/// Interior rule for filled paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillRule {
    /// Inside where the winding number is non-zero.
    #[default]
    NonZero,
    /// Inside where the winding number is odd.
    EvenOdd,
}

/// What a brush or SVG paint fills with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Paint {
    /// Single color.
    Solid(Color),
    /// Shared gradient definition.
    Gradient(Arc<Gradient>),
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Self::Solid(c)
    }
}

impl From<Gradient> for Paint {
    fn from(g: Gradient) -> Self {
        Self::Gradient(Arc::new(g))
    }
}

impl From<Arc<Gradient>> for Paint {
    fn from(g: Arc<Gradient>) -> Self {
        Self::Gradient(g)
    }
}

/// Fill style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    /// Fill paint.
    pub paint: Paint,
    /// Interior rule.
    #[serde(default)]
    pub fill_rule: FillRule,
    /// Opacity multiplier in [0, 1].
    #[serde(default = "full_opacity")]
    pub opacity: f64,
}

fn full_opacity() -> f64 {
    1.0
}

impl Brush {
    /// Nonzero, fully opaque brush.
    pub fn new(paint: impl Into<Paint>) -> Self {
        Self {
            paint: paint.into(),
            fill_rule: FillRule::NonZero,
            opacity: 1.0,
        }
    }

    /// Set the fill rule.
    pub fn with_fill_rule(mut self, rule: FillRule) -> Self {
        self.fill_rule = rule;
        self
    }

    /// Set the opacity (clamped to [0, 1]).
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = clamp_unit(opacity);
        self
    }
}

impl From<Color> for Brush {
    fn from(c: Color) -> Self {
        Self::new(c)
    }
}
