use serde::{Deserialize, Serialize};

use crate::foundation::core::{Affine, Point, Rgba8Premul};
use crate::foundation::error::{DrawError, DrawResult};
use crate::foundation::math::{clamp_unit, lerp_u8};
use crate::style::color::Color;

/// Number of entries in a gradient color lookup table.
pub const LUT_SIZE: usize = 256;

/// How a gradient paints outside its `[0, 1]` parameter range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadMethod {
    /// Extend the end colors.
    #[default]
    Pad,
    /// Mirror every other period.
    Reflect,
    /// Restart every period.
    Repeat,
}

impl SpreadMethod {
    /// Map an unbounded gradient parameter into `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        if t.is_nan() {
            return 0.0;
        }
        match self {
            Self::Pad => t.clamp(0.0, 1.0),
            Self::Repeat => t - t.floor(),
            Self::Reflect => {
                let m = t.rem_euclid(2.0);
                if m > 1.0 { 2.0 - m } else { m }
            }
        }
    }
}

/// Coordinate system of gradient geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientUnits {
    /// Geometry is in the user space of the painted shape.
    #[default]
    UserSpaceOnUse,
    /// Geometry is in the unit square mapped onto the shape's bounding box.
    ObjectBoundingBox,
}

/// One color stop.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient, nominally in [0, 1].
    pub offset: f64,
    /// Stop color.
    pub color: Color,
    /// Stop opacity in [0, 1].
    #[serde(default = "full_opacity")]
    pub opacity: f64,
}

fn full_opacity() -> f64 {
    1.0
}

impl GradientStop {
    /// Opaque stop at `offset`.
    pub fn new(offset: f64, color: impl Into<Color>) -> Self {
        Self {
            offset,
            color: color.into(),
            opacity: 1.0,
        }
    }
}

/// Gradient shape.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GradientGeometry {
    /// Color varies along the axis from `start` to `end`.
    Linear {
        /// Where the parameter is 0.
        start: Point,
        /// Where the parameter is 1.
        end: Point,
    },
    /// Color varies from the focal point out to the circle.
    Radial {
        /// Center of the end circle.
        center: Point,
        /// Radius of the end circle.
        radius: f64,
        /// Focal point; the center when absent.
        focal: Option<Point>,
    },
}

/// A linear or radial gradient.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    /// Color stops in document order.
    pub stops: Vec<GradientStop>,
    /// Gradient geometry.
    pub geometry: GradientGeometry,
    /// Spread method.
    #[serde(default)]
    pub spread: SpreadMethod,
    /// Unit system of `geometry`.
    #[serde(default)]
    pub units: GradientUnits,
    /// Extra transform applied to `geometry`.
    #[serde(default = "identity")]
    pub transform: Affine,
}

fn identity() -> Affine {
    Affine::IDENTITY
}

impl Gradient {
    /// Linear gradient in user space.
    pub fn linear(
        start: impl Into<Point>,
        end: impl Into<Point>,
        stops: Vec<GradientStop>,
    ) -> Self {
        Self {
            stops,
            geometry: GradientGeometry::Linear {
                start: start.into(),
                end: end.into(),
            },
            spread: SpreadMethod::Pad,
            units: GradientUnits::UserSpaceOnUse,
            transform: Affine::IDENTITY,
        }
    }

    /// Radial gradient in user space, focused on its center.
    pub fn radial(center: impl Into<Point>, radius: f64, stops: Vec<GradientStop>) -> Self {
        Self {
            stops,
            geometry: GradientGeometry::Radial {
                center: center.into(),
                radius,
                focal: None,
            },
            spread: SpreadMethod::Pad,
            units: GradientUnits::UserSpaceOnUse,
            transform: Affine::IDENTITY,
        }
    }

    /// Set the spread method.
    pub fn with_spread(mut self, spread: SpreadMethod) -> Self {
        self.spread = spread;
        self
    }

    /// Set the unit system.
    pub fn with_units(mut self, units: GradientUnits) -> Self {
        self.units = units;
        self
    }

    /// Set the gradient transform.
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    /// Stops with offsets clamped into [0, 1] and made non-decreasing.
    ///
    /// A NaN offset cannot be ordered and is a configuration error.
    pub fn normalized_stops(&self) -> DrawResult<Vec<GradientStop>> {
        let mut out = Vec::with_capacity(self.stops.len());
        let mut prev = 0.0_f64;
        for (i, stop) in self.stops.iter().enumerate() {
            if stop.offset.is_nan() {
                return Err(DrawError::config(format!("gradient stop {i} has a NaN offset")));
            }
            let offset = stop.offset.clamp(0.0, 1.0).max(prev);
            prev = offset;
            out.push(GradientStop {
                offset,
                color: stop.color,
                opacity: clamp_unit(stop.opacity),
            });
        }
        Ok(out)
    }

    /// Premultiplied lookup table sampled at `i / 255`.
    ///
    /// Returns `None` for a gradient without stops, which paints nothing.
    pub fn build_lut(&self) -> DrawResult<Option<Box<[Rgba8Premul; LUT_SIZE]>>> {
        let stops = self.normalized_stops()?;
        if stops.is_empty() {
            return Ok(None);
        }
        let mut lut = Box::new([Rgba8Premul::TRANSPARENT; LUT_SIZE]);
        for (i, slot) in lut.iter_mut().enumerate() {
            let t = i as f64 / (LUT_SIZE - 1) as f64;
            *slot = sample_stops(&stops, t);
        }
        Ok(Some(lut))
    }
}

/// Color at `t`, interpolating straight channels between the bracketing stops.
fn sample_stops(stops: &[GradientStop], t: f64) -> Rgba8Premul {
    let straight = |s: &GradientStop| s.color.with_opacity(s.opacity);
    let first = &stops[0];
    let last = &stops[stops.len() - 1];
    if t <= first.offset {
        return premul(straight(first));
    }
    if t >= last.offset {
        return premul(straight(last));
    }
    // Last stop at or before `t`; equal offsets give a hard edge.
    let right = stops.partition_point(|s| s.offset <= t);
    let (a, b) = (&stops[right - 1], &stops[right]);
    let span = b.offset - a.offset;
    let f = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
    let (ca, cb) = (straight(a), straight(b));
    premul(Color::rgba(
        lerp_u8(ca.r, cb.r, f),
        lerp_u8(ca.g, cb.g, f),
        lerp_u8(ca.b, cb.b, f),
        lerp_u8(ca.a, cb.a, f),
    ))
}

fn premul(c: Color) -> Rgba8Premul {
    Rgba8Premul::from_straight_rgba(c.r, c.g, c.b, c.a)
}

#[cfg(test)]
#[path = "../../tests/unit/style/gradient.rs"]
mod tests;
