use crate::foundation::core::{Affine, Point, Rect, Rgba8Premul, Vec2};
use crate::foundation::error::DrawResult;
use crate::foundation::math::{mul_div255, unit_to_u8};
use crate::geometry::transform::checked_inverse;
use crate::style::brush::Paint;
use crate::style::gradient::{
    Gradient, GradientGeometry, GradientUnits, LUT_SIZE, SpreadMethod,
};

/// Focal points are pulled inside this fraction of the radius.
const MAX_FOCAL_RATIO: f64 = 0.99;

/// Per-pixel color source resolved from a [`Paint`] against a device transform.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Shader {
    /// Paints nothing.
    Empty,
    Solid(Rgba8Premul),
    Linear {
        lut: Box<[Rgba8Premul; LUT_SIZE]>,
        spread: SpreadMethod,
        /// Device space to gradient space.
        inverse: Affine,
        start: Point,
        /// Axis divided by its squared length.
        axis: Vec2,
    },
    Radial {
        lut: Box<[Rgba8Premul; LUT_SIZE]>,
        spread: SpreadMethod,
        inverse: Affine,
        center: Point,
        radius: f64,
        focal: Point,
    },
}

impl Shader {
    /// Resolve `paint` for a shape drawn with user-to-device transform `ctm`.
    ///
    /// `bbox` is the shape's user-space bounds, needed by bounding-box gradients.
    pub(crate) fn resolve(
        paint: &Paint,
        opacity: f64,
        ctm: Affine,
        bbox: Option<Rect>,
    ) -> DrawResult<Self> {
        match paint {
            Paint::Solid(c) => Ok(Self::solid(c.to_premul(opacity))),
            Paint::Gradient(g) => Self::gradient(g, opacity, ctm, bbox),
        }
    }

    fn solid(c: Rgba8Premul) -> Self {
        if c.a == 0 { Self::Empty } else { Self::Solid(c) }
    }

    fn gradient(g: &Gradient, opacity: f64, ctm: Affine, bbox: Option<Rect>) -> DrawResult<Self> {
        let Some(mut lut) = g.build_lut()? else {
            return Ok(Self::Empty);
        };
        let o = unit_to_u8(opacity);
        if o < 255 {
            for c in lut.iter_mut() {
                *c = scale(*c, o);
            }
        }
        let last = lut[LUT_SIZE - 1];
        if g.stops.len() == 1 {
            return Ok(Self::solid(last));
        }

        let units = match g.units {
            GradientUnits::UserSpaceOnUse => Affine::IDENTITY,
            GradientUnits::ObjectBoundingBox => match bbox {
                Some(b) if b.width() > 0.0 && b.height() > 0.0 => {
                    Affine::new([b.width(), 0.0, 0.0, b.height(), b.x0, b.y0])
                }
                _ => return Ok(Self::Empty),
            },
        };
        let inverse = checked_inverse(ctm * units * g.transform)?;

        match g.geometry {
            GradientGeometry::Linear { start, end } => {
                let d = end - start;
                let len_sq = d.hypot2();
                if len_sq <= f64::EPSILON {
                    return Ok(Self::solid(last));
                }
                Ok(Self::Linear {
                    lut,
                    spread: g.spread,
                    inverse,
                    start,
                    axis: d / len_sq,
                })
            }
            GradientGeometry::Radial {
                center,
                radius,
                focal,
            } => {
                if radius <= 0.0 || !radius.is_finite() {
                    return Ok(Self::solid(last));
                }
                let mut f = focal.unwrap_or(center);
                let off = f - center;
                let max = radius * MAX_FOCAL_RATIO;
                if off.hypot() > max {
                    f = center + off * (max / off.hypot());
                }
                Ok(Self::Radial {
                    lut,
                    spread: g.spread,
                    inverse,
                    center,
                    radius,
                    focal: f,
                })
            }
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Color at device pixel center `(x + 0.5, y + 0.5)`.
    pub(crate) fn shade(&self, x: i32, y: i32) -> Rgba8Premul {
        let device = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
        match self {
            Self::Empty => Rgba8Premul::TRANSPARENT,
            Self::Solid(c) => *c,
            Self::Linear {
                lut,
                spread,
                inverse,
                start,
                axis,
            } => {
                let p = *inverse * device;
                let t = (p - *start).dot(*axis);
                lookup(lut, spread.apply(t))
            }
            Self::Radial {
                lut,
                spread,
                inverse,
                center,
                radius,
                focal,
            } => {
                let p = *inverse * device;
                let t = radial_t(p, *center, *radius, *focal);
                lookup(lut, spread.apply(t))
            }
        }
    }
}

/// Parameter of the circle through `p` when interpolating from the focal point (t = 0) to
/// the end circle (t = 1).
fn radial_t(p: Point, center: Point, radius: f64, focal: Point) -> f64 {
    let d = p - focal;
    let cf = center - focal;
    let a = cf.hypot2() - radius * radius;
    if cf.hypot2() <= f64::EPSILON {
        return d.hypot() / radius;
    }
    let b = d.dot(cf);
    let c = d.hypot2();
    let disc = (b * b - a * c).max(0.0);
    (b - disc.sqrt()) / a
}

fn lookup(lut: &[Rgba8Premul; LUT_SIZE], t: f64) -> Rgba8Premul {
    let i = (t * (LUT_SIZE - 1) as f64).round() as usize;
    lut[i.min(LUT_SIZE - 1)]
}

fn scale(c: Rgba8Premul, o: u8) -> Rgba8Premul {
    let o = u16::from(o);
    Rgba8Premul {
        r: mul_div255(u16::from(c.r), o),
        g: mul_div255(u16::from(c.g), o),
        b: mul_div255(u16::from(c.b), o),
        a: mul_div255(u16::from(c.a), o),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/shader.rs"]
mod tests;
