pub use kurbo::{Affine, Point, Rect, Vec2};

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: crate::foundation::math::mul_div255(u16::from(r), u16::from(a)),
            g: crate::foundation::math::mul_div255(u16::from(g), u16::from(a)),
            b: crate::foundation::math::mul_div255(u16::from(b), u16::from(a)),
            a,
        }
    }

    /// Convert back to straight-alpha RGBA8.
    ///
    /// Fully transparent pixels come back as transparent black.
    pub fn to_straight_rgba(self) -> [u8; 4] {
        if self.a == 0 {
            return [0, 0, 0, 0];
        }
        if self.a == 255 {
            return [self.r, self.g, self.b, 255];
        }
        fn unpremul(c: u8, a: u8) -> u8 {
            let v = (u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a);
            v.min(255) as u8
        }
        [
            unpremul(self.r, self.a),
            unpremul(self.g, self.a),
            unpremul(self.b, self.a),
            self.a,
        ]
    }

    /// Channels as `[r, g, b, a]`.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build from `[r, g, b, a]` premultiplied channels.
    pub fn from_array(px: [u8; 4]) -> Self {
        Self {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        }
    }
}

/// Integer pixel rectangle, half-open: `[x0, x1) x [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Left edge (inclusive).
    pub x0: i32,
    /// Top edge (inclusive).
    pub y0: i32,
    /// Right edge (exclusive).
    pub x1: i32,
    /// Bottom edge (exclusive).
    pub y1: i32,
}

impl PixelRect {
    /// Create a rectangle from its edges.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Rectangle covering a `width x height` buffer.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(
            0,
            0,
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        )
    }

    /// Smallest pixel rectangle containing `rect`.
    ///
    /// Coordinates are saturated into `i32` range; callers clip against the buffer afterwards.
    pub fn covering(rect: Rect) -> Self {
        fn sat(v: f64) -> i32 {
            if v.is_nan() {
                0
            } else {
                v.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
            }
        }
        Self::new(
            sat(rect.x0.floor()),
            sat(rect.y0.floor()),
            sat(rect.x1.ceil()),
            sat(rect.y1.ceil()),
        )
    }

    /// Width in pixels (0 when empty).
    pub fn width(self) -> u32 {
        (i64::from(self.x1) - i64::from(self.x0)).max(0) as u32
    }

    /// Height in pixels (0 when empty).
    pub fn height(self) -> u32 {
        (i64::from(self.y1) - i64::from(self.y0)).max(0) as u32
    }

    /// Return `true` when the rectangle has no pixels.
    pub fn is_empty(self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    /// Overlap of two rectangles (possibly empty).
    pub fn intersect(self, other: Self) -> Self {
        Self::new(
            self.x0.max(other.x0),
            self.y0.max(other.y0),
            self.x1.min(other.x1),
            self.y1.min(other.y1),
        )
    }

    /// Smallest rectangle containing both.
    pub fn union(self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Self::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
