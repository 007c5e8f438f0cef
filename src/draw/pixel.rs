use serde::{Deserialize, Serialize};

use crate::foundation::error::{DrawError, DrawResult};

/// Byte layout of a destination buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    /// One luma byte per pixel.
    Gray8,
    /// `r, g, b` bytes; always opaque.
    Rgb8,
    /// `r, g, b, a` bytes with straight alpha.
    Rgba8,
    /// `r, g, b, a` bytes with premultiplied alpha.
    Rgba8Premul,
}

impl PixelFormat {
    /// Bytes per pixel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Rgb8 => 3,
            Self::Rgba8 | Self::Rgba8Premul => 4,
        }
    }

    /// Return `true` when the format stores an alpha channel.
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba8 | Self::Rgba8Premul)
    }

    /// Bytes of one tightly packed row.
    pub fn row_bytes(self, width: u32) -> DrawResult<usize> {
        (width as usize)
            .checked_mul(self.bytes_per_pixel())
            .ok_or_else(|| DrawError::config(format!("row of {width} pixels overflows usize")))
    }

    /// Minimum buffer length for `height` rows of `stride` bytes.
    ///
    /// The last row only needs its pixel bytes, not the full stride.
    pub fn required_len(self, width: u32, height: u32, stride: usize) -> DrawResult<usize> {
        let row = self.row_bytes(width)?;
        if stride < row {
            return Err(DrawError::config(format!(
                "stride {stride} is smaller than a {width}-pixel {self:?} row ({row} bytes)"
            )));
        }
        if height == 0 {
            return Ok(0);
        }
        stride
            .checked_mul(height as usize - 1)
            .and_then(|v| v.checked_add(row))
            .ok_or_else(|| DrawError::config("buffer size overflows usize"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/pixel.rs"]
mod tests;
