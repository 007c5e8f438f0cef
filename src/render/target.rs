use crate::draw::pixel::PixelFormat;
use crate::foundation::core::{PixelRect, Rgba8Premul};

/// Premultiplied working copy of a destination buffer.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RenderTarget {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8Premul>,
}

impl RenderTarget {
    pub(crate) fn new(width: u32, height: u32, fill: Rgba8Premul) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    /// Convert `src` rows into premultiplied pixels. The caller has checked the length.
    pub(crate) fn import(
        src: &[u8],
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
    ) -> Self {
        let bpp = format.bytes_per_pixel();
        let w = width as usize;
        let mut pixels = Vec::with_capacity(w * height as usize);
        for y in 0..height as usize {
            let row = &src[y * stride..y * stride + w * bpp];
            for px in row.chunks_exact(bpp) {
                pixels.push(decode(px, format));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Write the pixels inside `rect` back into `dst` in `format`.
    pub(crate) fn export(
        &self,
        dst: &mut [u8],
        stride: usize,
        format: PixelFormat,
        rect: PixelRect,
    ) {
        let rect = rect.intersect(self.rect());
        if rect.is_empty() {
            return;
        }
        let bpp = format.bytes_per_pixel();
        let w = self.width as usize;
        for y in rect.y0 as usize..rect.y1 as usize {
            let src = &self.pixels[y * w + rect.x0 as usize..y * w + rect.x1 as usize];
            let start = y * stride + rect.x0 as usize * bpp;
            let out = &mut dst[start..start + src.len() * bpp];
            for (px, bytes) in src.iter().zip(out.chunks_exact_mut(bpp)) {
                encode(*px, format, bytes);
            }
        }
    }

    pub(crate) fn rect(&self) -> PixelRect {
        PixelRect::from_size(self.width, self.height)
    }

    #[cfg(test)]
    pub(crate) fn pixel(&self, x: i32, y: i32) -> Option<Rgba8Premul> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub(crate) fn pixel_mut(&mut self, x: i32, y: i32) -> Option<&mut Rgba8Premul> {
        self.index(x, y).map(|i| &mut self.pixels[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }
        Some(y * self.width as usize + x)
    }

    /// Straight-alpha copy for PNG export and inspection.
    pub(crate) fn to_rgba_image(&self) -> image::RgbaImage {
        let mut img = image::RgbaImage::new(self.width, self.height);
        for (dst, src) in img.pixels_mut().zip(&self.pixels) {
            *dst = image::Rgba(src.to_straight_rgba());
        }
        img
    }
}

fn decode(px: &[u8], format: PixelFormat) -> Rgba8Premul {
    match format {
        PixelFormat::Gray8 => Rgba8Premul::from_array([px[0], px[0], px[0], 255]),
        PixelFormat::Rgb8 => Rgba8Premul::from_array([px[0], px[1], px[2], 255]),
        PixelFormat::Rgba8 => Rgba8Premul::from_straight_rgba(px[0], px[1], px[2], px[3]),
        PixelFormat::Rgba8Premul => Rgba8Premul::from_array([
            px[0],
            px[1],
            px[2],
            // Keep imported premultiplied data valid: channels never exceed alpha.
            px[3].max(px[0]).max(px[1]).max(px[2]),
        ]),
    }
}

fn encode(px: Rgba8Premul, format: PixelFormat, out: &mut [u8]) {
    match format {
        PixelFormat::Rgba8Premul => out.copy_from_slice(&px.to_array()),
        PixelFormat::Rgba8 => out.copy_from_slice(&px.to_straight_rgba()),
        PixelFormat::Rgb8 => {
            let [r, g, b, _] = px.to_straight_rgba();
            out.copy_from_slice(&[r, g, b]);
        }
        PixelFormat::Gray8 => {
            let [r, g, b, _] = px.to_straight_rgba();
            out[0] = luma(r, g, b);
        }
    }
}

/// ITU-R BT.601 luma.
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b) + 500) / 1000) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/target.rs"]
mod tests;
