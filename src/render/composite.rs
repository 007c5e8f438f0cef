use crate::foundation::core::{PixelRect, Rgba8Premul};
use crate::foundation::math::{add_sat_u8, mul_div255};
use crate::raster::mask::CoverageMask;
use crate::render::target::RenderTarget;
use crate::style::shader::Shader;

/// Porter-Duff "over" of premultiplied `src` onto `dst`, scaled by `coverage` in `[0, 1]`.
pub fn over(dst: Rgba8Premul, src: Rgba8Premul, coverage: f32) -> Rgba8Premul {
    match quantize(coverage) {
        0 => dst,
        k => src_over(dst, attenuate(src, k)),
    }
}

/// Coverage as an 8-bit weight; NaN counts as zero.
fn quantize(coverage: f32) -> u16 {
    (coverage.clamp(0.0, 1.0) * 255.0).round() as u16
}

fn attenuate(src: Rgba8Premul, k: u16) -> Rgba8Premul {
    if k >= 255 {
        return src;
    }
    let [r, g, b, a] = [src.r, src.g, src.b, src.a].map(|v| mul_div255(u16::from(v), k));
    Rgba8Premul { r, g, b, a }
}

fn src_over(dst: Rgba8Premul, src: Rgba8Premul) -> Rgba8Premul {
    match src.a {
        0 => dst,
        255 => src,
        a => {
            let keep = 255 - u16::from(a);
            let ch = |s: u8, d: u8| add_sat_u8(s, mul_div255(u16::from(d), keep));
            Rgba8Premul {
                r: ch(src.r, dst.r),
                g: ch(src.g, dst.g),
                b: ch(src.b, dst.b),
                a: ch(src.a, dst.a),
            }
        }
    }
}

/// Composite `shader` through `mask` onto `target`; returns the touched pixel rectangle.
pub(crate) fn composite_mask(
    target: &mut RenderTarget,
    mask: &CoverageMask,
    shader: &Shader,
) -> PixelRect {
    if shader.is_empty() {
        return PixelRect::new(0, 0, 0, 0);
    }
    let bounds = target.rect();
    let mut damage = PixelRect::new(0, 0, 0, 0);
    for span in mask.spans() {
        let end = span.x + span.coverage.len() as i32;
        let row = PixelRect::new(span.x, span.y, end, span.y + 1).intersect(bounds);
        if row.is_empty() {
            continue;
        }
        for x in row.x0..row.x1 {
            let k = quantize(span.coverage[(x - span.x) as usize]);
            if k == 0 {
                continue;
            }
            let src = attenuate(shader.shade(x, span.y), k);
            if let Some(px) = target.pixel_mut(x, span.y) {
                *px = src_over(*px, src);
            }
        }
        damage = damage.union(row);
    }
    damage
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
