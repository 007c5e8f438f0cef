use super::*;
use crate::foundation::core::{Affine, Point};
use crate::geometry::flatten::FlattenedContour;
use crate::raster::rasterizer::rasterize;
use crate::style::brush::{FillRule, Paint};
use crate::style::color::Color;

fn px(r: u8, g: u8, b: u8, a: u8) -> Rgba8Premul {
    Rgba8Premul::from_array([r, g, b, a])
}

#[test]
fn zero_coverage_is_noop() {
    let dst = px(1, 2, 3, 4);
    assert_eq!(over(dst, px(200, 200, 200, 200), 0.0), dst);
    assert_eq!(over(dst, px(255, 255, 255, 0), 1.0), dst);
}

#[test]
fn opaque_source_replaces_destination() {
    let src = px(255, 0, 0, 255);
    assert_eq!(over(px(0, 0, 0, 255), src, 1.0), src);
    let translucent = px(100, 110, 120, 200);
    assert_eq!(over(Rgba8Premul::TRANSPARENT, translucent, 1.0), translucent);
}

#[test]
fn half_coverage_blends() {
    let out = over(px(0, 0, 255, 255), px(255, 0, 0, 255), 0.5);
    assert_eq!(out.a, 255);
    assert_eq!(out.r, 128);
    assert_eq!(out.b, 127);
}

#[test]
fn coverage_weights_are_quantized_to_bytes() {
    assert_eq!(quantize(0.0), 0);
    assert_eq!(quantize(1.5), 255);
    assert_eq!(quantize(-1.0), 0);
    assert_eq!(quantize(f32::NAN), 0);
    assert_eq!(quantize(0.5), 128);
    let src = px(200, 100, 0, 200);
    assert_eq!(attenuate(src, 255), src);
    assert_eq!(attenuate(src, 0), Rgba8Premul::TRANSPARENT);
}

#[test]
fn partial_mask_matches_scalar_over() {
    let dst = px(0, 0, 255, 255);
    let mut target = RenderTarget::new(3, 1, dst);
    let mask = CoverageMask::from_parts(target.rect(), vec![0.0, 0.25, 1.0]);
    let red = Paint::Solid(Color::rgb(255, 0, 0));
    let shader = Shader::resolve(&red, 1.0, Affine::IDENTITY, None).unwrap();
    composite_mask(&mut target, &mask, &shader);
    assert_eq!(target.pixel(0, 0), Some(dst));
    assert_eq!(target.pixel(1, 0), Some(over(dst, px(255, 0, 0, 255), 0.25)));
    assert_eq!(target.pixel(2, 0), Some(px(255, 0, 0, 255)));
}

#[test]
fn later_draws_composite_over_earlier_results() {
    let mut target = RenderTarget::new(4, 4, px(255, 255, 255, 255));
    let square = FlattenedContour {
        points: vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ],
        closed: true,
    };
    let mask = rasterize(&[square], FillRule::NonZero, target.rect(), true);
    let half_black =
        Shader::resolve(&Paint::Solid(Color::BLACK), 0.5, Affine::IDENTITY, None).unwrap();
    composite_mask(&mut target, &mask, &half_black);
    let first = target.pixel(1, 1).unwrap();
    assert_eq!(first.r, 127);
    let damage = composite_mask(&mut target, &mask, &half_black);
    assert_eq!(damage, PixelRect::new(0, 0, 4, 4));
    let second = target.pixel(1, 1).unwrap();
    assert_eq!(second.r, 63);
}

#[test]
fn empty_shader_touches_nothing() {
    let mut target = RenderTarget::new(2, 2, Rgba8Premul::TRANSPARENT);
    let mask = CoverageMask::from_parts(target.rect(), vec![1.0; 4]);
    let damage = composite_mask(&mut target, &mask, &Shader::Empty);
    assert!(damage.is_empty());
    assert_eq!(target, RenderTarget::new(2, 2, Rgba8Premul::TRANSPARENT));
}
