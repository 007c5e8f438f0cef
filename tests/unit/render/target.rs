use super::*;

#[test]
fn rgba_roundtrip_through_premul() {
    let src: Vec<u8> = vec![255, 0, 0, 255, 0, 255, 0, 128, 10, 20, 30, 0];
    let t = RenderTarget::import(&src, 3, 1, 12, PixelFormat::Rgba8);
    assert_eq!(t.pixel(1, 0).unwrap(), Rgba8Premul::from_straight_rgba(0, 255, 0, 128));
    let mut out = vec![0u8; 12];
    t.export(&mut out, 12, PixelFormat::Rgba8, t.rect());
    assert_eq!(&out[..8], &src[..8]);
    // Fully transparent pixels lose their color.
    assert_eq!(&out[8..], &[0, 0, 0, 0]);
}

#[test]
fn gray_import_and_luma_export() {
    let t = RenderTarget::import(&[0, 128, 255], 3, 1, 3, PixelFormat::Gray8);
    assert_eq!(t.pixel(1, 0).unwrap(), Rgba8Premul::from_array([128, 128, 128, 255]));
    let mut red = RenderTarget::new(1, 1, Rgba8Premul::from_array([255, 0, 0, 255]));
    let mut out = [0u8];
    red.export(&mut out, 1, PixelFormat::Gray8, red.rect());
    assert_eq!(out[0], 76);
    *red.pixel_mut(0, 0).unwrap() = Rgba8Premul::from_array([255, 255, 255, 255]);
    red.export(&mut out, 1, PixelFormat::Gray8, red.rect());
    assert_eq!(out[0], 255);
}

#[test]
fn export_respects_stride_and_rect() {
    // 2x2 RGB with 2 bytes of row padding.
    let mut buf = vec![9u8; 8 * 2];
    let t = RenderTarget::new(2, 2, Rgba8Premul::from_array([1, 2, 3, 255]));
    t.export(&mut buf, 8, PixelFormat::Rgb8, PixelRect::new(1, 1, 2, 2));
    assert_eq!(&buf[..8], &[9; 8]);
    assert_eq!(&buf[8..11], &[9, 9, 9]);
    assert_eq!(&buf[11..14], &[1, 2, 3]);
    assert_eq!(&buf[14..], &[9, 9]);
}

#[test]
fn premul_import_clamps_channels_to_alpha() {
    let t = RenderTarget::import(&[200, 10, 10, 100], 1, 1, 4, PixelFormat::Rgba8Premul);
    assert_eq!(t.pixel(0, 0).unwrap().a, 200);
}

#[test]
fn out_of_range_pixels_are_none() {
    let mut t = RenderTarget::new(2, 2, Rgba8Premul::TRANSPARENT);
    assert!(t.pixel(-1, 0).is_none());
    assert!(t.pixel(2, 0).is_none());
    assert!(t.pixel_mut(0, 2).is_none());
    assert_eq!(t.rect(), PixelRect::from_size(2, 2));
}

#[test]
fn png_image_is_straight_alpha() {
    let t = RenderTarget::new(1, 1, Rgba8Premul::from_straight_rgba(200, 100, 0, 128));
    let img = t.to_rgba_image();
    let p = img.get_pixel(0, 0).0;
    assert_eq!(p[3], 128);
    assert!((i32::from(p[0]) - 200).abs() <= 1);
}
