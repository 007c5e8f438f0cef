use super::*;

#[test]
fn bytes_per_pixel_and_alpha() {
    assert_eq!(PixelFormat::Gray8.bytes_per_pixel(), 1);
    assert_eq!(PixelFormat::Rgb8.bytes_per_pixel(), 3);
    assert_eq!(PixelFormat::Rgba8.bytes_per_pixel(), 4);
    assert!(!PixelFormat::Rgb8.has_alpha());
    assert!(PixelFormat::Rgba8Premul.has_alpha());
}

#[test]
fn required_len_skips_last_row_padding() {
    assert_eq!(PixelFormat::Rgb8.required_len(10, 3, 32).unwrap(), 32 * 2 + 30);
    assert_eq!(PixelFormat::Gray8.required_len(10, 0, 10).unwrap(), 0);
}

#[test]
fn short_stride_is_rejected() {
    let err = PixelFormat::Rgba8.required_len(10, 2, 39).unwrap_err();
    assert!(matches!(err, DrawError::Configuration(_)));
}

#[test]
fn format_names_are_snake_case() {
    let f: PixelFormat = serde_json::from_str("\"rgba8_premul\"").unwrap();
    assert_eq!(f, PixelFormat::Rgba8Premul);
}
