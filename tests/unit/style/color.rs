use super::*;

#[test]
fn hex_forms() {
    assert_eq!(Color::parse("#f80").unwrap(), Color::rgb(255, 136, 0));
    assert_eq!(Color::parse("#f80c").unwrap(), Color::rgba(255, 136, 0, 204));
    assert_eq!(Color::parse("#FF8800").unwrap(), Color::rgb(255, 136, 0));
    assert_eq!(Color::parse("#ff880080").unwrap(), Color::rgba(255, 136, 0, 128));
    assert!(Color::parse("#ff88").is_ok());
    assert!(Color::parse("#ff8").is_ok());
    assert!(Color::parse("#ff88g0").is_err());
    assert!(Color::parse("#12345").is_err());
}

#[test]
fn functional_forms() {
    assert_eq!(Color::parse("rgb(10, 20, 30)").unwrap(), Color::rgb(10, 20, 30));
    assert_eq!(Color::parse("rgb(100%,0%,50%)").unwrap(), Color::rgb(255, 0, 128));
    assert_eq!(Color::parse("rgba(10,20,30,0.5)").unwrap(), Color::rgba(10, 20, 30, 128));
    assert_eq!(Color::parse("hsl(120, 100%, 50%)").unwrap(), Color::rgb(0, 255, 0));
    assert_eq!(Color::parse("hsl(0,0%,100%)").unwrap(), Color::WHITE);
    assert!(Color::parse("rgb(1,2)").is_err());
}

#[test]
fn named_colors_are_case_insensitive() {
    assert_eq!(Color::parse("Orange").unwrap(), Color::rgb(255, 165, 0));
    assert_eq!(Color::parse("  navy ").unwrap(), Color::rgb(0, 0, 128));
    assert_eq!(Color::parse("transparent").unwrap(), Color::TRANSPARENT);
    assert!(matches!(
        Color::parse("notacolor"),
        Err(DrawError::MalformedMarkup(_))
    ));
}

#[test]
fn opacity_scales_alpha_and_premultiplies() {
    let c = Color::rgb(255, 128, 0);
    assert_eq!(c.with_opacity(0.5).a, 128);
    assert_eq!(c.to_premul(0.5), Rgba8Premul::from_straight_rgba(255, 128, 0, 128));
    assert_eq!(c.to_premul(7.0), Rgba8Premul::from_straight_rgba(255, 128, 0, 255));
    assert_eq!(c.to_premul(f64::NAN).a, 0);
}

#[test]
fn deserializes_from_all_forms() {
    let s: Color = serde_json::from_str("\"#102030\"").unwrap();
    assert_eq!(s, Color::rgb(16, 32, 48));
    let o: Color = serde_json::from_str(r#"{"r":1,"g":2,"b":3}"#).unwrap();
    assert_eq!(o, Color::rgb(1, 2, 3));
    let a: Color = serde_json::from_str("[1,2,3,4]").unwrap();
    assert_eq!(a, Color::rgba(1, 2, 3, 4));
    assert!(serde_json::from_str::<Color>("[1,2]").is_err());
}
