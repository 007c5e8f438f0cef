use super::*;

fn red_blue() -> Vec<GradientStop> {
    vec![
        GradientStop::new(0.0, Color::rgb(255, 0, 0)),
        GradientStop::new(1.0, Color::rgb(0, 0, 255)),
    ]
}

#[test]
fn stops_are_clamped_and_monotonic() {
    let g = Gradient::linear(
        (0.0, 0.0),
        (1.0, 0.0),
        vec![
            GradientStop::new(-0.5, Color::BLACK),
            GradientStop::new(0.6, Color::BLACK),
            GradientStop::new(0.3, Color::BLACK),
            GradientStop::new(2.0, Color::BLACK),
        ],
    );
    let offsets: Vec<f64> = g.normalized_stops().unwrap().iter().map(|s| s.offset).collect();
    assert_eq!(offsets, vec![0.0, 0.6, 0.6, 1.0]);
}

#[test]
fn nan_offset_is_a_configuration_error() {
    let stops = vec![GradientStop::new(f64::NAN, Color::BLACK)];
    let g = Gradient::linear((0.0, 0.0), (1.0, 0.0), stops);
    assert!(matches!(g.build_lut(), Err(DrawError::Configuration(_))));
}

#[test]
fn lut_interpolates_between_stops() {
    let lut = Gradient::linear((0.0, 0.0), (1.0, 0.0), red_blue())
        .build_lut()
        .unwrap()
        .unwrap();
    assert_eq!(lut[0], Rgba8Premul::from_straight_rgba(255, 0, 0, 255));
    assert_eq!(lut[255], Rgba8Premul::from_straight_rgba(0, 0, 255, 255));
    let mid = lut[128];
    assert!((i32::from(mid.r) - 127).abs() <= 1);
    assert!((i32::from(mid.b) - 128).abs() <= 1);
}

#[test]
fn hard_stop_switches_color() {
    let stops = vec![
        GradientStop::new(0.5, Color::rgb(255, 0, 0)),
        GradientStop::new(0.5, Color::rgb(0, 255, 0)),
    ];
    let lut = Gradient::linear((0.0, 0.0), (1.0, 0.0), stops)
        .build_lut()
        .unwrap()
        .unwrap();
    assert_eq!(lut[100].r, 255);
    assert_eq!(lut[200].g, 255);
}

#[test]
fn empty_gradient_has_no_lut() {
    let g = Gradient::radial((0.0, 0.0), 1.0, Vec::new());
    assert!(g.build_lut().unwrap().is_none());
}

#[test]
fn stop_opacity_is_premultiplied() {
    let mut stops = red_blue();
    stops[0].opacity = 0.0;
    let lut = Gradient::linear((0.0, 0.0), (1.0, 0.0), stops)
        .build_lut()
        .unwrap()
        .unwrap();
    assert_eq!(lut[0], Rgba8Premul::TRANSPARENT);
}

#[test]
fn spread_methods() {
    assert_eq!(SpreadMethod::Pad.apply(1.7), 1.0);
    assert_eq!(SpreadMethod::Pad.apply(-0.3), 0.0);
    assert!((SpreadMethod::Repeat.apply(1.25) - 0.25).abs() < 1e-12);
    assert!((SpreadMethod::Repeat.apply(-0.25) - 0.75).abs() < 1e-12);
    assert!((SpreadMethod::Reflect.apply(1.25) - 0.75).abs() < 1e-12);
    assert!((SpreadMethod::Reflect.apply(-0.25) - 0.25).abs() < 1e-12);
    assert_eq!(SpreadMethod::Reflect.apply(f64::NAN), 0.0);
}
