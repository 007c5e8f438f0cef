use super::*;

#[test]
fn mul_div255_is_exact_at_extremes() {
    assert_eq!(mul_div255(255, 255), 255);
    assert_eq!(mul_div255(0, 255), 0);
    assert_eq!(mul_div255(255, 0), 0);
    assert_eq!(mul_div255(128, 255), 128);
}

#[test]
fn unit_to_u8_clamps_and_handles_nan() {
    assert_eq!(unit_to_u8(-1.0), 0);
    assert_eq!(unit_to_u8(2.0), 255);
    assert_eq!(unit_to_u8(f64::NAN), 0);
    assert_eq!(unit_to_u8(0.5), 128);
}

#[test]
fn lerp_u8_endpoints() {
    assert_eq!(lerp_u8(10, 200, 0.0), 10);
    assert_eq!(lerp_u8(10, 200, 1.0), 200);
    assert_eq!(lerp_u8(0, 255, 0.5), 128);
}
