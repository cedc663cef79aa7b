#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn angle_approx_eq(a: f64, b: f64) -> bool {
    let d = (a - b).rem_euclid(360.0);
    d < 1e-6 || (360.0 - d) < 1e-6
}

fn strip(scaled: f64) -> Strip {
    Strip { display_width: scaled, scaled_width: scaled }
}

// --- scaled_width ---

#[test]
fn scaled_width_follows_viewport_height() {
    // 1000px tall image shown in a 500px viewport halves the strip.
    assert!(approx_eq(scaled_width(500.0, 1000.0, 8000.0), 4000.0));
}

#[test]
fn scaled_width_grows_with_viewport() {
    assert!(approx_eq(scaled_width(1000.0, 500.0, 3600.0), 7200.0));
}

#[test]
fn scaled_width_is_zero_for_missing_image_height() {
    assert_eq!(scaled_width(720.0, 0.0, 3600.0), 0.0);
}

#[test]
fn strip_from_image_is_not_ready_without_viewport() {
    let s = Strip::from_image(3600.0, 0.0, 1000.0);
    assert!(!s.is_ready());
}

#[test]
fn strip_from_image_is_ready_with_viewport() {
    let s = Strip::from_image(3600.0, 720.0, 720.0);
    assert!(s.is_ready());
    assert!(approx_eq(s.scaled_width, 3600.0));
}

#[test]
fn scale_ratio_maps_authored_units() {
    let s = Strip { display_width: 2000.0, scaled_width: 5000.0 };
    assert!(approx_eq(s.scale_ratio(), 2.5));
    let degenerate = Strip { display_width: 0.0, scaled_width: 5000.0 };
    assert_eq!(degenerate.scale_ratio(), 0.0);
}

// --- normalize ---

#[test]
fn normalize_keeps_in_range_values() {
    assert_eq!(normalize_offset(100.0, 3600.0), 100.0);
    assert_eq!(normalize_offset(0.0, 3600.0), 0.0);
}

#[test]
fn normalize_wraps_negative_offsets_with_floor_modulo() {
    assert_eq!(normalize_offset(-400.0, 3600.0), 3200.0);
    assert_eq!(normalize_offset(-3700.0, 3600.0), 3500.0);
}

#[test]
fn normalize_wraps_large_offsets() {
    assert_eq!(normalize_offset(3600.0, 3600.0), 0.0);
    assert_eq!(normalize_offset(7300.0, 3600.0), 100.0);
}

#[test]
fn normalize_tiny_negative_stays_below_width() {
    let n = normalize_offset(-1e-20, 3600.0);
    assert!((0.0..3600.0).contains(&n));
}

#[test]
fn normalize_is_in_range_and_idempotent() {
    let widths = [1.0, 37.5, 800.0, 3600.0, 12345.678];
    let offsets = [-1e9, -54321.5, -3600.0, -0.5, 0.0, 0.25, 799.9, 3600.0, 1e7 + 0.3];
    for &w in &widths {
        for &x in &offsets {
            let n = normalize_offset(x, w);
            assert!(n >= 0.0 && n < w, "normalize({x}, {w}) = {n}");
            assert_eq!(normalize_offset(n, w), n, "not idempotent for ({x}, {w})");
        }
    }
}

#[test]
fn normalize_without_width_is_noop() {
    assert_eq!(normalize_offset(-42.0, 0.0), -42.0);
    assert_eq!(strip(0.0).normalize(123.0), 123.0);
}

// --- angle_to_offset / offset_to_angle ---

#[test]
fn angle_zero_centers_strip_start() {
    // 3600px strip, 800px viewport: angle 0 puts pixel 0 at the center.
    let s = strip(3600.0);
    let offset = s.angle_to_offset(0.0, 800.0);
    assert_eq!(offset, -400.0);
    assert_eq!(s.normalize(offset), 3200.0);
}

#[test]
fn angle_ninety_is_quarter_strip() {
    let s = strip(3600.0);
    assert!(approx_eq(s.angle_to_offset(90.0, 800.0), 500.0));
}

#[test]
fn offset_to_angle_inverts_angle_to_offset() {
    let s = strip(5000.0);
    for angle in [0.0, 1.5, 45.0, 90.0, 179.9, 180.0, 270.0, 359.0, 400.0, -30.0] {
        let offset = s.normalize(s.angle_to_offset(angle, 1280.0));
        let back = s.offset_to_angle(offset, 1280.0);
        assert!(angle_approx_eq(back, angle), "angle {angle} came back as {back}");
    }
}

#[test]
fn offset_to_angle_is_normalized() {
    let s = strip(3600.0);
    let a = s.offset_to_angle(3500.0, 800.0);
    assert!((0.0..360.0).contains(&a));
    assert!(approx_eq(a, 30.0));
}

#[test]
fn offset_to_angle_without_width_is_zero() {
    assert_eq!(offset_to_angle(100.0, 800.0, 0.0), 0.0);
}

#[test]
fn degrees_to_px_scales_linearly() {
    let s = strip(7200.0);
    assert!(approx_eq(s.degrees_to_px(90.0), 1800.0));
    assert!(approx_eq(s.degrees_to_px(-45.0), -900.0));
}
