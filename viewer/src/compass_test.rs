#![allow(clippy::float_cmp)]

use super::*;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn normalize_degrees_360_wraps_values() {
    assert_eq!(normalize_degrees_360(0.0), 0.0);
    assert_eq!(normalize_degrees_360(370.0), 10.0);
    assert_eq!(normalize_degrees_360(-10.0), 350.0);
    assert_eq!(normalize_degrees_360(720.0), 0.0);
}

#[test]
fn signed_angle_delta_picks_shortest_direction() {
    assert_eq!(signed_angle_delta_deg(10.0, 350.0), 20.0);
    assert_eq!(signed_angle_delta_deg(350.0, 10.0), -20.0);
    assert_eq!(signed_angle_delta_deg(0.0, 180.0), 180.0);
    assert_eq!(signed_angle_delta_deg(f64::NAN, 0.0), 0.0);
}

#[test]
fn bearing_adds_north_offset() {
    let strip = Strip { display_width: 3600.0, scaled_width: 3600.0 };
    // Center of an 800px viewport at offset 500 sits at pixel 900 = 90°.
    assert!(approx_eq(bearing_at(500.0, 800.0, &strip, 0.0), 90.0));
    assert!(approx_eq(bearing_at(500.0, 800.0, &strip, 30.0), 120.0));
    assert!(approx_eq(bearing_at(500.0, 800.0, &strip, 300.0), 30.0));
}

#[test]
fn cardinal_labels_bucket_by_45_degrees() {
    assert_eq!(cardinal_label(0.0), "N");
    assert_eq!(cardinal_label(359.0), "N");
    assert_eq!(cardinal_label(22.4), "N");
    assert_eq!(cardinal_label(22.5), "NE");
    assert_eq!(cardinal_label(90.0), "E");
    assert_eq!(cardinal_label(180.0), "S");
    assert_eq!(cardinal_label(270.0), "W");
    assert_eq!(cardinal_label(-45.0), "NW");
    assert_eq!(cardinal_label(725.0), "N");
}

#[test]
fn compass_starts_at_zero() {
    let c = Compass::new();
    assert_eq!(c.last_bearing(), 0.0);
}

#[test]
fn compass_moves_counter_clockwise_across_zero() {
    let mut c = Compass::new();
    assert_eq!(c.update(350.0), -10.0);
    assert_eq!(c.normalized(), 350.0);
}

#[test]
fn compass_is_monotonic_across_seam() {
    let mut c = Compass::new();
    c.update(340.0);
    let start = c.update(350.0);
    let mut prev = start;
    let sequence = [355.0, 2.0, 8.0];
    let steps = [5.0, 7.0, 6.0];
    for (bearing, step) in sequence.into_iter().zip(steps) {
        let next = c.update(bearing);
        assert!(next > prev, "{next} should exceed {prev}");
        assert!(approx_eq(next - prev, step), "jump {} != {step}", next - prev);
        prev = next;
    }
    assert!(approx_eq(c.normalized(), 8.0));
}

#[test]
fn compass_keeps_winding_past_full_turns() {
    let mut c = Compass::new();
    for lap in 0..3 {
        for quarter in [90.0, 180.0, 270.0, 0.0] {
            c.update(quarter);
        }
        assert!(approx_eq(c.last_bearing(), 360.0 * f64::from(lap + 1)));
    }
}

#[test]
fn compass_breaks_half_turn_tie_clockwise() {
    let mut c = Compass::new();
    assert_eq!(c.update(180.0), 180.0);
}

#[test]
fn compass_unchanged_bearing_is_stable() {
    let mut c = Compass::new();
    c.update(45.0);
    assert_eq!(c.update(45.0), 45.0);
}
