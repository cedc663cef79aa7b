#![allow(clippy::float_cmp)]

use super::*;

fn waypoint(target: &str, from: f64, to: f64) -> Waypoint {
    Waypoint {
        target_panorama_id: target.to_owned(),
        from_pixel: from,
        to_pixel: to,
        vertical_percent: 50.0,
        forced_entry_angle_degrees: None,
        scale: 1.0,
        label: None,
    }
}

fn panorama(name: Option<&str>) -> Panorama {
    Panorama {
        image_url: "a.jpg".to_owned(),
        display_width: 3600.0,
        north_offset_degrees: None,
        waypoints: Vec::new(),
        name: name.map(str::to_owned),
        description: None,
    }
}

// --- Waypoint ---

#[test]
fn midpoint_is_average_of_span() {
    assert_eq!(waypoint("b", 100.0, 300.0).midpoint(), 200.0);
}

#[test]
fn midpoint_is_defined_for_reversed_span() {
    assert_eq!(waypoint("b", 300.0, 100.0).midpoint(), 200.0);
}

#[test]
fn midpoint_of_zero_width_span() {
    assert_eq!(waypoint("b", 0.0, 0.0).midpoint(), 0.0);
}

#[test]
fn scale_is_clamped_to_bounds() {
    let mut wp = waypoint("b", 0.0, 0.0);
    wp.scale = 0.01;
    assert_eq!(wp.clamped_scale(), WAYPOINT_SCALE_MIN);
    wp.scale = 50.0;
    assert_eq!(wp.clamped_scale(), WAYPOINT_SCALE_MAX);
    wp.scale = 2.5;
    assert_eq!(wp.clamped_scale(), 2.5);
    wp.scale = f64::NAN;
    assert_eq!(wp.clamped_scale(), 1.0);
}

#[test]
fn vertical_percent_is_clamped() {
    let mut wp = waypoint("b", 0.0, 0.0);
    wp.vertical_percent = -5.0;
    assert_eq!(wp.clamped_vertical_percent(), 0.0);
    wp.vertical_percent = 140.0;
    assert_eq!(wp.clamped_vertical_percent(), 100.0);
    wp.vertical_percent = f64::INFINITY;
    assert_eq!(wp.clamped_vertical_percent(), DEFAULT_VERTICAL_PERCENT);
}

#[test]
fn waypoint_deserializes_with_defaults() {
    let wp: Waypoint = serde_json::from_value(serde_json::json!({
        "targetPanoramaId": "hall",
        "fromPixel": 10,
        "toPixel": 30
    }))
    .expect("waypoint");
    assert_eq!(wp.target_panorama_id, "hall");
    assert_eq!(wp.vertical_percent, DEFAULT_VERTICAL_PERCENT);
    assert_eq!(wp.scale, 1.0);
    assert!(wp.forced_entry_angle_degrees.is_none());
    assert!(wp.label.is_none());
}

#[test]
fn waypoint_deserializes_forced_angle() {
    let wp: Waypoint = serde_json::from_value(serde_json::json!({
        "targetPanoramaId": "hall",
        "fromPixel": 10,
        "toPixel": 30,
        "forcedEntryAngleDegrees": 270,
        "scale": 3
    }))
    .expect("waypoint");
    assert_eq!(wp.forced_entry_angle_degrees, Some(270.0));
    assert_eq!(wp.scale, 3.0);
}

// --- Panorama ---

#[test]
fn north_offset_falls_back_to_global() {
    let mut p = panorama(None);
    assert_eq!(p.north_offset_or(12.0), 12.0);
    p.north_offset_degrees = Some(90.0);
    assert_eq!(p.north_offset_or(12.0), 90.0);
}

#[test]
fn panorama_deserializes_without_waypoints() {
    let p: Panorama = serde_json::from_value(serde_json::json!({
        "imageUrl": "lobby.jpg",
        "displayWidth": 4000
    }))
    .expect("panorama");
    assert_eq!(p.display_width, 4000.0);
    assert!(p.waypoints.is_empty());
}

// --- Tour ---

#[test]
fn empty_tour_is_empty() {
    let tour = Tour::default();
    assert!(tour.is_empty());
    assert_eq!(tour.len(), 0);
}

#[test]
fn tour_lookup_by_id() {
    let mut map = BTreeMap::new();
    map.insert("zeta".to_owned(), panorama(None));
    map.insert("alpha".to_owned(), panorama(None));
    let tour = Tour::new(map);
    assert_eq!(tour.len(), 2);
    assert!(tour.contains("zeta"));
    assert!(!tour.contains("beta"));
}

#[test]
fn waypoint_label_prefers_own_label() {
    let mut map = BTreeMap::new();
    map.insert("b".to_owned(), panorama(Some("Garden")));
    let tour = Tour::new(map);
    let mut wp = waypoint("b", 0.0, 0.0);
    wp.label = Some("Door".to_owned());
    assert_eq!(tour.waypoint_label(&wp), "Door");
}

#[test]
fn waypoint_label_falls_back_to_target_name_then_id() {
    let mut map = BTreeMap::new();
    map.insert("b".to_owned(), panorama(Some("Garden")));
    map.insert("c".to_owned(), panorama(None));
    let tour = Tour::new(map);
    assert_eq!(tour.waypoint_label(&waypoint("b", 0.0, 0.0)), "Garden");
    assert_eq!(tour.waypoint_label(&waypoint("c", 0.0, 0.0)), "c");
    assert_eq!(tour.waypoint_label(&waypoint("missing", 0.0, 0.0)), "missing");
}
