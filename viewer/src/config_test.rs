#![allow(clippy::float_cmp)]

use super::*;

const MINIMAL: &str = r#"{
    "panoramaGraph": {
        "lobby": { "imageUrl": "lobby.jpg", "displayWidth": 3600 },
        "garden": { "imageUrl": "garden.jpg", "displayWidth": 4000 }
    }
}"#;

#[test]
fn from_json_applies_defaults() {
    let cfg = ViewerConfig::from_json(MINIMAL).expect("config");
    assert!(cfg.start_panorama_id.is_none());
    assert_eq!(cfg.start_direction_degrees, 0.0);
    assert_eq!(cfg.touch_sensitivity_multiplier, 1.0);
    assert_eq!(cfg.drag_sensitivity_multiplier, 1.0);
    assert_eq!(cfg.global_north_offset_degrees, 0.0);
    assert_eq!(cfg.waypoint_transition, TransitionStyle::Zoom);
    assert_eq!(cfg.tuning, Tuning::default());
    assert_eq!(cfg.panorama_graph.len(), 2);
}

#[test]
fn tuning_defaults_match_consts() {
    let t = Tuning::default();
    assert_eq!(t.visibility_margin_px, 50.0);
    assert_eq!(t.ease_factor, 0.15);
    assert_eq!(t.snap_threshold_px, 1.0);
}

#[test]
fn partial_tuning_keeps_other_defaults() {
    let cfg = ViewerConfig::from_json(
        r#"{ "tuning": { "easeFactor": 0.5 }, "panoramaGraph": {} }"#,
    )
    .expect("config");
    assert_eq!(cfg.tuning.ease_factor, 0.5);
    assert_eq!(cfg.tuning.visibility_margin_px, consts::VISIBILITY_MARGIN_PX);
}

#[test]
fn transition_style_parses_lowercase() {
    let cfg = ViewerConfig::from_json(r#"{ "waypointTransition": "fade" }"#).expect("config");
    assert_eq!(cfg.waypoint_transition, TransitionStyle::Fade);
}

#[test]
fn from_json_rejects_malformed_input() {
    let err = ViewerConfig::from_json("{ not json").expect_err("should fail");
    assert!(matches!(err, ViewerError::InvalidConfig(_)));
}

#[test]
fn from_json_rejects_wrong_types() {
    let err = ViewerConfig::from_json(r#"{ "startDirectionDegrees": "east" }"#).expect_err("should fail");
    assert!(matches!(err, ViewerError::InvalidConfig(_)));
}

#[test]
fn start_panorama_defaults_to_first_id() {
    let cfg = ViewerConfig::from_json(MINIMAL).expect("config");
    assert_eq!(cfg.start_panorama().expect("start"), "garden");
}

#[test]
fn start_panorama_uses_configured_id() {
    let mut cfg = ViewerConfig::from_json(MINIMAL).expect("config");
    cfg.start_panorama_id = Some("lobby".to_owned());
    assert_eq!(cfg.start_panorama().expect("start"), "lobby");
}

#[test]
fn start_panorama_rejects_unknown_id() {
    let mut cfg = ViewerConfig::from_json(MINIMAL).expect("config");
    cfg.start_panorama_id = Some("attic".to_owned());
    let err = cfg.start_panorama().expect_err("should fail");
    assert!(matches!(err, ViewerError::UnknownStartPanorama(id) if id == "attic"));
}

#[test]
fn start_panorama_rejects_empty_graph() {
    let cfg = ViewerConfig::from_json("{}").expect("config");
    assert!(matches!(cfg.start_panorama(), Err(ViewerError::NoPanoramas)));
}

#[test]
fn take_tour_moves_all_panoramas() {
    let mut cfg = ViewerConfig::from_json(MINIMAL).expect("config");
    let tour = cfg.take_tour();
    assert_eq!(tour.len(), 2);
    assert!(tour.contains("lobby"));
    assert!(cfg.panorama_graph.is_empty());
}

#[test]
fn validate_accepts_defaults() {
    let cfg = ViewerConfig::from_json(MINIMAL).expect("config");
    cfg.validate().expect("defaults are valid");
}

#[test]
fn validate_rejects_stalled_or_divergent_easing() {
    for ease in [0.0, -0.1, 2.0, 3.0, f64::NAN] {
        let mut cfg = ViewerConfig::from_json(MINIMAL).expect("config");
        cfg.tuning.ease_factor = ease;
        let err = cfg.validate().expect_err("ease should be rejected");
        assert!(matches!(err, ViewerError::InvalidTuning { field: "easeFactor", .. }), "ease {ease}");
    }
}

#[test]
fn validate_rejects_non_positive_snap() {
    let mut cfg = ViewerConfig::from_json(MINIMAL).expect("config");
    cfg.tuning.snap_threshold_px = 0.0;
    let err = cfg.validate().expect_err("should fail");
    assert!(matches!(err, ViewerError::InvalidTuning { field: "snapThresholdPx", .. }));
}

#[test]
fn validate_rejects_negative_durations_and_margin() {
    let mut cfg = ViewerConfig::from_json(r#"{ "tuning": { "fadeMs": -5 } }"#).expect("config");
    let err = cfg.validate().expect_err("should fail");
    assert!(matches!(err, ViewerError::InvalidTuning { field: "fadeMs", value } if value == -5.0));

    cfg.tuning = Tuning { visibility_margin_px: -1.0, ..Tuning::default() };
    let err = cfg.validate().expect_err("should fail");
    assert!(matches!(err, ViewerError::InvalidTuning { field: "visibilityMarginPx", .. }));
}

#[test]
fn validate_accepts_zero_durations() {
    let cfg = ViewerConfig::from_json(
        r#"{ "tuning": { "fadeMs": 0, "zoomInMs": 0, "zoomOutMs": 0, "arrivalSettleMs": 0, "edgeHideDelayMs": 0 } }"#,
    )
    .expect("config");
    cfg.validate().expect("zero durations are valid");
}

#[test]
fn validate_rejects_unusable_display_width() {
    for width in [0.0, -3600.0, f64::INFINITY] {
        let mut cfg = ViewerConfig::from_json(MINIMAL).expect("config");
        if let Some(garden) = cfg.panorama_graph.get_mut("garden") {
            garden.display_width = width;
        }
        let err = cfg.validate().expect_err("width should be rejected");
        assert!(matches!(err, ViewerError::InvalidPanorama(ref id) if id == "garden"), "width {width}");
    }
}
