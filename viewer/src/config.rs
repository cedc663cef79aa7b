//! Viewer configuration parsed from the host's JSON options.
//!
//! Every option has a default except the panorama graph itself. Tuning knobs
//! default to the values in [`crate::consts`] and may be overridden one by one.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::error::ViewerError;
use crate::tour::{Panorama, PanoramaId, Tour};

/// How a waypoint click moves to the next panorama.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionStyle {
    /// Cross-fade without moving the view.
    Fade,
    /// Pan to the waypoint, scale up through it, then settle in the target.
    #[default]
    Zoom,
}

/// Numeric knobs for visibility, easing and transition timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tuning {
    /// Room beyond each viewport edge in which a waypoint still counts as on screen.
    pub visibility_margin_px: f64,
    /// Fraction of the remaining distance covered per animation tick.
    pub ease_factor: f64,
    /// Remaining distance below which an animation snaps to its target.
    pub snap_threshold_px: f64,
    /// Opacity fade duration in milliseconds.
    pub fade_ms: f64,
    /// Zoom-in emphasis duration in milliseconds.
    pub zoom_in_ms: f64,
    /// Scale-back duration after a zoom arrival, in milliseconds.
    pub zoom_out_ms: f64,
    /// Pause between the over-scaled arrival and the scale-back, in milliseconds.
    pub arrival_settle_ms: f64,
    /// Delay between an edge indicator fading and being hidden, in milliseconds.
    pub edge_hide_delay_ms: f64,
    /// Scale reached while zooming toward a waypoint.
    pub zoom_scale: f64,
    /// Scale the destination starts from on a zoom arrival.
    pub arrival_scale: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            visibility_margin_px: consts::VISIBILITY_MARGIN_PX,
            ease_factor: consts::EASE_FACTOR,
            snap_threshold_px: consts::SNAP_THRESHOLD_PX,
            fade_ms: consts::FADE_MS,
            zoom_in_ms: consts::ZOOM_IN_MS,
            zoom_out_ms: consts::ZOOM_OUT_MS,
            arrival_settle_ms: consts::ARRIVAL_SETTLE_MS,
            edge_hide_delay_ms: consts::EDGE_HIDE_DELAY_MS,
            zoom_scale: consts::ZOOM_SCALE,
            arrival_scale: consts::ARRIVAL_SCALE,
        }
    }
}

impl Tuning {
    /// Check every knob against the range the animator and phase timers need.
    ///
    /// The easing factor must lie strictly between 0 and 2 so each tick closes
    /// part of the remaining distance, and the snap threshold must be positive
    /// so an animation always ends. Margins and durations may be zero, scales
    /// must be positive.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidTuning`] naming the first offending knob.
    pub fn validate(&self) -> Result<(), ViewerError> {
        let checks: [(&'static str, f64, fn(f64) -> bool); 10] = [
            ("easeFactor", self.ease_factor, |v| v > 0.0 && v < 2.0),
            ("snapThresholdPx", self.snap_threshold_px, |v| v > 0.0),
            ("visibilityMarginPx", self.visibility_margin_px, |v| v >= 0.0),
            ("fadeMs", self.fade_ms, |v| v >= 0.0),
            ("zoomInMs", self.zoom_in_ms, |v| v >= 0.0),
            ("zoomOutMs", self.zoom_out_ms, |v| v >= 0.0),
            ("arrivalSettleMs", self.arrival_settle_ms, |v| v >= 0.0),
            ("edgeHideDelayMs", self.edge_hide_delay_ms, |v| v >= 0.0),
            ("zoomScale", self.zoom_scale, |v| v > 0.0),
            ("arrivalScale", self.arrival_scale, |v| v > 0.0),
        ];
        for (field, value, in_range) in checks {
            if !value.is_finite() || !in_range(value) {
                return Err(ViewerError::InvalidTuning { field, value });
            }
        }
        Ok(())
    }
}

/// Options recognised by the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerConfig {
    /// Panorama shown first. Defaults to the first id of the graph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_panorama_id: Option<PanoramaId>,
    /// Strip angle the start panorama opens at.
    #[serde(default)]
    pub start_direction_degrees: f64,
    /// Multiplier applied to touch drag deltas.
    #[serde(default = "default_sensitivity")]
    pub touch_sensitivity_multiplier: f64,
    /// Multiplier applied to mouse drag deltas.
    #[serde(default = "default_sensitivity")]
    pub drag_sensitivity_multiplier: f64,
    /// North offset for panoramas that don't author their own.
    #[serde(default)]
    pub global_north_offset_degrees: f64,
    /// Transition used when a waypoint is clicked.
    #[serde(default)]
    pub waypoint_transition: TransitionStyle,
    /// Numeric knobs.
    #[serde(default)]
    pub tuning: Tuning,
    /// The panorama graph.
    #[serde(default)]
    pub panorama_graph: BTreeMap<PanoramaId, Panorama>,
}

fn default_sensitivity() -> f64 {
    1.0
}

impl ViewerConfig {
    /// Parse a config from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidConfig`] if the JSON is malformed or has wrong types.
    pub fn from_json(raw: &str) -> Result<Self, ViewerError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reject tuning and panoramas the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidTuning`] for an out-of-range knob and
    /// [`ViewerError::InvalidPanorama`] for a panorama whose display width is
    /// not a finite positive number.
    pub fn validate(&self) -> Result<(), ViewerError> {
        self.tuning.validate()?;
        for (id, panorama) in &self.panorama_graph {
            if !panorama.display_width.is_finite() || panorama.display_width <= 0.0 {
                return Err(ViewerError::InvalidPanorama(id.clone()));
            }
        }
        Ok(())
    }

    /// Resolve the id of the panorama to open first.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::NoPanoramas`] for an empty graph and
    /// [`ViewerError::UnknownStartPanorama`] when the configured start id is missing.
    pub fn start_panorama(&self) -> Result<PanoramaId, ViewerError> {
        if self.panorama_graph.is_empty() {
            return Err(ViewerError::NoPanoramas);
        }
        match &self.start_panorama_id {
            Some(id) if self.panorama_graph.contains_key(id) => Ok(id.clone()),
            Some(id) => Err(ViewerError::UnknownStartPanorama(id.clone())),
            None => self.panorama_graph.keys().next().cloned().ok_or(ViewerError::NoPanoramas),
        }
    }

    /// Move the panorama graph out into a [`Tour`], leaving the graph empty.
    pub fn take_tour(&mut self) -> Tour {
        Tour::new(std::mem::take(&mut self.panorama_graph))
    }
}
