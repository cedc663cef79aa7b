//! Tour model: panoramas, the waypoints linking them, and the panorama graph.
//!
//! This module defines the authored data the engine navigates over. A
//! `Panorama` is a node backed by one cylindrical image strip; a `Waypoint` is
//! a directed, clickable edge to another panorama. The graph (`Tour`) is keyed
//! by panorama id and is read-only once the viewer is constructed.
//!
//! Data flows into this layer from the configuration JSON. Pixel spans on
//! waypoints are in the panorama's authored units (`displayWidth`); they are
//! rescaled into strip units when the panorama is installed, not here.

#[cfg(test)]
#[path = "tour_test.rs"]
mod tour_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_VERTICAL_PERCENT, WAYPOINT_SCALE_MAX, WAYPOINT_SCALE_MIN};

/// Unique key of a panorama in the graph.
pub type PanoramaId = String;

/// A clickable hotspot linking one panorama to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    /// The panorama this waypoint leads to.
    pub target_panorama_id: PanoramaId,
    /// Start of the hotspot span, in authored pixel units.
    pub from_pixel: f64,
    /// End of the hotspot span, in authored pixel units. May be less than `from_pixel`.
    pub to_pixel: f64,
    /// Vertical position as a percentage of the viewport height.
    #[serde(default = "default_vertical_percent")]
    pub vertical_percent: f64,
    /// Strip angle to open the target at, overriding facing-direction continuity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forced_entry_angle_degrees: Option<f64>,
    /// Visual emphasis factor.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Display label. Falls back to the target panorama's name, then its id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

fn default_vertical_percent() -> f64 {
    DEFAULT_VERTICAL_PERCENT
}

fn default_scale() -> f64 {
    1.0
}

impl Waypoint {
    /// Anchor of the hotspot span in authored pixel units.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.from_pixel + self.to_pixel) / 2.0
    }

    /// Emphasis factor clamped to the accepted range. Non-finite values fall back to 1.
    #[must_use]
    pub fn clamped_scale(&self) -> f64 {
        if self.scale.is_finite() {
            self.scale.clamp(WAYPOINT_SCALE_MIN, WAYPOINT_SCALE_MAX)
        } else {
            1.0
        }
    }

    /// Vertical placement clamped to `0..=100`. Non-finite values fall back to the default.
    #[must_use]
    pub fn clamped_vertical_percent(&self) -> f64 {
        if self.vertical_percent.is_finite() {
            self.vertical_percent.clamp(0.0, 100.0)
        } else {
            DEFAULT_VERTICAL_PERCENT
        }
    }
}

/// A node of the navigation graph, backed by one cylindrical image strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panorama {
    /// Where the host fetches the strip image from.
    pub image_url: String,
    /// Authored logical width of the strip; waypoint spans are in these units.
    pub display_width: f64,
    /// Compass bearing of the strip's left edge. Falls back to the global default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub north_offset_degrees: Option<f64>,
    /// Outgoing waypoints, in authored order.
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
    /// Human-readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Longer description for info panels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Panorama {
    /// North offset for this panorama, using `global` when none is authored.
    #[must_use]
    pub fn north_offset_or(&self, global: f64) -> f64 {
        self.north_offset_degrees.unwrap_or(global)
    }
}

/// The panorama graph, keyed by panorama id.
///
/// Connectivity is not validated: waypoints may point at ids that are missing,
/// which surfaces as an error only when such a waypoint is followed.
#[derive(Debug, Clone, Default)]
pub struct Tour {
    panoramas: BTreeMap<PanoramaId, Panorama>,
}

impl Tour {
    /// Wrap an id → panorama mapping.
    #[must_use]
    pub fn new(panoramas: BTreeMap<PanoramaId, Panorama>) -> Self {
        Self { panoramas }
    }

    /// Look up a panorama by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Panorama> {
        self.panoramas.get(id)
    }

    /// Whether the graph contains `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.panoramas.contains_key(id)
    }

    /// Label shown for a waypoint: its own label, else the target's name, else the target id.
    #[must_use]
    pub fn waypoint_label(&self, waypoint: &Waypoint) -> String {
        if let Some(label) = &waypoint.label {
            return label.clone();
        }
        self.get(&waypoint.target_panorama_id)
            .and_then(|p| p.name.clone())
            .unwrap_or_else(|| waypoint.target_panorama_id.clone())
    }

    /// Number of panoramas in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.panoramas.len()
    }

    /// Returns `true` if the graph has no panoramas.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panoramas.is_empty()
    }
}
