//! Waypoint visibility: where each waypoint sits on screen, or which side it is off to.
//!
//! Waypoint anchors are converted into strip pixels once, when a panorama is
//! installed ([`place_waypoints`]). Every offset change then runs
//! [`resolve`], which tests the three wrap-around copies of each anchor
//! (`anchor - offset`, shifted by `0`, `+width` and `-width`) against the
//! viewport widened by a margin on both sides.
//!
//! - In view: the copy closest to the viewport center is the one rendered,
//!   with a render priority that falls off with distance from the center.
//! - Off screen: the first copy left of the viewport or right of it decides
//!   the side; the waypoint joins that side's edge summary together with its
//!   distance from the edge. Summaries are sorted closest first.
//!
//! The resolver is a pure function of its inputs and owns no state; its
//! output is keyed by [`WaypointId`], never by a presentation handle.

#[cfg(test)]
#[path = "visibility_test.rs"]
mod visibility_test;

use serde::{Deserialize, Serialize};

use crate::consts::{PRIORITY_BASE, PRIORITY_DISTANCE_DIVISOR, PRIORITY_MIN};
use crate::coords::Strip;
use crate::tour::{Panorama, PanoramaId, Tour};

/// Stable identity of a waypoint: its panorama and its position in that panorama's list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaypointId {
    pub panorama_id: PanoramaId,
    pub index: usize,
}

/// A waypoint of the current panorama with its anchor in strip pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWaypoint {
    pub id: WaypointId,
    pub target_panorama_id: PanoramaId,
    pub label: String,
    /// Span midpoint converted to strip pixels.
    pub anchor_px: f64,
    pub vertical_percent: f64,
    pub scale: f64,
    pub forced_entry_angle_degrees: Option<f64>,
}

/// Which side of the viewport an off-screen waypoint lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// Where a single anchor lands relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Visible { screen_x: f64, center_distance: f64 },
    Offscreen { side: Side, screen_x: f64, edge_distance: f64 },
}

/// A waypoint to draw this frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleWaypoint {
    pub id: WaypointId,
    pub target_panorama_id: PanoramaId,
    pub label: String,
    pub screen_x: f64,
    pub vertical_percent: f64,
    pub scale: f64,
    pub center_distance: f64,
    /// Stacking priority; nearer the center stacks higher.
    pub priority: u32,
}

/// An off-screen waypoint as listed by an edge indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OffscreenWaypoint {
    pub id: WaypointId,
    pub label: String,
    /// Distance from the nearest viewport edge.
    pub distance: f64,
    /// Position of the copy that decided the side.
    pub screen_x: f64,
}

/// Off-screen waypoints on one side, closest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EdgeSummary {
    pub waypoints: Vec<OffscreenWaypoint>,
}

impl EdgeSummary {
    /// Whether the edge indicator for this side has anything to show.
    #[must_use]
    pub fn has_waypoints(&self) -> bool {
        !self.waypoints.is_empty()
    }

    /// Number of waypoints off this side.
    #[must_use]
    pub fn count(&self) -> usize {
        self.waypoints.len()
    }

    /// The waypoint closest to this edge.
    #[must_use]
    pub fn closest(&self) -> Option<&OffscreenWaypoint> {
        self.waypoints.first()
    }
}

/// Presentation data derived from one offset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisibilityReport {
    pub visible: Vec<VisibleWaypoint>,
    pub left: EdgeSummary,
    pub right: EdgeSummary,
}

impl VisibilityReport {
    /// Summary for one side.
    #[must_use]
    pub fn side(&self, side: Side) -> &EdgeSummary {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Look up a visible waypoint by id.
    #[must_use]
    pub fn find_visible(&self, id: &WaypointId) -> Option<&VisibleWaypoint> {
        self.visible.iter().find(|w| &w.id == id)
    }
}

/// Convert the waypoints of `panorama` into strip pixels.
#[must_use]
pub fn place_waypoints(panorama_id: &str, panorama: &Panorama, strip: &Strip, tour: &Tour) -> Vec<PlacedWaypoint> {
    let ratio = strip.scale_ratio();
    panorama
        .waypoints
        .iter()
        .enumerate()
        .map(|(index, wp)| PlacedWaypoint {
            id: WaypointId { panorama_id: panorama_id.to_owned(), index },
            target_panorama_id: wp.target_panorama_id.clone(),
            label: tour.waypoint_label(wp),
            anchor_px: wp.midpoint() * ratio,
            vertical_percent: wp.clamped_vertical_percent(),
            scale: wp.clamped_scale(),
            forced_entry_angle_degrees: wp.forced_entry_angle_degrees,
        })
        .collect()
}

/// The three wrap-around screen positions of an anchor: base, `+width`, `-width`.
#[must_use]
pub fn candidates(anchor_px: f64, offset: f64, scaled_width: f64) -> [f64; 3] {
    let base = anchor_px - offset;
    [base, base + scaled_width, base - scaled_width]
}

/// The copy of an anchor closest to the viewport center, visible or not.
#[must_use]
pub fn nearest_candidate(anchor_px: f64, offset: f64, view_width: f64, scaled_width: f64) -> f64 {
    let center = view_width / 2.0;
    candidates(anchor_px, offset, scaled_width)
        .into_iter()
        .fold(f64::NAN, |best, x| {
            if best.is_nan() || (x - center).abs() < (best - center).abs() { x } else { best }
        })
}

/// Place one anchor relative to a viewport `view_width` wide, widened by `margin`.
#[must_use]
pub fn place(anchor_px: f64, offset: f64, view_width: f64, scaled_width: f64, margin: f64) -> Placement {
    let center = view_width / 2.0;
    let all = candidates(anchor_px, offset, scaled_width);

    let in_view = all
        .iter()
        .copied()
        .filter(|&x| x >= -margin && x < view_width + margin)
        .min_by(|a, b| (a - center).abs().total_cmp(&(b - center).abs()));
    if let Some(screen_x) = in_view {
        return Placement::Visible { screen_x, center_distance: (screen_x - center).abs() };
    }

    for x in all {
        if x < 0.0 {
            return Placement::Offscreen { side: Side::Left, screen_x: x, edge_distance: -x };
        }
        if x >= view_width {
            return Placement::Offscreen { side: Side::Right, screen_x: x, edge_distance: x - view_width };
        }
    }
    // Only reachable with a degenerate width; report the base copy on the left.
    Placement::Offscreen { side: Side::Left, screen_x: all[0], edge_distance: all[0].abs() }
}

/// Stacking priority for a waypoint `center_distance` pixels from the viewport center.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn render_priority(center_distance: f64) -> u32 {
    let raw = (PRIORITY_BASE - center_distance / PRIORITY_DISTANCE_DIVISOR).floor();
    if raw.is_nan() || raw < f64::from(PRIORITY_MIN) {
        return PRIORITY_MIN;
    }
    raw as u32
}

/// Resolve every waypoint for the given (normalized) offset.
#[must_use]
pub fn resolve(
    waypoints: &[PlacedWaypoint],
    offset: f64,
    view_width: f64,
    scaled_width: f64,
    margin: f64,
) -> VisibilityReport {
    let mut report = VisibilityReport::default();
    for wp in waypoints {
        match place(wp.anchor_px, offset, view_width, scaled_width, margin) {
            Placement::Visible { screen_x, center_distance } => report.visible.push(VisibleWaypoint {
                id: wp.id.clone(),
                target_panorama_id: wp.target_panorama_id.clone(),
                label: wp.label.clone(),
                screen_x,
                vertical_percent: wp.vertical_percent,
                scale: wp.scale,
                center_distance,
                priority: render_priority(center_distance),
            }),
            Placement::Offscreen { side, screen_x, edge_distance } => {
                let entry = OffscreenWaypoint { id: wp.id.clone(), label: wp.label.clone(), distance: edge_distance, screen_x };
                match side {
                    Side::Left => report.left.waypoints.push(entry),
                    Side::Right => report.right.waypoints.push(entry),
                }
            }
        }
    }
    report.left.waypoints.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    report.right.waypoints.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    report
}
