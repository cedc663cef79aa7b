//! Input model: the primitive commands a host feeds into the engine.
//!
//! Raw pointer, touch and keyboard events are captured by the host and
//! reduced to these commands before they reach the engine. Pixel deltas are
//! in viewport pixels: a positive delta turns the view to the right (the
//! strip scrolls left). Commands deserialize from a tagged JSON form so the
//! wasm host and the script runner can share them.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::tour::PanoramaId;
use crate::visibility::{Side, WaypointId};

/// Which device produced a manual rotation, selecting its sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    /// Mouse drag (default).
    #[default]
    Mouse,
    /// Touch drag.
    Touch,
}

/// A command consumed by [`crate::engine::ViewerCore::dispatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Direct drag rotation; cancels any running animation.
    ManualRotate {
        delta_px: f64,
        #[serde(default)]
        pointer: PointerKind,
    },
    /// Eased relative rotation, e.g. from arrow keys.
    StepRotate { step_px: f64 },
    /// Follow a waypoint of the current panorama.
    ClickWaypoint { waypoint: WaypointId },
    /// Turn to face north.
    ClickCompass,
    /// Bring the closest off-screen waypoint on one side into view.
    ClickEdge { side: Side },
    /// Switch panorama, or re-angle the current one when `panorama_id` is current.
    Navigate {
        panorama_id: PanoramaId,
        #[serde(default)]
        angle: Option<f64>,
    },
}
