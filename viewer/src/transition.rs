//! Transition phases of the navigation state machine.
//!
//! A viewer is always in exactly one [`TransitionPhase`]. Everything other
//! than `Idle` is an in-flight transition, and only one can exist at a time:
//! requests to switch panorama while a transition is in flight are dropped.
//! Timed stages carry their own deadline, so leaving a stage discards the
//! pending timeout with it.
//!
//! ```text
//! Idle ──navigate──▶ FadeTransition(FadeOut) ──▶ Loading ──▶ FadeTransition(FadeIn) ──▶ Idle
//! Idle ──waypoint──▶ ZoomTransition(Approach ▶ ScaleUp ▶ FadeOut) ──▶ Loading
//!                         ──▶ ZoomTransition(Arrive ▶ ScaleDown) ──▶ Idle
//! (start) ─────────▶ Loading ──▶ FadeTransition(FadeIn) ──▶ Idle
//! Loading ──asset failed──▶ Idle
//! ```

#[cfg(test)]
#[path = "transition_test.rs"]
mod transition_test;

use crate::tour::PanoramaId;

/// Where a transition is headed.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSwitch {
    /// Panorama to install.
    pub target: PanoramaId,
    /// Strip angle to center once installed.
    pub entry_angle: f64,
}

/// Which transition a load belongs to, deciding how it finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// First panorama of the viewer; nothing to fade out.
    Initial,
    Fade,
    Zoom,
}

/// Stages of a plain cross-fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeStage {
    /// Old panorama fading to transparent.
    FadeOut,
    /// New panorama fading in.
    FadeIn,
}

/// Stages of a zoom through a waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomStage {
    /// Panning to center the clicked waypoint; ends when the rotation settles.
    Approach,
    /// Scaling up toward the waypoint.
    ScaleUp,
    /// Old panorama fading to transparent at full zoom.
    FadeOut,
    /// New panorama installed over-scaled and still transparent.
    Arrive,
    /// Scaling back to normal while fading in.
    ScaleDown,
}

/// A stage of a timed transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S> {
    pub switch: PendingSwitch,
    pub stage: S,
    /// Clock time at which the stage ends; `None` for stages ended by an event.
    pub deadline_ms: Option<f64>,
}

impl<S> Transition<S> {
    /// Whether the stage's deadline has passed at `now_ms`.
    #[must_use]
    pub fn is_due(&self, now_ms: f64) -> bool {
        self.deadline_ms.is_some_and(|deadline| now_ms >= deadline)
    }
}

/// Lifecycle state of the viewer's panorama transitions.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TransitionPhase {
    /// No transition in flight; all interaction enabled.
    #[default]
    Idle,
    /// Asset fetch outstanding for `switch.target`.
    Loading { switch: PendingSwitch, kind: LoadKind },
    FadeTransition(Transition<FadeStage>),
    ZoomTransition(Transition<ZoomStage>),
}

impl TransitionPhase {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Short name for logs and snapshots.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading { .. } => "loading",
            Self::FadeTransition(_) => "fade",
            Self::ZoomTransition(_) => "zoom",
        }
    }

    /// Panorama the in-flight transition is headed to.
    #[must_use]
    pub fn target(&self) -> Option<&PanoramaId> {
        match self {
            Self::Idle => None,
            Self::Loading { switch, .. } => Some(&switch.target),
            Self::FadeTransition(t) => Some(&t.switch.target),
            Self::ZoomTransition(t) => Some(&t.switch.target),
        }
    }
}
