//! Edge indicator visibility with a deferred hide.
//!
//! When a side runs out of off-screen waypoints its indicator starts fading
//! and a hide is scheduled. The hide is fire-and-forget: when it comes due it
//! only takes effect if the side is still empty and the indicator is still
//! fading, since a later visibility pass may have shown it again.

#[cfg(test)]
#[path = "edge_test.rs"]
mod edge_test;

use serde::Serialize;

use crate::visibility::{Side, VisibilityReport};

/// Presentation state of one edge indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorState {
    #[default]
    Hidden,
    Shown,
    FadingOut,
}

#[derive(Debug, Clone, Copy, Default)]
struct Indicator {
    state: IndicatorState,
    hide_at: Option<f64>,
}

impl Indicator {
    fn observe(&mut self, has_waypoints: bool, now_ms: f64, hide_delay_ms: f64) -> Option<IndicatorState> {
        if has_waypoints {
            self.hide_at = None;
            if self.state == IndicatorState::Shown {
                return None;
            }
            self.state = IndicatorState::Shown;
            return Some(self.state);
        }
        if self.state != IndicatorState::Shown {
            return None;
        }
        self.state = IndicatorState::FadingOut;
        self.hide_at = Some(now_ms + hide_delay_ms);
        Some(self.state)
    }

    fn expire(&mut self, still_empty: bool, now_ms: f64) -> Option<IndicatorState> {
        let at = self.hide_at?;
        if now_ms < at {
            return None;
        }
        self.hide_at = None;
        if self.state != IndicatorState::FadingOut || !still_empty {
            return None;
        }
        self.state = IndicatorState::Hidden;
        Some(self.state)
    }
}

/// Both edge indicators of a viewer.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeIndicators {
    left: Indicator,
    right: Indicator,
}

impl EdgeIndicators {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of one side's indicator.
    #[must_use]
    pub fn state(&self, side: Side) -> IndicatorState {
        match side {
            Side::Left => self.left.state,
            Side::Right => self.right.state,
        }
    }

    /// Whether a hide is pending for `side`.
    #[must_use]
    pub fn hide_pending(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left.hide_at.is_some(),
            Side::Right => self.right.hide_at.is_some(),
        }
    }

    /// Apply a fresh visibility pass; returns the state changes to present.
    pub fn observe(&mut self, report: &VisibilityReport, now_ms: f64, hide_delay_ms: f64) -> Vec<(Side, IndicatorState)> {
        let mut changes = Vec::new();
        if let Some(state) = self.left.observe(report.left.has_waypoints(), now_ms, hide_delay_ms) {
            changes.push((Side::Left, state));
        }
        if let Some(state) = self.right.observe(report.right.has_waypoints(), now_ms, hide_delay_ms) {
            changes.push((Side::Right, state));
        }
        changes
    }

    /// Run hides that have come due, rechecking against the latest pass.
    pub fn expire(&mut self, report: &VisibilityReport, now_ms: f64) -> Vec<(Side, IndicatorState)> {
        let mut changes = Vec::new();
        if let Some(state) = self.left.expire(!report.left.has_waypoints(), now_ms) {
            changes.push((Side::Left, state));
        }
        if let Some(state) = self.right.expire(!report.right.has_waypoints(), now_ms) {
            changes.push((Side::Right, state));
        }
        changes
    }
}
