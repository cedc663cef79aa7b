//! Navigation state machine and the host-facing engine.
//!
//! DESIGN
//! ======
//! `ViewerCore` owns the panorama graph and the single mutable
//! [`ViewerState`] record. The other modules are pure functions over that
//! state plus panorama data. All work runs on the host's frame timeline:
//! commands and asset results arrive between frames, and [`ViewerCore::tick`]
//! advances the rotation animation, transition stages and deferred hides.
//! Every offset change recomputes visibility and the compass bearing before
//! returning, so neither is ever stale relative to the offset.
//!
//! Side effects are returned as [`Action`]s for the host to apply to its
//! render surface; the core never touches the DOM.
//!
//! ERROR HANDLING
//! ==============
//! Input that arrives before the current panorama is ready, and switch
//! requests made while a transition is in flight, are dropped with a `debug`
//! log. A failed asset load aborts to `Idle` and leaves the previous
//! panorama and offset untouched; the failure is reported as
//! [`Action::Error`].

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;

use crate::animator::{RotationAnimator, Step};
use crate::compass::{Compass, bearing_at, cardinal_label, signed_angle_delta_deg};
use crate::config::{TransitionStyle, ViewerConfig};
use crate::coords::Strip;
use crate::edge::{EdgeIndicators, IndicatorState};
use crate::error::ViewerError;
use crate::input::{Command, PointerKind};
use crate::tour::{PanoramaId, Tour};
use crate::transition::{FadeStage, LoadKind, PendingSwitch, Transition, TransitionPhase, ZoomStage};
use crate::visibility::{self, PlacedWaypoint, Side, VisibilityReport, WaypointId};

/// Side effects returned from engine calls for the host to apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Fetch and decode the image for a panorama, then report back.
    RequestAsset { panorama_id: PanoramaId, url: String },
    /// Scroll the strip so `offset` is at the viewport's left edge.
    SetOffset { offset: f64 },
    /// Set the panorama layer's opacity.
    SetOpacity { opacity: f64 },
    /// Scale the panorama layer around a horizontal origin.
    SetTransform { scale: f64, origin_x: f64 },
    /// Show or hide the loading spinner.
    ShowSpinner { visible: bool },
    /// Change an edge indicator's presentation state.
    EdgeIndicator { side: Side, state: IndicatorState },
    /// A new panorama became current.
    PanoramaChanged { panorama_id: PanoramaId },
    /// Something the user should hear about went wrong.
    Error { code: &'static str, message: String },
    /// Waypoints or compass changed; redraw them.
    RenderNeeded,
}

impl Action {
    fn error(err: &ViewerError) -> Self {
        Self::Error { code: err.error_code(), message: err.to_string() }
    }
}

/// The panorama on screen, with everything derived from its decoded image.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPanorama {
    pub id: PanoramaId,
    pub strip: Strip,
    pub natural_width: f64,
    pub natural_height: f64,
    pub north_offset: f64,
    /// Strip angle the panorama was opened at.
    pub entry_angle: f64,
    pub waypoints: Vec<PlacedWaypoint>,
}

/// Mutable per-viewer state, owned by [`ViewerCore`].
#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    /// `None` until the first panorama has loaded.
    pub current: Option<LoadedPanorama>,
    /// Horizontal pan position. Normalized except mid-animation.
    pub offset: f64,
    pub animator: RotationAnimator,
    pub compass: Compass,
    /// Panoramas fetched at least once; skips the spinner, never the rescale.
    pub loaded: HashSet<PanoramaId>,
    pub phase: TransitionPhase,
    pub visibility: VisibilityReport,
    pub edges: EdgeIndicators,
}

/// Serializable view of the presentation state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub panorama_id: Option<PanoramaId>,
    pub offset: f64,
    /// Continuous needle angle; may leave `[0, 360)`.
    pub bearing: f64,
    pub normalized_bearing: f64,
    pub cardinal: &'static str,
    pub phase: &'static str,
    pub animating: bool,
    pub visibility: VisibilityReport,
}

/// Core engine state: all logic that doesn't depend on the browser.
///
/// Separated from `Viewer` so it can be tested without WASM/browser dependencies.
pub struct ViewerCore {
    pub tour: Tour,
    pub config: ViewerConfig,
    pub start_panorama: PanoramaId,
    pub state: ViewerState,
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Clock time of the latest frame tick, in milliseconds.
    pub now_ms: f64,
}

impl ViewerCore {
    /// Build a viewer from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidTuning`] or [`ViewerError::InvalidPanorama`]
    /// when validation fails, [`ViewerError::NoPanoramas`] for an empty graph and
    /// [`ViewerError::UnknownStartPanorama`] for a missing start id.
    pub fn new(mut config: ViewerConfig) -> Result<Self, ViewerError> {
        config.validate()?;
        let start_panorama = config.start_panorama()?;
        let tour = config.take_tour();
        Ok(Self {
            tour,
            config,
            start_panorama,
            state: ViewerState::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            now_ms: 0.0,
        })
    }

    /// Build a viewer from configuration JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidConfig`] for malformed JSON, otherwise as [`ViewerCore::new`].
    pub fn from_json(raw: &str) -> Result<Self, ViewerError> {
        Self::new(ViewerConfig::from_json(raw)?)
    }

    // --- Host inputs ---

    /// Record the viewport size. Sizes are read at the moment of use, so this
    /// never retargets a running animation.
    ///
    /// A panorama installed before the viewport height was known is rescaled
    /// and re-centered on its entry angle here.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.viewport_width = width.max(0.0);
        self.viewport_height = height.max(0.0);

        let Some(current) = &self.state.current else {
            return Vec::new();
        };
        if current.strip.is_ready() || self.viewport_height <= 0.0 {
            return Vec::new();
        }
        let (id, w, h, entry) = (current.id.clone(), current.natural_width, current.natural_height, current.entry_angle);
        let Some(rebuilt) = self.build_loaded(&id, w, h, entry) else {
            return Vec::new();
        };
        let offset = rebuilt.strip.normalize(rebuilt.strip.angle_to_offset(entry, self.viewport_width));
        self.state.current = Some(rebuilt);
        self.apply_offset(offset)
    }

    /// Begin loading the start panorama.
    pub fn start(&mut self) -> Vec<Action> {
        if self.state.current.is_some() || !self.state.phase.is_idle() {
            debug!(phase = self.state.phase.name(), "start ignored: viewer already started");
            return Vec::new();
        }
        let switch = PendingSwitch {
            target: self.start_panorama.clone(),
            entry_angle: self.config.start_direction_degrees,
        };
        self.begin_load(switch, LoadKind::Initial)
    }

    /// Switch to `panorama_id` with a fade.
    ///
    /// Without `angle`, the target opens facing the direction currently
    /// looked at. Naming the current panorama with an angle re-centers it
    /// immediately without a transition.
    pub fn navigate_to(&mut self, panorama_id: &str, angle: Option<f64>) -> Vec<Action> {
        if self.current_panorama_id() == Some(panorama_id) {
            let Some(angle) = angle else {
                debug!(panorama = panorama_id, "navigate ignored: already current");
                return Vec::new();
            };
            return self.re_angle(angle);
        }
        if !self.state.phase.is_idle() {
            debug!(panorama = panorama_id, phase = self.state.phase.name(), "navigate rejected: transition in flight");
            return Vec::new();
        }
        if !self.tour.contains(panorama_id) {
            return vec![Action::error(&ViewerError::UnknownPanorama(panorama_id.to_owned()))];
        }
        let entry_angle = angle.unwrap_or_else(|| self.departure_angle());
        let switch = PendingSwitch { target: panorama_id.to_owned(), entry_angle };
        if self.state.current.is_none() {
            return self.begin_load(switch, LoadKind::Initial);
        }
        self.begin_fade(switch)
    }

    /// Follow a waypoint of the current panorama.
    pub fn click_waypoint(&mut self, id: &WaypointId) -> Vec<Action> {
        if !self.state.phase.is_idle() {
            debug!(phase = self.state.phase.name(), "waypoint click rejected: transition in flight");
            return Vec::new();
        }
        let Some(current) = self.ready_panorama() else {
            debug!("waypoint click ignored: panorama not ready");
            return Vec::new();
        };
        if current.id != id.panorama_id {
            debug!(waypoint = ?id, "waypoint click ignored: stale panorama");
            return Vec::new();
        }
        let Some(waypoint) = current.waypoints.get(id.index).cloned() else {
            debug!(waypoint = ?id, "waypoint click ignored: no such waypoint");
            return Vec::new();
        };
        let target = waypoint.target_panorama_id.clone();
        if !self.tour.contains(&target) {
            return vec![Action::error(&ViewerError::UnknownPanorama(target))];
        }

        let entry_angle = waypoint
            .forced_entry_angle_degrees
            .unwrap_or_else(|| self.departure_angle());
        let switch = PendingSwitch { target, entry_angle };
        match self.config.waypoint_transition {
            TransitionStyle::Fade => self.begin_fade(switch),
            TransitionStyle::Zoom => self.begin_zoom(switch, &waypoint),
        }
    }

    /// Rotate directly by a drag delta. Always cancels a running animation.
    pub fn manual_rotate_by(&mut self, delta_px: f64, pointer: PointerKind) -> Vec<Action> {
        self.state.animator.cancel();
        let Some(strip) = self.ready_strip() else {
            debug!("manual rotation ignored: panorama not ready");
            return Vec::new();
        };
        let sensitivity = match pointer {
            PointerKind::Mouse => self.config.drag_sensitivity_multiplier,
            PointerKind::Touch => self.config.touch_sensitivity_multiplier,
        };
        let offset = strip.normalize(self.state.offset + delta_px * sensitivity);
        self.apply_offset(offset)
    }

    /// Schedule an eased relative rotation; extends one already running.
    ///
    /// Ignored during a zoom transition, whose approach pan owns the animator.
    pub fn step_rotate(&mut self, step_px: f64) -> Vec<Action> {
        if self.ready_strip().is_none() {
            debug!("step rotation ignored: panorama not ready");
            return Vec::new();
        }
        if matches!(self.state.phase, TransitionPhase::ZoomTransition(_)) {
            debug!(step_px, "step rotation ignored: zoom transition in flight");
            return Vec::new();
        }
        self.state.animator.animate_to(self.state.offset, step_px);
        Vec::new()
    }

    /// Turn the shortest way round to face north.
    pub fn click_compass(&mut self) -> Vec<Action> {
        let Some(current) = self.ready_panorama() else {
            return Vec::new();
        };
        let bearing = bearing_at(
            current.strip.normalize(self.state.offset),
            self.viewport_width,
            &current.strip,
            current.north_offset,
        );
        let delta_px = current.strip.degrees_to_px(signed_angle_delta_deg(0.0, bearing));
        self.state.animator.cancel();
        self.state.animator.animate_to(self.state.offset, delta_px);
        Vec::new()
    }

    /// Center the closest off-screen waypoint on `side`.
    pub fn click_edge(&mut self, side: Side) -> Vec<Action> {
        if self.ready_strip().is_none() {
            return Vec::new();
        }
        let Some(closest) = self.state.visibility.side(side).closest() else {
            debug!(?side, "edge click ignored: nothing off this side");
            return Vec::new();
        };
        let delta_px = closest.screen_x - self.viewport_width / 2.0;
        self.state.animator.cancel();
        self.state.animator.animate_to(self.state.offset, delta_px);
        Vec::new()
    }

    /// Report a decoded image for a requested panorama.
    pub fn asset_loaded(&mut self, panorama_id: &str, natural_width: f64, natural_height: f64) -> Vec<Action> {
        let TransitionPhase::Loading { switch, .. } = &self.state.phase else {
            debug!(panorama = panorama_id, "asset result ignored: nothing loading");
            return Vec::new();
        };
        if switch.target != panorama_id {
            debug!(panorama = panorama_id, "asset result ignored: stale request");
            return Vec::new();
        }
        if !(natural_width > 0.0 && natural_height > 0.0) {
            return self.fail_load(panorama_id, "decoded image has no size");
        }
        let TransitionPhase::Loading { switch, kind } = std::mem::take(&mut self.state.phase) else {
            return Vec::new();
        };
        let Some(loaded) = self.build_loaded(&switch.target, natural_width, natural_height, switch.entry_angle) else {
            return self.fail_load(panorama_id, "panorama missing from graph");
        };

        info!(
            panorama = %loaded.id,
            scaled_width = loaded.strip.scaled_width,
            entry_angle = switch.entry_angle,
            "panorama installed"
        );
        let offset = loaded.strip.normalize(loaded.strip.angle_to_offset(switch.entry_angle, self.viewport_width));
        self.state.loaded.insert(loaded.id.clone());
        self.state.animator.cancel();
        self.state.current = Some(loaded);

        let mut actions = vec![
            Action::ShowSpinner { visible: false },
            Action::PanoramaChanged { panorama_id: switch.target.clone() },
        ];
        actions.extend(self.apply_offset(offset));

        let tuning = self.config.tuning;
        match kind {
            LoadKind::Initial | LoadKind::Fade => {
                actions.push(Action::SetOpacity { opacity: 1.0 });
                self.state.phase = TransitionPhase::FadeTransition(Transition {
                    switch,
                    stage: FadeStage::FadeIn,
                    deadline_ms: Some(self.now_ms + tuning.fade_ms),
                });
            }
            LoadKind::Zoom => {
                actions.push(Action::SetTransform { scale: tuning.arrival_scale, origin_x: self.viewport_width / 2.0 });
                self.state.phase = TransitionPhase::ZoomTransition(Transition {
                    switch,
                    stage: ZoomStage::Arrive,
                    deadline_ms: Some(self.now_ms + tuning.arrival_settle_ms),
                });
            }
        }
        actions
    }

    /// Report that a requested image could not be fetched or decoded.
    pub fn asset_failed(&mut self, panorama_id: &str, reason: &str) -> Vec<Action> {
        match &self.state.phase {
            TransitionPhase::Loading { switch, .. } if switch.target == panorama_id => self.fail_load(panorama_id, reason),
            _ => {
                debug!(panorama = panorama_id, "asset failure ignored: stale request");
                Vec::new()
            }
        }
    }

    /// Advance one frame to clock time `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> Vec<Action> {
        self.now_ms = now_ms;
        let mut actions = Vec::new();

        if let Some(strip) = self.ready_strip() {
            let tuning = self.config.tuning;
            match self.state.animator.step(self.state.offset, tuning.ease_factor, tuning.snap_threshold_px) {
                Step::Idle => {}
                Step::Moved(offset) => actions.extend(self.apply_offset(offset)),
                Step::Settled(offset) => actions.extend(self.apply_offset(strip.normalize(offset))),
            }
        }

        actions.extend(self.advance_phase());

        for (side, state) in self.state.edges.expire(&self.state.visibility, now_ms) {
            actions.push(Action::EdgeIndicator { side, state });
        }
        actions
    }

    /// Apply a host command.
    pub fn dispatch(&mut self, command: Command) -> Vec<Action> {
        match command {
            Command::ManualRotate { delta_px, pointer } => self.manual_rotate_by(delta_px, pointer),
            Command::StepRotate { step_px } => self.step_rotate(step_px),
            Command::ClickWaypoint { waypoint } => self.click_waypoint(&waypoint),
            Command::ClickCompass => self.click_compass(),
            Command::ClickEdge { side } => self.click_edge(side),
            Command::Navigate { panorama_id, angle } => self.navigate_to(&panorama_id, angle),
        }
    }

    // --- Queries ---

    /// Id of the panorama on screen.
    #[must_use]
    pub fn current_panorama_id(&self) -> Option<&str> {
        self.state.current.as_ref().map(|c| c.id.as_str())
    }

    /// Whether coordinate math is available for the current panorama.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready_strip().is_some()
    }

    /// Pan offset wrapped into the current strip.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.ready_strip()
            .map_or(self.state.offset, |strip| strip.normalize(self.state.offset))
    }

    /// Strip angle at the viewport center, if ready.
    #[must_use]
    pub fn view_angle(&self) -> Option<f64> {
        self.ready_strip()
            .map(|strip| strip.offset_to_angle(self.state.offset, self.viewport_width))
    }

    /// Continuous compass needle angle.
    #[must_use]
    pub fn bearing(&self) -> f64 {
        self.state.compass.last_bearing()
    }

    #[must_use]
    pub fn visibility(&self) -> &VisibilityReport {
        &self.state.visibility
    }

    #[must_use]
    pub fn phase(&self) -> &TransitionPhase {
        &self.state.phase
    }

    /// Whether `panorama_id` has been fetched before.
    #[must_use]
    pub fn is_loaded(&self, panorama_id: &str) -> bool {
        self.state.loaded.contains(panorama_id)
    }

    /// Whether the host should keep scheduling frame ticks.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state.animator.is_animating()
            || !self.state.phase.is_idle()
            || self.state.edges.hide_pending(Side::Left)
            || self.state.edges.hide_pending(Side::Right)
    }

    /// Presentation state for the host.
    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot {
        let normalized_bearing = self.state.compass.normalized();
        ViewSnapshot {
            panorama_id: self.current_panorama_id().map(str::to_owned),
            offset: self.offset(),
            bearing: self.bearing(),
            normalized_bearing,
            cardinal: cardinal_label(normalized_bearing),
            phase: self.state.phase.name(),
            animating: self.state.animator.is_animating(),
            visibility: self.state.visibility.clone(),
        }
    }

    // --- Internals ---

    fn ready_panorama(&self) -> Option<&LoadedPanorama> {
        self.state.current.as_ref().filter(|c| c.strip.is_ready())
    }

    fn ready_strip(&self) -> Option<Strip> {
        self.ready_panorama().map(|c| c.strip)
    }

    /// Strip angle at the viewport center, carried over to the next panorama.
    fn departure_angle(&self) -> f64 {
        self.view_angle().unwrap_or(self.config.start_direction_degrees)
    }

    fn build_loaded(&self, panorama_id: &str, natural_width: f64, natural_height: f64, entry_angle: f64) -> Option<LoadedPanorama> {
        let panorama = self.tour.get(panorama_id)?;
        let strip = Strip::from_image(panorama.display_width, self.viewport_height, natural_height);
        Some(LoadedPanorama {
            id: panorama_id.to_owned(),
            strip,
            natural_width,
            natural_height,
            north_offset: panorama.north_offset_or(self.config.global_north_offset_degrees),
            entry_angle,
            waypoints: visibility::place_waypoints(panorama_id, panorama, &strip, &self.tour),
        })
    }

    /// Store `offset` and recompute everything derived from it.
    fn apply_offset(&mut self, offset: f64) -> Vec<Action> {
        self.state.offset = offset;
        let Some(current) = self.ready_panorama() else {
            self.state.visibility = VisibilityReport::default();
            return Vec::new();
        };
        let tuning = self.config.tuning;
        let normalized = current.strip.normalize(offset);
        let report = visibility::resolve(
            &current.waypoints,
            normalized,
            self.viewport_width,
            current.strip.scaled_width,
            tuning.visibility_margin_px,
        );
        let bearing = bearing_at(normalized, self.viewport_width, &current.strip, current.north_offset);

        self.state.compass.update(bearing);
        self.state.visibility = report;

        let mut actions = vec![Action::SetOffset { offset: normalized }];
        for (side, state) in self.state.edges.observe(&self.state.visibility, self.now_ms, tuning.edge_hide_delay_ms) {
            actions.push(Action::EdgeIndicator { side, state });
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Re-center the current panorama without a transition.
    fn re_angle(&mut self, angle: f64) -> Vec<Action> {
        let Some(strip) = self.ready_strip() else {
            debug!("re-angle ignored: panorama not ready");
            return Vec::new();
        };
        self.state.animator.cancel();
        let offset = strip.normalize(strip.angle_to_offset(angle, self.viewport_width));
        self.apply_offset(offset)
    }

    fn begin_load(&mut self, switch: PendingSwitch, kind: LoadKind) -> Vec<Action> {
        let Some(panorama) = self.tour.get(&switch.target) else {
            self.state.phase = TransitionPhase::Idle;
            return vec![Action::error(&ViewerError::UnknownPanorama(switch.target))];
        };
        let mut actions = Vec::new();
        if !self.state.loaded.contains(&switch.target) {
            actions.push(Action::ShowSpinner { visible: true });
        }
        actions.push(Action::RequestAsset { panorama_id: switch.target.clone(), url: panorama.image_url.clone() });
        debug!(panorama = %switch.target, ?kind, "asset requested");
        self.state.phase = TransitionPhase::Loading { switch, kind };
        actions
    }

    fn begin_fade(&mut self, switch: PendingSwitch) -> Vec<Action> {
        debug!(panorama = %switch.target, entry_angle = switch.entry_angle, "fade transition started");
        self.state.phase = TransitionPhase::FadeTransition(Transition {
            switch,
            stage: FadeStage::FadeOut,
            deadline_ms: Some(self.now_ms + self.config.tuning.fade_ms),
        });
        vec![Action::SetOpacity { opacity: 0.0 }]
    }

    fn begin_zoom(&mut self, switch: PendingSwitch, waypoint: &PlacedWaypoint) -> Vec<Action> {
        let Some(current) = self.ready_panorama() else {
            return Vec::new();
        };
        let normalized = current.strip.normalize(self.state.offset);
        let screen_x = self
            .state
            .visibility
            .find_visible(&waypoint.id)
            .map_or_else(
                || visibility::nearest_candidate(waypoint.anchor_px, normalized, self.viewport_width, current.strip.scaled_width),
                |w| w.screen_x,
            );
        let delta_px = screen_x - self.viewport_width / 2.0;

        debug!(panorama = %switch.target, entry_angle = switch.entry_angle, delta_px, "zoom transition started");
        self.state.animator.cancel();
        self.state.animator.animate_to(self.state.offset, delta_px);
        self.state.phase = TransitionPhase::ZoomTransition(Transition { switch, stage: ZoomStage::Approach, deadline_ms: None });
        Vec::new()
    }

    fn fail_load(&mut self, panorama_id: &str, reason: &str) -> Vec<Action> {
        self.state.phase = TransitionPhase::Idle;
        let err = ViewerError::AssetLoad { panorama_id: panorama_id.to_owned(), reason: reason.to_owned() };
        warn!(panorama = panorama_id, error = %err, "panorama load failed");

        let mut actions = vec![Action::ShowSpinner { visible: false }];
        if self.state.current.is_some() {
            actions.push(Action::SetTransform { scale: 1.0, origin_x: self.viewport_width / 2.0 });
            actions.push(Action::SetOpacity { opacity: 1.0 });
        }
        actions.push(Action::error(&err));
        actions
    }

    fn advance_phase(&mut self) -> Vec<Action> {
        let now = self.now_ms;
        let tuning = self.config.tuning;
        let origin_x = self.viewport_width / 2.0;

        match self.state.phase.clone() {
            TransitionPhase::Idle | TransitionPhase::Loading { .. } => Vec::new(),
            TransitionPhase::FadeTransition(t) => {
                if !t.is_due(now) {
                    return Vec::new();
                }
                match t.stage {
                    FadeStage::FadeOut => self.begin_load(t.switch, LoadKind::Fade),
                    FadeStage::FadeIn => {
                        debug!(panorama = %t.switch.target, "fade transition complete");
                        self.state.phase = TransitionPhase::Idle;
                        Vec::new()
                    }
                }
            }
            TransitionPhase::ZoomTransition(t) => match t.stage {
                ZoomStage::Approach => {
                    if self.state.animator.is_animating() {
                        return Vec::new();
                    }
                    self.set_zoom_stage(t.switch, ZoomStage::ScaleUp, now + tuning.zoom_in_ms);
                    vec![Action::SetTransform { scale: tuning.zoom_scale, origin_x }]
                }
                _ if !t.is_due(now) => Vec::new(),
                ZoomStage::ScaleUp => {
                    self.set_zoom_stage(t.switch, ZoomStage::FadeOut, now + tuning.fade_ms);
                    vec![Action::SetOpacity { opacity: 0.0 }]
                }
                ZoomStage::FadeOut => self.begin_load(t.switch, LoadKind::Zoom),
                ZoomStage::Arrive => {
                    self.set_zoom_stage(t.switch, ZoomStage::ScaleDown, now + tuning.zoom_out_ms);
                    vec![Action::SetTransform { scale: 1.0, origin_x }, Action::SetOpacity { opacity: 1.0 }]
                }
                ZoomStage::ScaleDown => {
                    debug!(panorama = %t.switch.target, "zoom transition complete");
                    self.state.phase = TransitionPhase::Idle;
                    Vec::new()
                }
            },
        }
    }

    fn set_zoom_stage(&mut self, switch: PendingSwitch, stage: ZoomStage, deadline_ms: f64) {
        self.state.phase = TransitionPhase::ZoomTransition(Transition { switch, stage, deadline_ms: Some(deadline_ms) });
    }
}

fn actions_json(actions: &[Action]) -> String {
    serde_json::to_string(actions).unwrap_or_default()
}

/// The browser-facing viewer. Wraps `ViewerCore` and speaks JSON to the host.
#[wasm_bindgen]
pub struct Viewer {
    core: ViewerCore,
}

#[wasm_bindgen]
impl Viewer {
    /// Create a viewer from configuration JSON.
    ///
    /// # Errors
    ///
    /// Returns the configuration error as a JS `Error`.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<Viewer, JsError> {
        Ok(Self { core: ViewerCore::from_json(config_json)? })
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) -> String {
        actions_json(&self.core.set_viewport(width, height))
    }

    pub fn start(&mut self) -> String {
        actions_json(&self.core.start())
    }

    pub fn tick(&mut self, now_ms: f64) -> String {
        actions_json(&self.core.tick(now_ms))
    }

    pub fn manual_rotate_by(&mut self, delta_px: f64, touch: bool) -> String {
        let pointer = if touch { PointerKind::Touch } else { PointerKind::Mouse };
        actions_json(&self.core.manual_rotate_by(delta_px, pointer))
    }

    pub fn step_rotate(&mut self, step_px: f64) -> String {
        actions_json(&self.core.step_rotate(step_px))
    }

    /// Click waypoint `index` of the current panorama.
    pub fn click_waypoint(&mut self, index: usize) -> String {
        let Some(panorama_id) = self.core.current_panorama_id().map(str::to_owned) else {
            return actions_json(&[]);
        };
        actions_json(&self.core.click_waypoint(&WaypointId { panorama_id, index }))
    }

    pub fn click_compass(&mut self) -> String {
        actions_json(&self.core.click_compass())
    }

    pub fn click_edge(&mut self, right: bool) -> String {
        let side = if right { Side::Right } else { Side::Left };
        actions_json(&self.core.click_edge(side))
    }

    pub fn navigate_to(&mut self, panorama_id: &str, angle: Option<f64>) -> String {
        actions_json(&self.core.navigate_to(panorama_id, angle))
    }

    pub fn asset_loaded(&mut self, panorama_id: &str, natural_width: f64, natural_height: f64) -> String {
        actions_json(&self.core.asset_loaded(panorama_id, natural_width, natural_height))
    }

    pub fn asset_failed(&mut self, panorama_id: &str, reason: &str) -> String {
        actions_json(&self.core.asset_failed(panorama_id, reason))
    }

    /// Apply a JSON-encoded [`Command`].
    ///
    /// # Errors
    ///
    /// Returns a JS `Error` if the command JSON is malformed.
    pub fn dispatch(&mut self, command_json: &str) -> Result<String, JsError> {
        let command: Command = serde_json::from_str(command_json)?;
        Ok(actions_json(&self.core.dispatch(command)))
    }

    /// Current presentation state as JSON.
    #[must_use]
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.core.snapshot()).unwrap_or_default()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.core.is_busy()
    }
}

impl Viewer {
    /// Access the testable core.
    #[must_use]
    pub fn core(&self) -> &ViewerCore {
        &self.core
    }
}
