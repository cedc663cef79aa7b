//! Shared numeric defaults for the viewer crate.
//!
//! Values marked as tuning defaults can be overridden per viewer through
//! [`crate::config::Tuning`].

// ── Visibility ──────────────────────────────────────────────────

/// Extra room beyond each viewport edge in which a waypoint still counts as on screen.
pub const VISIBILITY_MARGIN_PX: f64 = 50.0;

/// Render priority assigned to a waypoint sitting exactly at the viewport center.
pub const PRIORITY_BASE: f64 = 100.0;

/// Center distance (in pixels) that costs one step of render priority.
pub const PRIORITY_DISTANCE_DIVISOR: f64 = 10.0;

/// Lowest render priority a visible waypoint can have.
pub const PRIORITY_MIN: u32 = 1;

// ── Waypoints ───────────────────────────────────────────────────

/// Vertical placement used when a waypoint doesn't specify one.
pub const DEFAULT_VERTICAL_PERCENT: f64 = 50.0;

/// Smallest accepted waypoint emphasis factor.
pub const WAYPOINT_SCALE_MIN: f64 = 0.1;

/// Largest accepted waypoint emphasis factor.
pub const WAYPOINT_SCALE_MAX: f64 = 10.0;

// ── Rotation ────────────────────────────────────────────────────

/// Fraction of the remaining distance covered on each animation tick.
pub const EASE_FACTOR: f64 = 0.15;

/// Remaining distance (pixels) below which an animation snaps to its target.
pub const SNAP_THRESHOLD_PX: f64 = 1.0;

// ── Transitions ─────────────────────────────────────────────────

/// Duration of an opacity fade, in milliseconds.
pub const FADE_MS: f64 = 300.0;

/// Duration of the zoom-in emphasis on the clicked waypoint, in milliseconds.
pub const ZOOM_IN_MS: f64 = 400.0;

/// Duration of the scale-back to normal after arrival, in milliseconds.
pub const ZOOM_OUT_MS: f64 = 400.0;

/// Pause between installing the over-scaled arrival and starting the scale-back.
pub const ARRIVAL_SETTLE_MS: f64 = 50.0;

/// Scale applied while approaching the clicked waypoint.
pub const ZOOM_SCALE: f64 = 2.0;

/// Scale the destination panorama starts from on a zoom arrival.
pub const ARRIVAL_SCALE: f64 = 1.5;

/// Delay between an edge indicator starting to fade and being hidden.
pub const EDGE_HIDE_DELAY_MS: f64 = 300.0;
