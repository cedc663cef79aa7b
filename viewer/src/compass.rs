//! Compass bearing math.
//!
//! The bearing of the viewport center is the strip angle at the center plus
//! the panorama's north offset. The needle angle emitted to the host is kept
//! continuous: each update applies the shortest signed delta from the last
//! emitted value, so crossing 0°/360° never produces a ~360° jump. The
//! continuous value is unbounded; compare and bucket only normalized values.

#[cfg(test)]
#[path = "compass_test.rs"]
mod compass_test;

use crate::coords::Strip;

const CARDINALS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Wrap an angle into `[0, 360)`.
#[must_use]
pub fn normalize_degrees_360(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shortest signed rotation taking `start` to `current`, in `(-180, 180]`.
#[must_use]
pub fn signed_angle_delta_deg(current: f64, start: f64) -> f64 {
    let delta = current - start;
    if !delta.is_finite() {
        return 0.0;
    }
    let mut wrapped = delta.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped -= 360.0;
    }
    wrapped
}

/// Normalized bearing of the viewport center.
#[must_use]
pub fn bearing_at(offset: f64, view_width: f64, strip: &Strip, north_offset_deg: f64) -> f64 {
    normalize_degrees_360(strip.offset_to_angle(offset, view_width) + north_offset_deg)
}

/// Eight-point compass label for a bearing.
#[must_use]
pub fn cardinal_label(bearing_deg: f64) -> &'static str {
    let normalized = normalize_degrees_360(bearing_deg);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let sector = ((normalized + 22.5) / 45.0).floor() as usize % CARDINALS.len();
    CARDINALS[sector]
}

/// Continuous needle tracker.
///
/// Lives as long as the viewer; it is not reset when the panorama changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compass {
    last_bearing: f64,
}

impl Compass {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last emitted (continuous) needle angle.
    #[must_use]
    pub fn last_bearing(&self) -> f64 {
        self.last_bearing
    }

    /// Last emitted needle angle wrapped into `[0, 360)`.
    #[must_use]
    pub fn normalized(&self) -> f64 {
        normalize_degrees_360(self.last_bearing)
    }

    /// Move the needle to `bearing_deg` along the shorter way round.
    ///
    /// Ties at exactly 180° turn clockwise. Returns the new continuous angle.
    pub fn update(&mut self, bearing_deg: f64) -> f64 {
        let clockwise = (normalize_degrees_360(bearing_deg) - self.normalized()).rem_euclid(360.0);
        let counter_clockwise = 360.0 - clockwise;
        let delta = if clockwise <= counter_clockwise { clockwise } else { -counter_clockwise };
        self.last_bearing += delta;
        self.last_bearing
    }
}
