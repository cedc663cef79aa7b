//! Coordinate model for the wrap-around image strip.
//!
//! A panorama is a cylindrical strip whose horizontal pixel position maps
//! linearly to a strip angle. The strip's width in pixels depends on the
//! viewport height (the image is scaled to fill it vertically), so it is
//! derived from the decoded image every time a panorama becomes current.

#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;

/// Pixel metrics of the current panorama's strip.
///
/// `scaled_width` is only meaningful once the image has loaded and the
/// viewport height is known; use [`Strip::is_ready`] before doing math with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strip {
    /// Authored logical width of the panorama.
    pub display_width: f64,
    /// Width of the strip in on-screen pixels at the current viewport height.
    pub scaled_width: f64,
}

impl Strip {
    /// Build strip metrics from the decoded image height and the viewport height.
    #[must_use]
    pub fn from_image(display_width: f64, viewport_height: f64, natural_height: f64) -> Self {
        Self { display_width, scaled_width: scaled_width(viewport_height, natural_height, display_width) }
    }

    /// Whether coordinate math on this strip is defined.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.scaled_width.is_finite() && self.scaled_width > 0.0
    }

    /// Factor converting authored pixel units into strip pixels.
    #[must_use]
    pub fn scale_ratio(&self) -> f64 {
        if self.display_width > 0.0 { self.scaled_width / self.display_width } else { 0.0 }
    }

    /// Wrap `offset` into `[0, scaled_width)`.
    #[must_use]
    pub fn normalize(&self, offset: f64) -> f64 {
        normalize_offset(offset, self.scaled_width)
    }

    /// Offset that centers `angle_deg` in a viewport `view_width` pixels wide.
    ///
    /// The result is not normalized.
    #[must_use]
    pub fn angle_to_offset(&self, angle_deg: f64, view_width: f64) -> f64 {
        angle_to_offset(angle_deg, view_width, self.scaled_width)
    }

    /// Strip angle at the center of the viewport, in `[0, 360)`.
    #[must_use]
    pub fn offset_to_angle(&self, offset: f64, view_width: f64) -> f64 {
        offset_to_angle(offset, view_width, self.scaled_width)
    }

    /// Convert a distance in degrees to strip pixels.
    #[must_use]
    pub fn degrees_to_px(&self, degrees: f64) -> f64 {
        degrees / 360.0 * self.scaled_width
    }
}

/// Strip width in pixels: the image is scaled so its height fills the viewport.
///
/// Returns `0.0` when the natural height is not positive.
#[must_use]
pub fn scaled_width(viewport_height: f64, natural_height: f64, display_width: f64) -> f64 {
    if natural_height > 0.0 { viewport_height / natural_height * display_width } else { 0.0 }
}

/// Floor-modulo wrap of `offset` into `[0, scaled_width)`.
///
/// A non-positive width leaves `offset` untouched; callers guard on readiness.
#[must_use]
pub fn normalize_offset(offset: f64, scaled_width: f64) -> f64 {
    if !(scaled_width.is_finite() && scaled_width > 0.0) {
        return offset;
    }
    let wrapped = offset.rem_euclid(scaled_width);
    // rem_euclid of a tiny negative rounds up to the width itself.
    if wrapped >= scaled_width { 0.0 } else { wrapped }
}

/// `offset = angle / 360 * scaled_width - view_width / 2`.
#[must_use]
pub fn angle_to_offset(angle_deg: f64, view_width: f64, scaled_width: f64) -> f64 {
    angle_deg / 360.0 * scaled_width - view_width / 2.0
}

/// Inverse of [`angle_to_offset`], normalized into `[0, 360)`.
#[must_use]
pub fn offset_to_angle(offset: f64, view_width: f64, scaled_width: f64) -> f64 {
    if !(scaled_width.is_finite() && scaled_width > 0.0) {
        return 0.0;
    }
    let angle = (offset + view_width / 2.0) / scaled_width * 360.0;
    crate::compass::normalize_degrees_360(angle)
}
