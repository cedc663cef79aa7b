//! Error taxonomy for the viewer.
//!
//! Only errors the host has to act on are values. Input arriving before the
//! current panorama is ready, and transition requests made while another one
//! is in flight, are expected during normal use and are dropped silently
//! (logged at `debug`) instead of being reported here.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::tour::PanoramaId;

/// Errors produced while configuring the viewer or loading panoramas.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// The panorama graph is empty; the viewer cannot start.
    #[error("no panoramas configured")]
    NoPanoramas,
    /// `startPanoramaId` names a panorama that is not in the graph.
    #[error("start panorama '{0}' is not in the panorama graph")]
    UnknownStartPanorama(PanoramaId),
    /// A navigation request names a panorama that is not in the graph.
    #[error("panorama '{0}' is not in the panorama graph")]
    UnknownPanorama(PanoramaId),
    /// The image backing a panorama could not be fetched or decoded.
    #[error("failed to load panorama '{panorama_id}': {reason}")]
    AssetLoad { panorama_id: PanoramaId, reason: String },
    /// A tuning knob is outside the range the animator and timers can work with.
    #[error("tuning '{field}' out of range: {value}")]
    InvalidTuning { field: &'static str, value: f64 },
    /// A panorama's `displayWidth` is not a finite positive number.
    #[error("panorama '{0}' has no usable display width")]
    InvalidPanorama(PanoramaId),
    /// The configuration JSON could not be parsed.
    #[error("invalid viewer config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

impl ViewerError {
    /// Stable machine-readable code for host-side handling.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoPanoramas => "E_NO_PANORAMAS",
            Self::UnknownStartPanorama(_) => "E_UNKNOWN_START_PANORAMA",
            Self::UnknownPanorama(_) => "E_UNKNOWN_PANORAMA",
            Self::AssetLoad { .. } => "E_ASSET_LOAD",
            Self::InvalidTuning { .. } => "E_INVALID_TUNING",
            Self::InvalidPanorama(_) => "E_INVALID_PANORAMA",
            Self::InvalidConfig(_) => "E_INVALID_CONFIG",
        }
    }
}
