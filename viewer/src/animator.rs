//! Eased rotation toward a target offset.
//!
//! At most one animation runs per viewer. A second relative move issued while
//! one is in flight extends the existing target instead of starting another
//! trajectory. Each frame tick covers a fixed fraction of the remaining
//! distance (exponential ease-out) and snaps once the remainder is below the
//! snap threshold. Manual rotation cancels by clearing the animating flag;
//! the next tick then does nothing.

#[cfg(test)]
#[path = "animator_test.rs"]
mod animator_test;

/// Outcome of advancing the animator by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// No animation in flight; the offset is unchanged.
    Idle,
    /// Moved part of the way; carries the new offset.
    Moved(f64),
    /// Reached the target and stopped; carries the final offset.
    Settled(f64),
}

/// Rotation animator state.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationAnimator {
    animating: bool,
    target: f64,
}

impl RotationAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an animation is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Target offset of the animation in flight.
    #[must_use]
    pub fn target(&self) -> Option<f64> {
        self.animating.then_some(self.target)
    }

    /// Schedule a relative move of `delta` pixels.
    ///
    /// Starts from `current` when idle; otherwise extends the running target.
    pub fn animate_to(&mut self, current: f64, delta: f64) {
        if self.animating {
            self.target += delta;
        } else {
            self.target = current + delta;
            self.animating = true;
        }
    }

    /// Stop the animation in flight, if any.
    pub fn cancel(&mut self) {
        self.animating = false;
    }

    /// Advance one frame from `current`.
    pub fn step(&mut self, current: f64, ease_factor: f64, snap_threshold: f64) -> Step {
        if !self.animating {
            return Step::Idle;
        }
        let remaining = self.target - current;
        if remaining.abs() < snap_threshold {
            self.animating = false;
            return Step::Settled(self.target);
        }
        Step::Moved(current + remaining * ease_factor)
    }
}
