//! Per-group smoothing of the morph target.
//!
//! Each visual group owns one [`Smoother`]; the logical target can change at
//! any time and the smoothed value simply turns around from wherever it is.

use crate::config::SmoothingMode;

/// One proportional step of `current` toward `target`.
///
/// The step fraction is `min(1, rate * dt)`, so the result never passes the
/// target. The fraction depends on the frame duration: hosts running at
/// different frame rates converge at different wall-clock speeds.
#[inline]
pub fn advance(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * (rate * dt).min(1.0)
}

/// Frame-rate independent variant of [`advance`]: the fraction is
/// `1 - exp(-rate * dt)`.
#[inline]
pub fn advance_exponential(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * (1.0 - (-rate * dt).exp())
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Smoother {
    value: f32,
    target: f32,
    rate: f32,
    mode: SmoothingMode,
}

impl Smoother {
    /// Starts at rest at 0 (scattered).
    pub fn new(rate: f32, mode: SmoothingMode) -> Self {
        Self {
            value: 0.0,
            target: 0.0,
            rate,
            mode,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Redirect toward a new target without discarding the current value.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Advance by one frame of `dt` seconds and return the new value.
    pub fn update(&mut self, dt: f32) -> f32 {
        let dt = dt.max(0.0);
        self.value = match self.mode {
            SmoothingMode::Proportional => advance(self.value, self.target, self.rate, dt),
            SmoothingMode::Exponential => {
                advance_exponential(self.value, self.target, self.rate, dt)
            }
        };
        self.value
    }
}
