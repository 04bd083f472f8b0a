//! Scene configuration.
//!
//! Every value defaults to the build-time constants in [`crate::constants`].
//! Front-ends only override `pixel_ratio`; the rest stays fixed for the
//! lifetime of a build. [`SceneConfig::validate`] rejects anything that would
//! silently produce empty or degenerate geometry.

use crate::constants::*;
use crate::error::ConfigError;

/// Dimensions of the cone formation and the scatter cloud.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeConfig {
    pub height: f32,
    pub radius_base: f32,
    pub scatter_radius: f32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            height: TREE_HEIGHT,
            radius_base: TREE_RADIUS_BASE,
            scatter_radius: SCATTER_RADIUS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementCounts {
    pub foliage: usize,
    pub ornaments: usize,
    pub lights: usize,
    pub mascots: usize,
}

impl Default for ElementCounts {
    fn default() -> Self {
        Self {
            foliage: FOLIAGE_COUNT,
            ornaments: ORNAMENT_COUNT,
            lights: LIGHT_COUNT,
            mascots: MASCOT_COUNT,
        }
    }
}

/// Per-group convergence rates, in 1/seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothingRates {
    pub foliage: f32,
    pub lights: f32,
    pub ornaments: f32,
    pub mascots: f32,
    pub star: f32,
}

impl Default for SmoothingRates {
    fn default() -> Self {
        Self {
            foliage: FOLIAGE_RATE,
            lights: LIGHTS_RATE,
            ornaments: ORNAMENTS_RATE,
            mascots: MASCOTS_RATE,
            star: STAR_RATE,
        }
    }
}

/// Static backdrop: a deep shell of stars and a cube of drifting sparkles.
/// A zero count switches that layer off.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackdropConfig {
    pub star_count: usize,
    pub star_radius: f32,
    pub star_depth: f32,
    pub star_factor: f32,
    pub star_saturation: f32,
    pub star_speed: f32,
    pub sparkle_count: usize,
    pub sparkle_scale: f32,
    pub sparkle_size: f32,
    pub sparkle_speed: f32,
    pub sparkle_opacity: f32,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            star_count: STAR_FIELD_COUNT,
            star_radius: STAR_FIELD_RADIUS,
            star_depth: STAR_FIELD_DEPTH,
            star_factor: STAR_FIELD_FACTOR,
            star_saturation: STAR_FIELD_SATURATION,
            star_speed: STAR_FIELD_SPEED,
            sparkle_count: SPARKLE_COUNT,
            sparkle_scale: SPARKLE_SCALE,
            sparkle_size: SPARKLE_SIZE,
            sparkle_speed: SPARKLE_SPEED,
            sparkle_opacity: SPARKLE_OPACITY,
        }
    }
}

/// How a smoother turns `rate` and `dt` into a step fraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SmoothingMode {
    /// `min(1, rate * dt)`: the literal per-frame step. Convergence speed
    /// depends on the host frame rate.
    #[default]
    Proportional,
    /// `1 - exp(-rate * dt)`: frame-rate independent decay.
    Exponential,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneConfig {
    pub tree: TreeConfig,
    pub counts: ElementCounts,
    pub rates: SmoothingRates,
    pub smoothing: SmoothingMode,
    pub backdrop: BackdropConfig,
    pub pixel_ratio: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tree: TreeConfig::default(),
            counts: ElementCounts::default(),
            rates: SmoothingRates::default(),
            smoothing: SmoothingMode::default(),
            backdrop: BackdropConfig::default(),
            pixel_ratio: 1.0,
        }
    }
}

impl SceneConfig {
    /// Use the host's device pixel ratio, clamped to `[1, 2]`.
    pub fn with_pixel_ratio(mut self, pixel_ratio: f32) -> Self {
        self.pixel_ratio = clamp_pixel_ratio(pixel_ratio);
        self
    }

    /// Check every count and dimension, reporting the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let counts = [
            ("counts.foliage", self.counts.foliage),
            ("counts.ornaments", self.counts.ornaments),
            ("counts.lights", self.counts.lights),
            ("counts.mascots", self.counts.mascots),
        ];
        for (field, value) in counts {
            if value == 0 {
                return Err(ConfigError::ZeroCount { field });
            }
        }

        let scalars = [
            ("tree.height", self.tree.height),
            ("tree.radius_base", self.tree.radius_base),
            ("tree.scatter_radius", self.tree.scatter_radius),
            ("rates.foliage", self.rates.foliage),
            ("rates.lights", self.rates.lights),
            ("rates.ornaments", self.rates.ornaments),
            ("rates.mascots", self.rates.mascots),
            ("rates.star", self.rates.star),
            ("backdrop.star_radius", self.backdrop.star_radius),
            ("backdrop.star_factor", self.backdrop.star_factor),
            ("backdrop.sparkle_scale", self.backdrop.sparkle_scale),
            ("backdrop.sparkle_size", self.backdrop.sparkle_size),
            ("pixel_ratio", self.pixel_ratio),
        ];
        for (field, value) in scalars {
            ensure_positive(field, value)?;
        }

        // these may be zero: a flat shell, a still layer, or an invisible one
        let non_negative = [
            ("backdrop.star_depth", self.backdrop.star_depth),
            ("backdrop.star_saturation", self.backdrop.star_saturation),
            ("backdrop.star_speed", self.backdrop.star_speed),
            ("backdrop.sparkle_speed", self.backdrop.sparkle_speed),
            ("backdrop.sparkle_opacity", self.backdrop.sparkle_opacity),
        ];
        for (field, value) in non_negative {
            ensure_non_negative(field, value)?;
        }
        Ok(())
    }
}

fn ensure_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn ensure_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

/// Clamp a device pixel ratio to the supported range. Non-finite input
/// falls back to 1.
pub fn clamp_pixel_ratio(pixel_ratio: f32) -> f32 {
    if pixel_ratio.is_finite() {
        pixel_ratio.clamp(MIN_PIXEL_RATIO, MAX_PIXEL_RATIO)
    } else {
        MIN_PIXEL_RATIO
    }
}
