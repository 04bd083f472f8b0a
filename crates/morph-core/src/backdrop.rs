//! Static backdrop behind the tree: a deep shell of stars and a cube of gold
//! sparkles.
//!
//! Neither layer morphs. Positions are generated once and `backdrop.wgsl`
//! animates both from the clock alone; the functions below mirror that shader
//! so its behavior can be checked on the host.

use crate::config::BackdropConfig;
use crate::constants::{srgb_to_linear, SPARKLE_NOISE, STAR_FIELD_LIGHTNESS};
use crate::distribution::scatter_in_cube;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Numerator of the star size attenuation.
pub const STAR_SIZE_ATTENUATION: f32 = 30.0;
/// Numerator of the sparkle size attenuation.
pub const SPARKLE_SIZE_ATTENUATION: f32 = 25.0;
/// Peak displacement of a sparkle along each axis.
pub const SPARKLE_DRIFT: f32 = 0.2;

/// One sprite layer in parallel arrays, uploaded as-is.
#[derive(Clone, Debug, Default)]
pub struct PointLayer {
    pub position: Vec<Vec3>,
    /// Linear RGB.
    pub color: Vec<Vec3>,
    pub size: Vec<f32>,
    /// Per-axis phase scale of the drift. Empty for layers that hold still.
    pub noise: Vec<Vec3>,
}

impl PointLayer {
    fn with_capacity(n: usize) -> Self {
        Self {
            position: Vec::with_capacity(n),
            color: Vec::with_capacity(n),
            size: Vec::with_capacity(n),
            noise: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Backdrop {
    pub stars: PointLayer,
    pub sparkles: PointLayer,
}

impl Backdrop {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, config: &BackdropConfig, sparkle_color: Vec3) -> Self {
        Self {
            stars: generate_star_field(rng, config),
            sparkles: generate_sparkles(rng, config, sparkle_color),
        }
    }
}

/// Stars on shells that step inward from `radius + depth`, each by a random
/// fraction of `depth / count`. Hue walks the color wheel by index; with zero
/// saturation every star is the same pale grey.
pub fn generate_star_field<R: Rng + ?Sized>(rng: &mut R, config: &BackdropConfig) -> PointLayer {
    let n = config.star_count;
    let mut layer = PointLayer::with_capacity(n);
    let mut r = config.star_radius + config.star_depth;
    let increment = config.star_depth / n.max(1) as f32;
    for i in 0..n {
        r -= increment * rng.gen::<f32>();
        layer.position.push(sphere_surface_point(rng, r));
        layer.color.push(hsl_to_linear(
            i as f32 / n as f32,
            config.star_saturation,
            STAR_FIELD_LIGHTNESS,
        ));
        layer.size.push((0.5 + 0.5 * rng.gen::<f32>()) * config.star_factor);
    }
    layer
}

/// Sparkles spread uniformly through a cube of side `sparkle_scale`, all the
/// same size and color.
pub fn generate_sparkles<R: Rng + ?Sized>(rng: &mut R, config: &BackdropConfig, color: Vec3) -> PointLayer {
    let n = config.sparkle_count;
    let mut layer = PointLayer::with_capacity(n);
    layer.noise = vec![Vec3::splat(SPARKLE_NOISE); n];
    for _ in 0..n {
        layer.position.push(scatter_in_cube(rng, config.sparkle_scale));
        layer.color.push(color);
        layer.size.push(config.sparkle_size);
    }
    layer
}

/// Uniform point on the sphere of radius `r`.
fn sphere_surface_point<R: Rng + ?Sized>(rng: &mut R, r: f32) -> Vec3 {
    let polar = (1.0 - rng.gen::<f32>() * 2.0).acos();
    let azimuth = rng.gen::<f32>() * TAU;
    Vec3::new(
        r * polar.sin() * azimuth.sin(),
        r * polar.cos(),
        r * polar.sin() * azimuth.cos(),
    )
}

/// HSL in sRGB space, each input in `[0, 1]` (hue wraps), to linear RGB.
pub fn hsl_to_linear(hue: f32, saturation: f32, lightness: f32) -> Vec3 {
    let h = hue.rem_euclid(1.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);
    let srgb = if s == 0.0 {
        Vec3::splat(l)
    } else {
        let high = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let low = 2.0 * l - high;
        Vec3::new(
            hue_channel(low, high, h + 1.0 / 3.0),
            hue_channel(low, high, h),
            hue_channel(low, high, h - 1.0 / 3.0),
        )
    };
    Vec3::new(srgb_to_linear(srgb.x), srgb_to_linear(srgb.y), srgb_to_linear(srgb.z))
}

fn hue_channel(low: f32, high: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        low + (high - low) * 6.0 * t
    } else if t < 0.5 {
        high
    } else if t < 2.0 / 3.0 {
        low + (high - low) * 6.0 * (2.0 / 3.0 - t)
    } else {
        low
    }
}

/// Global size pulse of the star field, in `[2, 4]`. `time` is already
/// multiplied by the layer speed.
#[inline]
pub fn star_twinkle(time: f32) -> f32 {
    3.0 + (time + 100.0).sin()
}

/// Star sprite diameter in pixels. `view_depth` is positive in front of the
/// camera.
#[inline]
pub fn star_point_size(size: f32, view_depth: f32, time: f32) -> f32 {
    size * (STAR_SIZE_ATTENUATION / view_depth) * star_twinkle(time)
}

/// Logistic falloff from the sprite center; 0.5 at a quarter of the sprite.
#[inline]
pub fn star_fade(dist: f32) -> f32 {
    1.0 / (1.0 + (16.0 * (dist - 0.25)).exp())
}

/// World-space drift of a sparkle. Every axis is phased by the original x.
pub fn sparkle_offset(position: Vec3, noise: Vec3, time: f32, speed: f32) -> Vec3 {
    let t = time * speed;
    let x = position.x;
    Vec3::new(
        (t + x * noise.z * 100.0).cos(),
        (t + x * noise.x * 100.0).sin(),
        (t + x * noise.y * 100.0).cos(),
    ) * SPARKLE_DRIFT
}

#[inline]
pub fn sparkle_point_size(size: f32, pixel_ratio: f32, view_depth: f32) -> f32 {
    size * SPARKLE_SIZE_ATTENUATION * pixel_ratio / view_depth
}

/// Hyperbolic glow: bright core, zero from half the sprite outward.
#[inline]
pub fn sparkle_strength(dist: f32) -> f32 {
    if dist <= 0.0 {
        return 1.0;
    }
    (0.05 / dist - 0.1).clamp(0.0, 1.0)
}
