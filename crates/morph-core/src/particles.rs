//! The foliage point cloud.
//!
//! Static per-particle attributes live in parallel arrays that are uploaded
//! once as vertex buffers. The per-frame work happens in `particles.wgsl`;
//! [`particle_vertex`] and [`particle_fragment`] mirror that shader as pure
//! functions so the contract can be checked without a GPU.

use crate::config::SceneConfig;
use crate::constants::{FOLIAGE_BASE_COLOR, FOLIAGE_HIGHLIGHT_COLOR};
use crate::distribution::{scatter_point, target_point};
use glam::{Mat4, Vec2, Vec3, Vec4};
use rand::Rng;
use rayon::prelude::*;

/// Threshold of the hard step that picks gold speckles out of the color noise.
pub const HIGHLIGHT_THRESHOLD: f32 = 0.9;
/// Sprite radius in point-coordinate units.
pub const SPRITE_RADIUS: f32 = 0.5;
/// Numerator of the perspective size attenuation.
pub const SIZE_ATTENUATION: f32 = 50.0;

#[derive(Clone, Debug, Default)]
pub struct ParticleSystem {
    pub scatter: Vec<Vec3>,
    pub target: Vec<Vec3>,
    pub random: Vec<f32>,
    pub size: Vec<f32>,
}

/// One particle's static attributes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleAttributes {
    pub scatter: Vec3,
    pub target: Vec3,
    pub random: f32,
    pub size: f32,
}

/// Frame-global inputs of the particle stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleFrame {
    pub time: f32,
    pub morph: f32,
    pub pixel_ratio: f32,
    pub model_view: Mat4,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleVertex {
    /// Position in the particle system's local space, after breathing.
    pub position: Vec3,
    /// Distance in front of the camera (positive when visible).
    pub view_depth: f32,
    /// Sprite diameter in physical pixels.
    pub point_size: f32,
    pub color: Vec3,
    pub alpha: f32,
}

impl ParticleSystem {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, config: &SceneConfig) -> Self {
        let n = config.counts.foliage;
        let mut system = Self {
            scatter: Vec::with_capacity(n),
            target: Vec::with_capacity(n),
            random: Vec::with_capacity(n),
            size: Vec::with_capacity(n),
        };
        for _ in 0..n {
            system.scatter.push(scatter_point(rng, config.tree.scatter_radius));
            system.target.push(target_point(rng, &config.tree));
            system.random.push(rng.gen::<f32>());
            system.size.push(rng.gen::<f32>() * 0.5 + 0.5);
        }
        system
    }

    pub fn len(&self) -> usize {
        self.scatter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scatter.is_empty()
    }

    pub fn attributes(&self, i: usize) -> ParticleAttributes {
        ParticleAttributes {
            scatter: self.scatter[i],
            target: self.target[i],
            random: self.random[i],
            size: self.size[i],
        }
    }
}

#[inline]
fn hash(n: f32) -> f32 {
    let v = n.sin() * 1e4;
    v - v.floor()
}

/// Smoothed lattice value noise in [0, 1], identical to the shader's `noise3`.
pub fn value_noise(x: Vec3) -> f32 {
    const STEP: Vec3 = Vec3::new(110.0, 241.0, 171.0);
    let i = x.floor();
    let f = x - i;
    let n = i.dot(STEP);
    let u = f * f * (Vec3::splat(3.0) - 2.0 * f);
    let corner = |cx: f32, cy: f32, cz: f32| hash(n + STEP.dot(Vec3::new(cx, cy, cz)));
    let mix = |a: f32, b: f32, t: f32| a + (b - a) * t;
    mix(
        mix(
            mix(corner(0.0, 0.0, 0.0), corner(0.0, 0.0, 1.0), u.z),
            mix(corner(0.0, 1.0, 0.0), corner(0.0, 1.0, 1.0), u.z),
            u.y,
        ),
        mix(
            mix(corner(1.0, 0.0, 0.0), corner(1.0, 0.0, 1.0), u.z),
            mix(corner(1.0, 1.0, 0.0), corner(1.0, 1.0, 1.0), u.z),
            u.y,
        ),
        u.x,
    )
}

/// Amplitude of the vertical breathing offset: scattered particles breathe
/// twice as much as formed ones.
#[inline]
pub fn breath_amplitude(morph: f32) -> f32 {
    0.3 * (1.0 - morph * 0.5)
}

#[inline]
pub fn particle_alpha(morph: f32) -> f32 {
    0.6 + 0.4 * morph
}

/// Hard step between the emerald base and the gold highlight.
#[inline]
pub fn highlight_color(color_noise: f32) -> Vec3 {
    let t = if color_noise < HIGHLIGHT_THRESHOLD { 0.0 } else { 1.0 };
    FOLIAGE_BASE_COLOR.lerp(FOLIAGE_HIGHLIGHT_COLOR, t)
}

#[inline]
pub fn point_size(size: f32, pixel_ratio: f32, view_depth: f32) -> f32 {
    size * pixel_ratio * (SIZE_ATTENUATION / view_depth)
}

/// Vertex stage for one particle.
pub fn particle_vertex(p: &ParticleAttributes, frame: &ParticleFrame) -> ParticleVertex {
    let morphed = p.scatter.lerp(p.target, frame.morph);
    let breath = value_noise(morphed * 0.5 + Vec3::splat(frame.time * 0.5)) * breath_amplitude(frame.morph);
    let position = morphed + Vec3::new(0.0, breath, 0.0);

    let view = frame.model_view * position.extend(1.0);
    let view_depth = -view.z;

    let color_noise = value_noise(morphed * 2.0 + Vec3::splat(frame.time * 0.2));
    ParticleVertex {
        position,
        view_depth,
        point_size: point_size(p.size, frame.pixel_ratio, view_depth),
        color: highlight_color(color_noise),
        alpha: particle_alpha(frame.morph),
    }
}

/// Fragment stage: `point_coord` is in [0, 1]² across the sprite. Returns
/// `None` where the fragment is discarded.
pub fn particle_fragment(point_coord: Vec2, color: Vec3, alpha: f32) -> Option<Vec4> {
    let dist = (point_coord - Vec2::splat(0.5)).length();
    if dist > SPRITE_RADIUS {
        return None;
    }
    let glow = (1.0 - dist * 2.0).powf(1.5);
    Some(color.extend(alpha * glow))
}

/// Run the vertex stage over every particle in parallel. Each output depends
/// only on its own attributes and the frame uniforms.
pub fn shade_particles(system: &ParticleSystem, frame: &ParticleFrame) -> Vec<ParticleVertex> {
    (0..system.len())
        .into_par_iter()
        .map(|i| particle_vertex(&system.attributes(i), frame))
        .collect()
}
