//! Procedural layouts: the scattered cloud and the cone-shaped tree.
//!
//! Every generator draws from a caller-supplied RNG and runs once per element
//! when the scene is mounted; results are stored and never recomputed.

use crate::config::TreeConfig;
use crate::constants::CONE_BASE_SHIFT;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// A height slice of the cone: where it sits and how wide it may be.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConeLevel {
    pub y: f32,
    /// 0 at the apex, 1 at the base.
    pub normalized: f32,
    pub radius_max: f32,
}

/// Radial placement rule for elements that hang on the cone surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShellRadius {
    /// `radius_max * k`, e.g. lights recessed into the foliage.
    Scaled(f32),
    /// `radius_max + k`, e.g. mascots sticking out.
    Offset(f32),
    /// `radius_max + U[0, k)`, a shell with thickness.
    Jitter(f32),
}

/// Uniform point inside a solid sphere (volume-uniform, not surface-uniform).
pub fn scatter_point<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let z = rng.gen::<f32>() * 2.0 - 1.0;
    let phi = rng.gen::<f32>() * TAU;
    let ring = (1.0 - z * z).max(0.0).sqrt();
    let dir = Vec3::new(ring * phi.cos(), ring * phi.sin(), z);
    // cube root keeps the density constant per unit volume
    let r = radius * rng.gen::<f32>().cbrt();
    (dir * r).clamp_length_max(radius)
}

/// Uniform point inside an axis-aligned cube of the given side, centered on
/// the origin.
pub fn scatter_in_cube<R: Rng + ?Sized>(rng: &mut R, side: f32) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * side,
        (rng.gen::<f32>() - 0.5) * side,
        (rng.gen::<f32>() - 0.5) * side,
    )
}

/// Normalized height for a cone of height `height`: 0 at the apex, 1 at the
/// base. Values outside the sampled range fall outside `[0, 1]`.
#[inline]
pub fn normalized_height(y: f32, height: f32) -> f32 {
    1.0 - (y + height * CONE_BASE_SHIFT) / height
}

/// Sample a height band of the cone. `height_scale` shrinks the sampled range
/// so that some groups stay below the apex.
pub fn cone_level<R: Rng + ?Sized>(rng: &mut R, tree: &TreeConfig, height_scale: f32) -> ConeLevel {
    let y = (rng.gen::<f32>() - CONE_BASE_SHIFT) * tree.height * height_scale;
    let normalized = normalized_height(y, tree.height);
    ConeLevel {
        y,
        normalized,
        radius_max: (normalized * tree.radius_base).max(0.0),
    }
}

/// Point inside the cone volume with uniform density per unit disk area at
/// every height.
pub fn target_point<R: Rng + ?Sized>(rng: &mut R, tree: &TreeConfig) -> Vec3 {
    let level = cone_level(rng, tree, 1.0);
    let angle = rng.gen::<f32>() * TAU;
    // sqrt(u): sampling r directly would crowd the axis
    let r = rng.gen::<f32>().sqrt() * level.radius_max;
    Vec3::new(angle.cos() * r, level.y, angle.sin() * r)
}

/// Point on (or near) the cone surface.
pub fn shell_point<R: Rng + ?Sized>(
    rng: &mut R,
    tree: &TreeConfig,
    height_scale: f32,
    radius: ShellRadius,
) -> Vec3 {
    let level = cone_level(rng, tree, height_scale);
    let r = match radius {
        ShellRadius::Scaled(k) => level.radius_max * k,
        ShellRadius::Offset(k) => level.radius_max + k,
        ShellRadius::Jitter(k) => level.radius_max + rng.gen::<f32>() * k,
    };
    let angle = rng.gen::<f32>() * TAU;
    Vec3::new(angle.cos() * r, level.y, angle.sin() * r)
}

/// Horizontal distance from the cone axis.
#[inline]
pub fn radial_distance(p: Vec3) -> f32 {
    (p.x * p.x + p.z * p.z).sqrt()
}
