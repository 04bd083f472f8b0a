//! Per-object data for the GPU-instanced groups: ornaments, lights, mascots
//! and the star topper.
//!
//! Data is stored as parallel arrays (structure-of-arrays) and fixed at
//! creation: positions, kinds and colors never change afterwards.

use crate::config::SceneConfig;
use crate::constants::*;
use crate::distribution::{scatter_in_cube, shell_point, ShellRadius};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MascotKind {
    Starboy,
    Foxgirl,
}

impl MascotKind {
    /// Even indices are starboys, odd indices foxgirls.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            MascotKind::Starboy
        } else {
            MascotKind::Foxgirl
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstanceKind {
    Box,
    Sphere,
    Light,
    Mascot(MascotKind),
    Star,
}

/// Linear-space colors used by the instanced groups.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub emerald_light: Vec3,
    pub gold: Vec3,
    pub gold_hot: Vec3,
    pub red_luxury: Vec3,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            emerald_light: srgb_hex_to_linear(EMERALD_LIGHT),
            gold: srgb_hex_to_linear(GOLD),
            gold_hot: srgb_hex_to_linear(GOLD_HOT),
            red_luxury: srgb_hex_to_linear(RED_LUXURY),
        }
    }
}

/// One element's creation-time attributes, used to append to an [`InstanceSet`].
#[derive(Clone, Copy, Debug)]
pub struct InstanceSeed {
    pub kind: InstanceKind,
    pub scatter: Vec3,
    pub target: Vec3,
    pub rotation_seed: Vec3,
    pub scale: f32,
    pub color: Vec3,
    pub speed: f32,
    pub phase: f32,
}

#[derive(Clone, Debug, Default)]
pub struct InstanceSet {
    pub ids: Vec<u32>,
    pub kinds: Vec<InstanceKind>,
    pub scatter: Vec<Vec3>,
    pub target: Vec<Vec3>,
    pub rotation_seed: Vec<Vec3>,
    pub scale: Vec<f32>,
    pub color: Vec<Vec3>,
    pub speed: Vec<f32>,
    pub phase: Vec<f32>,
}

impl InstanceSet {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            ids: Vec::with_capacity(n),
            kinds: Vec::with_capacity(n),
            scatter: Vec::with_capacity(n),
            target: Vec::with_capacity(n),
            rotation_seed: Vec::with_capacity(n),
            scale: Vec::with_capacity(n),
            color: Vec::with_capacity(n),
            speed: Vec::with_capacity(n),
            phase: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Append an element; its id is its index in the set.
    pub fn push(&mut self, seed: InstanceSeed) {
        self.ids.push(self.ids.len() as u32);
        self.kinds.push(seed.kind);
        self.scatter.push(seed.scatter);
        self.target.push(seed.target);
        self.rotation_seed.push(seed.rotation_seed);
        self.scale.push(seed.scale);
        self.color.push(seed.color);
        self.speed.push(seed.speed);
        self.phase.push(seed.phase);
    }

    /// Indices of all elements of `kind`, in id order.
    pub fn indices_of(&self, kind: InstanceKind) -> Vec<usize> {
        self.kinds
            .iter()
            .enumerate()
            .filter_map(|(i, k)| (*k == kind).then_some(i))
            .collect()
    }
}

pub fn generate_ornaments<R: Rng + ?Sized>(rng: &mut R, config: &SceneConfig, palette: &Palette) -> InstanceSet {
    let tree = &config.tree;
    let mut set = InstanceSet::with_capacity(config.counts.ornaments);
    for _ in 0..config.counts.ornaments {
        // independent draw per ornament, not a fixed split
        let kind = if rng.gen::<f32>() > ORNAMENT_BOX_THRESHOLD {
            InstanceKind::Box
        } else {
            InstanceKind::Sphere
        };
        let scatter = scatter_in_cube(rng, tree.scatter_radius * ORNAMENT_SCATTER_SPAN);
        let target = shell_point(
            rng,
            tree,
            ORNAMENT_HEIGHT_SCALE,
            ShellRadius::Jitter(ORNAMENT_SHELL_THICKNESS),
        );
        let color = if rng.gen::<f32>() > 0.7 {
            palette.gold
        } else if rng.gen::<f32>() > 0.5 {
            palette.red_luxury
        } else {
            palette.emerald_light
        };
        let rotation_seed = Vec3::new(rng.gen::<f32>() * PI, rng.gen::<f32>() * PI, 0.0);
        set.push(InstanceSeed {
            kind,
            scatter,
            target,
            rotation_seed,
            scale: rng.gen::<f32>() * 0.3 + 0.2,
            color,
            speed: rng.gen::<f32>() * 0.02 + 0.01,
            phase: 0.0,
        });
    }
    set
}

pub fn generate_lights<R: Rng + ?Sized>(rng: &mut R, config: &SceneConfig, palette: &Palette) -> InstanceSet {
    let tree = &config.tree;
    let mut set = InstanceSet::with_capacity(config.counts.lights);
    for _ in 0..config.counts.lights {
        let target = shell_point(rng, tree, LIGHT_HEIGHT_SCALE, ShellRadius::Scaled(LIGHT_RECESS));
        let scatter = scatter_in_cube(rng, tree.scatter_radius * LIGHT_SCATTER_SPAN);
        set.push(InstanceSeed {
            kind: InstanceKind::Light,
            scatter,
            target,
            rotation_seed: Vec3::ZERO,
            scale: 1.0,
            color: palette.gold_hot,
            speed: 1.0,
            phase: rng.gen::<f32>() * TAU,
        });
    }
    set
}

pub fn generate_mascots<R: Rng + ?Sized>(rng: &mut R, config: &SceneConfig) -> InstanceSet {
    let tree = &config.tree;
    let mut set = InstanceSet::with_capacity(config.counts.mascots);
    for i in 0..config.counts.mascots {
        let target = shell_point(rng, tree, MASCOT_HEIGHT_SCALE, ShellRadius::Offset(MASCOT_STICK_OUT));
        let scatter = scatter_in_cube(rng, tree.scatter_radius * MASCOT_SCATTER_SPAN);
        set.push(InstanceSeed {
            kind: InstanceKind::Mascot(MascotKind::for_index(i)),
            scatter,
            target,
            rotation_seed: Vec3::new(0.0, rng.gen::<f32>() * TAU, 0.0),
            scale: 1.0,
            color: Vec3::ONE,
            speed: 0.5 + rng.gen::<f32>() * 0.5,
            phase: 0.0,
        });
    }
    set
}

/// The single star: apex target above the foliage, random scatter position.
pub fn generate_star<R: Rng + ?Sized>(rng: &mut R, config: &SceneConfig, palette: &Palette) -> InstanceSet {
    let tree = &config.tree;
    let mut set = InstanceSet::with_capacity(1);
    set.push(InstanceSeed {
        kind: InstanceKind::Star,
        scatter: scatter_in_cube(rng, tree.scatter_radius * STAR_SCATTER_SPAN),
        target: Vec3::new(0.0, tree.height * STAR_HEIGHT_FACTOR + STAR_LIFT, 0.0),
        rotation_seed: Vec3::ZERO,
        scale: 1.0,
        color: palette.gold,
        speed: 1.0,
        phase: 0.0,
    });
    set
}
