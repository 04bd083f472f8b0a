//! Per-frame transforms for the GPU-instanced groups.
//!
//! Each group owns its smoother and the instance buffer it writes into. A
//! frame reads only the group's own static data plus the shared frame inputs;
//! no instance depends on another.

use crate::config::SceneConfig;
use crate::instances::{InstanceKind, InstanceSet, MascotKind};
use crate::smoothing::Smoother;
use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Per-instance record uploaded to the instance vertex buffer.
///
/// `color.rgb` tints the mesh's vertex color; `color.a` is the emissive
/// amount (1 = unlit, above 1 = HDR glow).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl InstanceRaw {
    pub fn new(position: Vec3, rotation: Quat, scale: f32, color: Vec3, emissive: f32) -> Self {
        let model = Mat4::from_scale_rotation_translation(Vec3::splat(scale), rotation, position);
        Self {
            model: model.to_cols_array_2d(),
            color: color.extend(emissive).to_array(),
        }
    }

    pub fn translation(&self) -> Vec3 {
        Vec3::from_slice(&self.model[3][..3])
    }
}

/// CPU copy of one instance buffer plus an upload flag.
#[derive(Clone, Debug, Default)]
pub struct InstanceBuffer {
    data: Vec<InstanceRaw>,
    dirty: bool,
}

impl InstanceBuffer {
    pub fn new(len: usize) -> Self {
        Self {
            data: vec![InstanceRaw::zeroed(); len],
            dirty: true,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[InstanceRaw] {
        &self.data
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called by the renderer once the contents have been uploaded.
    pub fn mark_uploaded(&mut self) {
        self.dirty = false;
    }

    fn write(&mut self, slot: usize, raw: InstanceRaw) {
        self.data[slot] = raw;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

/// Frame-global inputs shared read-only by every group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    pub dt: f32,
    /// Seconds since mount.
    pub time: f32,
    /// Logical morph target, 0 or 1.
    pub target: f32,
}

pub trait Animated {
    /// Advance the group's smoother and rewrite its instance buffer(s).
    fn animate(&mut self, frame: &FrameInput);
    /// The group's current smoothed morph value.
    fn morph(&self) -> f32;
}

// ---------------- Pure per-element formulas ----------------

#[inline]
pub fn lerp_position(scatter: Vec3, target: Vec3, m: f32) -> Vec3 {
    scatter.lerp(target, m)
}

/// Vertical drift of a box ornament: chaotic when scattered plus a small
/// constant bob.
#[inline]
pub fn box_float(time: f32, id: f32, m: f32) -> f32 {
    (time * 2.0 + id).sin() * 0.1 * (1.0 - m) + (time + id).sin() * 0.05
}

#[inline]
pub fn sphere_float(time: f32, id: f32, m: f32) -> f32 {
    (time * 1.5 + id).cos() * 0.15 * (1.0 - m)
}

/// Euler angles (XYZ) of a box ornament: spins on every axis, two of them
/// slowing down as the tree forms.
#[inline]
pub fn box_rotation(seed: Vec3, speed: f32, time: f32, m: f32) -> Vec3 {
    let spin = time * speed;
    let damped = 1.0 - m * 0.8;
    Vec3::new(seed.x + spin * damped, seed.y + spin, seed.z + spin * damped)
}

#[inline]
pub fn box_scale_pulse(time: f32, id: f32) -> f32 {
    0.8 + 0.2 * (time * 3.0 + id).sin()
}

/// Light blink in [0, 1].
#[inline]
pub fn light_blink(time: f32, phase: f32) -> f32 {
    0.5 + 0.5 * (time * 3.0 + phase).sin()
}

/// Emission multiplier in [0.8, 2.0].
#[inline]
pub fn light_intensity(blink: f32) -> f32 {
    0.8 + blink * 1.2
}

/// Lights shrink to a point when scattered; floored so the matrix stays
/// invertible.
#[inline]
pub fn light_scale(blink: f32, m: f32) -> f32 {
    ((0.1 + 0.1 * blink) * m).max(crate::constants::MIN_LIGHT_SCALE)
}

/// Mascot (y, z) rotation: free spin while scattered, gentle wobble once formed.
#[inline]
pub fn mascot_rotation(offset: f32, speed: f32, time: f32, m: f32) -> (f32, f32) {
    let idle = (time * speed).sin() * 0.2;
    let y = offset + time * (1.0 - m) + idle * m;
    let z = (time * speed).cos() * 0.1 * m;
    (y, z)
}

#[inline]
pub fn mascot_pulse(time: f32, id: f32) -> f32 {
    1.0 + (time * 3.0 + id).sin() * 0.05
}

/// Star spin speed in rad/s: fast while scattered, slow once formed.
#[inline]
pub fn star_spin_rate(m: f32) -> f32 {
    0.5 + 2.0 * (1.0 - m)
}

// ---------------- Groups ----------------

/// Gift boxes and baubles. Kinds were drawn at creation; each kind is drawn
/// with its own mesh, so each gets its own buffer.
pub struct OrnamentGroup {
    set: InstanceSet,
    boxes: Vec<usize>,
    spheres: Vec<usize>,
    smoother: Smoother,
    box_buffer: InstanceBuffer,
    sphere_buffer: InstanceBuffer,
}

impl OrnamentGroup {
    pub fn new(set: InstanceSet, config: &SceneConfig) -> Self {
        let boxes = set.indices_of(InstanceKind::Box);
        let spheres = set.indices_of(InstanceKind::Sphere);
        let mut group = Self {
            box_buffer: InstanceBuffer::new(boxes.len()),
            sphere_buffer: InstanceBuffer::new(spheres.len()),
            boxes,
            spheres,
            set,
            smoother: Smoother::new(config.rates.ornaments, config.smoothing),
        };
        group.write_all(0.0, 0.0);
        group
    }

    pub fn set(&self) -> &InstanceSet {
        &self.set
    }

    pub fn box_buffer(&self) -> &InstanceBuffer {
        &self.box_buffer
    }

    pub fn sphere_buffer(&self) -> &InstanceBuffer {
        &self.sphere_buffer
    }

    pub fn buffers_mut(&mut self) -> (&mut InstanceBuffer, &mut InstanceBuffer) {
        (&mut self.box_buffer, &mut self.sphere_buffer)
    }

    fn write_all(&mut self, time: f32, m: f32) {
        let set = &self.set;
        for (slot, &i) in self.boxes.iter().enumerate() {
            let id = set.ids[i] as f32;
            let mut position = lerp_position(set.scatter[i], set.target[i], m);
            position.y += box_float(time, id, m);
            let euler = box_rotation(set.rotation_seed[i], set.speed[i], time, m);
            let rotation = Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z);
            let scale = set.scale[i] * box_scale_pulse(time, id);
            self.box_buffer
                .write(slot, InstanceRaw::new(position, rotation, scale, set.color[i], 0.0));
        }
        for (slot, &i) in self.spheres.iter().enumerate() {
            let id = set.ids[i] as f32;
            let mut position = lerp_position(set.scatter[i], set.target[i], m);
            position.y += sphere_float(time, id, m);
            self.sphere_buffer.write(
                slot,
                InstanceRaw::new(position, Quat::IDENTITY, set.scale[i], set.color[i], 0.0),
            );
        }
        self.box_buffer.mark_dirty();
        self.sphere_buffer.mark_dirty();
    }
}

impl Animated for OrnamentGroup {
    fn animate(&mut self, frame: &FrameInput) {
        self.smoother.set_target(frame.target);
        let m = self.smoother.update(frame.dt);
        self.write_all(frame.time, m);
    }

    fn morph(&self) -> f32 {
        self.smoother.value()
    }
}

/// Blinking fairy lights.
pub struct LightGroup {
    set: InstanceSet,
    smoother: Smoother,
    buffer: InstanceBuffer,
}

impl LightGroup {
    pub fn new(set: InstanceSet, config: &SceneConfig) -> Self {
        let mut group = Self {
            buffer: InstanceBuffer::new(set.len()),
            set,
            smoother: Smoother::new(config.rates.lights, config.smoothing),
        };
        group.write_all(0.0, 0.0);
        group
    }

    pub fn set(&self) -> &InstanceSet {
        &self.set
    }

    pub fn buffer(&self) -> &InstanceBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut InstanceBuffer {
        &mut self.buffer
    }

    fn write_all(&mut self, time: f32, m: f32) {
        let set = &self.set;
        for i in 0..set.len() {
            let position = lerp_position(set.scatter[i], set.target[i], m);
            let blink = light_blink(time, set.phase[i]);
            let color = set.color[i] * light_intensity(blink);
            self.buffer.write(
                i,
                InstanceRaw::new(position, Quat::IDENTITY, light_scale(blink, m), color, 1.0),
            );
        }
        self.buffer.mark_dirty();
    }
}

impl Animated for LightGroup {
    fn animate(&mut self, frame: &FrameInput) {
        self.smoother.set_target(frame.target);
        let m = self.smoother.update(frame.dt);
        self.write_all(frame.time, m);
    }

    fn morph(&self) -> f32 {
        self.smoother.value()
    }
}

/// Starboys and foxgirls, one buffer per mesh.
pub struct MascotGroup {
    set: InstanceSet,
    starboys: Vec<usize>,
    foxgirls: Vec<usize>,
    smoother: Smoother,
    starboy_buffer: InstanceBuffer,
    foxgirl_buffer: InstanceBuffer,
}

impl MascotGroup {
    pub fn new(set: InstanceSet, config: &SceneConfig) -> Self {
        let starboys = set.indices_of(InstanceKind::Mascot(MascotKind::Starboy));
        let foxgirls = set.indices_of(InstanceKind::Mascot(MascotKind::Foxgirl));
        let mut group = Self {
            starboy_buffer: InstanceBuffer::new(starboys.len()),
            foxgirl_buffer: InstanceBuffer::new(foxgirls.len()),
            starboys,
            foxgirls,
            set,
            smoother: Smoother::new(config.rates.mascots, config.smoothing),
        };
        group.write_all(0.0, 0.0);
        group
    }

    pub fn set(&self) -> &InstanceSet {
        &self.set
    }

    pub fn buffer(&self, kind: MascotKind) -> &InstanceBuffer {
        match kind {
            MascotKind::Starboy => &self.starboy_buffer,
            MascotKind::Foxgirl => &self.foxgirl_buffer,
        }
    }

    pub fn buffer_mut(&mut self, kind: MascotKind) -> &mut InstanceBuffer {
        match kind {
            MascotKind::Starboy => &mut self.starboy_buffer,
            MascotKind::Foxgirl => &mut self.foxgirl_buffer,
        }
    }

    fn write_all(&mut self, time: f32, m: f32) {
        let set = &self.set;
        let lists = [
            (&self.starboys, &mut self.starboy_buffer),
            (&self.foxgirls, &mut self.foxgirl_buffer),
        ];
        for (indices, buffer) in lists {
            for (slot, &i) in indices.iter().enumerate() {
                let position = lerp_position(set.scatter[i], set.target[i], m);
                let (ry, rz) = mascot_rotation(set.rotation_seed[i].y, set.speed[i], time, m);
                let rotation = Quat::from_euler(EulerRot::XYZ, 0.0, ry, rz);
                let scale = mascot_pulse(time, set.ids[i] as f32);
                buffer.write(slot, InstanceRaw::new(position, rotation, scale, set.color[i], 0.0));
            }
            buffer.mark_dirty();
        }
    }
}

impl Animated for MascotGroup {
    fn animate(&mut self, frame: &FrameInput) {
        self.smoother.set_target(frame.target);
        let m = self.smoother.update(frame.dt);
        self.write_all(frame.time, m);
    }

    fn morph(&self) -> f32 {
        self.smoother.value()
    }
}

/// The singleton star. Its spin accumulates frame by frame rather than being
/// derived from the clock, so the spin speed can change smoothly.
pub struct StarTopper {
    set: InstanceSet,
    rotation_y: f32,
    smoother: Smoother,
    buffer: InstanceBuffer,
}

impl StarTopper {
    /// Emission multiplier of the star material.
    pub const EMISSIVE: f32 = 2.0;

    pub fn new(set: InstanceSet, config: &SceneConfig) -> Self {
        let mut star = Self {
            buffer: InstanceBuffer::new(set.len()),
            set,
            rotation_y: 0.0,
            smoother: Smoother::new(config.rates.star, config.smoothing),
        };
        star.write_all(0.0, 0.0);
        star
    }

    pub fn set(&self) -> &InstanceSet {
        &self.set
    }

    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn buffer(&self) -> &InstanceBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut InstanceBuffer {
        &mut self.buffer
    }

    fn write_all(&mut self, time: f32, m: f32) {
        let set = &self.set;
        for i in 0..set.len() {
            let mut position = lerp_position(set.scatter[i], set.target[i], m);
            position.y += (time * 2.0).sin() * 0.1;
            let rz = time.sin() * 0.1 * m;
            let rotation = Quat::from_euler(EulerRot::XYZ, 0.0, self.rotation_y, rz);
            let scale = 1.0 + (time * 3.0).sin() * 0.05;
            self.buffer
                .write(i, InstanceRaw::new(position, rotation, scale, set.color[i], Self::EMISSIVE));
        }
        self.buffer.mark_dirty();
    }
}

impl Animated for StarTopper {
    fn animate(&mut self, frame: &FrameInput) {
        self.smoother.set_target(frame.target);
        let m = self.smoother.update(frame.dt);
        self.rotation_y += frame.dt * star_spin_rate(m);
        self.write_all(frame.time, m);
    }

    fn morph(&self) -> f32 {
        self.smoother.value()
    }
}
