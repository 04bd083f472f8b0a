//! Logical scene state and camera types shared with the front-ends.
//!
//! These types avoid platform-specific APIs and are used on both native and
//! web targets.

use crate::constants::*;
use glam::{Mat4, Vec3};

/// The two logical arrangements. Everything visual between them comes from the
/// per-group smoothers, not from intermediate states here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MorphState {
    #[default]
    Scattered,
    Formed,
}

impl MorphState {
    pub fn toggled(self) -> Self {
        match self {
            MorphState::Scattered => MorphState::Formed,
            MorphState::Formed => MorphState::Scattered,
        }
    }

    /// The morph target: 0 when scattered, 1 when formed.
    pub fn target(self) -> f32 {
        match self {
            MorphState::Scattered => 0.0,
            MorphState::Formed => 1.0,
        }
    }

    /// Caption for the toggle control: names the action it will perform.
    pub fn action_label(self) -> &'static str {
        match self {
            MorphState::Scattered => "ASSEMBLE FORM",
            MorphState::Formed => "SCATTER ESSENCE",
        }
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Orbit controls around the origin: drag to orbit, wheel to zoom, optional
/// auto-rotation. No panning.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    /// Angle around +Y, measured from +Z toward +X.
    pub azimuth: f32,
    /// Angle from +Y.
    pub polar: f32,
    pub distance: f32,
    pub auto_rotate: bool,
    pub aspect: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        let distance = CAMERA_EYE.length();
        Self {
            azimuth: CAMERA_EYE.x.atan2(CAMERA_EYE.z),
            polar: (CAMERA_EYE.y / distance).clamp(-1.0, 1.0).acos(),
            distance,
            auto_rotate: false,
            aspect: 16.0 / 9.0,
        }
    }
}

impl OrbitCamera {
    /// Auto-rotation angular speed in rad/s (orbit-controls convention: one
    /// full turn every 60 / speed seconds).
    pub fn auto_rotate_rate() -> f32 {
        std::f32::consts::TAU / 60.0 * CAMERA_AUTO_ROTATE_SPEED
    }

    pub fn update(&mut self, dt: f32) {
        if self.auto_rotate {
            self.azimuth += Self::auto_rotate_rate() * dt;
        }
    }

    pub fn orbit(&mut self, dx_px: f32, dy_px: f32) {
        self.azimuth -= dx_px * CAMERA_DRAG_RADIANS_PER_PX;
        self.polar = (self.polar - dy_px * CAMERA_DRAG_RADIANS_PER_PX).clamp(1e-3, CAMERA_MAX_POLAR);
    }

    /// Positive notches zoom in.
    pub fn zoom(&mut self, notches: f32) {
        self.distance = (self.distance * CAMERA_ZOOM_PER_NOTCH.powf(notches))
            .clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn eye(&self) -> Vec3 {
        let s = self.polar.sin();
        Vec3::new(
            self.distance * s * self.azimuth.sin(),
            self.distance * self.polar.cos(),
            self.distance * s * self.azimuth.cos(),
        )
    }

    pub fn camera(&self) -> Camera {
        Camera {
            eye: self.eye(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: self.aspect,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}
