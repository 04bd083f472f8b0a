//! Frame driver tying the morph engine together.
//!
//! The host owns the render loop and calls [`MorphScene::frame`] once per
//! rendered frame; the renderer then uploads whatever the groups marked dirty.

use crate::animator::{Animated, FrameInput, LightGroup, MascotGroup, OrnamentGroup, StarTopper};
use crate::backdrop::Backdrop;
use crate::config::{clamp_pixel_ratio, SceneConfig};
use crate::constants::SCENE_OFFSET;
use crate::error::MorphError;
use crate::instances::{generate_lights, generate_mascots, generate_ornaments, generate_star, Palette};
use crate::particles::ParticleSystem;
use crate::smoothing::Smoother;
use crate::state::{MorphState, OrbitCamera};
use glam::Mat4;
use rand::Rng;

/// Per-frame globals consumed by the particle shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameUniforms {
    pub time: f32,
    pub morph: f32,
    pub pixel_ratio: f32,
}

pub struct MorphScene {
    config: SceneConfig,
    state: MorphState,
    time: f32,
    particles: ParticleSystem,
    backdrop: Backdrop,
    foliage: Smoother,
    pub ornaments: OrnamentGroup,
    pub lights: LightGroup,
    pub mascots: MascotGroup,
    pub star: StarTopper,
    pub camera: OrbitCamera,
}

impl MorphScene {
    /// Validate `config` and generate every element's layout.
    pub fn new<R: Rng + ?Sized>(config: SceneConfig, rng: &mut R) -> Result<Self, MorphError> {
        config.validate()?;
        let palette = Palette::default();
        let particles = ParticleSystem::generate(rng, &config);
        let ornaments = OrnamentGroup::new(generate_ornaments(rng, &config, &palette), &config);
        let lights = LightGroup::new(generate_lights(rng, &config, &palette), &config);
        let mascots = MascotGroup::new(generate_mascots(rng, &config), &config);
        let star = StarTopper::new(generate_star(rng, &config, &palette), &config);
        let backdrop = Backdrop::generate(rng, &config.backdrop, palette.gold);
        log::info!(
            "[scene] particles={} boxes={} spheres={} lights={} mascots={} stars={} sparkles={}",
            particles.len(),
            ornaments.box_buffer().len(),
            ornaments.sphere_buffer().len(),
            lights.buffer().len(),
            mascots.set().len(),
            backdrop.stars.len(),
            backdrop.sparkles.len(),
        );
        Ok(Self {
            foliage: Smoother::new(config.rates.foliage, config.smoothing),
            config,
            state: MorphState::default(),
            time: 0.0,
            particles,
            backdrop,
            ornaments,
            lights,
            mascots,
            star,
            camera: OrbitCamera::default(),
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn state(&self) -> MorphState {
        self.state
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    /// Star field and sparkles. They sit outside the scene offset.
    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    /// Smoothed morph value of the foliage cloud.
    pub fn foliage_morph(&self) -> f32 {
        self.foliage.value()
    }

    /// Model transform applied to everything that morphs.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(SCENE_OFFSET)
    }

    pub fn set_pixel_ratio(&mut self, pixel_ratio: f32) {
        self.config.pixel_ratio = clamp_pixel_ratio(pixel_ratio);
    }

    /// Flip the logical state. Smoothed values are untouched; they turn around
    /// on the next frame.
    pub fn toggle(&mut self) -> MorphState {
        self.set_state(self.state.toggled());
        self.state
    }

    pub fn set_state(&mut self, state: MorphState) {
        if state != self.state {
            log::debug!("[scene] {:?} -> {:?}", self.state, state);
        }
        self.state = state;
        self.camera.auto_rotate = state == MorphState::Formed;
    }

    /// Advance every group by `dt` seconds.
    pub fn frame(&mut self, dt: f32) -> FrameUniforms {
        let dt = dt.max(0.0);
        self.time += dt;
        let input = FrameInput {
            dt,
            time: self.time,
            target: self.state.target(),
        };
        self.foliage.set_target(input.target);
        let morph = self.foliage.update(dt);
        self.ornaments.animate(&input);
        self.lights.animate(&input);
        self.mascots.animate(&input);
        self.star.animate(&input);
        self.camera.update(dt);
        FrameUniforms {
            time: self.time,
            morph,
            pixel_ratio: self.config.pixel_ratio,
        }
    }
}
