use glam::Vec3;
use morph_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: f32 = 1.0 / 60.0;

fn small_config() -> SceneConfig {
    SceneConfig {
        counts: ElementCounts {
            foliage: 256,
            ornaments: 40,
            lights: 30,
            mascots: 6,
        },
        ..SceneConfig::default()
    }
}

fn scene() -> MorphScene {
    match MorphScene::new(small_config(), &mut StdRng::seed_from_u64(42)) {
        Ok(scene) => scene,
        Err(e) => panic!("scene failed to build: {e}"),
    }
}

#[test]
fn default_config_is_valid() {
    assert_eq!(SceneConfig::default().validate(), Ok(()));
}

#[test]
fn zero_counts_are_rejected_by_field() {
    let mut config = SceneConfig::default();
    config.counts.lights = 0;
    assert_eq!(
        config.validate(),
        Err(ConfigError::ZeroCount {
            field: "counts.lights"
        })
    );
}

#[test]
fn non_positive_dimensions_are_rejected() {
    let mut config = SceneConfig::default();
    config.tree.height = -1.0;
    let err = config.validate().err();
    assert!(matches!(
        err,
        Some(ConfigError::NonPositive {
            field: "tree.height",
            ..
        })
    ));

    let mut config = SceneConfig::default();
    config.rates.star = f32::NAN;
    let msg = config.validate().map_err(|e| e.to_string()).err();
    assert!(msg.is_some_and(|m| m.contains("rates.star")));
}

#[test]
fn invalid_config_fails_scene_construction() {
    let mut config = small_config();
    config.counts.foliage = 0;
    let result = MorphScene::new(config, &mut StdRng::seed_from_u64(1));
    assert!(matches!(
        result,
        Err(MorphError::Config(ConfigError::ZeroCount {
            field: "counts.foliage"
        }))
    ));
}

#[test]
fn pixel_ratio_is_clamped() {
    assert_eq!(clamp_pixel_ratio(0.5), 1.0);
    assert_eq!(clamp_pixel_ratio(1.5), 1.5);
    assert_eq!(clamp_pixel_ratio(3.0), 2.0);
    assert_eq!(clamp_pixel_ratio(f32::INFINITY), 1.0);
    assert_eq!(SceneConfig::default().with_pixel_ratio(2.75).pixel_ratio, 2.0);

    let mut s = scene();
    s.set_pixel_ratio(0.25);
    assert_eq!(s.frame(DT).pixel_ratio, 1.0);
}

#[test]
fn state_toggle_flips_target_and_label() {
    let s = MorphState::default();
    assert_eq!(s, MorphState::Scattered);
    assert_eq!(s.target(), 0.0);
    assert_eq!(s.action_label(), "ASSEMBLE FORM");
    let f = s.toggled();
    assert_eq!(f.target(), 1.0);
    assert_eq!(f.action_label(), "SCATTER ESSENCE");
    assert_eq!(f.toggled(), s);
}

#[test]
fn scene_builds_every_group() {
    let s = scene();
    assert_eq!(s.particles().len(), 256);
    assert_eq!(s.ornaments.set().len(), 40);
    assert_eq!(s.lights.buffer().len(), 30);
    assert_eq!(s.mascots.set().len(), 6);
    assert_eq!(s.star.buffer().len(), 1);
    assert_eq!(s.state(), MorphState::Scattered);
    assert_eq!(s.foliage_morph(), 0.0);
}

#[test]
fn toggling_forms_the_tree_and_starts_auto_rotation() {
    let mut s = scene();
    assert!(!s.camera.auto_rotate);
    assert_eq!(s.toggle(), MorphState::Formed);
    assert!(s.camera.auto_rotate);

    let mut prev = 0.0;
    for _ in 0..600 {
        let u = s.frame(DT);
        assert!(u.morph >= prev);
        prev = u.morph;
    }
    assert!((1.0 - s.foliage_morph()).abs() < 1e-6);
    assert!(s.lights.morph() > 0.999_99);
    assert!(s.ornaments.morph() > 0.999_99);
    assert!(s.mascots.morph() > 0.999_99);
    assert!(s.star.morph() > 0.999_99);
    assert!((s.time() - 10.0).abs() < 1e-3);
}

#[test]
fn groups_converge_at_their_own_rates() {
    let mut s = scene();
    s.toggle();
    for _ in 0..20 {
        s.frame(DT);
    }
    // lights 3.0 > foliage 2.5 > ornaments 2.0
    assert!(s.lights.morph() > s.foliage_morph());
    assert!(s.foliage_morph() > s.ornaments.morph());
    assert_eq!(s.ornaments.morph(), s.mascots.morph());
}

#[test]
fn toggling_mid_flight_keeps_the_smoothed_value() {
    let mut s = scene();
    s.toggle();
    for _ in 0..30 {
        s.frame(DT);
    }
    let before = s.foliage_morph();
    assert_eq!(s.toggle(), MorphState::Scattered);
    assert!(!s.camera.auto_rotate);
    assert_eq!(s.foliage_morph(), before);
    let after = s.frame(DT).morph;
    assert!(after < before && before - after < 0.05);
}

#[test]
fn camera_only_spins_when_formed() {
    let mut s = scene();
    let az = s.camera.azimuth;
    for _ in 0..60 {
        s.frame(DT);
    }
    assert_eq!(s.camera.azimuth, az);

    s.set_state(MorphState::Formed);
    for _ in 0..60 {
        s.frame(DT);
    }
    let turned = s.camera.azimuth - az;
    assert!((turned - OrbitCamera::auto_rotate_rate()).abs() < 1e-4);
}

#[test]
fn orbit_camera_defaults_and_limits() {
    let mut cam = OrbitCamera::default();
    assert!((cam.eye() - Vec3::new(0.0, 2.0, 18.0)).length() < 1e-4);

    cam.zoom(1_000.0);
    assert_eq!(cam.distance, CAMERA_MIN_DISTANCE);
    cam.zoom(-1_000.0);
    assert_eq!(cam.distance, CAMERA_MAX_DISTANCE);

    cam.orbit(0.0, -100_000.0);
    assert!(cam.polar <= CAMERA_MAX_POLAR);
    cam.orbit(0.0, 100_000.0);
    assert!(cam.polar > 0.0);

    cam.set_viewport(800, 0);
    assert_eq!(cam.aspect, 800.0);
    assert_eq!(cam.camera().target, Vec3::ZERO);
}

#[test]
fn scene_is_lowered_by_the_model_offset() {
    let s = scene();
    let p = s.model_matrix().transform_point3(Vec3::ZERO);
    assert_eq!(p, Vec3::new(0.0, -4.0, 0.0));
}

#[test]
fn negative_frame_time_is_ignored() {
    let mut s = scene();
    s.toggle();
    let u = s.frame(-1.0);
    assert_eq!(u.time, 0.0);
    assert_eq!(u.morph, 0.0);
}
