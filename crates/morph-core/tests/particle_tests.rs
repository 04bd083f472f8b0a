use glam::{Mat4, Vec2, Vec3};
use morph_core::particles::*;
use morph_core::{SceneConfig, FOLIAGE_BASE_COLOR, FOLIAGE_HIGHLIGHT_COLOR};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn frame(morph: f32, time: f32) -> ParticleFrame {
    ParticleFrame {
        time,
        morph,
        pixel_ratio: 1.0,
        model_view: Mat4::from_translation(Vec3::new(0.0, -4.0, -18.0)),
    }
}

fn system(n: usize, seed: u64) -> ParticleSystem {
    let mut config = SceneConfig::default();
    config.counts.foliage = n;
    ParticleSystem::generate(&mut StdRng::seed_from_u64(seed), &config)
}

#[test]
fn generated_attributes_are_in_range() {
    let ps = system(2_000, 1);
    assert_eq!(ps.len(), 2_000);
    for i in 0..ps.len() {
        let a = ps.attributes(i);
        assert!(a.scatter.length() <= 18.0);
        assert!((0.0..1.0).contains(&a.random));
        assert!((0.5..=1.0).contains(&a.size));
    }
}

#[test]
fn alpha_tracks_morph() {
    assert_eq!(particle_alpha(0.0), 0.6);
    assert_eq!(particle_alpha(1.0), 1.0);
    for i in 0..=20 {
        let a = particle_alpha(i as f32 / 20.0);
        assert!((0.6..=1.0).contains(&a));
    }
}

#[test]
fn highlight_is_a_hard_step() {
    assert_eq!(highlight_color(0.0), FOLIAGE_BASE_COLOR);
    assert_eq!(highlight_color(0.899_99), FOLIAGE_BASE_COLOR);
    assert_eq!(highlight_color(HIGHLIGHT_THRESHOLD), FOLIAGE_HIGHLIGHT_COLOR);
    assert_eq!(highlight_color(1.0), FOLIAGE_HIGHLIGHT_COLOR);
}

#[test]
fn every_particle_is_either_base_or_highlight() {
    let ps = system(500, 2);
    for v in shade_particles(&ps, &frame(0.5, 3.7)) {
        assert!(v.color == FOLIAGE_BASE_COLOR || v.color == FOLIAGE_HIGHLIGHT_COLOR);
    }
}

#[test]
fn fragment_is_round_with_a_soft_glow() {
    let color = Vec3::new(0.1, 0.2, 0.3);
    let center = particle_fragment(Vec2::splat(0.5), color, 0.8).map(|c| c.w);
    assert_eq!(center, Some(0.8));
    assert!(particle_fragment(Vec2::ZERO, color, 1.0).is_none());
    assert!(particle_fragment(Vec2::new(1.0, 0.5), color, 1.0).is_some());
    assert!(particle_fragment(Vec2::new(1.01, 0.5), color, 1.0).is_none());

    let mid = particle_fragment(Vec2::new(0.75, 0.5), color, 1.0).map(|c| c.w);
    let expected = 0.5f32.powf(1.5);
    assert!(mid.is_some_and(|a| (a - expected).abs() < 1e-6));
}

#[test]
fn point_size_shrinks_with_distance() {
    assert_eq!(point_size(1.0, 1.0, 50.0), 1.0);
    assert!(point_size(1.0, 1.0, 10.0) > point_size(1.0, 1.0, 20.0));
    assert_eq!(point_size(0.5, 2.0, 25.0), 2.0);
}

#[test]
fn breathing_is_vertical_and_calmer_when_formed() {
    assert!((breath_amplitude(0.0) - 0.3).abs() < 1e-6);
    assert!((breath_amplitude(1.0) - 0.15).abs() < 1e-6);

    let ps = system(200, 3);
    for i in 0..ps.len() {
        let a = ps.attributes(i);
        let v = particle_vertex(&a, &frame(1.0, 2.0));
        assert!((v.position.x - a.target.x).abs() < 1e-5);
        assert!((v.position.z - a.target.z).abs() < 1e-5);
        let dy = v.position.y - a.target.y;
        assert!((-1e-5..=0.15 + 1e-5).contains(&dy), "breath {dy}");
    }
}

#[test]
fn scattered_particles_start_at_their_scatter_positions() {
    let ps = system(100, 4);
    for i in 0..ps.len() {
        let a = ps.attributes(i);
        let v = particle_vertex(&a, &frame(0.0, 0.0));
        assert_eq!(v.position.x, a.scatter.x);
        assert_eq!(v.position.z, a.scatter.z);
        assert_eq!(v.alpha, 0.6);
    }
}

#[test]
fn view_depth_drives_sprite_size() {
    let a = ParticleAttributes {
        scatter: Vec3::ZERO,
        target: Vec3::ZERO,
        random: 0.5,
        size: 1.0,
    };
    let mut f = frame(0.0, 0.0);
    f.model_view = Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0));
    let near = particle_vertex(&a, &f);
    f.model_view = Mat4::from_translation(Vec3::new(0.0, 0.0, -25.0));
    let far = particle_vertex(&a, &f);
    assert!((near.view_depth - 10.0).abs() < 1e-5);
    assert!((near.point_size - 5.0).abs() < 1e-4);
    assert!((far.point_size - 2.0).abs() < 1e-4);
}

#[test]
fn parallel_shading_matches_sequential() {
    let ps = system(3_000, 5);
    let f = frame(0.37, 12.5);
    let par = shade_particles(&ps, &f);
    let seq: Vec<_> = (0..ps.len()).map(|i| particle_vertex(&ps.attributes(i), &f)).collect();
    assert_eq!(par, seq);
}

#[test]
fn noise_is_continuous() {
    let p = Vec3::new(1.3, 2.7, -0.4);
    let a = value_noise(p);
    let b = value_noise(p + Vec3::splat(1e-3));
    assert!((a - b).abs() < 0.05);
}
