use glam::Vec3;
use morph_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: f32 = 1.0 / 60.0;

fn small_config() -> SceneConfig {
    SceneConfig {
        counts: ElementCounts {
            foliage: 64,
            ornaments: 280,
            lights: 50,
            mascots: 24,
        },
        ..SceneConfig::default()
    }
}

fn run<A: Animated>(group: &mut A, target: f32, frames: usize, start: f32) -> f32 {
    let mut time = start;
    for _ in 0..frames {
        time += DT;
        group.animate(&FrameInput {
            dt: DT,
            time,
            target,
        });
    }
    time
}

fn scale_of(raw: &InstanceRaw) -> f32 {
    Vec3::from_slice(&raw.model[0][..3]).length()
}

#[test]
fn light_intensity_stays_in_range() {
    for i in 0..1_000 {
        let t = i as f32 * 0.013;
        for phase in [0.0, 1.0, 2.5, 5.9] {
            let k = light_intensity(light_blink(t, phase));
            assert!((0.8 - 1e-6..=2.0 + 1e-6).contains(&k), "intensity {k}");
        }
    }
}

#[test]
fn light_scale_is_floored_when_scattered() {
    assert_eq!(light_scale(1.0, 0.0), 0.001);
    assert_eq!(light_scale(0.0, 0.0), 0.001);
    assert!((light_scale(1.0, 1.0) - 0.2).abs() < 1e-6);
    assert!((light_scale(0.0, 1.0) - 0.1).abs() < 1e-6);
}

#[test]
fn ornament_kinds_split_roughly_forty_sixty() {
    let config = SceneConfig::default();
    let palette = Palette::default();
    let mut boxes = 0;
    let mut total = 0;
    for seed in 0..5 {
        let set = generate_ornaments(&mut StdRng::seed_from_u64(seed), &config, &palette);
        assert_eq!(set.len(), 280);
        boxes += set.indices_of(InstanceKind::Box).len();
        total += set.len();
    }
    let frac = boxes as f32 / total as f32;
    assert!((frac - 0.4).abs() < 0.05, "box fraction {frac}");
}

#[test]
fn ornament_colors_come_from_the_palette() {
    let config = SceneConfig::default();
    let palette = Palette::default();
    let set = generate_ornaments(&mut StdRng::seed_from_u64(1), &config, &palette);
    for c in &set.color {
        assert!([palette.gold, palette.red_luxury, palette.emerald_light].contains(c));
    }
    for s in &set.scale {
        assert!((0.2..=0.5).contains(s));
    }
}

#[test]
fn mascots_alternate_by_index() {
    let set = generate_mascots(&mut StdRng::seed_from_u64(2), &SceneConfig::default());
    assert_eq!(set.len(), 24);
    for (i, kind) in set.kinds.iter().enumerate() {
        let expected = if i % 2 == 0 {
            MascotKind::Starboy
        } else {
            MascotKind::Foxgirl
        };
        assert_eq!(*kind, InstanceKind::Mascot(expected));
    }
    let group = MascotGroup::new(set, &SceneConfig::default());
    assert_eq!(group.buffer(MascotKind::Starboy).len(), 12);
    assert_eq!(group.buffer(MascotKind::Foxgirl).len(), 12);
}

#[test]
fn star_sits_above_the_apex() {
    let set = generate_star(&mut StdRng::seed_from_u64(4), &SceneConfig::default(), &Palette::default());
    assert_eq!(set.len(), 1);
    assert!((set.target[0] - Vec3::new(0.0, 10.84, 0.0)).length() < 1e-4);
}

#[test]
fn scattered_lights_sit_at_their_scatter_positions() {
    let config = small_config();
    let set = generate_lights(&mut StdRng::seed_from_u64(5), &config, &Palette::default());
    let mut group = LightGroup::new(set, &config);
    run(&mut group, 0.0, 30, 0.0);
    assert_eq!(group.morph(), 0.0);
    for (raw, scatter) in group.buffer().as_slice().iter().zip(&group.set().scatter) {
        assert_eq!(raw.translation(), *scatter);
        assert!((scale_of(raw) - 0.001).abs() < 1e-6);
        assert_eq!(raw.color[3], 1.0);
    }
}

#[test]
fn formed_lights_converge_on_their_targets() {
    let config = small_config();
    let set = generate_lights(&mut StdRng::seed_from_u64(6), &config, &Palette::default());
    let mut group = LightGroup::new(set, &config);
    run(&mut group, 1.0, 600, 0.0);
    assert!(group.morph() > 0.999_99);
    for (raw, target) in group.buffer().as_slice().iter().zip(&group.set().target) {
        assert!((raw.translation() - *target).length() < 1e-3);
        let s = scale_of(raw);
        assert!((0.1 - 1e-4..=0.2 + 1e-4).contains(&s), "scale {s}");
    }
}

#[test]
fn formed_ornaments_only_bob_slightly() {
    let config = small_config();
    let set = generate_ornaments(&mut StdRng::seed_from_u64(7), &config, &Palette::default());
    let boxes = set.indices_of(InstanceKind::Box);
    let spheres = set.indices_of(InstanceKind::Sphere);
    let mut group = OrnamentGroup::new(set, &config);
    assert_eq!(group.box_buffer().len() + group.sphere_buffer().len(), 280);

    run(&mut group, 1.0, 900, 0.0);
    let set = group.set();
    for (slot, &i) in boxes.iter().enumerate() {
        let p = group.box_buffer().as_slice()[slot].translation();
        let d = p - set.target[i];
        assert!(d.x.abs() < 1e-3 && d.z.abs() < 1e-3);
        assert!(d.y.abs() <= 0.05 + 1e-3, "box bob {}", d.y);
    }
    for (slot, &i) in spheres.iter().enumerate() {
        let p = group.sphere_buffer().as_slice()[slot].translation();
        assert!((p - set.target[i]).length() < 1e-3);
        assert_eq!(group.sphere_buffer().as_slice()[slot].color[3], 0.0);
    }
}

#[test]
fn star_spin_accumulates_per_frame() {
    let config = small_config();
    let set = generate_star(&mut StdRng::seed_from_u64(8), &config, &Palette::default());
    let mut star = StarTopper::new(set, &config);
    run(&mut star, 0.0, 60, 0.0);
    // scattered: 2.5 rad/s for one second
    assert!((star.rotation_y() - 2.5).abs() < 1e-3, "rotation {}", star.rotation_y());
    assert_eq!(star.buffer().as_slice()[0].color[3], StarTopper::EMISSIVE);

    let time = run(&mut star, 1.0, 600, 1.0);
    let before = star.rotation_y();
    run(&mut star, 1.0, 60, time);
    let formed_rate = star.rotation_y() - before;
    assert!((formed_rate - 0.5).abs() < 1e-3, "formed spin {formed_rate}");
}

#[test]
fn star_spin_rate_blends_with_morph() {
    assert_eq!(star_spin_rate(0.0), 2.5);
    assert_eq!(star_spin_rate(1.0), 0.5);
    assert!((star_spin_rate(0.5) - 1.5).abs() < 1e-6);
}

#[test]
fn buffers_report_dirty_after_each_frame() {
    let config = small_config();
    let set = generate_lights(&mut StdRng::seed_from_u64(9), &config, &Palette::default());
    let mut group = LightGroup::new(set, &config);
    assert!(group.buffer().is_dirty());
    group.buffer_mut().mark_uploaded();
    assert!(!group.buffer().is_dirty());
    run(&mut group, 0.0, 1, 0.0);
    assert!(group.buffer().is_dirty());
}

#[test]
fn box_rotation_slows_on_two_axes_when_formed() {
    let seed = Vec3::new(0.3, 0.2, 0.0);
    let scattered = box_rotation(seed, 0.02, 10.0, 0.0);
    let formed = box_rotation(seed, 0.02, 10.0, 1.0);
    assert!((scattered - seed - Vec3::splat(0.2)).length() < 1e-5);
    assert!((formed.x - seed.x - 0.04).abs() < 1e-5);
    assert!((formed.y - seed.y - 0.2).abs() < 1e-5);
    assert!((formed.z - 0.04).abs() < 1e-5);
}

#[test]
fn mascot_rotation_switches_from_spin_to_wobble() {
    let (y, z) = mascot_rotation(1.0, 0.7, 3.0, 0.0);
    assert!((y - 4.0).abs() < 1e-6);
    assert_eq!(z, 0.0);

    let (y, z) = mascot_rotation(1.0, 0.7, 3.0, 1.0);
    assert!((y - (1.0 + (2.1f32).sin() * 0.2)).abs() < 1e-6);
    assert!((z - (2.1f32).cos() * 0.1).abs() < 1e-6);
}

#[test]
fn float_offsets_vanish_when_formed() {
    for i in 0..100 {
        let t = i as f32 * 0.1;
        assert_eq!(sphere_float(t, 3.0, 1.0), 0.0);
        assert!(box_float(t, 3.0, 1.0).abs() <= 0.05 + 1e-6);
        assert!(box_float(t, 3.0, 0.0).abs() <= 0.15 + 1e-6);
        let pulse = box_scale_pulse(t, 3.0);
        assert!((0.6 - 1e-6..=1.0 + 1e-6).contains(&pulse));
        let pulse = mascot_pulse(t, 3.0);
        assert!((0.95 - 1e-6..=1.05 + 1e-6).contains(&pulse));
    }
}
