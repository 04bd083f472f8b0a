use morph_core::distribution::{
    cone_level, normalized_height, radial_distance, scatter_in_cube, scatter_point, shell_point,
    target_point, ShellRadius,
};
use morph_core::TreeConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn tree() -> TreeConfig {
    TreeConfig {
        height: 12.0,
        radius_base: 4.5,
        scatter_radius: 18.0,
    }
}

#[test]
fn scatter_points_stay_inside_the_sphere() {
    let mut rng = StdRng::seed_from_u64(7);
    let radius = 18.0;
    let n = 10_000;
    let mut sum = 0.0;
    for _ in 0..n {
        let p = scatter_point(&mut rng, radius);
        let len = p.length();
        assert!(len <= radius, "{p} is {len} from the center");
        sum += len;
    }
    // E|p| = 3R/4 for a volume-uniform ball
    let mean = sum / n as f32;
    assert!((mean / radius - 0.75).abs() < 0.01, "mean radius {mean}");
}

#[test]
fn scatter_points_fill_the_volume_evenly() {
    let mut rng = StdRng::seed_from_u64(11);
    let n = 20_000;
    let inner = (0..n)
        .map(|_| scatter_point(&mut rng, 1.0))
        .filter(|p| p.length() < 0.5)
        .count();
    // half the radius holds an eighth of the volume
    let frac = inner as f32 / n as f32;
    assert!((frac - 0.125).abs() < 0.01, "inner fraction {frac}");
}

#[test]
fn cube_scatter_respects_half_side() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..5_000 {
        let p = scatter_in_cube(&mut rng, 36.0);
        assert!(p.abs().max_element() <= 18.0, "{p}");
    }
}

#[test]
fn cone_levels_span_apex_to_base() {
    let mut rng = StdRng::seed_from_u64(5);
    let tree = tree();
    for _ in 0..5_000 {
        let level = cone_level(&mut rng, &tree, 1.0);
        assert!(level.y >= -0.2 * tree.height - 1e-4 && level.y <= 0.8 * tree.height + 1e-4);
        assert!((-1e-6..=1.0 + 1e-6).contains(&level.normalized));
        assert!((level.radius_max - level.normalized * tree.radius_base).abs() < 1e-5);
    }
    assert!((normalized_height(-2.4, 12.0) - 1.0).abs() < 1e-6);
    assert!(normalized_height(9.6, 12.0).abs() < 1e-6);
}

#[test]
fn target_points_lie_inside_the_cone() {
    let mut rng = StdRng::seed_from_u64(17);
    let tree = tree();
    for _ in 0..12_000 {
        let p = target_point(&mut rng, &tree);
        let limit = normalized_height(p.y, tree.height) * tree.radius_base;
        assert!(radial_distance(p) <= limit + 1e-4, "{p} outside radius {limit}");
    }
}

#[test]
fn cone_is_narrow_at_the_apex_and_full_at_the_base() {
    let mut rng = StdRng::seed_from_u64(23);
    let tree = tree();
    let points: Vec<_> = (0..12_000).map(|_| target_point(&mut rng, &tree)).collect();

    let apex_max = points
        .iter()
        .filter(|p| normalized_height(p.y, tree.height) < 0.02)
        .map(|p| radial_distance(*p))
        .fold(0.0f32, f32::max);
    assert!(apex_max <= 0.02 * tree.radius_base + 1e-4, "apex radius {apex_max}");

    let mut base: Vec<f32> = points
        .iter()
        .filter(|p| normalized_height(p.y, tree.height) > 0.98)
        .map(|p| radial_distance(*p))
        .collect();
    assert!(base.len() > 100, "only {} base samples", base.len());
    base.sort_by(f32::total_cmp);
    let p95 = base[base.len() * 95 / 100];
    assert!(p95 <= tree.radius_base);
    assert!(tree.radius_base - p95 < 0.35, "95th percentile {p95}");
}

#[test]
fn radial_density_is_uniform_per_disk_area() {
    let mut rng = StdRng::seed_from_u64(29);
    let tree = tree();
    let mut bins = [0usize; 10];
    let mut total = 0;
    for _ in 0..20_000 {
        let p = target_point(&mut rng, &tree);
        let nh = normalized_height(p.y, tree.height);
        if !(0.3..0.7).contains(&nh) {
            continue;
        }
        // r² / r_max² is uniform when density is constant per unit area
        let q = (radial_distance(p) / (nh * tree.radius_base)).powi(2);
        bins[((q * 10.0) as usize).min(9)] += 1;
        total += 1;
    }
    let expected = total as f32 / 10.0;
    for (i, &count) in bins.iter().enumerate() {
        let dev = (count as f32 - expected).abs() / expected;
        assert!(dev < 0.15, "bin {i}: {count} vs {expected}");
    }
}

#[test]
fn shell_radius_rules() {
    let tree = tree();
    let scaled = shell_point(&mut StdRng::seed_from_u64(1), &tree, 0.95, ShellRadius::Scaled(0.9));
    let level = cone_level(&mut StdRng::seed_from_u64(1), &tree, 0.95);
    assert!((radial_distance(scaled) - level.radius_max * 0.9).abs() < 1e-4);
    assert_eq!(scaled.y, level.y);

    let offset = shell_point(&mut StdRng::seed_from_u64(2), &tree, 0.8, ShellRadius::Offset(0.8));
    let level = cone_level(&mut StdRng::seed_from_u64(2), &tree, 0.8);
    assert!((radial_distance(offset) - (level.radius_max + 0.8)).abs() < 1e-4);

    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..2_000 {
        let p = shell_point(&mut rng, &tree, 0.9, ShellRadius::Jitter(0.5));
        let r_max = normalized_height(p.y, tree.height).max(0.0) * tree.radius_base;
        let extra = radial_distance(p) - r_max;
        assert!((-1e-4..0.5 + 1e-4).contains(&extra), "jitter {extra}");
    }
}

#[test]
fn height_scale_keeps_groups_below_the_apex() {
    let mut rng = StdRng::seed_from_u64(31);
    let tree = tree();
    for _ in 0..2_000 {
        let level = cone_level(&mut rng, &tree, 0.8);
        assert!(level.y <= 0.8 * 0.8 * tree.height + 1e-4);
        assert!(level.normalized > 0.0);
    }
}

#[test]
fn same_seed_same_layout() {
    let tree = tree();
    let a: Vec<_> = {
        let mut rng = StdRng::seed_from_u64(99);
        (0..64).map(|_| target_point(&mut rng, &tree)).collect()
    };
    let b: Vec<_> = {
        let mut rng = StdRng::seed_from_u64(99);
        (0..64).map(|_| target_point(&mut rng, &tree)).collect()
    };
    assert_eq!(a, b);
}
