//! Procedural meshes for the instanced groups.
//!
//! Every mesh is built once at startup in object space; per-instance
//! transforms come from the animator. Vertex colors let one mesh carry
//! several materials (the mascots), and the vertex alpha adds to the
//! instance's emissive amount.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Quat, Vec3, Vec4};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    fn push_vertex(&mut self, position: Vec3, normal: Vec3, color: Vec4) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(MeshVertex {
            position: position.to_array(),
            normal: normal.normalize_or_zero().to_array(),
            color: color.to_array(),
        });
        index
    }

    /// Apply `transform` to positions and normals.
    pub fn transformed(mut self, transform: Mat4) -> Self {
        let normal_matrix = Mat3::from_mat4(transform).inverse().transpose();
        for v in &mut self.vertices {
            let p = transform.transform_point3(Vec3::from(v.position));
            let n = (normal_matrix * Vec3::from(v.normal)).normalize_or_zero();
            v.position = p.to_array();
            v.normal = n.to_array();
        }
        self
    }

    /// Merge `other` into this mesh.
    pub fn append(&mut self, other: Mesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(other.vertices);
        self.indices.extend(other.indices.into_iter().map(|i| i + base));
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Axis-aligned box centered at the origin.
pub fn cuboid(size: Vec3, color: Vec4) -> Mesh {
    let h = size * 0.5;
    let mut mesh = Mesh::default();
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Y, Vec3::NEG_Z),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::NEG_Z, Vec3::X),
        (Vec3::Z, Vec3::Y, Vec3::NEG_X),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];
    for (normal, up, side) in faces {
        let center = normal * h;
        let u = side * h;
        let v = up * h;
        let a = mesh.push_vertex(center - u - v, normal, color);
        let b = mesh.push_vertex(center + u - v, normal, color);
        let c = mesh.push_vertex(center + u + v, normal, color);
        let d = mesh.push_vertex(center - u + v, normal, color);
        mesh.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }
    mesh
}

pub fn uv_sphere(radius: f32, segments: u32, rings: u32, color: Vec4) -> Mesh {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut mesh = Mesh::default();
    for r in 0..=rings {
        let theta = PI * r as f32 / rings as f32;
        for s in 0..=segments {
            let phi = TAU * s as f32 / segments as f32;
            let n = Vec3::new(theta.sin() * phi.sin(), theta.cos(), theta.sin() * phi.cos());
            mesh.push_vertex(n * radius, n, color);
        }
    }
    let stride = segments + 1;
    for r in 0..rings {
        for s in 0..segments {
            let a = r * stride + s;
            let b = a + stride;
            mesh.indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    mesh
}

/// Cone with its base centered at -height/2 and apex at +height/2.
pub fn cone(radius: f32, height: f32, segments: u32, color: Vec4) -> Mesh {
    let segments = segments.max(3);
    let mut mesh = Mesh::default();
    let half = height * 0.5;
    let slope = radius / height;
    let apex = Vec3::new(0.0, half, 0.0);
    for s in 0..segments {
        let a0 = TAU * s as f32 / segments as f32;
        let a1 = TAU * (s + 1) as f32 / segments as f32;
        let p0 = Vec3::new(a0.sin() * radius, -half, a0.cos() * radius);
        let p1 = Vec3::new(a1.sin() * radius, -half, a1.cos() * radius);
        let n0 = Vec3::new(a0.sin(), slope, a0.cos());
        let n1 = Vec3::new(a1.sin(), slope, a1.cos());
        let i0 = mesh.push_vertex(p0, n0, color);
        let i1 = mesh.push_vertex(p1, n1, color);
        let ia = mesh.push_vertex(apex, n0 + n1, color);
        mesh.indices.extend_from_slice(&[i0, i1, ia]);

        let b0 = mesh.push_vertex(p0, Vec3::NEG_Y, color);
        let b1 = mesh.push_vertex(p1, Vec3::NEG_Y, color);
        let bc = mesh.push_vertex(Vec3::new(0.0, -half, 0.0), Vec3::NEG_Y, color);
        mesh.indices.extend_from_slice(&[b1, b0, bc]);
    }
    mesh
}

/// Capsule along Y: a cylinder of `length` capped by two hemispheres.
pub fn capsule(radius: f32, length: f32, segments: u32, cap_rings: u32, color: Vec4) -> Mesh {
    let segments = segments.max(3);
    let cap_rings = cap_rings.max(1);
    let half = length * 0.5;
    let mut mesh = Mesh::default();
    // rings from the top pole down to the bottom pole; the equator is
    // duplicated so the straight section gets its own ring pair
    let mut ring_params: Vec<(f32, f32)> = Vec::new();
    for r in 0..=cap_rings {
        let theta = FRAC_PI_2 * r as f32 / cap_rings as f32;
        ring_params.push((theta, half));
    }
    for r in 0..=cap_rings {
        let theta = FRAC_PI_2 + FRAC_PI_2 * r as f32 / cap_rings as f32;
        ring_params.push((theta, -half));
    }
    for &(theta, offset) in &ring_params {
        for s in 0..=segments {
            let phi = TAU * s as f32 / segments as f32;
            let n = Vec3::new(theta.sin() * phi.sin(), theta.cos(), theta.sin() * phi.cos());
            mesh.push_vertex(n * radius + Vec3::new(0.0, offset, 0.0), n, color);
        }
    }
    let stride = segments + 1;
    for r in 0..(ring_params.len() as u32 - 1) {
        for s in 0..segments {
            let a = r * stride + s;
            let b = a + stride;
            mesh.indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    mesh
}

/// Outline of a star in the XY plane, starting at the top point.
pub fn star_outline(points: u32, outer: f32, inner: f32) -> Vec<Vec3> {
    let n = points.max(2) * 2;
    (0..n)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let a = i as f32 / n as f32 * TAU + FRAC_PI_2;
            Vec3::new(a.cos() * r, a.sin() * r, 0.0)
        })
        .collect()
}

/// Star prism extruded along +Z by `depth`, centered on its own depth.
pub fn extruded_star(points: u32, outer: f32, inner: f32, depth: f32, color: Vec4) -> Mesh {
    let outline = star_outline(points, outer, inner);
    let n = outline.len() as u32;
    let front_z = depth * 0.5;
    let back_z = -depth * 0.5;
    let mut mesh = Mesh::default();

    // caps: fans around the center
    for (z, normal) in [(front_z, Vec3::Z), (back_z, Vec3::NEG_Z)] {
        let center = mesh.push_vertex(Vec3::new(0.0, 0.0, z), normal, color);
        let first = mesh.vertices.len() as u32;
        for p in &outline {
            mesh.push_vertex(Vec3::new(p.x, p.y, z), normal, color);
        }
        for i in 0..n {
            let a = first + i;
            let b = first + (i + 1) % n;
            if normal.z > 0.0 {
                mesh.indices.extend_from_slice(&[center, a, b]);
            } else {
                mesh.indices.extend_from_slice(&[center, b, a]);
            }
        }
    }

    // flat-shaded side walls
    for i in 0..n as usize {
        let p0 = outline[i];
        let p1 = outline[(i + 1) % n as usize];
        let edge = p1 - p0;
        let normal = Vec3::new(edge.y, -edge.x, 0.0);
        let a = mesh.push_vertex(Vec3::new(p0.x, p0.y, front_z), normal, color);
        let b = mesh.push_vertex(Vec3::new(p1.x, p1.y, front_z), normal, color);
        let c = mesh.push_vertex(Vec3::new(p1.x, p1.y, back_z), normal, color);
        let d = mesh.push_vertex(Vec3::new(p0.x, p0.y, back_z), normal, color);
        mesh.indices.extend_from_slice(&[a, d, c, a, c, b]);
    }
    mesh
}

fn at(position: Vec3) -> Mat4 {
    Mat4::from_translation(position)
}

/// Small figure: a white head under a glowing gold star.
pub fn starboy(white: Vec3, gold: Vec3) -> Mesh {
    let mut mesh = extruded_star(5, 0.3, 0.15, 0.2, gold.extend(0.5)).transformed(at(Vec3::new(0.0, 0.25, 0.0)));
    mesh.append(uv_sphere(0.2, 16, 16, white.extend(0.0)).transformed(at(Vec3::new(0.0, -0.1, 0.0))));
    mesh
}

/// Small figure: pink head with two ears, white muzzle and a capsule body.
pub fn foxgirl(pink: Vec3, white: Vec3, body: Vec3) -> Mesh {
    let pink = pink.extend(0.0);
    let mut mesh = uv_sphere(0.22, 16, 16, pink).transformed(at(Vec3::new(0.0, 0.15, 0.0)));
    for (x, tilt) in [(-0.15, 0.5), (0.15, -0.5)] {
        let ear = Mat4::from_rotation_translation(Quat::from_rotation_z(tilt), Vec3::new(x, 0.3, 0.0));
        mesh.append(cone(0.08, 0.2, 16, pink).transformed(ear));
    }
    mesh.append(uv_sphere(0.08, 16, 16, white.extend(0.0)).transformed(at(Vec3::new(0.0, 0.1, 0.15))));
    mesh.append(capsule(0.12, 0.2, 8, 4, body.extend(0.0)).transformed(at(Vec3::new(0.0, -0.15, 0.0))));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_indices_valid(mesh: &Mesh) {
        assert_eq!(mesh.indices.len() % 3, 0);
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
    }

    #[test]
    fn unit_cube_spans_half_extents() {
        let mesh = cuboid(Vec3::ONE, Vec4::ONE);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.index_count(), 36);
        for v in &mesh.vertices {
            for c in v.position {
                assert!((c.abs() - 0.5).abs() < 1e-6);
            }
        }
        assert_indices_valid(&mesh);
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let mesh = uv_sphere(0.5, 32, 32, Vec4::ONE);
        for v in &mesh.vertices {
            assert!((Vec3::from(v.position).length() - 0.5).abs() < 1e-5);
        }
        assert_indices_valid(&mesh);
    }

    #[test]
    fn star_outline_alternates_radii() {
        let outline = star_outline(5, 1.2, 0.5);
        assert_eq!(outline.len(), 10);
        assert!((outline[0] - Vec3::new(0.0, 1.2, 0.0)).length() < 1e-5);
        for (i, p) in outline.iter().enumerate() {
            let expect = if i % 2 == 0 { 1.2 } else { 0.5 };
            assert!((p.length() - expect).abs() < 1e-5);
        }
    }

    #[test]
    fn extruded_star_has_requested_depth() {
        let mesh = extruded_star(5, 1.2, 0.5, 0.4, Vec4::ONE);
        let (min_z, max_z) = mesh
            .vertices
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), v| (lo.min(v.position[2]), hi.max(v.position[2])));
        assert!((max_z - min_z - 0.4).abs() < 1e-6);
        assert_indices_valid(&mesh);
    }

    #[test]
    fn mascots_merge_parts() {
        let boy = starboy(Vec3::ONE, Vec3::new(1.0, 0.8, 0.0));
        let fox = foxgirl(Vec3::X, Vec3::ONE, Vec3::Y);
        assert_indices_valid(&boy);
        assert_indices_valid(&fox);
        // the star crown glows, the head does not
        assert!(boy.vertices.iter().any(|v| v.color[3] > 0.0));
        assert!(boy.vertices.iter().any(|v| v.color[3] == 0.0));
        let top = fox.vertices.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert!(top > 0.35, "ears should stick out above the head, top = {top}");
    }

    #[test]
    fn transformed_moves_points_and_keeps_unit_normals() {
        let mesh = cuboid(Vec3::ONE, Vec4::ONE).transformed(Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            Quat::from_rotation_y(0.3),
            Vec3::new(1.0, 2.0, 3.0),
        ));
        let centroid = mesh.vertices.iter().map(|v| Vec3::from(v.position)).sum::<Vec3>() / mesh.vertices.len() as f32;
        assert!((centroid - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-4);
        for v in &mesh.vertices {
            assert!((Vec3::from(v.normal).length() - 1.0).abs() < 1e-4);
        }
    }
}
