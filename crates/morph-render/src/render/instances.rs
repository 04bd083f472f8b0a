//! Lit, instanced mesh pass for ornaments, lights, mascots and the star.

use super::helpers::{self, DEPTH_FORMAT, HDR_FORMAT};
use super::mesh::{self, Mesh, MeshVertex};
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};
use morph_core::{srgb_hex_to_linear, InstanceBuffer, InstanceRaw};
use morph_core::{AMBIENT_COLOR, AMBIENT_INTENSITY, FILL_LIGHT_COLOR, FILL_LIGHT_INTENSITY, FILL_LIGHT_POSITION};
use morph_core::{FOX_BODY, FOX_PINK, GOLD, KEY_LIGHT_COLOR, KEY_LIGHT_INTENSITY, KEY_LIGHT_POSITION, MASCOT_WHITE};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub(crate) struct SceneUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) eye: [f32; 4],
    pub(crate) ambient: [f32; 4],
    pub(crate) key_pos: [f32; 4],
    pub(crate) key_color: [f32; 4],
    pub(crate) fill_pos: [f32; 4],
    pub(crate) fill_color: [f32; 4],
}

/// Light rig in linear color, intensities folded into the colors.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Lighting {
    pub(crate) ambient: Vec3,
    pub(crate) key_position: Vec3,
    pub(crate) key_color: Vec3,
    pub(crate) fill_position: Vec3,
    pub(crate) fill_color: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: srgb_hex_to_linear(AMBIENT_COLOR) * AMBIENT_INTENSITY,
            key_position: KEY_LIGHT_POSITION,
            key_color: srgb_hex_to_linear(KEY_LIGHT_COLOR) * KEY_LIGHT_INTENSITY,
            fill_position: FILL_LIGHT_POSITION,
            fill_color: srgb_hex_to_linear(FILL_LIGHT_COLOR) * FILL_LIGHT_INTENSITY,
        }
    }
}

impl SceneUniforms {
    pub(crate) fn new(view_proj: Mat4, model: Mat4, eye: Vec3, lighting: &Lighting) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            eye: eye.extend(1.0).to_array(),
            ambient: lighting.ambient.extend(1.0).to_array(),
            key_pos: lighting.key_position.extend(1.0).to_array(),
            key_color: lighting.key_color.extend(1.0).to_array(),
            fill_pos: lighting.fill_position.extend(1.0).to_array(),
            fill_color: lighting.fill_color.extend(1.0).to_array(),
        }
    }
}

/// One mesh plus a GPU copy of the instance records drawn with it.
pub(crate) struct Batch {
    label: &'static str,
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
    instances: wgpu::Buffer,
    instance_count: u32,
}

impl Batch {
    fn new(device: &wgpu::Device, label: &'static str, mesh: &Mesh, instances: &InstanceBuffer) -> Self {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let size = (instances.len().max(1) * std::mem::size_of::<InstanceRaw>()) as u64;
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            label,
            vertices,
            indices,
            index_count: mesh.index_count(),
            instances: instance_buffer,
            instance_count: instances.len() as u32,
        }
    }

    /// Copy `source` to the GPU if it changed since the last upload.
    pub(crate) fn upload(&self, queue: &wgpu::Queue, source: &mut InstanceBuffer) {
        if !source.is_dirty() {
            return;
        }
        if !source.is_empty() {
            queue.write_buffer(&self.instances, 0, bytemuck::cast_slice(source.as_slice()));
        }
        source.mark_uploaded();
        log::trace!("[render] uploaded {} instances to {}", source.len(), self.label);
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.instance_count == 0 {
            return;
        }
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.set_vertex_buffer(1, self.instances.slice(..));
        pass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..self.instance_count);
    }
}

/// Instanced batches in draw order.
pub(crate) struct InstanceBatches {
    pub(crate) boxes: Batch,
    pub(crate) spheres: Batch,
    pub(crate) lights: Batch,
    pub(crate) starboys: Batch,
    pub(crate) foxgirls: Batch,
    pub(crate) star: Batch,
}

impl InstanceBatches {
    fn iter(&self) -> [&Batch; 6] {
        [
            &self.boxes,
            &self.spheres,
            &self.lights,
            &self.starboys,
            &self.foxgirls,
            &self.star,
        ]
    }
}

const MESH_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x4];
const INSTANCE_ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x4,
    7 => Float32x4,
];

pub(crate) struct InstancePass {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    pub(crate) batches: InstanceBatches,
}

/// Sources for every batch, borrowed from the scene at startup.
pub(crate) struct BatchSources<'a> {
    pub(crate) boxes: &'a InstanceBuffer,
    pub(crate) spheres: &'a InstanceBuffer,
    pub(crate) lights: &'a InstanceBuffer,
    pub(crate) starboys: &'a InstanceBuffer,
    pub(crate) foxgirls: &'a InstanceBuffer,
    pub(crate) star: &'a InstanceBuffer,
}

impl InstancePass {
    pub(crate) fn new(device: &wgpu::Device, sources: BatchSources<'_>) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("instances_shader"),
            source: wgpu::ShaderSource::Wgsl(morph_core::INSTANCES_WGSL.into()),
        });
        let bgl = helpers::uniform_layout(
            device,
            "instances_bgl",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        );
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instances_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("instances_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("instances_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("instances_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<MeshVertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &MESH_ATTRS,
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceRaw>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &INSTANCE_ATTRS,
                    },
                ],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: HDR_FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let white = Vec4::new(1.0, 1.0, 1.0, 0.0);
        let gold = srgb_hex_to_linear(GOLD);
        let mascot_white = srgb_hex_to_linear(MASCOT_WHITE);
        let batches = InstanceBatches {
            boxes: Batch::new(device, "ornament_boxes", &mesh::cuboid(Vec3::ONE, white), sources.boxes),
            spheres: Batch::new(device, "ornament_spheres", &mesh::uv_sphere(0.5, 32, 32, white), sources.spheres),
            lights: Batch::new(device, "lights", &mesh::uv_sphere(1.0, 16, 16, white), sources.lights),
            starboys: Batch::new(device, "starboys", &mesh::starboy(mascot_white, gold), sources.starboys),
            foxgirls: Batch::new(
                device,
                "foxgirls",
                &mesh::foxgirl(srgb_hex_to_linear(FOX_PINK), mascot_white, srgb_hex_to_linear(FOX_BODY)),
                sources.foxgirls,
            ),
            star: Batch::new(device, "star", &mesh::extruded_star(5, 1.2, 0.5, 0.4, white), sources.star),
        };

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            batches,
        }
    }

    pub(crate) fn update(&self, queue: &wgpu::Queue, uniforms: &SceneUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        for batch in self.batches.iter() {
            batch.draw(pass);
        }
    }
}
