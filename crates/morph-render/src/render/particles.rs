//! Foliage pass: one instanced quad per particle.
//!
//! wgpu has no point size, so each particle is expanded to a screen-space
//! quad in the vertex shader. The static attributes are uploaded once; only
//! the uniform block changes per frame.

use super::helpers::{self, HDR_FORMAT};
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use morph_core::particles::ParticleSystem;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub(crate) struct ParticleUniforms {
    pub(crate) proj: [[f32; 4]; 4],
    pub(crate) model_view: [[f32; 4]; 4],
    pub(crate) viewport: [f32; 2],
    pub(crate) time: f32,
    pub(crate) morph: f32,
    pub(crate) pixel_ratio: f32,
    pub(crate) _pad: [f32; 3],
}

impl ParticleUniforms {
    pub(crate) fn new(proj: Mat4, model_view: Mat4, viewport: [f32; 2], time: f32, morph: f32, pixel_ratio: f32) -> Self {
        Self {
            proj: proj.to_cols_array_2d(),
            model_view: model_view.to_cols_array_2d(),
            viewport,
            time,
            morph,
            pixel_ratio,
            _pad: [0.0; 3],
        }
    }
}

pub(super) const QUAD_CORNERS: [[f32; 2]; 6] = [
    [-0.5, -0.5],
    [0.5, -0.5],
    [0.5, 0.5],
    [-0.5, -0.5],
    [0.5, 0.5],
    [-0.5, 0.5],
];

pub(crate) struct ParticlePass {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    quad: wgpu::Buffer,
    scatter: wgpu::Buffer,
    target: wgpu::Buffer,
    random: wgpu::Buffer,
    size: wgpu::Buffer,
    count: u32,
}

pub(super) const QUAD_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const SCATTER_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];
const TARGET_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x3];
const RANDOM_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![3 => Float32];
const SIZE_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![4 => Float32];

pub(super) fn instance_layout(stride: u64, attributes: &'static [wgpu::VertexAttribute]) -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: stride,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes,
    }
}

/// Per-vertex corners of the sprite quad, shared by every point layer.
pub(super) fn quad_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: 8,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &QUAD_ATTRS,
    }
}

impl ParticlePass {
    pub(crate) fn new(device: &wgpu::Device, system: &ParticleSystem) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particles_shader"),
            source: wgpu::ShaderSource::Wgsl(morph_core::PARTICLES_WGSL.into()),
        });
        let bgl = helpers::uniform_layout(device, "particles_bgl", wgpu::ShaderStages::VERTEX);
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particles_uniforms"),
            size: std::mem::size_of::<ParticleUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("particles_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("particles_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particles_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[
                    quad_layout(),
                    instance_layout(12, &SCATTER_ATTRS),
                    instance_layout(12, &TARGET_ATTRS),
                    instance_layout(4, &RANDOM_ATTRS),
                    instance_layout(4, &SIZE_ATTRS),
                ],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(helpers::sprite_depth()),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: HDR_FORMAT,
                    blend: Some(helpers::additive_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let init = |label: &str, contents: &[u8]| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: wgpu::BufferUsages::VERTEX,
            })
        };
        let quad = init("particles_quad", bytemuck::cast_slice(&QUAD_CORNERS));
        let scatter = init("particles_scatter", bytemuck::cast_slice(&system.scatter));
        let target = init("particles_target", bytemuck::cast_slice(&system.target));
        let random = init("particles_random", bytemuck::cast_slice(&system.random));
        let size = init("particles_size", bytemuck::cast_slice(&system.size));

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            quad,
            scatter,
            target,
            random,
            size,
            count: system.len() as u32,
        }
    }

    pub(crate) fn update(&self, queue: &wgpu::Queue, uniforms: &ParticleUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.quad.slice(..));
        pass.set_vertex_buffer(1, self.scatter.slice(..));
        pass.set_vertex_buffer(2, self.target.slice(..));
        pass.set_vertex_buffer(3, self.random.slice(..));
        pass.set_vertex_buffer(4, self.size.slice(..));
        pass.draw(0..QUAD_CORNERS.len() as u32, 0..self.count);
    }
}
