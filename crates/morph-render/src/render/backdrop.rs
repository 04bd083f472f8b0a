//! Backdrop pass: the star shell and the sparkles, as instanced quads in
//! world space. Both layers share the quad buffer and uniform block; each has
//! its own pipeline.

use super::helpers::{self, HDR_FORMAT};
use super::particles::{instance_layout, quad_layout, QUAD_CORNERS};
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use morph_core::backdrop::{Backdrop, PointLayer};
use morph_core::BackdropConfig;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub(crate) struct BackdropUniforms {
    pub(crate) proj: [[f32; 4]; 4],
    pub(crate) view: [[f32; 4]; 4],
    pub(crate) viewport: [f32; 2],
    pub(crate) time: f32,
    pub(crate) pixel_ratio: f32,
    pub(crate) star_speed: f32,
    pub(crate) sparkle_speed: f32,
    pub(crate) sparkle_opacity: f32,
    pub(crate) _pad: f32,
}

impl BackdropUniforms {
    pub(crate) fn new(proj: Mat4, view: Mat4, viewport: [f32; 2], time: f32, pixel_ratio: f32, config: &BackdropConfig) -> Self {
        Self {
            proj: proj.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            viewport,
            time,
            pixel_ratio,
            star_speed: config.star_speed,
            sparkle_speed: config.sparkle_speed,
            sparkle_opacity: config.sparkle_opacity,
            _pad: 0.0,
        }
    }
}

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x3];
const SIZE_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![3 => Float32];
const NOISE_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![4 => Float32x3];

struct LayerBuffers {
    position: wgpu::Buffer,
    color: wgpu::Buffer,
    size: wgpu::Buffer,
    noise: Option<wgpu::Buffer>,
    count: u32,
}

impl LayerBuffers {
    fn new(device: &wgpu::Device, name: &str, layer: &PointLayer) -> Self {
        let init = |attr: &str, contents: &[u8]| {
            let label = format!("{name}_{attr}");
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label.as_str()),
                contents,
                usage: wgpu::BufferUsages::VERTEX,
            })
        };
        Self {
            position: init("position", bytemuck::cast_slice(&layer.position)),
            color: init("color", bytemuck::cast_slice(&layer.color)),
            size: init("size", bytemuck::cast_slice(&layer.size)),
            noise: (!layer.noise.is_empty()).then(|| init("noise", bytemuck::cast_slice(&layer.noise))),
            count: layer.len() as u32,
        }
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>, pipeline: &wgpu::RenderPipeline) {
        if self.count == 0 {
            return;
        }
        pass.set_pipeline(pipeline);
        pass.set_vertex_buffer(1, self.position.slice(..));
        pass.set_vertex_buffer(2, self.color.slice(..));
        pass.set_vertex_buffer(3, self.size.slice(..));
        if let Some(noise) = &self.noise {
            pass.set_vertex_buffer(4, noise.slice(..));
        }
        pass.draw(0..QUAD_CORNERS.len() as u32, 0..self.count);
    }
}

pub(crate) struct BackdropPass {
    star_pipeline: wgpu::RenderPipeline,
    sparkle_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    quad: wgpu::Buffer,
    stars: LayerBuffers,
    sparkles: LayerBuffers,
}

impl BackdropPass {
    pub(crate) fn new(device: &wgpu::Device, backdrop: &Backdrop) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("backdrop_shader"),
            source: wgpu::ShaderSource::Wgsl(morph_core::BACKDROP_WGSL.into()),
        });
        let bgl = helpers::uniform_layout(
            device,
            "backdrop_bgl",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        );
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("backdrop_uniforms"),
            size: std::mem::size_of::<BackdropUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("backdrop_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("backdrop_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let star_buffers = [
            quad_layout(),
            instance_layout(12, &POSITION_ATTRS),
            instance_layout(12, &COLOR_ATTRS),
            instance_layout(4, &SIZE_ATTRS),
        ];
        let sparkle_buffers = [
            quad_layout(),
            instance_layout(12, &POSITION_ATTRS),
            instance_layout(12, &COLOR_ATTRS),
            instance_layout(4, &SIZE_ATTRS),
            instance_layout(12, &NOISE_ATTRS),
        ];
        let star_pipeline = sprite_pipeline(device, &layout, &shader, "stars", &star_buffers);
        let sparkle_pipeline = sprite_pipeline(device, &layout, &shader, "sparkles", &sparkle_buffers);

        let quad = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("backdrop_quad"),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            star_pipeline,
            sparkle_pipeline,
            uniform_buffer,
            bind_group,
            quad,
            stars: LayerBuffers::new(device, "stars", &backdrop.stars),
            sparkles: LayerBuffers::new(device, "sparkles", &backdrop.sparkles),
        }
    }

    pub(crate) fn update(&self, queue: &wgpu::Queue, uniforms: &BackdropUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.quad.slice(..));
        self.stars.draw(pass, &self.star_pipeline);
        self.sparkles.draw(pass, &self.sparkle_pipeline);
    }
}

/// Additive, depth-tested sprite pipeline using the `vs_<name>`/`fs_<name>`
/// entry points.
fn sprite_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    name: &str,
    buffers: &[wgpu::VertexBufferLayout<'static>],
) -> wgpu::RenderPipeline {
    let vs_entry = format!("vs_{name}");
    let fs_entry = format!("fs_{name}");
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(name),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs_entry.as_str()),
            buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: Some(helpers::sprite_depth()),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs_entry.as_str()),
            targets: &[Some(wgpu::ColorTargetState {
                format: HDR_FORMAT,
                blend: Some(helpers::additive_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_matches_the_wgsl_layout() {
        // two mat4s, then two packed vec4-sized rows of scalars
        assert_eq!(std::mem::size_of::<BackdropUniforms>(), 160);
        assert_eq!(std::mem::size_of::<BackdropUniforms>() % 16, 0);
    }

    #[test]
    fn shader_exports_an_entry_pair_per_layer() {
        for name in ["stars", "sparkles"] {
            assert!(morph_core::BACKDROP_WGSL.contains(&format!("fn vs_{name}(")));
            assert!(morph_core::BACKDROP_WGSL.contains(&format!("fn fs_{name}(")));
        }
    }

    #[test]
    fn uniforms_carry_the_layer_tuning() {
        let config = BackdropConfig::default();
        let u = BackdropUniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, [800.0, 600.0], 2.0, 1.5, &config);
        assert_eq!(u.star_speed, 1.0);
        assert_eq!(u.sparkle_speed, 0.4);
        assert_eq!(u.sparkle_opacity, 0.5);
        assert_eq!(u.pixel_ratio, 1.5);
    }
}
