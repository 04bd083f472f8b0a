//! wgpu renderer shared by the native and web hosts.
//!
//! Frame layout: instanced meshes, then the additive star and sparkle
//! backdrop, then the additive foliage cloud, into an HDR target with depth;
//! bright pass and a separable blur into half-res bloom buffers; composite
//! (bloom, vignette, grain) onto the surface.

mod backdrop;
mod helpers;
pub mod mesh;
mod instances;
mod particles;
mod post;
mod targets;

use backdrop::{BackdropPass, BackdropUniforms};
use instances::{BatchSources, InstancePass, Lighting, SceneUniforms};
use morph_core::{srgb_hex_to_linear, FrameUniforms, MascotKind, MorphScene};
use morph_core::{BACKGROUND, BLOOM_STRENGTH, BLOOM_THRESHOLD, GRAIN_OPACITY, VIGNETTE_DARKNESS, VIGNETTE_OFFSET};
use particles::{ParticlePass, ParticleUniforms};
use post::{PostBindGroups, PostResources, PostUniforms};
use targets::RenderTargets;

pub struct GpuState<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    post: PostResources,
    post_groups: PostBindGroups,
    instances: InstancePass,
    particles: ParticlePass,
    backdrop: BackdropPass,
    lighting: Lighting,
    clear_color: wgpu::Color,
}

impl<'w> GpuState<'w> {
    /// Create the device, surface and every pipeline, and upload the scene's
    /// static particle and backdrop attributes.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'w>>,
        width: u32,
        height: u32,
        scene: &MorphScene,
    ) -> anyhow::Result<Self> {
        let width = width.max(1);
        let height = height.max(1);
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(target)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No suitable GPU adapter"))?;
        log::info!("[render] adapter: {:?}", adapter.get_info().name);
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {e:?}"))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(morph_core::POST_WGSL.into()),
        });
        let targets = RenderTargets::new(&device, width, height);
        let post = post::create_post_resources(&device, &post_shader, format);
        let post_groups = PostBindGroups::new(&device, &post, &targets);

        let (boxes, spheres) = (scene.ornaments.box_buffer(), scene.ornaments.sphere_buffer());
        let instances = InstancePass::new(
            &device,
            BatchSources {
                boxes,
                spheres,
                lights: scene.lights.buffer(),
                starboys: scene.mascots.buffer(MascotKind::Starboy),
                foxgirls: scene.mascots.buffer(MascotKind::Foxgirl),
                star: scene.star.buffer(),
            },
        );
        let particles = ParticlePass::new(&device, scene.particles());
        let backdrop = BackdropPass::new(&device, scene.backdrop());

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            post,
            post_groups,
            instances,
            particles,
            backdrop,
            lighting: Lighting::default(),
            clear_color: helpers::clear_color(srgb_hex_to_linear(BACKGROUND)),
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigure the surface and rebuild size-dependent targets. Zero
    /// sizes (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.targets = RenderTargets::new(&self.device, width, height);
        self.post_groups = PostBindGroups::new(&self.device, &self.post, &self.targets);
        log::debug!("[render] resized to {width}x{height}");
    }

    /// Reconfigure with the current size, e.g. after `SurfaceError::Lost`.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn upload_instances(&self, scene: &mut MorphScene) {
        let batches = &self.instances.batches;
        let (boxes, spheres) = scene.ornaments.buffers_mut();
        batches.boxes.upload(&self.queue, boxes);
        batches.spheres.upload(&self.queue, spheres);
        batches.lights.upload(&self.queue, scene.lights.buffer_mut());
        batches
            .starboys
            .upload(&self.queue, scene.mascots.buffer_mut(MascotKind::Starboy));
        batches
            .foxgirls
            .upload(&self.queue, scene.mascots.buffer_mut(MascotKind::Foxgirl));
        batches.star.upload(&self.queue, scene.star.buffer_mut());
    }

    /// Draw one frame of `scene`. `frame` is what [`MorphScene::frame`]
    /// returned for this frame.
    pub fn render(&mut self, scene: &mut MorphScene, frame: FrameUniforms) -> Result<(), wgpu::SurfaceError> {
        self.upload_instances(scene);

        let (width, height) = self.size();
        let camera = scene.camera.camera();
        let view = camera.view_matrix();
        let proj = camera.projection_matrix();
        let model = scene.model_matrix();

        self.instances
            .update(&self.queue, &SceneUniforms::new(proj * view, model, camera.eye, &self.lighting));
        self.particles.update(
            &self.queue,
            &ParticleUniforms::new(
                proj,
                view * model,
                [width as f32, height as f32],
                frame.time,
                frame.morph,
                frame.pixel_ratio,
            ),
        );
        // the backdrop is not lowered with the tree
        self.backdrop.update(
            &self.queue,
            &BackdropUniforms::new(
                proj,
                view,
                [width as f32, height as f32],
                frame.time,
                frame.pixel_ratio,
                &scene.config().backdrop,
            ),
        );

        let (bw, bh) = RenderTargets::bloom_size(width, height);
        let base = PostUniforms {
            resolution: [width as f32, height as f32],
            time: frame.time,
            bloom_strength: BLOOM_STRENGTH,
            blur_dir: [0.0, 0.0],
            threshold: BLOOM_THRESHOLD,
            vignette_offset: VIGNETTE_OFFSET,
            vignette_darkness: VIGNETTE_DARKNESS,
            grain: GRAIN_OPACITY,
            _pad: [0.0; 2],
        };
        let blur = PostUniforms {
            resolution: [bw as f32, bh as f32],
            ..base
        };
        self.queue
            .write_buffer(&self.post.uniforms, 0, bytemuck::bytes_of(&base));
        self.queue.write_buffer(
            &self.post.blur_h_uniforms,
            0,
            bytemuck::bytes_of(&PostUniforms {
                blur_dir: [1.0, 0.0],
                ..blur
            }),
        );
        self.queue.write_buffer(
            &self.post.blur_v_uniforms,
            0,
            bytemuck::bytes_of(&PostUniforms {
                blur_dir: [0.0, 1.0],
                ..blur
            }),
        );

        let output = self.surface.get_current_texture()?;
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            // opaque meshes first so the additive cloud is depth-tested against them
            self.instances.draw(&mut rpass);
            self.backdrop.draw(&mut rpass);
            self.particles.draw(&mut rpass);
        }

        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.post_groups.hdr,
            None,
        );
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.from_bloom_a,
            None,
        );
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.from_bloom_b,
            None,
        );
        post::blit(
            &mut encoder,
            "composite",
            &surface_view,
            self.clear_color,
            &self.post.composite_pipeline,
            &self.post_groups.hdr,
            Some(&self.post_groups.bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}
