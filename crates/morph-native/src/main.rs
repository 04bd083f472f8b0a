use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use morph_core::{MorphScene, SceneConfig};
use morph_render::GpuState;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::{Window, WindowBuilder},
};

/// Pixel deltas reported by trackpads, per wheel notch.
const PIXELS_PER_NOTCH: f64 = 50.0;

#[derive(Default)]
struct Pointer {
    dragging: bool,
    last: Option<PhysicalPosition<f64>>,
}

struct App {
    window: Arc<Window>,
    gpu: GpuState<'static>,
    scene: MorphScene,
    pointer: Pointer,
    last_frame: Instant,
}

impl App {
    fn toggle(&mut self) {
        let state = self.scene.toggle();
        log::info!("{:?} (next: {})", state, state.action_label());
        self.window
            .set_title(&format!("Tree Morph - {}", state.action_label()));
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        self.scene.camera.set_viewport(width, height);
    }

    fn cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        if self.pointer.dragging {
            if let Some(last) = self.pointer.last {
                self.scene
                    .camera
                    .orbit((position.x - last.x) as f32, (position.y - last.y) as f32);
            }
        }
        self.pointer.last = Some(position);
    }

    fn wheel(&mut self, delta: MouseScrollDelta) {
        let notches = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(p) => (p.y / PIXELS_PER_NOTCH) as f32,
        };
        self.scene.camera.zoom(notches);
    }

    fn frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        let uniforms = self.scene.frame(dt);
        self.gpu.render(&mut self.scene, uniforms)
    }
}

/// `RUST_LOG` filters when set; otherwise everything at info and above.
fn log_env(filter_var: &str) -> env_logger::Env<'_> {
    env_logger::Env::new().filter_or(filter_var, "info")
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(log_env("RUST_LOG")).init();

    let event_loop = EventLoop::new().context("event loop")?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(format!(
                "Tree Morph - {}",
                morph_core::MorphState::default().action_label()
            ))
            .build(&event_loop)
            .context("window")?,
    );
    let size = window.inner_size();

    let config = SceneConfig::default().with_pixel_ratio(window.scale_factor() as f32);
    let mut scene = MorphScene::new(config, &mut rand::thread_rng())?;
    scene.camera.set_viewport(size.width, size.height);
    let gpu = pollster::block_on(GpuState::new(
        Arc::clone(&window),
        size.width,
        size.height,
        &scene,
    ))?;
    log::info!("Space/Enter toggles the tree, drag to orbit, scroll to zoom, Esc quits");

    let mut app = App {
        window,
        gpu,
        scene,
        pointer: Pointer::default(),
        last_frame: Instant::now(),
    };

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => app.resize(size.width, size.height),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                app.scene.set_pixel_ratio(scale_factor as f32)
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match logical_key {
                Key::Named(NamedKey::Space) | Key::Named(NamedKey::Enter) => app.toggle(),
                Key::Named(NamedKey::Escape) => elwt.exit(),
                _ => {}
            },
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => app.pointer.dragging = state == ElementState::Pressed,
            WindowEvent::CursorMoved { position, .. } => app.cursor_moved(position),
            WindowEvent::MouseWheel { delta, .. } => app.wheel(delta),
            _ => {}
        },
        Event::AboutToWait => match app.frame() {
            Ok(_) => app.window.request_redraw(),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = app.window.inner_size();
                app.resize(size.width, size.height);
                app.gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                elwt.exit()
            }
            Err(e) => log::warn!("Frame skipped: {e:?}"),
        },
        _ => {}
    })?;
    Ok(())
}
