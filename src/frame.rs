use crate::dom;
use crate::input::{self, DragTracker};
use crate::overlay;
use instant::Instant;
use morph_core::MorphScene;
use morph_render::GpuState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: MorphScene,
    pub gpu: GpuState<'static>,
    pub canvas: web::HtmlCanvasElement,
    pub drag: DragTracker,
    last_instant: Instant,
    stopped: bool,
}

impl FrameContext {
    pub fn new(scene: MorphScene, gpu: GpuState<'static>, canvas: web::HtmlCanvasElement) -> Self {
        Self {
            scene,
            gpu,
            canvas,
            drag: DragTracker::default(),
            last_instant: Instant::now(),
            stopped: false,
        }
    }

    pub fn toggle(&mut self) {
        let state = self.scene.toggle();
        if let Some(document) = dom::window_document() {
            overlay::set_toggle_label(&document, state);
        }
    }

    fn sync_size(&mut self) {
        let size = (self.canvas.width(), self.canvas.height());
        if size != self.gpu.size() {
            self.gpu.resize(size.0, size.1);
            self.scene.camera.set_viewport(size.0, size.1);
            self.scene.set_pixel_ratio(dom::device_pixel_ratio());
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = input::frame_dt((now - self.last_instant).as_secs_f32());
        self.last_instant = now;

        self.sync_size();
        let uniforms = self.scene.frame(dt);
        match self.gpu.render(&mut self.scene, uniforms) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                self.gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, stopping");
                self.stopped = true;
            }
            Err(e) => log::warn!("frame skipped: {e:?}"),
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let mut ctx = frame_ctx_tick.borrow_mut();
        ctx.frame();
        if ctx.stopped {
            return;
        }
        drop(ctx);
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
