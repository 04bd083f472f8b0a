#![cfg(target_arch = "wasm32")]
use error::InitError;
use morph_core::{MorphScene, SceneConfig};
use morph_render::GpuState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod error;
mod events;
mod frame;
mod input;
mod overlay;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tree-morph starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
            if let Some(document) = dom::window_document() {
                overlay::show_status(&document, &e.to_string());
            }
        }
    });
    Ok(())
}

async fn init() -> Result<(), InitError> {
    let window = web::window().ok_or_else(|| InitError::Browser("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| InitError::Browser("no document".into()))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or(InitError::MissingElement(constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| InitError::Browser(format!("#{} is not a canvas: {:?}", constants::CANVAS_ID, e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    let (width, height) = dom::sync_canvas_backing_size(&canvas);
    dom::wire_canvas_resize(&canvas);

    let config = SceneConfig::default().with_pixel_ratio(dom::device_pixel_ratio());
    let mut scene = MorphScene::new(config, &mut rand::thread_rng())?;
    scene.camera.set_viewport(width, height);

    let gpu = GpuState::new(wgpu::SurfaceTarget::Canvas(canvas.clone()), width, height, &scene)
        .await
        .map_err(|e| InitError::Gpu(format!("{e:#}")))?;

    overlay::set_toggle_label(&document, scene.state());
    overlay::hide_status(&document);

    let ctx = Rc::new(RefCell::new(frame::FrameContext::new(scene, gpu, canvas.clone())));
    events::wire_toggle_button(&document, ctx.clone());
    events::wire_keyboard(&window, ctx.clone());
    events::wire_pointer(&canvas, ctx.clone());
    events::wire_wheel(&canvas, ctx.clone());

    frame::start_loop(ctx);
    Ok(())
}
