use crate::frame::FrameContext;
use crate::input;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn listen<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
    canvas: &web::HtmlCanvasElement,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let _ = canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Primary-button drag orbits the camera.
pub fn wire_pointer(canvas: &web::HtmlCanvasElement, ctx: Rc<RefCell<FrameContext>>) {
    {
        let ctx = ctx.clone();
        let canvas_down = canvas.clone();
        listen(canvas, "pointerdown", move |ev: web::PointerEvent| {
            if ev.button() != 0 {
                return;
            }
            let _ = canvas_down.set_pointer_capture(ev.pointer_id());
            ctx.borrow_mut()
                .drag
                .press(ev.client_x() as f32, ev.client_y() as f32);
        });
    }
    {
        let ctx = ctx.clone();
        listen(canvas, "pointermove", move |ev: web::PointerEvent| {
            let mut c = ctx.borrow_mut();
            if let Some((dx, dy)) = c.drag.move_to(ev.client_x() as f32, ev.client_y() as f32) {
                c.scene.camera.orbit(dx, dy);
            }
        });
    }
    for event in ["pointerup", "pointercancel"] {
        let ctx = ctx.clone();
        listen(canvas, event, move |_ev: web::PointerEvent| {
            ctx.borrow_mut().drag.release();
        });
    }
}

pub fn wire_wheel(canvas: &web::HtmlCanvasElement, ctx: Rc<RefCell<FrameContext>>) {
    listen(canvas, "wheel", move |ev: web::WheelEvent| {
        ev.prevent_default();
        let notches = input::wheel_notches(ev.delta_y(), ev.delta_mode());
        ctx.borrow_mut().scene.camera.zoom(notches);
    });
}
