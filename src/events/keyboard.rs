use crate::constants::TOGGLE_BUTTON_ID;
use crate::frame::FrameContext;
use crate::input;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A focused button already toggles on Space through its click event.
fn toggle_button_focused(document: &web::Document) -> bool {
    document
        .active_element()
        .map(|el| el.id() == TOGGLE_BUTTON_ID)
        .unwrap_or(false)
}

pub fn wire_keyboard(window: &web::Window, ctx: Rc<RefCell<FrameContext>>) {
    let document = window.document();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.repeat() || !input::is_toggle_key(&ev.key()) {
            return;
        }
        if document.as_ref().map(toggle_button_focused).unwrap_or(false) {
            return;
        }
        ev.prevent_default();
        ctx.borrow_mut().toggle();
    }) as Box<dyn FnMut(web::KeyboardEvent)>);
    let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}
