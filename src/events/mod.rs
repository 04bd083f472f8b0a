//! DOM event wiring. Handlers only touch the shared [`FrameContext`]; all
//! rendering happens in the animation-frame callback.
//!
//! [`FrameContext`]: crate::frame::FrameContext

mod keyboard;
mod pointer;

pub use keyboard::wire_keyboard;
pub use pointer::{wire_pointer, wire_wheel};

use crate::constants::TOGGLE_BUTTON_ID;
use crate::dom;
use crate::frame::FrameContext;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub fn wire_toggle_button(document: &web::Document, ctx: Rc<RefCell<FrameContext>>) {
    dom::add_click_listener(document, TOGGLE_BUTTON_ID, move || {
        ctx.borrow_mut().toggle();
    });
}
