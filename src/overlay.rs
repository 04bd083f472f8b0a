use crate::constants::{STATUS_ID, TOGGLE_BUTTON_ID};
use morph_core::MorphState;
use web_sys as web;

/// The button names the action it will perform, not the current state.
#[inline]
pub fn set_toggle_label(document: &web::Document, state: MorphState) {
    if let Some(el) = document.get_element_by_id(TOGGLE_BUTTON_ID) {
        el.set_text_content(Some(state.action_label()));
        let _ = el.set_attribute("data-state", state_attr(state));
    }
}

fn state_attr(state: MorphState) -> &'static str {
    match state {
        MorphState::Scattered => "scattered",
        MorphState::Formed => "formed",
    }
}

#[inline]
pub fn show_status(document: &web::Document, text: &str) {
    if let Some(el) = document.get_element_by_id(STATUS_ID) {
        el.set_text_content(Some(text));
        let _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide_status(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(STATUS_ID) {
        let _ = el.set_attribute("style", "display:none");
    }
}
