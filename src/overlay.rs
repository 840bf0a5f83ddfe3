use crate::constants::*;
use crate::core::{BellView, ShakeState};
use crate::dom;
use web_sys as web;

/// Push a session snapshot onto the page.
pub fn render(document: &web::Document, view: &BellView) {
    dom::set_class(document, BELL_ID, RINGING_CLASS, view.ringing);
    dom::set_class(
        document,
        BELL_ID,
        SHAKING_CLASS,
        view.shake == ShakeState::Shaking,
    );
    dom::set_hidden(document, RIPPLE_ID, !view.ripple);
    dom::set_hidden(document, LOADING_ID, !view.loading);
    dom::set_hidden(document, PERMISSION_DIALOG_ID, !view.permission_dialog);
    dom::set_hidden(document, MOTION_PROMPT_ID, !view.motion_prompt);
    update_ring_count(document, view);
}

fn update_ring_count(document: &web::Document, view: &BellView) {
    if let Some(el) = document.get_element_by_id(RING_COUNT_ID) {
        let label = view.ring_label();
        if el.text_content().as_deref() != Some(label.as_str()) {
            el.set_text_content(Some(&label));
        }
    }
}
