use super::keys::is_ring_key;
use crate::constants::BELL_ID;
use crate::{dispatch, WeakBell};
use wasm_bindgen::JsCast;
use web_sys as web;

// The bell is focusable (role=button); Enter or Space rings it like a tap
pub fn wire_bell_keydown(document: &web::Document, bell: &WeakBell) {
    let Some(el) = document.get_element_by_id(BELL_ID) else {
        log::warn!("[keys] missing #{}", BELL_ID);
        return;
    };
    let bell = bell.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.repeat() || !is_ring_key(&ev.key()) {
            return;
        }
        ev.prevent_default();
        dispatch(&bell, |b| {
            if let Some(outcome) = b.tap() {
                log::debug!("[keys] {:?}", outcome);
            }
        });
    }) as Box<dyn FnMut(_)>);
    _ = el.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}
