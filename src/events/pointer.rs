use crate::constants::{BELL_ID, MOTION_PROMPT_ID, PERMISSION_ALLOW_ID, PERMISSION_LATER_ID};
use crate::{dispatch, dom, motion, WeakBell};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub fn wire_bell_tap(document: &web::Document, bell: &WeakBell) {
    let bell = bell.clone();
    dom::add_click_listener(document, BELL_ID, move || {
        dispatch(&bell, |b| {
            if let Some(outcome) = b.tap() {
                log::debug!("[click] {:?}", outcome);
            }
        });
    });
}

pub fn wire_permission_buttons(document: &web::Document, window: &web::Window, bell: &WeakBell) {
    let allow = bell.clone();
    let window = window.clone();
    dom::add_click_listener(document, PERMISSION_ALLOW_ID, move || {
        let mut ask = false;
        dispatch(&allow, |b| ask = b.request_permission());
        if !ask {
            return;
        }
        let request = motion::request_permission(&window);
        let resolved = allow.clone();
        spawn_local(async move {
            let outcome = request.await;
            dispatch(&resolved, |b| b.permission_resolved(outcome));
        });
    });

    let later = bell.clone();
    dom::add_click_listener(document, PERMISSION_LATER_ID, move || {
        dispatch(&later, |b| b.dismiss_permission_dialog());
    });

    let prompt = bell.clone();
    dom::add_click_listener(document, MOTION_PROMPT_ID, move || {
        dispatch(&prompt, |b| b.show_permission_dialog());
    });
}
