use crate::constants::HIDDEN_CLASS;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("[dom] missing #{}; click not wired", element_id);
    }
}

/// Listen for `event` on `target` for the lifetime of the page.
pub fn add_listener(target: &web::EventTarget, event: &str, mut handler: impl FnMut() + 'static) {
    let closure =
        wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn set_class(document: &web::Document, element_id: &str, class: &str, on: bool) {
    if let Some(el) = document.get_element_by_id(element_id) {
        _ = el.class_list().toggle_with_force(class, on);
    }
}

pub fn set_hidden(document: &web::Document, element_id: &str, hidden: bool) {
    if let Some(el) = document.get_element_by_id(element_id) {
        _ = el.class_list().toggle_with_force(HIDDEN_CLASS, hidden);
        // fallback for pages without the CSS class
        _ = el.set_attribute("style", if hidden { "display:none" } else { "" });
    }
}

pub fn data_attribute(document: &web::Document, element_id: &str, key: &str) -> Option<String> {
    document
        .get_element_by_id(element_id)
        .and_then(|el| el.get_attribute(&format!("data-{}", key)))
}
