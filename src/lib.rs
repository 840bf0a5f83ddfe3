#![cfg(target_arch = "wasm32")]
use crate::core::{BellConfig, BellSession};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys as web;

mod audio;
mod constants;
mod core;
mod dom;
mod events;
mod motion;
mod overlay;
mod timer;

pub(crate) type WebBell =
    BellSession<audio::BellAudio, timer::WindowScheduler, motion::DeviceMotion>;
pub(crate) type WeakBell = Weak<RefCell<WebBell>>;

/// Run `f` against the live session and re-render. Every browser callback
/// goes through here, so each one runs to completion before the next.
pub(crate) fn dispatch(bell: &WeakBell, f: impl FnOnce(&mut WebBell)) {
    let Some(bell) = bell.upgrade() else {
        return;
    };
    let view = match bell.try_borrow_mut() {
        Ok(mut session) => {
            f(&mut session);
            session.view()
        }
        Err(_) => {
            log::warn!("[session] re-entrant callback dropped");
            return;
        }
    };
    if let Some(document) = dom::window_document() {
        overlay::render(&document, &view);
    }
}

fn read_config(document: &web::Document) -> BellConfig {
    BellConfig::default()
        .with_overrides(|key| dom::data_attribute(document, constants::APP_ROOT_ID, key))
}

// pagehide tears the session down; pageshow revives it after a bfcache restore.
// The pagehide listener holds the only strong reference.
fn wire_lifecycle(window: &web::Window, bell: Rc<RefCell<WebBell>>) {
    let revive = Rc::downgrade(&bell);
    dom::add_listener(window, "pageshow", move || {
        dispatch(&revive, |b| b.start());
    });
    dom::add_listener(window, "pagehide", move || {
        dispatch(&Rc::downgrade(&bell), |b| b.stop());
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // Install at the most verbose level; `init` narrows it from config
    console_log::init_with_level(log::Level::Trace).ok();
    log::set_max_level(log::LevelFilter::Info);
    log::info!("bell-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    if document.get_element_by_id(constants::BELL_ID).is_none() {
        anyhow::bail!("missing #{}", constants::BELL_ID);
    }

    let config = read_config(&document);
    log::set_max_level(config.log_level.to_level_filter());
    log::info!(
        "[config] threshold={} stop_delay={:?} tap_duration={:?}",
        config.shake_threshold,
        config.stop_delay,
        config.tap_duration
    );

    let support = motion::detect_support(&window);
    let element = audio::load_element(&config.sound_url)?;

    let bell = Rc::new_cyclic(|weak: &WeakBell| {
        RefCell::new(BellSession::new(
            config,
            support,
            audio::BellAudio::new(element.clone(), weak.clone()),
            timer::WindowScheduler::new(window.clone(), weak.clone()),
            motion::DeviceMotion::new(window.clone(), weak.clone()),
        ))
    });
    let weak = Rc::downgrade(&bell);

    audio::wire_ready_events(&element, &weak);
    events::wire_bell_tap(&document, &weak);
    events::wire_bell_keydown(&document, &weak);
    events::wire_permission_buttons(&document, &window, &weak);
    wire_lifecycle(&window, bell);

    dispatch(&weak, |b| b.start());
    Ok(())
}
