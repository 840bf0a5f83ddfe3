use crate::core::{BellError, Playback, PlaybackSession};
use crate::{dispatch, dom, WeakBell};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Create the bell's audio element and start preloading it.
pub fn load_element(url: &str) -> anyhow::Result<web::HtmlAudioElement> {
    let element =
        web::HtmlAudioElement::new_with_src(url).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    element.set_preload("auto");
    log::info!("[audio] loading {}", url);
    Ok(element)
}

/// Clear the loading indicator once the sound can play, or has failed to load.
pub fn wire_ready_events(element: &web::HtmlAudioElement, bell: &WeakBell) {
    let ready = bell.clone();
    dom::add_listener(element, "canplaythrough", move || {
        dispatch(&ready, |b| b.audio_ready());
    });
    let failed = bell.clone();
    dom::add_listener(element, "error", move || {
        log::error!("[audio] sound failed to load");
        dispatch(&failed, |b| b.audio_ready());
    });
}

/// `Playback` over a single `<audio>` element.
pub struct BellAudio {
    element: web::HtmlAudioElement,
    bell: WeakBell,
}

impl BellAudio {
    pub fn new(element: web::HtmlAudioElement, bell: WeakBell) -> Self {
        Self { element, bell }
    }
}

impl Playback for BellAudio {
    fn play(&mut self, session: PlaybackSession, looping: bool) -> Result<(), BellError> {
        self.element.set_loop(looping);
        self.element.set_current_time(0.0);
        let promise = self
            .element
            .play()
            .map_err(|e| BellError::PlaybackStart(describe(&e)))?;

        // Autoplay policy rejections arrive asynchronously
        let bell = self.bell.clone();
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                let error = BellError::PlaybackStart(describe(&e));
                dispatch(&bell, |b| b.playback_failed(session, error));
            }
        });
        Ok(())
    }

    fn set_looping(&mut self, looping: bool) {
        self.element.set_loop(looping);
    }

    fn stop(&mut self) {
        if let Err(e) = self.element.pause() {
            log::warn!("[audio] pause error: {:?}", e);
        }
        self.element.set_loop(false);
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
