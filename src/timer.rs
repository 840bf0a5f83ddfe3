use crate::core::{Scheduler, TimerToken};
use crate::{dispatch, WeakBell};
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `Scheduler` backed by `setTimeout`/`clearTimeout`.
pub struct WindowScheduler {
    window: web::Window,
    bell: WeakBell,
}

impl WindowScheduler {
    pub fn new(window: web::Window, bell: WeakBell) -> Self {
        Self { window, bell }
    }
}

impl Scheduler for WindowScheduler {
    type Handle = i32;

    fn schedule(&mut self, delay: Duration, token: TimerToken) -> i32 {
        let bell = self.bell.clone();
        let callback = Closure::once_into_js(move || {
            dispatch(&bell, |b| b.on_timer(token));
        });
        let millis = delay.as_millis().min(i32::MAX as u128) as i32;
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
        {
            Ok(handle) => handle,
            Err(e) => {
                log::error!("[timer] setTimeout failed for {:?}: {:?}", token, e);
                0
            }
        }
    }

    fn cancel(&mut self, handle: i32) {
        self.window.clear_timeout_with_handle(handle);
    }
}
