use crate::core::{BellError, MotionSource, MotionSupport, RawAcceleration};
use crate::{dispatch, WeakBell};
use std::future::Future;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

const DEVICE_MOTION_EVENT: &str = "devicemotion";

/// Probe what the browser offers. `requestPermission` is a non-standard
/// static (iOS 13+), so it is looked up reflectively.
pub fn detect_support(window: &web::Window) -> MotionSupport {
    let ctor = match js_sys::Reflect::get(window, &JsValue::from_str("DeviceMotionEvent")) {
        Ok(v) if !v.is_undefined() && !v.is_null() => v,
        _ => return MotionSupport::Unsupported,
    };
    match js_sys::Reflect::get(&ctor, &JsValue::from_str("requestPermission")) {
        Ok(f) if f.is_function() => MotionSupport::NeedsPermission,
        _ => MotionSupport::Available,
    }
}

/// Ask for motion access. The platform call happens immediately so it stays
/// inside the user gesture; only the answer is awaited.
pub fn request_permission(
    window: &web::Window,
) -> impl Future<Output = Result<(), BellError>> + 'static {
    let pending = start_permission_request(window);
    async move {
        let answer = JsFuture::from(pending?).await.map_err(|e| {
            log::error!("[permission] request failed: {:?}", e);
            BellError::PermissionDenied
        })?;
        if answer.as_string().as_deref() == Some("granted") {
            Ok(())
        } else {
            Err(BellError::PermissionDenied)
        }
    }
}

fn start_permission_request(window: &web::Window) -> Result<js_sys::Promise, BellError> {
    let ctor = js_sys::Reflect::get(window, &JsValue::from_str("DeviceMotionEvent"))
        .map_err(|_| BellError::PermissionDenied)?;
    let request: js_sys::Function =
        js_sys::Reflect::get(&ctor, &JsValue::from_str("requestPermission"))
            .ok()
            .and_then(|f| f.dyn_into().ok())
            .ok_or(BellError::PermissionDenied)?;
    let result = request.call0(&ctor).map_err(|e| {
        log::error!("[permission] requestPermission threw: {:?}", e);
        BellError::PermissionDenied
    })?;
    result
        .dyn_into::<js_sys::Promise>()
        .map_err(|_| BellError::PermissionDenied)
}

/// `MotionSource` over the window's `devicemotion` events. The listener is
/// built once and attached/detached on demand.
pub struct DeviceMotion {
    window: web::Window,
    listener: Closure<dyn FnMut(web::DeviceMotionEvent)>,
}

impl DeviceMotion {
    pub fn new(window: web::Window, bell: WeakBell) -> Self {
        let listener = Closure::wrap(Box::new(move |ev: web::DeviceMotionEvent| {
            let sample = ev
                .acceleration_including_gravity()
                .map(|a| RawAcceleration {
                    x: a.x(),
                    y: a.y(),
                    z: a.z(),
                });
            dispatch(&bell, |b| b.on_motion(sample));
        }) as Box<dyn FnMut(_)>);
        Self { window, listener }
    }
}

impl MotionSource for DeviceMotion {
    fn subscribe(&mut self) {
        let listener: &js_sys::Function = self.listener.as_ref().unchecked_ref();
        if let Err(e) = self
            .window
            .add_event_listener_with_callback(DEVICE_MOTION_EVENT, listener)
        {
            log::error!("[motion] subscribe failed: {:?}", e);
        }
    }

    fn unsubscribe(&mut self) {
        let listener: &js_sys::Function = self.listener.as_ref().unchecked_ref();
        _ = self
            .window
            .remove_event_listener_with_callback(DEVICE_MOTION_EVENT, listener);
    }
}
