//! `<model-viewer>` bindings. Everything goes through `js_sys::Reflect` so the
//! element's JS API can be reached without generated bindings.

use std::cell::Cell;
use std::rc::Rc;

use viewer_core::{HostError, ViewerHost};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use crate::dom::{js_call, js_get};

#[derive(Clone)]
pub struct ModelViewerHost {
    el: web::Element,
}

impl ModelViewerHost {
    pub fn new(el: web::Element) -> Self {
        Self { el }
    }

    pub fn element(&self) -> &web::Element {
        &self.el
    }

    /// Launch the host's AR mode. Outcome arrives later as `ar-status` events,
    /// possibly synchronously, so callers must not hold the controller borrow.
    pub fn activate_ar(&self) {
        let res = js_call(&self.el, "activateAR", &js_sys::Array::new());
        match res {
            Ok(ret) => {
                if let Ok(promise) = ret.dyn_into::<js_sys::Promise>() {
                    spawn_local(async move {
                        if let Err(e) = JsFuture::from(promise).await {
                            log::warn!("[ar] activateAR rejected: {:?}", e);
                        }
                    });
                }
            }
            Err(e) => log::warn!("[ar] activateAR unavailable: {:?}", e),
        }
    }

    /// The three.js scene the element renders, found among its symbol-keyed fields.
    fn scene(&self) -> Option<JsValue> {
        let syms = js_sys::Object::get_own_property_symbols(self.el.unchecked_ref());
        syms.iter()
            .filter_map(|sym| js_sys::Reflect::get(&self.el, &sym).ok())
            .find(|v| {
                v.is_object()
                    && js_get(v, "isScene").and_then(|b| b.as_bool()) == Some(true)
                    && js_get(v, "traverse").is_some_and(|f| f.is_function())
            })
    }
}

impl ViewerHost for ModelViewerHost {
    fn orientation_attr(&self) -> Option<String> {
        self.el.get_attribute("orientation")
    }

    fn set_orientation(&self, orientation: &str) {
        _ = self.el.set_attribute("orientation", orientation);
    }

    fn request_render(&self) {
        _ = js_call(&self.el, "requestUpdate", &js_sys::Array::new());
    }

    fn animation_names(&self) -> Vec<String> {
        js_get(&self.el, "availableAnimations")
            .and_then(|v| v.dyn_into::<js_sys::Array>().ok())
            .map(|arr| arr.iter().filter_map(|v| v.as_string()).collect())
            .unwrap_or_default()
    }

    fn play_animation(&self, clip: &str, crossfade_ms: u32, repetitions: u32) {
        let el: &JsValue = self.el.as_ref();
        _ = js_sys::Reflect::set(el, &"animationName".into(), &clip.into());
        _ = js_sys::Reflect::set(
            el,
            &"animationCrossfadeDuration".into(),
            &JsValue::from(crossfade_ms),
        );
        _ = self.el.remove_attribute("autoplay");
        let opts = js_sys::Object::new();
        _ = js_sys::Reflect::set(&opts, &"repetitions".into(), &JsValue::from(repetitions));
        if let Err(e) = js_call(el, "play", &js_sys::Array::of1(&opts)) {
            log::warn!("[anim] play failed: {:?}", e);
        }
    }

    fn hide_placement_indicators(&self, patterns: &[&str]) -> Result<usize, HostError> {
        let scene = self
            .scene()
            .ok_or(HostError::Unsupported("scene graph access"))?;
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_lowercase()).collect();
        let hidden = Rc::new(Cell::new(0usize));
        let hidden_in = hidden.clone();
        let visit = Closure::wrap(Box::new(move |node: JsValue| {
            let name = js_get(&node, "name")
                .and_then(|n| n.as_string())
                .unwrap_or_default()
                .to_lowercase();
            if !name.is_empty() && patterns.iter().any(|p| name.contains(p.as_str())) {
                _ = js_sys::Reflect::set(&node, &"visible".into(), &JsValue::FALSE);
                hidden_in.set(hidden_in.get() + 1);
            }
        }) as Box<dyn FnMut(JsValue)>);
        js_call(&scene, "traverse", &js_sys::Array::of1(visit.as_ref()))
            .map_err(|e| HostError::Call(format!("{:?}", e)))?;
        Ok(hidden.get())
    }
}
