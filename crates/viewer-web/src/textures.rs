use futures::future::{FutureExt, LocalBoxFuture};
use viewer_core::{MaterialSurface, TextureError, TextureLoader};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use crate::dom::{js_call, js_get};

/// Loads textures through `modelViewer.createTexture(uri)`.
#[derive(Clone)]
pub struct HostTextureLoader {
    el: web::Element,
}

impl HostTextureLoader {
    pub fn new(el: web::Element) -> Self {
        Self { el }
    }
}

impl TextureLoader for HostTextureLoader {
    type Texture = JsValue;

    fn load(&self, uri: &str) -> LocalBoxFuture<'static, Result<JsValue, TextureError>> {
        let el = self.el.clone();
        let uri = uri.to_string();
        async move {
            let fail = |reason: String| TextureError::Load {
                uri: uri.clone(),
                reason,
            };
            let ret = js_call(&el, "createTexture", &js_sys::Array::of1(&uri.as_str().into()))
                .map_err(|e| fail(format!("{:?}", e)))?;
            let promise: js_sys::Promise = ret
                .dyn_into()
                .map_err(|_| fail("createTexture did not return a promise".into()))?;
            JsFuture::from(promise)
                .await
                .map_err(|e| fail(format!("{:?}", e)))
        }
        .boxed_local()
    }
}

/// Base-color slot of the first material on the loaded model.
pub struct ModelViewerMaterial {
    el: web::Element,
    slot: JsValue,
}

impl ModelViewerMaterial {
    pub fn first(el: &web::Element) -> Result<Self, TextureError> {
        let material = js_get(el, "model")
            .and_then(|m| js_get(&m, "materials"))
            .and_then(|ms| ms.dyn_into::<js_sys::Array>().ok())
            .map(|ms| ms.get(0))
            .filter(|m| !m.is_undefined())
            .ok_or(TextureError::NoMaterial)?;
        let slot = js_get(&material, "pbrMetallicRoughness")
            .and_then(|pbr| js_get(&pbr, "baseColorTexture"))
            .ok_or(TextureError::NoMaterial)?;
        Ok(Self {
            el: el.clone(),
            slot,
        })
    }
}

impl MaterialSurface for ModelViewerMaterial {
    type Texture = JsValue;

    fn color_texture(&self) -> Option<JsValue> {
        js_get(&self.slot, "texture")
    }

    fn set_color_texture(&self, texture: &JsValue) {
        if let Err(e) = js_call(&self.slot, "setTexture", &js_sys::Array::of1(texture)) {
            log::warn!("[texture] setTexture failed: {:?}", e);
        }
    }

    fn request_render(&self) {
        _ = js_call(&self.el, "requestUpdate", &js_sys::Array::new());
    }
}
