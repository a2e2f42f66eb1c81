use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Attach `handler` for `event` on `target` for the lifetime of the page.
pub fn add_listener(
    target: &web::EventTarget,
    event: &str,
    mut handler: impl FnMut(web::Event) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| handler(ev)) as Box<dyn FnMut(_)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::warn!("[init] could not listen for {}: {:?}", event, e);
    }
    closure.forget();
}

/// Click handler for a control, keeping the activation away from the viewer's
/// own gestures (tap-to-place, drag-to-orbit).
pub fn add_control_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) -> bool {
    let Some(el) = document.get_element_by_id(element_id) else {
        log::warn!("[init] control #{} not found", element_id);
        return false;
    };
    for ev in ["pointerdown", "touchstart", "mousedown"] {
        add_listener(&el, ev, |e| e.stop_propagation());
    }
    add_listener(&el, "click", move |ev| {
        ev.prevent_default();
        ev.stop_propagation();
        handler();
    });
    true
}

/// Call `target[method](...args)`.
pub fn js_call(target: &JsValue, method: &str, args: &js_sys::Array) -> Result<JsValue, JsValue> {
    let f = js_sys::Reflect::get(target, &JsValue::from_str(method))?;
    let f: js_sys::Function = f
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("{} is not a function", method)))?;
    f.apply(target, args)
}

#[inline]
pub fn js_get(target: &JsValue, key: &str) -> Option<JsValue> {
    js_sys::Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

#[inline]
pub fn set_hidden(el: &web::Element, hidden: bool) {
    let cl = el.class_list();
    if hidden {
        _ = cl.add_1("hidden");
    } else {
        _ = cl.remove_1("hidden");
    }
}
