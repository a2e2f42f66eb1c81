use std::cell::RefCell;
use std::rc::Rc;

use viewer_core::{TextureError, TriggerSource};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use crate::dom::{self, js_get};
use crate::host::ModelViewerHost;
use crate::overlay::{ANIM_TOGGLE_ID, TEXTURE_CYCLE_ID};
use crate::textures::ModelViewerMaterial;
use crate::{Controller, Switcher};

pub const AR_BUTTON_ID: &str = "ar-button";
pub const ROTATE_BUTTON_ID: &str = "rotate-button";

#[derive(Clone)]
pub struct Wiring {
    pub document: web::Document,
    pub controller: Rc<RefCell<Controller>>,
    pub host: Option<ModelViewerHost>,
    pub switcher: Option<Rc<Switcher>>,
    pub material: Rc<RefCell<Option<Rc<ModelViewerMaterial>>>>,
}

/// Run `f` against the controller unless it is already borrowed further up the stack.
fn with_controller<R>(
    ctl: &Rc<RefCell<Controller>>,
    f: impl FnOnce(&mut Controller) -> R,
) -> Option<R> {
    match ctl.try_borrow_mut() {
        Ok(mut c) => Some(f(&mut c)),
        Err(_) => {
            log::warn!("[events] controller busy; event dropped");
            None
        }
    }
}

pub fn wire_all(w: &Wiring) {
    wire_idle_triggers(w);
    wire_page_visibility(w);
    wire_host_events(w);
    wire_controls(w);
}

/// One listener per trigger-map entry; each maps straight to its idle action.
fn wire_idle_triggers(w: &Wiring) {
    let triggers = w.controller.borrow().config().triggers.clone();
    if triggers.is_empty() {
        log::warn!("[init] no idle triggers configured");
        return;
    }
    log::info!("[init] wiring {} idle triggers", triggers.len());
    if let Some(window) = web::window() {
        for t in triggers.for_source(TriggerSource::Window) {
            let ctl = w.controller.clone();
            let action = t.action;
            dom::add_listener(&window, &t.event, move |_| {
                with_controller(&ctl, |c| c.apply_idle_action(action));
            });
        }
    }
    if let Some(host) = &w.host {
        for t in triggers.for_source(TriggerSource::Host) {
            let ctl = w.controller.clone();
            let action = t.action;
            dom::add_listener(host.element(), &t.event, move |_| {
                with_controller(&ctl, |c| c.apply_idle_action(action));
            });
        }
    }
}

// Switching to an external AR viewer hides the page; coming back shows it.
fn wire_page_visibility(w: &Wiring) {
    let doc = w.document.clone();
    let ctl = w.controller.clone();
    dom::add_listener(&w.document, "visibilitychange", move |_| {
        let hidden = doc.visibility_state() == web::VisibilityState::Hidden;
        with_controller(&ctl, |c| {
            if hidden {
                c.on_page_hidden();
            } else {
                c.on_page_visible();
            }
        });
    });
}

fn wire_host_events(w: &Wiring) {
    let Some(host) = &w.host else {
        return;
    };

    let ctl = w.controller.clone();
    dom::add_listener(host.element(), "ar-status", move |ev| {
        let status = ev
            .dyn_ref::<web::CustomEvent>()
            .and_then(|ce| js_get(&ce.detail(), "status"))
            .and_then(|s| s.as_string());
        match status {
            Some(s) => {
                with_controller(&ctl, |c| c.on_ar_status(&s));
            }
            None => log::warn!("[ar] ar-status event without a status"),
        }
    });

    let w_load = w.clone();
    let el = host.element().clone();
    dom::add_listener(host.element(), "load", move |_| {
        log::info!("[host] model loaded");
        with_controller(&w_load.controller, |c| c.on_model_loaded());
        let Some(switcher) = &w_load.switcher else {
            return;
        };
        match ModelViewerMaterial::first(&el) {
            Ok(m) => {
                switcher.capture_original(&m);
                *w_load.material.borrow_mut() = Some(Rc::new(m));
            }
            Err(e) => log::warn!("[texture] {}", e),
        }
    });
}

fn wire_controls(w: &Wiring) {
    let ctl = w.controller.clone();
    let host = w.host.clone();
    dom::add_control_listener(&w.document, AR_BUTTON_ID, move || {
        let launch = with_controller(&ctl, |c| c.request_ar()).unwrap_or(false);
        // Launched outside the borrow: the host may dispatch `ar-status` synchronously,
        // and with_controller drops events that arrive while the controller is borrowed.
        // No host call may be made while a controller borrow is held.
        if let (true, Some(h)) = (launch, &host) {
            h.activate_ar();
        }
    });

    let ctl = w.controller.clone();
    dom::add_control_listener(&w.document, ROTATE_BUTTON_ID, move || {
        with_controller(&ctl, |c| {
            c.bump();
            c.rotate_step();
        });
    });

    let ctl = w.controller.clone();
    dom::add_control_listener(&w.document, ANIM_TOGGLE_ID, move || {
        with_controller(&ctl, |c| {
            c.bump();
            c.toggle_animation();
        });
    });

    let w_tex = w.clone();
    dom::add_control_listener(&w.document, TEXTURE_CYCLE_ID, move || {
        with_controller(&w_tex.controller, |c| c.bump());
        let Some(switcher) = w_tex.switcher.clone() else {
            return;
        };
        let Some(material) = w_tex.material.borrow().clone() else {
            log::warn!("[texture] {}", TextureError::NoMaterial);
            return;
        };
        let ctl = w_tex.controller.clone();
        spawn_local(async move {
            match switcher.cycle(material.as_ref()).await {
                Ok(Some(v)) => {
                    if let Ok(c) = ctl.try_borrow() {
                        c.overlay().show_variant(&v.name);
                    }
                }
                Ok(None) => {}
                Err(e) => log::warn!("[texture] switch failed: {}", e),
            }
        });
    });
}
