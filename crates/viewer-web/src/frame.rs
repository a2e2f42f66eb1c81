use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::Controller;

pub struct FrameContext {
    pub controller: Rc<RefCell<Controller>>,
}

impl FrameContext {
    pub fn frame(&mut self, now_ms: f64) {
        match self.controller.try_borrow_mut() {
            Ok(mut c) => c.tick(now_ms),
            Err(_) => log::debug!("[frame] controller busy; skipping tick"),
        }
    }
}

/// Drive `FrameContext::frame` from requestAnimationFrame for the page lifetime.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
        frame_ctx.borrow_mut().frame(now_ms);
        request_frame(&tick_clone);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
