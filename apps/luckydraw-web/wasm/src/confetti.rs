//! `requestAnimationFrame` driver for the celebration sequence
//!
//! Uses the page's global `confetti` function (canvas-confetti) when one is
//! loaded. Without it a celebration is a no-op.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Reflect};
use luckydraw_core::Celebration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn now_ms(window: &Window) -> f64 {
    window
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

fn confetti_fn(window: &Window) -> Option<Function> {
    Reflect::get(window, &JsValue::from_str("confetti"))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

/// Run the celebration for `duration_ms`
pub fn celebrate(duration_ms: u32) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(confetti) = confetti_fn(&window) else {
        return;
    };

    let celebration = Celebration::start(now_ms(&window), duration_ms);
    let frame: FrameCallback = Rc::new(RefCell::new(None));
    let next = frame.clone();
    let win = window.clone();

    *frame.borrow_mut() = Some(Closure::new(move || {
        let tick = celebration.tick(now_ms(&win));
        for burst in tick.bursts {
            if let Ok(options) = serde_wasm_bindgen::to_value(&burst) {
                let _ = confetti.call1(&JsValue::NULL, &options);
            }
        }

        if !tick.reschedule {
            // Drop our own handle; the closure is freed once this call returns
            let _ = next.borrow_mut().take();
            return;
        }
        if let Some(callback) = next.borrow().as_ref() {
            let _ = win.request_animation_frame(callback.as_ref().unchecked_ref());
        }
    }));

    if let Some(callback) = frame.borrow().as_ref() {
        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
    };
}
