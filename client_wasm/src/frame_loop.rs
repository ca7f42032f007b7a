//! Scheduled callbacks owned by the race screen
//!
//! Both handles cancel themselves on drop. Dropping one from inside its own
//! callback would free the closure while it runs, so callers that want to
//! stop from within a callback must defer the drop (see `spawn_local`).

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

fn window() -> Result<web_sys::Window, String> {
    web_sys::window().ok_or_else(|| "No window".to_string())
}

type FrameClosure = Closure<dyn FnMut(f64)>;

/// `requestAnimationFrame` loop passing the measured delta in seconds
pub struct AnimationLoop {
    handle: Rc<Cell<i32>>,
    closure: Rc<RefCell<Option<FrameClosure>>>,
}

impl AnimationLoop {
    pub fn start(mut on_frame: impl FnMut(f32) + 'static) -> Result<Self, String> {
        let window = window()?;
        let start = window.performance().map(|p| p.now());

        let handle = Rc::new(Cell::new(0));
        let closure: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));

        let last = Cell::new(start);
        let next_handle = handle.clone();
        let next_closure = closure.clone();
        *closure.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            // Reference resets every callback, so a stall is one long frame
            // rather than an accumulated backlog
            let dt = last
                .replace(Some(timestamp))
                .map(|prev| ((timestamp - prev) / 1000.0) as f32)
                .unwrap_or(0.0);
            on_frame(dt);

            if let (Some(window), Some(cb)) = (web_sys::window(), next_closure.borrow().as_ref()) {
                if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    next_handle.set(id);
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let id = match closure.borrow().as_ref() {
            Some(cb) => window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .map_err(|e| format!("Failed to request animation frame: {:?}", e))?,
            None => return Err("Frame callback missing".to_string()),
        };
        handle.set(id);

        Ok(Self { handle, closure })
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(self.handle.get());
        }
        // Breaks the closure's reference to itself
        self.closure.borrow_mut().take();
    }
}

/// `setInterval` timer
pub struct Interval {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn start(millis: i32, on_tick: impl FnMut() + 'static) -> Result<Self, String> {
        let closure = Closure::wrap(Box::new(on_tick) as Box<dyn FnMut()>);
        let id = window()?
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis,
            )
            .map_err(|e| format!("Failed to start interval: {:?}", e))?;

        Ok(Self {
            id,
            _closure: closure,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}

/// The two clocks of a race. Dropping this stops both.
pub struct RaceLoops {
    _frames: AnimationLoop,
    _clock: Interval,
}

impl RaceLoops {
    pub fn new(frames: AnimationLoop, clock: Interval) -> Self {
        Self {
            _frames: frames,
            _clock: clock,
        }
    }
}
