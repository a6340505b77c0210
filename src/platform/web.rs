//! Browser host
//!
//! Drives [`App`] from `requestAnimationFrame`. At most one frame request is
//! outstanding; its id is kept so round end and teardown can revoke it.
//! Keyboard and touch input only flip flags on the app, which the next frame
//! consumes.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{KeyboardEvent, TouchEvent};

use super::storage::LocalStorageStore;
use crate::app::App;
use crate::sim::{EndReason, Phase};
use crate::tuning::Tuning;

type SharedApp = Rc<RefCell<App<LocalStorageStore>>>;
type FrameCallback = Closure<dyn FnMut(f64)>;

/// Install the panic hook and console logger
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // Already initialized when the module is instantiated twice
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Santa's Bag Run ready");
}

/// Self-rescheduling animation frame callback with a revocable pending request
#[derive(Clone)]
struct FrameLoop {
    pending: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl FrameLoop {
    fn new(app: SharedApp, on_frame: Option<js_sys::Function>) -> Self {
        let pending = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        let frame_pending = Rc::clone(&pending);
        let frame_callback = Rc::downgrade(&callback);
        let closure = FrameCallback::new(move |time: f64| {
            frame_pending.set(None);

            let events = app.borrow_mut().frame(time);
            for event in &events {
                log::debug!("{:?}", event);
            }

            // The app borrow is released so the renderer may call back into WebGame
            if let Some(render) = &on_frame {
                if let Err(e) = render.call0(&JsValue::NULL) {
                    log::error!("Frame callback threw: {:?}", e);
                }
            }

            // Not asking for another frame is how the loop stops
            if app.borrow().is_running() && frame_pending.get().is_none() {
                if let Some(callback) = frame_callback.upgrade() {
                    request_frame(&frame_pending, &callback);
                }
            }
        });
        *callback.borrow_mut() = Some(closure);

        Self { pending, callback }
    }

    /// Ensure a frame is scheduled
    fn resume(&self) {
        if self.pending.get().is_none() {
            request_frame(&self.pending, &self.callback);
        }
    }

    /// Revoke the pending frame, if any. Safe to call repeatedly.
    fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.cancel_animation_frame(id) {
                    log::warn!("cancelAnimationFrame failed: {:?}", e);
                }
            }
        }
    }
}

fn request_frame(pending: &Cell<Option<i32>>, callback: &RefCell<Option<FrameCallback>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Some(closure) = callback.borrow().as_ref() {
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => pending.set(Some(id)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }
}

fn start_round(app: &SharedApp, frames: &FrameLoop) {
    let seed = js_sys::Date::now() as u64;
    app.borrow_mut().start(seed);
    frames.resume();
}

/// Game handle for the page. Space starts/restarts a round or jumps while
/// one is running; a tap jumps. `on_frame` is invoked after every frame so
/// the page can redraw from `snapshot_json`.
#[wasm_bindgen]
pub struct WebGame {
    app: SharedApp,
    frames: FrameLoop,
    on_keydown: Closure<dyn FnMut(KeyboardEvent)>,
    on_touchstart: Closure<dyn FnMut(TouchEvent)>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(on_frame: Option<js_sys::Function>, tuning_json: Option<String>) -> WebGame {
        let tuning = match tuning_json.as_deref().map(Tuning::from_json) {
            Some(Ok(tuning)) => tuning,
            Some(Err(e)) => {
                log::warn!("Ignoring tuning override: {}", e);
                Tuning::default()
            }
            None => Tuning::default(),
        };

        let app: SharedApp = Rc::new(RefCell::new(App::new(tuning, LocalStorageStore)));
        let frames = FrameLoop::new(Rc::clone(&app), on_frame);

        let on_keydown = {
            let app = Rc::clone(&app);
            let frames = frames.clone();
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() != "Space" {
                    return;
                }
                event.prevent_default();
                if event.repeat() {
                    return;
                }
                let running = app.borrow().is_running();
                if running {
                    app.borrow_mut().jump();
                } else {
                    start_round(&app, &frames);
                }
            })
        };

        let on_touchstart = {
            let app = Rc::clone(&app);
            Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                app.borrow_mut().jump();
            })
        };

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
            let _ = window.add_event_listener_with_callback(
                "touchstart",
                on_touchstart.as_ref().unchecked_ref(),
            );
        }

        WebGame {
            app,
            frames,
            on_keydown,
            on_touchstart,
        }
    }

    /// Start or restart a round
    pub fn start(&self) {
        start_round(&self.app, &self.frames);
    }

    pub fn jump(&self) {
        self.app.borrow_mut().jump();
    }

    /// Stop ticking; the pending frame is revoked
    pub fn stop(&self) {
        self.frames.cancel();
        self.app.borrow_mut().stop();
    }

    /// Current round for the renderer
    pub fn snapshot_json(&self) -> String {
        let app = self.app.borrow();
        match serde_json::to_string(&app.simulation().snapshot()) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Snapshot serialization failed: {}", e);
                String::from("null")
            }
        }
    }

    pub fn collected(&self) -> u32 {
        self.app.borrow().collected()
    }

    pub fn high_score(&self) -> u32 {
        self.app.borrow().high_score()
    }

    pub fn time_left(&self) -> u32 {
        self.app.borrow().time_left()
    }

    /// "idle", "running", "collision" or "time_up"
    pub fn status(&self) -> String {
        let status = match self.app.borrow().phase() {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Ended(EndReason::Collision) => "collision",
            Phase::Ended(EndReason::TimeUp) => "time_up",
        };
        status.to_owned()
    }
}

impl Drop for WebGame {
    fn drop(&mut self) {
        self.frames.cancel();
        if let Ok(mut app) = self.app.try_borrow_mut() {
            app.stop();
        }
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                "keydown",
                self.on_keydown.as_ref().unchecked_ref(),
            );
            let _ = window.remove_event_listener_with_callback(
                "touchstart",
                self.on_touchstart.as_ref().unchecked_ref(),
            );
        }
    }
}
