use fx_core::{Engine, EngineConfig, FrameHandle, FrameScheduler, Surface};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame`-backed scheduler. The callback is installed after
/// the engine exists, see [`shared_engine`].
pub struct RafScheduler {
    callback: FrameSlot,
}

impl FrameScheduler for RafScheduler {
    fn request(&mut self) -> Option<FrameHandle> {
        let window = web::window()?;
        let slot = self.callback.borrow();
        let closure = slot.as_ref()?;
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::error!("requestAnimationFrame error: {:?}", e);
                None
            }
        }
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if let Some(w) = web::window() {
            _ = w.cancel_animation_frame(handle.0);
        }
    }
}

pub type SharedEngine<S> = Rc<RefCell<Engine<S, RafScheduler>>>;

/// Build an engine whose frame callback drives it through a weak handle, so
/// dropping the last strong reference tears the loop down.
pub fn shared_engine<S: Surface + 'static>(config: EngineConfig, surface: S) -> SharedEngine<S> {
    let slot: FrameSlot = Rc::new(RefCell::new(None));
    let frames = RafScheduler {
        callback: slot.clone(),
    };
    let engine = Rc::new(RefCell::new(Engine::new(
        config,
        surface,
        frames,
        rand::random(),
    )));

    let epoch = Instant::now();
    let weak = Rc::downgrade(&engine);
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let Some(engine) = weak.upgrade() else {
            return;
        };
        let now_ms = epoch.elapsed().as_secs_f64() * 1000.0;
        match engine.try_borrow_mut() {
            Ok(mut e) => e.on_frame(now_ms),
            Err(_) => log::warn!("[fx] frame skipped: engine busy"),
        };
    }) as Box<dyn FnMut()>));
    engine
}

/// Run `f` against the engine, skipping it if the engine is already borrowed.
pub fn with_engine<S: Surface, R>(
    engine: &SharedEngine<S>,
    f: impl FnOnce(&mut Engine<S, RafScheduler>) -> R,
) -> Option<R> {
    match engine.try_borrow_mut() {
        Ok(mut e) => Some(f(&mut e)),
        Err(_) => {
            log::warn!("[fx] trigger skipped: engine busy");
            None
        }
    }
}
