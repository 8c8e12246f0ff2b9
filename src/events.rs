use crate::dom;
use crate::frame::SharedEngine;
use fx_core::{Surface, Viewport};
use std::rc::Rc;

/// Keep the engine's surface sized to the viewport. No debounce: a resize
/// only recomputes dimensions.
pub fn wire_resize<S: Surface + 'static>(engine: &SharedEngine<S>) {
    let weak = Rc::downgrade(engine);
    dom::add_window_listener("resize", move || {
        if let Some(engine) = weak.upgrade() {
            let viewport: Viewport = dom::viewport();
            if let Ok(mut e) = engine.try_borrow_mut() {
                e.resize(viewport);
            }
        }
    });
}

/// Hard-stop the engine when the page is being unloaded.
pub fn wire_teardown<S: Surface + 'static>(
    engine: &SharedEngine<S>,
    mut extra: impl FnMut() + 'static,
) {
    let weak = Rc::downgrade(engine);
    dom::add_window_listener("beforeunload", move || {
        extra();
        if let Some(engine) = weak.upgrade() {
            if let Ok(mut e) = engine.try_borrow_mut() {
                e.stop();
            }
        }
    });
}
