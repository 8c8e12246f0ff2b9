#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

mod ambient;
mod api;
mod canvas;
mod dom;
mod events;
mod frame;
mod layer;
mod timers;

pub use api::{AmbientBackdrop, ConfettiFx, EmojiOverlay, FloatingHearts, HeartBursts};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("fx-web starting");
    Ok(())
}
