//! Effect objects exported to the page script. Each owns one engine and its
//! surface; every method swallows failures so decorations never interrupt
//! the page.

use crate::ambient::{SvgSurface, AMBIENT_MOUNT_ID};
use crate::canvas::{CanvasSurface, CONFETTI_CANVAS_ID};
use crate::dom;
use crate::events;
use crate::frame::{self, with_engine, SharedEngine};
use crate::layer::DomLayer;
use crate::timers::IntervalTimer;
use fx_core::shows::{self, DEFAULT_DRIZZLE_MS};
use fx_core::{
    AmbientConfig, EmojiOverlayConfig, EngineConfig, FloatingHeartsConfig, Origin, Palette,
};
use glam::Vec2;
use rand::Rng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

const DEFAULT_HEART_COUNT: u32 = 6;
const GENTLE_RAIN_MS: u32 = 2800;
const GENTLE_RAIN_COUNT: usize = 4;

/// Mid-page region periodic bursts land in.
fn mid_page() -> Origin {
    Origin::Region {
        x: (0.2, 0.8),
        y: (0.25, 0.75),
    }
}

#[wasm_bindgen]
pub struct ConfettiFx {
    engine: SharedEngine<CanvasSurface>,
}

#[wasm_bindgen]
impl ConfettiFx {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ConfettiFx {
        let engine = frame::shared_engine(
            EngineConfig::confetti(),
            CanvasSurface::new(CONFETTI_CANVAS_ID, dom::viewport()),
        );
        events::wire_resize(&engine);
        events::wire_teardown(&engine, || {});
        ConfettiFx { engine }
    }

    /// Launch the opening show, optionally centred on a point.
    pub fn start(&self, x: Option<f32>, y: Option<f32>) {
        let hint = x.zip(y).map(|(x, y)| Vec2::new(x, y));
        with_engine(&self.engine, |e| e.start(hint));
    }

    pub fn burst(&self, x: f32, y: f32, count: Option<u32>) {
        with_engine(&self.engine, |e| e.burst(x, y, count.map(|c| c as usize)));
    }

    pub fn firework(&self, x: f32, y: f32) {
        with_engine(&self.engine, |e| e.firework(x, y));
    }

    pub fn drizzle(&self, ms: Option<f64>) {
        with_engine(&self.engine, |e| e.drizzle(ms.unwrap_or(DEFAULT_DRIZZLE_MS)));
    }

    pub fn popper(&self, x: f32, y: f32) {
        with_engine(&self.engine, |e| e.popper(x, y));
    }

    pub fn stop(&self) {
        with_engine(&self.engine, |e| e.stop());
    }

    /// Live particle count.
    pub fn active(&self) -> u32 {
        self.engine.try_borrow().map(|e| e.active() as u32).unwrap_or(0)
    }
}

impl Default for ConfettiFx {
    fn default() -> Self {
        Self::new()
    }
}

/// Floating emoji on document clicks and at a fixed interval.
#[wasm_bindgen]
pub struct EmojiOverlay {
    engine: SharedEngine<DomLayer>,
    timer: Rc<RefCell<Option<IntervalTimer>>>,
    enabled: Rc<Cell<bool>>,
}

#[wasm_bindgen]
impl EmojiOverlay {
    #[wasm_bindgen(constructor)]
    pub fn new(interval_ms: Option<u32>, click_count: Option<u32>) -> EmojiOverlay {
        let mut config = EmojiOverlayConfig::default();
        if let Some(ms) = interval_ms {
            config.interval_ms = ms;
        }
        if let Some(n) = click_count {
            config.click_count = n as usize;
        }
        let engine_config = EngineConfig {
            palette: Palette {
                glyphs: config.glyphs,
                ..Palette::default()
            },
            ..EngineConfig::emoji()
        };
        let engine = frame::shared_engine(engine_config, DomLayer::emoji(dom::viewport()));
        let timer = Rc::new(RefCell::new(None));
        let enabled = Rc::new(Cell::new(!dom::prefers_reduced_motion()));
        events::wire_resize(&engine);
        let overlay = EmojiOverlay {
            engine,
            timer,
            enabled,
        };
        if overlay.enabled.get() {
            overlay.wire(&config);
        } else {
            log::info!("[emoji] reduced motion, overlay idle");
        }
        overlay
    }

    fn wire(&self, config: &EmojiOverlayConfig) {
        let click_engine = Rc::downgrade(&self.engine);
        let click_enabled = self.enabled.clone();
        let click_count = config.click_count;
        dom::add_document_click_listener(move |ev| {
            let Some(engine) = click_engine.upgrade() else {
                return;
            };
            if !click_enabled.get() {
                return;
            }
            let vp = dom::viewport();
            let x = match ev.client_x() {
                0 => vp.width / 2.0,
                x => x as f32,
            };
            let y = match ev.client_y() {
                0 => vp.height / 2.0,
                y => y as f32,
            };
            let show = shows::emoji_burst(Origin::At(Vec2::new(x, y)), click_count);
            with_engine(&engine, |e| e.play(&show));
        });

        let tick_engine = Rc::downgrade(&self.engine);
        let counts = config.periodic_count.clone();
        match IntervalTimer::start(config.interval_ms, move || {
            if let Some(engine) = tick_engine.upgrade() {
                let n = rand::thread_rng().gen_range(counts.clone());
                with_engine(&engine, |e| e.play(&shows::emoji_burst(mid_page(), n)));
            }
        }) {
            Ok(t) => *self.timer.borrow_mut() = Some(t),
            Err(e) => log::warn!("[emoji] periodic bursts disabled: {:#}", e),
        }

        let timer = self.timer.clone();
        events::wire_teardown(&self.engine, move || {
            timer.borrow_mut().take();
        });
    }

    pub fn burst(&self, x: f32, y: f32, count: u32) {
        if !self.enabled.get() {
            return;
        }
        with_engine(&self.engine, |e| {
            e.play(&shows::emoji_burst(Origin::At(Vec2::new(x, y)), count as usize))
        });
    }

    /// Cancel the periodic timer, ignore further clicks, clear the layer.
    pub fn stop(&self) {
        self.enabled.set(false);
        self.timer.borrow_mut().take();
        with_engine(&self.engine, |e| e.stop());
    }
}

/// Small inline-SVG heart bursts.
#[wasm_bindgen]
pub struct HeartBursts {
    engine: SharedEngine<DomLayer>,
    rain: RefCell<Option<IntervalTimer>>,
}

#[wasm_bindgen]
impl HeartBursts {
    #[wasm_bindgen(constructor)]
    pub fn new() -> HeartBursts {
        let engine =
            frame::shared_engine(EngineConfig::hearts(), DomLayer::hearts(dom::viewport()));
        events::wire_resize(&engine);
        events::wire_teardown(&engine, || {});
        HeartBursts {
            engine,
            rain: RefCell::new(None),
        }
    }

    pub fn burst(&self, x: f32, y: f32, count: Option<u32>) {
        let n = count.unwrap_or(DEFAULT_HEART_COUNT) as usize;
        with_engine(&self.engine, |e| {
            e.play(&shows::heart_burst(Origin::At(Vec2::new(x, y)), n))
        });
    }

    /// Periodic small bursts somewhere mid-page until `stop`.
    pub fn gentle_rain(&self, interval_ms: Option<u32>) {
        let weak = Rc::downgrade(&self.engine);
        let timer = IntervalTimer::start(interval_ms.unwrap_or(GENTLE_RAIN_MS), move || {
            if let Some(engine) = weak.upgrade() {
                with_engine(&engine, |e| {
                    e.play(&shows::heart_burst(mid_page(), GENTLE_RAIN_COUNT))
                });
            }
        });
        match timer {
            Ok(t) => *self.rain.borrow_mut() = Some(t),
            Err(e) => log::warn!("[hearts] gentle rain disabled: {:#}", e),
        }
    }

    pub fn stop(&self) {
        self.rain.borrow_mut().take();
        with_engine(&self.engine, |e| e.stop());
    }
}

impl Default for HeartBursts {
    fn default() -> Self {
        Self::new()
    }
}

/// Background hearts and sparkles mounted in `#ambient-bg`.
#[wasm_bindgen]
pub struct AmbientBackdrop {
    engine: SharedEngine<SvgSurface>,
}

#[wasm_bindgen]
impl AmbientBackdrop {
    #[wasm_bindgen(constructor)]
    pub fn new() -> AmbientBackdrop {
        let engine = frame::shared_engine(
            EngineConfig::ambient(),
            SvgSurface::new(AMBIENT_MOUNT_ID, dom::viewport()),
        );
        events::wire_resize(&engine);
        events::wire_teardown(&engine, || {});
        let reduced = dom::prefers_reduced_motion();
        let weak = Rc::downgrade(&engine);
        dom::after_dom(move || {
            let Some(engine) = weak.upgrade() else {
                return;
            };
            with_engine(&engine, |e| {
                if !e.ensure_surface() {
                    return;
                }
                if reduced {
                    log::info!("[ambient] reduced motion, accents only");
                } else {
                    e.play(&shows::ambient_field(&AmbientConfig::default()));
                }
            });
        });
        AmbientBackdrop { engine }
    }

    pub fn stop(&self) {
        with_engine(&self.engine, |e| e.stop());
    }
}

impl Default for AmbientBackdrop {
    fn default() -> Self {
        Self::new()
    }
}

/// Glyph hearts rising behind the content in `#hearts-layer`.
#[wasm_bindgen]
pub struct FloatingHearts {
    engine: SharedEngine<DomLayer>,
}

#[wasm_bindgen]
impl FloatingHearts {
    #[wasm_bindgen(constructor)]
    pub fn new(count: Option<u32>) -> FloatingHearts {
        let mut config = FloatingHeartsConfig {
            reduced_motion: dom::prefers_reduced_motion(),
            ..FloatingHeartsConfig::default()
        };
        if let Some(n) = count {
            config.count = n as usize;
        }
        let engine = frame::shared_engine(
            EngineConfig::floating(),
            DomLayer::floating_hearts(dom::viewport()),
        );
        events::wire_resize(&engine);
        events::wire_teardown(&engine, || {});
        let reflow = Rc::downgrade(&engine);
        dom::add_window_listener("resize", move || {
            if let Some(engine) = reflow.upgrade() {
                with_engine(&engine, |e| e.desync());
            }
        });

        let weak = Rc::downgrade(&engine);
        dom::after_dom(move || {
            let Some(engine) = weak.upgrade() else {
                return;
            };
            with_engine(&engine, |e| {
                if !e.ensure_surface() {
                    return;
                }
                if config.reduced_motion {
                    log::info!("[hearts] reduced motion, layer left empty");
                } else {
                    e.play(&shows::floating_hearts(&config));
                }
            });
        });
        FloatingHearts { engine }
    }

    pub fn stop(&self) {
        with_engine(&self.engine, |e| e.stop());
    }
}

impl Default for FloatingHearts {
    fn default() -> Self {
        Self::new(None)
    }
}
