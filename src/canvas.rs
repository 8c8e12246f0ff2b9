use crate::dom;
use fx_core::constants::RECT_DRAW_HEIGHT_FACTOR;
use fx_core::{Particle, Space, Surface, SurfaceError, Viewport, Visual};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub const CONFETTI_CANVAS_ID: &str = "confetti";
const CANVAS_STYLE: &str = "position:fixed;inset:0;z-index:40;pointer-events:none";

/// Full-viewport 2D canvas above the page content. Drawing uses CSS pixel
/// coordinates; the backing store is scaled by the device pixel ratio.
pub struct CanvasSurface {
    id: &'static str,
    canvas: Option<web::HtmlCanvasElement>,
    ctx: Option<web::CanvasRenderingContext2d>,
    viewport: Viewport,
}

impl CanvasSurface {
    pub fn new(id: &'static str, viewport: Viewport) -> Self {
        Self {
            id,
            canvas: None,
            ctx: None,
            viewport,
        }
    }

    fn create(
        &self,
        document: &web::Document,
    ) -> anyhow::Result<Option<(web::HtmlCanvasElement, web::CanvasRenderingContext2d)>> {
        let Some(el) = dom::ensure_in_body(
            document,
            self.id,
            "canvas",
            CANVAS_STYLE,
            "fx-layer pointer-events-none",
        )?
        else {
            return Ok(None);
        };
        let canvas: web::HtmlCanvasElement = el
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!("#{} is not a canvas: {:?}", self.id, e))?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("getContext(2d): {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Some((canvas, ctx)))
    }

    fn apply_size(&self) {
        let (Some(canvas), Some(ctx)) = (&self.canvas, &self.ctx) else {
            return;
        };
        let (w_px, h_px) = self.viewport.backing_px();
        canvas.set_width(w_px);
        canvas.set_height(h_px);
        let style = canvas.style();
        _ = style.set_property("width", &format!("{}px", self.viewport.width));
        _ = style.set_property("height", &format!("{}px", self.viewport.height));
        let d = f64::from(self.viewport.dpr);
        _ = ctx.set_transform(d, 0.0, 0.0, d, 0.0, 0.0);
    }

    fn draw_particle(ctx: &web::CanvasRenderingContext2d, p: &Particle, at: glam::Vec2) {
        ctx.save();
        _ = ctx.translate(f64::from(at.x), f64::from(at.y));
        _ = ctx.rotate(f64::from(p.rotation));
        ctx.set_global_alpha(f64::from(p.opacity().clamp(0.0, 1.0)));
        #[allow(deprecated)]
        ctx.set_fill_style(&JsValue::from_str(p.color));
        match p.visual {
            Visual::Rect { w, h } => {
                let (w, h) = (f64::from(w), f64::from(h * RECT_DRAW_HEIGHT_FACTOR));
                ctx.fill_rect(-w / 2.0, -h / 2.0, w, h);
            }
            Visual::Streamer { w, h } => {
                let (w, h) = (f64::from(w), f64::from(h));
                ctx.fill_rect(-w / 2.0, -h / 2.0, w, h);
            }
            Visual::Glyph { glyph, font_px } => {
                ctx.set_font(&format!("{}px serif", font_px * p.scale));
                _ = ctx.fill_text(glyph, 0.0, 0.0);
            }
            Visual::Heart | Visual::Sparkle => {
                let glyph = if p.visual == Visual::Heart { "❤" } else { "✦" };
                ctx.set_font(&format!("{}px serif", 14.0 * p.scale));
                _ = ctx.fill_text(glyph, 0.0, 0.0);
            }
        }
        ctx.restore();
    }
}

impl Surface for CanvasSurface {
    fn ensure(&mut self) -> Result<Viewport, SurfaceError> {
        if self.ctx.is_some() {
            return Ok(self.viewport);
        }
        let document = dom::window_document().ok_or(SurfaceError::NotReady("no document"))?;
        match self.create(&document) {
            Ok(Some((canvas, ctx))) => {
                self.canvas = Some(canvas);
                self.ctx = Some(ctx);
                self.viewport = dom::viewport();
                self.apply_size();
                log::info!("[confetti] canvas ready {:?}", self.viewport.backing_px());
                Ok(self.viewport)
            }
            Ok(None) => Err(SurfaceError::NotReady("document body")),
            Err(e) => Err(SurfaceError::Unavailable(format!("{:#}", e))),
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.apply_size();
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self) {
        if let Some(ctx) = &self.ctx {
            let vp = self.viewport;
            ctx.clear_rect(0.0, 0.0, f64::from(vp.width), f64::from(vp.height));
        }
    }

    fn draw(&mut self, particles: &[Particle], space: Space) {
        self.clear();
        if let Some(ctx) = &self.ctx {
            for p in particles {
                Self::draw_particle(ctx, p, space.to_css(p.render_pos(), self.viewport));
            }
        }
    }
}
