use crate::dom;
use fnv::FnvHashMap;
use fx_core::constants::HEART_SIZE_PX;
use fx_core::{Particle, Space, Surface, SurfaceError, Viewport, Visual};
use wasm_bindgen::JsCast;
use web_sys as web;

const HEART_SVG: &str = r#"<svg viewBox="0 0 12 12" xmlns="http://www.w3.org/2000/svg" width="SIZE" height="SIZE" aria-hidden="true"><path d="M6 1.8c1.3-1.5 4.1-1.6 5.3 0 1.4 1.7 1.1 4.1-.4 5.6L6 11 1.1 7.4C-.4 5.9-.6 3.5.8 1.8 2.1.2 4.7.3 6 1.8z" fill="COLOR" fill-opacity="0.95"/></svg>"#;

/// Absolutely positioned HTML nodes, one per particle, inside a fixed layer.
pub struct DomLayer {
    id: &'static str,
    node_class: &'static str,
    z_index: u32,
    document: Option<web::Document>,
    layer: Option<web::Element>,
    nodes: FnvHashMap<u32, (web::HtmlElement, u64)>,
    generation: u64,
    viewport: Viewport,
}

impl DomLayer {
    pub fn emoji(viewport: Viewport) -> Self {
        Self::new("emoji-layer", "emoji", 50, viewport)
    }

    pub fn hearts(viewport: Viewport) -> Self {
        Self::new("burst-layer", "burst", 45, viewport)
    }

    pub fn floating_hearts(viewport: Viewport) -> Self {
        Self::new("hearts-layer", "heart", 30, viewport)
    }

    fn new(id: &'static str, node_class: &'static str, z_index: u32, viewport: Viewport) -> Self {
        Self {
            id,
            node_class,
            z_index,
            document: None,
            layer: None,
            nodes: FnvHashMap::default(),
            generation: 0,
            viewport,
        }
    }

    fn create_node(&self, p: &Particle) -> Option<web::HtmlElement> {
        let (document, layer) = (self.document.as_ref()?, self.layer.as_ref()?);
        let node = document
            .create_element("div")
            .ok()?
            .dyn_into::<web::HtmlElement>()
            .ok()?;
        node.set_class_name(self.node_class);
        let style = node.style();
        _ = style.set_property("position", "absolute");
        _ = style.set_property("left", "0");
        _ = style.set_property("top", "0");
        _ = style.set_property("opacity", "0");
        _ = style.set_property("will-change", "transform, opacity");
        match p.visual {
            Visual::Glyph { glyph, font_px } => {
                node.set_text_content(Some(glyph));
                _ = style.set_property("font-size", &format!("{}px", font_px));
            }
            Visual::Sparkle => node.set_text_content(Some("✦")),
            _ => {
                let size = format!("{}", HEART_SIZE_PX);
                node.set_inner_html(
                    &HEART_SVG
                        .replace("SIZE", &size)
                        .replace("COLOR", p.color),
                );
            }
        }
        layer.append_child(&node).ok()?;
        Some(node)
    }
}

impl Surface for DomLayer {
    fn ensure(&mut self) -> Result<Viewport, SurfaceError> {
        if self.layer.is_some() {
            return Ok(self.viewport);
        }
        let document = dom::window_document().ok_or(SurfaceError::NotReady("no document"))?;
        let style = format!(
            "position:fixed;inset:0;overflow:hidden;pointer-events:none;z-index:{}",
            self.z_index
        );
        match dom::ensure_in_body(&document, self.id, "div", &style, self.id) {
            Ok(Some(layer)) => {
                // drop whatever a previous page script left in the layer
                layer.set_inner_html("");
                self.layer = Some(layer);
                self.document = Some(document);
                self.viewport = dom::viewport();
                Ok(self.viewport)
            }
            Ok(None) => Err(SurfaceError::NotReady("document body")),
            Err(e) => Err(SurfaceError::Unavailable(format!("{:#}", e))),
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self) {
        for (_, (node, _)) in self.nodes.drain() {
            node.remove();
        }
    }

    fn draw(&mut self, particles: &[Particle], space: Space) {
        self.generation += 1;
        let generation = self.generation;
        for p in particles {
            if !self.nodes.contains_key(&p.id) {
                match self.create_node(p) {
                    Some(node) => {
                        self.nodes.insert(p.id, (node, generation));
                    }
                    None => continue,
                }
            }
            if let Some((node, seen)) = self.nodes.get_mut(&p.id) {
                *seen = generation;
                let pos = space.to_css(p.render_pos(), self.viewport);
                let style = node.style();
                _ = style.set_property("opacity", &format!("{:.2}", p.opacity()));
                _ = style.set_property(
                    "transform",
                    &format!(
                        "translate({:.1}px, {:.1}px) rotate({:.1}deg) scale({:.2})",
                        pos.x,
                        pos.y,
                        p.rotation.to_degrees(),
                        p.scale
                    ),
                );
            }
        }
        self.nodes.retain(|_, (node, seen)| {
            if *seen == generation {
                true
            } else {
                node.remove();
                false
            }
        });
    }
}
