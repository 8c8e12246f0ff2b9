//! Soft background hearts and sparkles drawn as SVG behind the page content.
//! The SVG viewBox is 0..100 on both axes, matching percent space.

use crate::dom;
use fnv::FnvHashMap;
use fx_core::constants::{AMBIENT_ACCENT_OPACITY, AMBIENT_OPACITY, HEART_COLORS};
use fx_core::{Particle, Space, Surface, SurfaceError, Viewport, Visual};
use web_sys as web;

pub const AMBIENT_MOUNT_ID: &str = "ambient-bg";

const HEART_PATH: &str = "M5 1.5c1.2-1.4 3.8-1.5 5 0 1.3 1.6 1 3.9-.4 5.3L5 11 0.4 6.8C-1 5.4-1.3 3.1 0 1.5c1.2-1.5 3.8-1.5 5 0z";
const SPARKLE_PATH: &str = "M5 0 L6.4 3.2 L10 5 L6.4 6.8 L5 10 L3.6 6.8 L0 5 L3.6 3.2 Z";

// (x, y, scale, color, heart)
type Accent = (f32, f32, f32, &'static str, bool);

const CORNER_ACCENTS: [Accent; 4] = [
    (7.0, 10.0, 1.4, "#ff9ec5", true),
    (93.0, 12.0, 1.2, "#ffb3d1", true),
    (6.0, 86.0, 1.1, "#ffd7e7", false),
    (94.0, 88.0, 1.3, "#ffa5c9", false),
];

// side garlands of mini sparkles
const GARLAND_COLUMNS: [f32; 2] = [3.0, 97.0];
const GARLAND_LEN: usize = 7;

pub struct SvgSurface {
    mount_id: &'static str,
    document: Option<web::Document>,
    svg: Option<web::Element>,
    nodes: FnvHashMap<u32, (web::Element, web::Element)>,
    viewport: Viewport,
}

impl SvgSurface {
    pub fn new(mount_id: &'static str, viewport: Viewport) -> Self {
        Self {
            mount_id,
            document: None,
            svg: None,
            nodes: FnvHashMap::default(),
            viewport,
        }
    }

    fn build(
        &self,
        document: &web::Document,
        mount: &web::Element,
    ) -> anyhow::Result<web::Element> {
        mount.set_inner_html("");
        let svg = dom::svg_element(document, "svg")?;
        _ = svg.set_attribute("width", "100%");
        _ = svg.set_attribute("height", "100%");
        _ = svg.set_attribute("viewBox", "0 0 100 100");
        _ = svg.set_attribute("preserveAspectRatio", "xMidYMid meet");
        _ = svg.set_attribute("style", "position:absolute;inset:0;pointer-events:none");
        mount
            .append_child(&svg)
            .map_err(|e| anyhow::anyhow!("mount svg: {:?}", e))?;

        for &(x, y, scale, color, heart) in &CORNER_ACCENTS {
            let (outer, inner) = floater(document, &svg, heart, color, scale)?;
            set_opacity(&inner, AMBIENT_ACCENT_OPACITY);
            set_translate(&outer, x, y);
        }
        for (c, col) in GARLAND_COLUMNS.iter().enumerate() {
            for k in 0..GARLAND_LEN {
                let y = 16.0 + k as f32 * (70.0 / GARLAND_LEN as f32);
                let scale = if k % 2 == 1 { 0.85 } else { 0.7 };
                let color = HEART_COLORS[(c + k) % HEART_COLORS.len()];
                let (outer, inner) = floater(document, &svg, false, color, scale)?;
                set_opacity(&inner, AMBIENT_OPACITY);
                set_translate(&outer, *col, y);
            }
        }
        Ok(svg)
    }
}

fn set_translate(g: &web::Element, x: f32, y: f32) {
    _ = g.set_attribute("transform", &format!("translate({:.2}, {:.2})", x, y));
}

fn set_opacity(g: &web::Element, opacity: f32) {
    _ = g.set_attribute("opacity", &format!("{:.2}", opacity));
}

/// Outer group positioned per frame, inner group carrying opacity and the
/// shape itself.
fn floater(
    document: &web::Document,
    parent: &web::Element,
    heart: bool,
    color: &str,
    scale: f32,
) -> anyhow::Result<(web::Element, web::Element)> {
    let outer = dom::svg_element(document, "g")?;
    let inner = dom::svg_element(document, "g")?;
    let shape = dom::svg_element(document, "g")?;
    let rotate = if heart { "" } else { " rotate(15)" };
    _ = shape.set_attribute(
        "transform",
        &format!("translate(-5,-5) scale({}){}", scale, rotate),
    );
    let d = if heart { HEART_PATH } else { SPARKLE_PATH };
    if heart {
        let shadow = dom::svg_element(document, "path")?;
        _ = shadow.set_attribute("d", d);
        _ = shadow.set_attribute("fill", "rgba(0,0,0,0.10)");
        _ = shadow.set_attribute("transform", "translate(.6,.6)");
        _ = shape.append_child(&shadow);
    }
    let path = dom::svg_element(document, "path")?;
    _ = path.set_attribute("d", d);
    _ = path.set_attribute("fill", color);
    if !heart {
        _ = path.set_attribute("fill-opacity", "0.95");
        _ = path.set_attribute("stroke", "rgba(255,255,255,.55)");
        _ = path.set_attribute("stroke-width", "0.3");
    }
    _ = shape.append_child(&path);
    _ = inner.append_child(&shape);
    _ = outer.append_child(&inner);
    parent
        .append_child(&outer)
        .map_err(|e| anyhow::anyhow!("append floater: {:?}", e))?;
    Ok((outer, inner))
}

impl Surface for SvgSurface {
    fn ensure(&mut self) -> Result<Viewport, SurfaceError> {
        if self.svg.is_some() {
            return Ok(self.viewport);
        }
        let document = dom::window_document().ok_or(SurfaceError::NotReady("no document"))?;
        let Some(mount) = document.get_element_by_id(self.mount_id) else {
            if dom::is_loading(&document) {
                return Err(SurfaceError::NotReady("ambient mount"));
            }
            return Err(SurfaceError::Unavailable(format!(
                "missing #{}",
                self.mount_id
            )));
        };
        let svg = self
            .build(&document, &mount)
            .map_err(|e| SurfaceError::Unavailable(format!("{:#}", e)))?;
        self.svg = Some(svg);
        self.document = Some(document);
        self.viewport = dom::viewport();
        Ok(self.viewport)
    }

    fn resize(&mut self, viewport: Viewport) {
        // preserveAspectRatio keeps shapes undistorted; nothing to recompute
        self.viewport = viewport;
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self) {
        for (_, (outer, _)) in self.nodes.drain() {
            outer.remove();
        }
    }

    fn draw(&mut self, particles: &[Particle], space: Space) {
        let (Some(document), Some(svg)) = (&self.document, &self.svg) else {
            return;
        };
        for p in particles {
            if !self.nodes.contains_key(&p.id) {
                let heart = p.visual != Visual::Sparkle;
                match floater(document, svg, heart, p.color, p.scale) {
                    Ok(pair) => {
                        self.nodes.insert(p.id, pair);
                    }
                    Err(e) => {
                        log::debug!("[ambient] floater skipped: {:#}", e);
                        continue;
                    }
                }
            }
            if let Some((outer, inner)) = self.nodes.get(&p.id) {
                // viewBox is 0..100 on both axes
                let pos = space.to_percent(p.render_pos(), self.viewport);
                set_translate(outer, pos.x, pos.y);
                set_opacity(inner, p.opacity());
            }
        }
        if self.nodes.len() > particles.len() {
            self.nodes.retain(|id, (outer, _)| {
                let live = particles.iter().any(|p| p.id == *id);
                if !live {
                    outer.remove();
                }
                live
            });
        }
    }
}
