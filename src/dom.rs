use fx_core::Viewport;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Current viewport in CSS pixels plus device pixel ratio.
pub fn viewport() -> Viewport {
    match web::window() {
        Some(w) => {
            let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            Viewport::new(width as f32, height as f32, w.device_pixel_ratio() as f32)
        }
        None => Viewport::new(0.0, 0.0, 1.0),
    }
}

#[inline]
pub fn is_loading(document: &web::Document) -> bool {
    document.ready_state() == "loading"
}

pub fn prefers_reduced_motion() -> bool {
    web::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

/// Run `f` once the document has been parsed.
pub fn after_dom(f: impl FnOnce() + 'static) {
    let Some(document) = window_document() else {
        return;
    };
    if !is_loading(&document) {
        f();
        return;
    }
    let closure = Closure::once(f);
    let opts = web::AddEventListenerOptions::new();
    opts.set_once(true);
    _ = document.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}

pub fn add_window_listener(event: &str, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

pub fn add_document_click_listener(mut handler: impl FnMut(web::MouseEvent) + 'static) {
    if let Some(document) = window_document() {
        let closure =
            Closure::wrap(Box::new(move |ev: web::MouseEvent| handler(ev)) as Box<dyn FnMut(_)>);
        _ = document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Find `#id` or create a `tag` element with that id under `<body>`. `None`
/// while the body does not exist yet.
pub fn ensure_in_body(
    document: &web::Document,
    id: &str,
    tag: &str,
    style: &str,
    class: &str,
) -> anyhow::Result<Option<web::Element>> {
    if let Some(el) = document.get_element_by_id(id) {
        return Ok(Some(el));
    }
    let Some(body) = document.body() else {
        return Ok(None);
    };
    let el = document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create <{}>: {:?}", tag, e))?;
    el.set_id(id);
    el.set_class_name(class);
    _ = el.set_attribute("style", style);
    body.append_child(&el)
        .map_err(|e| anyhow::anyhow!("append #{}: {:?}", id, e))?;
    Ok(Some(el))
}

pub fn svg_element(document: &web::Document, tag: &str) -> anyhow::Result<web::Element> {
    document
        .create_element_ns(Some(SVG_NS), tag)
        .map_err(|e| anyhow::anyhow!("create svg <{}>: {:?}", tag, e))
}
