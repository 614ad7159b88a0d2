use crate::constants::{CONFIG_ELEMENT_ID, DATA_PREFIX, MAGNETIC_ATTR};
use aura_core::{AuraConfig, ElementRole, Magnet};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `matchMedia(query)`, or `None` where the browser has no such API.
pub fn media_query(query: &str) -> Option<web::MediaQueryList> {
    web::window()?.match_media(query).ok().flatten()
}

#[inline]
pub fn media_query_matches(query: &str) -> bool {
    media_query(query).map(|m| m.matches()).unwrap_or(false)
}

/// `data-*` attributes of `el` as `(name without prefix, value)` pairs.
pub fn data_attributes(el: &web::Element) -> Vec<(String, String)> {
    let names: js_sys::Array = el.get_attribute_names();
    let mut out = Vec::with_capacity(names.length() as usize);
    for name in names.iter().filter_map(|n| n.as_string()) {
        let Some(key) = name.strip_prefix(DATA_PREFIX) else {
            continue;
        };
        let value = el.get_attribute(&name).unwrap_or_default();
        out.push((key.to_string(), value));
    }
    out
}

fn as_pairs(attrs: &[(String, String)]) -> impl Iterator<Item = (&str, &str)> {
    attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
}

/// Configuration from `#cursor-aura`, else `<body>`. Malformed values are
/// logged and the defaults used.
pub fn read_config(document: &web::Document) -> AuraConfig {
    let source: Option<web::Element> = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .or_else(|| document.body().map(Into::into));
    let Some(source) = source else {
        return AuraConfig::default();
    };
    let attrs = data_attributes(&source);
    match AuraConfig::from_attributes(as_pairs(&attrs)) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("[config] {}; using defaults", e);
            AuraConfig::default()
        }
    }
}

/// Role and optional magnet for an interactive element, decided once.
pub fn classify(el: &web::Element, config: &AuraConfig) -> (ElementRole, Option<Magnet>) {
    let role = ElementRole::classify(
        &el.tag_name(),
        el.get_attribute("role").as_deref(),
        el.get_attribute("data-cursor").as_deref(),
    );
    if !el.has_attribute(MAGNETIC_ATTR) {
        return (role, None);
    }
    let attrs = data_attributes(el);
    let magnet = match config.magnet().overlay(as_pairs(&attrs)) {
        Ok(m) => m,
        Err(e) => {
            log::warn!("[config] {}; using page magnet", e);
            config.magnet()
        }
    };
    (role, Some(magnet))
}

/// Centre of the element's border box in client coordinates.
pub fn rect_centre(el: &web::Element) -> Vec2 {
    let r = el.get_bounding_client_rect();
    Vec2::new(
        (r.left() + r.width() * 0.5) as f32,
        (r.top() + r.height() * 0.5) as f32,
    )
}

pub fn element_list(document: &web::Document, selector: &str) -> Vec<web::HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::HtmlElement>().ok())
        .collect()
}

/// Scroll offset and maximum scroll of the page, in CSS pixels.
pub fn page_scroll(window: &web::Window, document: &web::Document) -> (f32, f32) {
    let offset = window.scroll_y().unwrap_or(0.0) as f32;
    let viewport = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32;
    let content = document
        .document_element()
        .map(|e| e.scroll_height() as f32)
        .unwrap_or(0.0);
    (offset, (content - viewport).max(0.0))
}

pub fn viewport_size() -> Vec2 {
    let Some(w) = web::window() else {
        return Vec2::ONE;
    };
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0).max(1.0) as f32
    };
    Vec2::new(dim(w.inner_width()), dim(w.inner_height()))
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

pub fn set_body_class(document: &web::Document, class: &str, on: bool) {
    if let Some(body) = document.body() {
        _ = body.class_list().toggle_with_force(class, on);
    }
}
