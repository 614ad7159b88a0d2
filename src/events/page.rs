use super::{listen, Wiring};
use crate::constants::{FINE_POINTER_QUERY, REDUCED_MOTION_QUERY};
use crate::dom;
use web_sys as web;

pub fn wire_page_handlers(w: &Wiring) {
    wire_media_queries(w);
    wire_visibility(w);
    if let Some(window) = web::window() {
        wire_scroll(w, &window);
        wire_resize(w, &window);
        wire_pagehide(w, &window);
    }
}

fn wire_media_queries(w: &Wiring) {
    if let Some(mql) = dom::media_query(REDUCED_MOTION_QUERY) {
        let w = w.clone();
        listen(&mql, "change", move |ev: web::MediaQueryListEvent| {
            let reduced = ev.matches();
            log::info!("[media] reduced motion {}", if reduced { "on" } else { "off" });
            w.fx.borrow_mut().set_reduced_motion(reduced);
            if let Some(decor) = w.decor.borrow_mut().as_mut() {
                decor.set_frozen(reduced);
            }
            w.sync_body_class();
            w.frames.ensure_running();
        });
    }
    if let Some(mql) = dom::media_query(FINE_POINTER_QUERY) {
        let w = w.clone();
        listen(&mql, "change", move |ev: web::MediaQueryListEvent| {
            let fine = ev.matches();
            log::info!("[media] fine pointer {}", fine);
            w.fx.borrow_mut().set_pointer_fine(fine);
            w.sync_body_class();
        });
    }
}

fn wire_visibility(w: &Wiring) {
    let document = w.document.clone();
    let w = w.clone();
    listen(&document, "visibilitychange", move |_: web::Event| {
        let visible = w.document.visibility_state() == web::VisibilityState::Visible;
        w.fx.borrow_mut().set_page_visible(visible);
        if visible {
            w.frames.ensure_running();
        }
    });
}

fn wire_scroll(w: &Wiring, window: &web::Window) {
    let (offset, extent) = dom::page_scroll(window, &w.document);
    w.fx.borrow_mut().scroll(offset, extent);

    let w = w.clone();
    listen(window, "scroll", move |_: web::Event| {
        let Some(window) = web::window() else {
            return;
        };
        let (offset, extent) = dom::page_scroll(&window, &w.document);
        w.fx.borrow_mut().scroll(offset, extent);
        w.refresh_hover_centre();
        if let Some(decor) = w.decor.borrow_mut().as_mut() {
            decor.invalidate();
        }
        w.frames.ensure_running();
    });
}

fn wire_resize(w: &Wiring, window: &web::Window) {
    let w = w.clone();
    listen(window, "resize", move |_: web::Event| {
        if let Some(decor) = w.decor.borrow_mut().as_mut() {
            dom::sync_canvas_backing_size(decor.canvas());
            decor.invalidate();
        }
        w.frames.ensure_running();
    });
}

fn wire_pagehide(w: &Wiring, window: &web::Window) {
    let w = w.clone();
    listen(window, "pagehide", move |_: web::Event| {
        w.fx.borrow_mut().dispose();
        w.sync_body_class();
    });
}
