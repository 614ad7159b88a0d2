use super::{listen, Wiring};
use crate::constants::INTERACTIVE_SELECTOR;
use crate::dom;
use crate::input;
use aura_core::AuraConfig;
use web_sys as web;

pub fn wire_pointer_handlers(w: &Wiring) {
    let Some(window) = web::window() else {
        return;
    };
    wire_pointermove(w, &window);
    wire_press(w, &window);
    wire_click(w, &window);
}

fn wire_pointermove(w: &Wiring, window: &web::Window) {
    let w = w.clone();
    listen(window, "pointermove", move |ev: web::PointerEvent| {
        if !input::is_precise_pointer(&ev) {
            return;
        }
        let p = input::pointer_client_px(&ev);
        w.fx
            .borrow_mut()
            .pointer_move(p.x, p.y, input::event_time_ms(&ev));
        w.refresh_hover_centre();
        w.frames.ensure_running();
    });
}

fn wire_press(w: &Wiring, window: &web::Window) {
    let down = w.clone();
    listen(window, "mousedown", move |_: web::MouseEvent| {
        down.fx.borrow_mut().pointer_down();
    });
    let up = w.clone();
    listen(window, "mouseup", move |_: web::MouseEvent| {
        up.fx.borrow_mut().pointer_up();
    });
}

fn wire_click(w: &Wiring, window: &web::Window) {
    let w = w.clone();
    listen(window, "click", move |ev: web::MouseEvent| {
        let p = input::pointer_client_px(&ev);
        let spawned = w.fx.borrow_mut().click(p.x, p.y);
        if spawned > 0 {
            log::debug!("[cursor] burst of {} at ({:.0}, {:.0})", spawned, p.x, p.y);
            w.frames.ensure_running();
        }
    });
}

/// Register every interactive element once and wire its hover handlers.
/// Returns how many were registered.
pub fn wire_interactive_elements(w: &Wiring, config: &AuraConfig) -> usize {
    let elements = dom::element_list(&w.document, INTERACTIVE_SELECTOR);
    for el in &elements {
        let (role, magnet) = dom::classify(el, config);
        let id = {
            let mut fx = w.fx.borrow_mut();
            let id = fx.register_element(role, magnet);
            if magnet.is_some() {
                fx.scene_mut().attach_element(id, el.clone());
            }
            id
        };

        let enter = w.clone();
        let enter_el = el.clone();
        listen(el, "mouseenter", move |_: web::MouseEvent| {
            let centre = dom::rect_centre(&enter_el);
            if enter.fx.borrow_mut().hover_enter(id, centre) {
                enter.frames.ensure_running();
            }
        });

        let leave = w.clone();
        listen(el, "mouseleave", move |_: web::MouseEvent| {
            leave.fx.borrow_mut().hover_leave(id);
        });
    }
    log::info!("[cursor] {} interactive elements registered", elements.len());
    elements.len()
}
