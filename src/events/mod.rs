use crate::frame::{FrameLoop, SharedDecor, SharedFx};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub mod page;
pub mod pointer;

pub use page::wire_page_handlers;
pub use pointer::{wire_interactive_elements, wire_pointer_handlers};

/// Everything an event handler may touch.
#[derive(Clone)]
pub struct Wiring {
    pub document: web::Document,
    pub fx: SharedFx,
    pub decor: SharedDecor,
    pub frames: FrameLoop,
}

impl Wiring {
    /// Keep the body class in step with whether the custom cursor is live.
    pub fn sync_body_class(&self) {
        let running = self.fx.borrow().is_running();
        crate::dom::set_body_class(
            &self.document,
            crate::constants::BODY_ACTIVE_CLASS,
            running,
        );
    }

    /// Re-read the hovered magnetic element's centre; scrolling or layout
    /// may have moved it since `mouseenter`.
    pub fn refresh_hover_centre(&self) {
        let mut fx = self.fx.borrow_mut();
        let Some(id) = fx.hovered_element() else {
            return;
        };
        let Some(centre) = fx.scene().element(id).map(|el| crate::dom::rect_centre(el)) else {
            return;
        };
        fx.update_hover_centre(id, centre);
    }
}

/// Attach `handler` for `event_type`, downcasting the event to `E`. Events
/// of another type are dropped. The closure lives for the page lifetime.
pub(crate) fn listen<E>(
    target: &web::EventTarget,
    event_type: &str,
    mut handler: impl FnMut(E) + 'static,
) where
    E: JsCast + 'static,
{
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(_)>);
    _ = target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref());
    closure.forget();
}
