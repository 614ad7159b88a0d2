use crate::decor::DecorLayer;
use crate::dom;
use crate::dom_scene::DomScene;
use crate::input;
use aura_core::CursorFx;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedFx = Rc<RefCell<CursorFx<DomScene>>>;
pub type SharedDecor = Rc<RefCell<Option<DecorLayer>>>;

pub struct FrameContext {
    pub fx: SharedFx,
    pub decor: SharedDecor,
    pub last_instant: Instant,
}

impl FrameContext {
    /// Whether a frame would do anything: a running cursor, or a visible
    /// decor layer that is animating or needs one redraw.
    pub fn wants_frame(&self) -> bool {
        let fx = self.fx.borrow();
        if fx.wants_frame() {
            return true;
        }
        fx.is_page_visible()
            && self
                .decor
                .borrow()
                .as_ref()
                .is_some_and(DecorLayer::wants_frame)
    }

    /// One animation frame. Returns whether another should be requested.
    pub fn frame(&mut self) -> bool {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let dt_ms = dt.as_secs_f64() * 1000.0;

        let (cursor_more, visible, pointer, scroll) = {
            let mut fx = self.fx.borrow_mut();
            let more = fx.frame(dt_ms);
            (
                more,
                fx.is_page_visible(),
                fx.sampler().position(),
                fx.scroll_state().smoothed(),
            )
        };
        if !visible {
            return false;
        }

        let mut decor_more = false;
        if let Some(decor) = self.decor.borrow_mut().as_mut() {
            let ndc = pointer
                .map(|p| input::client_to_ndc(p, dom::viewport_size()))
                .unwrap_or_default();
            decor_more = decor.frame(dt.as_secs_f32(), ndc, scroll);
        }
        cursor_more || decor_more
    }
}

/// Handle to the requestAnimationFrame loop. The loop stops by itself once
/// nothing wants frames; `ensure_running` restarts it.
#[derive(Clone)]
pub struct FrameLoop {
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    scheduled: Rc<Cell<bool>>,
    ctx: Rc<RefCell<FrameContext>>,
}

impl FrameLoop {
    /// Request a frame if none is pending and something wants one.
    pub fn ensure_running(&self) {
        if self.scheduled.get() {
            return;
        }
        let Ok(mut ctx) = self.ctx.try_borrow_mut() else {
            return;
        };
        if !ctx.wants_frame() {
            return;
        }
        // a stopped loop must not see the idle gap as one giant frame
        ctx.last_instant = Instant::now();
        drop(ctx);
        request_frame(&self.tick, &self.scheduled);
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled.get()
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>, scheduled: &Cell<bool>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        if w.request_animation_frame(cb.as_ref().unchecked_ref()).is_ok() {
            scheduled.set(true);
        }
    }
}

/// Build the loop without scheduling anything; callers use `ensure_running`.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let scheduled = Rc::new(Cell::new(false));
    let tick_clone = tick.clone();
    let scheduled_tick = scheduled.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        scheduled_tick.set(false);
        let again = frame_ctx_tick.borrow_mut().frame();
        if again {
            request_frame(&tick_clone, &scheduled_tick);
        }
    }) as Box<dyn FnMut()>));
    FrameLoop {
        tick,
        scheduled,
        ctx: frame_ctx,
    }
}
