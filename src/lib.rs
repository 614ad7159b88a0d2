#![cfg(target_arch = "wasm32")]
use aura_core::{CursorFx, Environment, Lifecycle};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
pub mod decor;
mod dom;
pub mod dom_scene;
mod events;
pub mod frame;
mod input;
mod render;

pub use dom_scene::DomScene;

use constants::{BODY_ACTIVE_CLASS, FINE_POINTER_QUERY, REDUCED_MOTION_QUERY};
use frame::{FrameContext, SharedDecor, SharedFx};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("aura-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn current_environment() -> Environment {
    Environment {
        reduced_motion: dom::media_query_matches(REDUCED_MOTION_QUERY),
        pointer_fine: dom::media_query_matches(FINE_POINTER_QUERY),
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let config = dom::read_config(&document);
    let env = current_environment();
    let scene = DomScene::for_body(&document)?;

    let fx: SharedFx = Rc::new(RefCell::new(CursorFx::new(config.clone(), scene)));
    let state = fx.borrow_mut().start(env);
    dom::set_body_class(&document, BODY_ACTIVE_CLASS, state == Lifecycle::Running);

    let decor: SharedDecor = Rc::new(RefCell::new(None));
    let frames = frame::start_loop(Rc::new(RefCell::new(FrameContext {
        fx: fx.clone(),
        decor: decor.clone(),
        last_instant: Instant::now(),
    })));

    let wiring = events::Wiring {
        document: document.clone(),
        fx,
        decor: decor.clone(),
        frames: frames.clone(),
    };
    events::wire_interactive_elements(&wiring, &config);
    events::wire_pointer_handlers(&wiring);
    events::wire_page_handlers(&wiring);

    // The decorative layer is optional and comes up last.
    let layer = decor::DecorLayer::init(&document, env.reduced_motion).await;
    *decor.borrow_mut() = layer;
    frames.ensure_running();
    Ok(())
}
