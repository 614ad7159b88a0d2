use crate::constants::DECOR_CANVAS_ID;
use crate::dom;
use crate::render::GpuState;
use aura_core::{ParticleField, RingField};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Rings and sparkles drawn onto `#aura-canvas`.
pub struct DecorLayer {
    rings: RingField,
    sparkles: ParticleField,
    gpu: GpuState<'static>,
    canvas: web::HtmlCanvasElement,
    dirty: bool,
}

impl DecorLayer {
    /// `None` when the page has no canvas or WebGPU is unavailable; the
    /// cursor layer runs without it either way.
    pub async fn init(document: &web::Document, frozen: bool) -> Option<Self> {
        let Some(el) = document.get_element_by_id(DECOR_CANVAS_ID) else {
            log::info!("[decor] no #{} on this page", DECOR_CANVAS_ID);
            return None;
        };
        let canvas = match el.dyn_into::<web::HtmlCanvasElement>() {
            Ok(c) => c,
            Err(_) => {
                log::warn!("[decor] #{} is not a canvas", DECOR_CANVAS_ID);
                return None;
            }
        };
        dom::sync_canvas_backing_size(&canvas);

        let mut rings = RingField::default();
        rings.set_frozen(frozen);
        let sparkles = ParticleField::default();

        // leak a canvas clone to satisfy 'static lifetime for surface
        let leaked_canvas = Box::leak(Box::new(canvas.clone()));
        let gpu = match GpuState::new(leaked_canvas, &rings, sparkles.len()).await {
            Ok(g) => g,
            Err(e) => {
                log::warn!("[decor] WebGPU init error: {:?}", e);
                return None;
            }
        };
        log::info!("[decor] {} rings, {} sparkles", rings.specs().len(), sparkles.len());
        Some(Self {
            rings,
            sparkles,
            gpu,
            canvas,
            dirty: true,
        })
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    /// Reduced motion freezes the pose; one more frame is drawn to show it.
    pub fn set_frozen(&mut self, frozen: bool) {
        self.rings.set_frozen(frozen);
        self.dirty = true;
    }

    /// Ask for a redraw of a frozen layer (resize, scroll).
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn wants_frame(&self) -> bool {
        !self.rings.is_frozen() || self.dirty
    }

    /// Draw one frame. Returns whether the layer wants another.
    pub fn frame(&mut self, dt_sec: f32, pointer_ndc: Vec2, scroll: f32) -> bool {
        let frozen = self.rings.is_frozen();
        if frozen && !self.dirty {
            return false;
        }
        self.rings.step(dt_sec, pointer_ndc, scroll);
        if !frozen {
            self.sparkles.step(dt_sec, pointer_ndc);
        }
        self.gpu
            .resize_if_needed(self.canvas.width(), self.canvas.height());
        match self.gpu.render(&self.rings, &self.sparkles) {
            Ok(()) => self.dirty = false,
            // lost/outdated surfaces come back after a reconfigure next frame
            Err(e) => log::warn!("[decor] render error: {:?}", e),
        }
        !frozen
    }
}
