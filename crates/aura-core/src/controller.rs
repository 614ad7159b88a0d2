//! The cursor effects context: owns every piece of frame-local state and the
//! scene it draws into, with an explicit start/stop/dispose lifecycle.

use crate::config::AuraConfig;
use crate::constants::{GLYPH_DIAMETER_PX, SPOTLIGHT_DIAMETER_PX};
use crate::easing::clamp_frame_ms;
use crate::effects::{BurstParams, Effects};
use crate::glyph::{Glyph, Spotlight, VisualTarget};
use crate::responder::{ElementId, ElementRegistry, ElementRole, Magnet, Responder};
use crate::sampler::PointerSampler;
use crate::scene::{NodeId, NodeKind, NodeSpec, SceneGraph, Transform};
use crate::scroll::ScrollState;
use crate::trail::{rest_diameter, Trail, TrailParams};
use glam::Vec2;

/// Element scale applied while a magnetic element is being pulled.
const MAGNETIC_ELEMENT_SCALE: f32 = 1.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed or stopped; owns no nodes.
    Idle,
    Running,
    /// Refused to run (reduced motion or coarse pointer); owns no nodes.
    Disabled,
    Disposed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Environment {
    pub reduced_motion: bool,
    pub pointer_fine: bool,
}

impl Environment {
    pub fn allows_motion(&self) -> bool {
        self.pointer_fine && !self.reduced_motion
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            pointer_fine: true,
        }
    }
}

#[derive(Debug)]
struct OwnedNodes {
    glyph: NodeId,
    echoes: Vec<NodeId>,
    spotlight: Option<NodeId>,
    progress: Option<NodeId>,
}

pub struct CursorFx<S: SceneGraph> {
    config: AuraConfig,
    burst: BurstParams,
    scene: S,
    env: Environment,
    lifecycle: Lifecycle,
    visible: bool,
    sampler: PointerSampler,
    trail: Trail,
    glyph: Glyph,
    spotlight: Spotlight,
    responder: Responder,
    effects: Effects,
    scroll: ScrollState,
    nodes: Option<OwnedNodes>,
    placed: bool,
    drifted: Option<ElementId>,
}

impl<S: SceneGraph> CursorFx<S> {
    /// Builds the context without touching the scene.
    pub fn new(config: AuraConfig, scene: S) -> Self {
        let burst = BurstParams {
            ring_count: config.ring_count,
            ring_duration_ms: config.ring_duration_ms,
            particle_count: config.particle_count,
            particle_distance: config.particle_distance,
            particle_duration_ms: config.particle_duration_ms,
            particle_color: config.particle_color,
        };
        Self {
            trail: Trail::new(config.trail_length, trail_params(&config)),
            glyph: Glyph::new(config.glyph_ease),
            spotlight: Spotlight::new(config.spotlight_ease),
            burst,
            config,
            scene,
            env: Environment::default(),
            lifecycle: Lifecycle::Idle,
            visible: true,
            sampler: PointerSampler::new(),
            responder: Responder::new(ElementRegistry::new()),
            effects: Effects::default(),
            scroll: ScrollState::new(),
            nodes: None,
            placed: false,
            drifted: None,
        }
    }

    pub fn config(&self) -> &AuraConfig {
        &self.config
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn environment(&self) -> Environment {
        self.env
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    /// Whether the host should keep scheduling animation frames.
    pub fn wants_frame(&self) -> bool {
        self.is_running() && self.visible
    }

    pub fn sampler(&self) -> &PointerSampler {
        &self.sampler
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn glyph(&self) -> &Glyph {
        &self.glyph
    }

    pub fn spotlight(&self) -> &Spotlight {
        &self.spotlight
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn responder(&self) -> &Responder {
        &self.responder
    }

    /// Register a page element once; its role is fixed from here on.
    pub fn register_element(&mut self, role: ElementRole, magnet: Option<Magnet>) -> ElementId {
        self.responder.registry_mut().register(role, magnet)
    }

    /// Number of scene nodes this context currently owns, transient effects included.
    pub fn owned_node_count(&self) -> usize {
        let own = self.nodes.as_ref().map_or(0, |n| {
            1 + n.echoes.len() + n.spotlight.is_some() as usize + n.progress.is_some() as usize
        });
        own + self.effects.live_count()
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    pub fn start(&mut self, env: Environment) -> Lifecycle {
        match self.lifecycle {
            Lifecycle::Disposed => {
                log::warn!("[cursor] start after dispose ignored");
                return self.lifecycle;
            }
            Lifecycle::Running => return self.lifecycle,
            Lifecycle::Idle | Lifecycle::Disabled => {}
        }
        self.env = env;
        if !env.allows_motion() {
            self.lifecycle = Lifecycle::Disabled;
            log::info!(
                "[cursor] disabled (reduced_motion={}, pointer_fine={})",
                env.reduced_motion,
                env.pointer_fine
            );
            return self.lifecycle;
        }

        self.trail = Trail::new(self.config.trail_length, trail_params(&self.config));
        self.glyph = Glyph::new(self.config.glyph_ease);
        self.spotlight = Spotlight::new(self.config.spotlight_ease);
        self.placed = false;
        self.nodes = Some(self.spawn_owned_nodes());
        self.lifecycle = Lifecycle::Running;
        if let Some(p) = self.sampler.position() {
            self.place_all(p);
        }
        log::info!("[cursor] started with {} echoes", self.trail.len());
        self.lifecycle
    }

    /// Tear down and return to `Idle`; `start` may be called again.
    pub fn stop(&mut self) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        self.teardown();
        self.lifecycle = Lifecycle::Idle;
    }

    /// Tear down for good.
    pub fn dispose(&mut self) {
        self.teardown();
        self.lifecycle = Lifecycle::Disposed;
    }

    /// Turning reduced motion on tears everything down. Turning it off again
    /// does not restart; the host has to call `start`.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.env.reduced_motion = reduced;
        self.on_environment_changed();
    }

    /// Same contract as [`set_reduced_motion`](Self::set_reduced_motion) for
    /// the pointer-precision capability.
    pub fn set_pointer_fine(&mut self, fine: bool) {
        self.env.pointer_fine = fine;
        self.on_environment_changed();
    }

    fn on_environment_changed(&mut self) {
        if self.env.allows_motion() {
            if self.lifecycle == Lifecycle::Disabled {
                log::debug!("[cursor] motion allowed again; waiting for an explicit start");
            }
            return;
        }
        if self.lifecycle == Lifecycle::Running {
            self.teardown();
            self.lifecycle = Lifecycle::Disabled;
        }
    }

    /// Hidden pages stop asking for frames but keep their nodes.
    pub fn set_page_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_page_visible(&self) -> bool {
        self.visible
    }

    fn spawn_owned_nodes(&mut self) -> OwnedNodes {
        let brand = self.config.particle_color.with_alpha(1.0);
        let rest = VisualTarget::rest();
        let glyph = self.scene.spawn(NodeSpec {
            kind: NodeKind::Glyph,
            transform: Transform::new(Vec2::ZERO, GLYPH_DIAMETER_PX, rest.scale),
            opacity: 0.0,
            fill: rest.fill,
            outline: Some(rest.outline),
        });
        let echoes = self
            .trail
            .echoes()
            .iter()
            .enumerate()
            .map(|(i, e)| {
                self.scene.spawn(NodeSpec {
                    kind: NodeKind::Echo(i),
                    transform: Transform::new(e.position, rest_diameter(i), e.scale),
                    // hidden until the first pointer sample places the chain
                    opacity: 0.0,
                    fill: brand,
                    outline: None,
                })
            })
            .collect();
        let spotlight = self.config.spotlight.then(|| {
            self.scene.spawn(NodeSpec {
                kind: NodeKind::Spotlight,
                transform: Transform::new(Vec2::ZERO, SPOTLIGHT_DIAMETER_PX, 1.0),
                opacity: 0.0,
                fill: brand.with_alpha(0.08),
                outline: None,
            })
        });
        let progress = self.config.progress_bar.then(|| {
            self.scene.spawn(NodeSpec {
                kind: NodeKind::ProgressBar,
                transform: Transform::new(Vec2::ZERO, 0.0, self.scroll.progress()),
                opacity: 1.0,
                fill: brand,
                outline: None,
            })
        });
        OwnedNodes {
            glyph,
            echoes,
            spotlight,
            progress,
        }
    }

    fn teardown(&mut self) {
        let mut removed = self.effects.clear(&mut self.scene);
        if let Some(nodes) = self.nodes.take() {
            self.scene.remove(nodes.glyph);
            removed += 1;
            for id in nodes.echoes {
                self.scene.remove(id);
                removed += 1;
            }
            for id in [nodes.spotlight, nodes.progress].into_iter().flatten() {
                self.scene.remove(id);
                removed += 1;
            }
        }
        if let Some(id) = self.drifted.take() {
            self.scene.set_element_offset(id, Vec2::ZERO, 1.0);
        }
        self.responder.clear();
        self.glyph.set_pressed(false);
        self.placed = false;
        if removed > 0 {
            log::info!("[cursor] teardown removed {} nodes", removed);
        }
    }

    fn place_all(&mut self, p: Vec2) {
        self.glyph.place(p);
        self.trail.place_all(p);
        self.spotlight.place(p);
        self.placed = true;
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Pointer samples are recorded in every state so a later start picks up
    /// the current position.
    pub fn pointer_move(&mut self, x: f32, y: f32, time_ms: f64) {
        if self.sampler.record(x, y, time_ms).is_none() {
            return;
        }
        if self.is_running() && !self.placed {
            self.place_all(Vec2::new(x, y));
        }
    }

    /// `centre` is the element's current centre in client coordinates.
    /// Returns false when not running or the element is unknown.
    pub fn hover_enter(&mut self, id: ElementId, centre: Vec2) -> bool {
        if !self.is_running() {
            return false;
        }
        // entering a nested element: the previously pulled one snaps back
        if let Some(prev) = self.drifted.filter(|&prev| prev != id) {
            self.scene.set_element_offset(prev, Vec2::ZERO, 1.0);
            self.drifted = None;
        }
        match self.responder.hover_enter(id, centre) {
            Some(target) => {
                self.apply_target(target);
                true
            }
            None => false,
        }
    }

    pub fn hover_leave(&mut self, id: ElementId) -> bool {
        if !self.is_running() {
            return false;
        }
        if self.drifted == Some(id) {
            self.scene.set_element_offset(id, Vec2::ZERO, 1.0);
            self.drifted = None;
        }
        match self.responder.hover_leave(id) {
            Some(target) => {
                self.apply_target(target);
                true
            }
            None => false,
        }
    }

    pub fn hovered_element(&self) -> Option<ElementId> {
        self.responder.hovered()
    }

    /// The hovered element moved (scroll, layout); pull and drift follow it.
    pub fn update_hover_centre(&mut self, id: ElementId, centre: Vec2) {
        self.responder.update_centre(id, centre);
    }

    fn apply_target(&mut self, target: VisualTarget) {
        self.glyph.set_target(target);
        self.trail.set_pulse(target.trail_pulse);
        if let Some(nodes) = &self.nodes {
            self.scene.set_outline(nodes.glyph, target.outline);
        }
    }

    pub fn pointer_down(&mut self) {
        if self.is_running() {
            self.glyph.set_pressed(true);
        }
    }

    pub fn pointer_up(&mut self) {
        if self.is_running() {
            self.glyph.set_pressed(false);
        }
    }

    /// Spawn a burst at the click position. Returns the number of instances spawned.
    pub fn click(&mut self, x: f32, y: f32) -> usize {
        if !self.is_running() || !(x.is_finite() && y.is_finite()) {
            return 0;
        }
        self.effects
            .spawn_burst(&mut self.scene, Vec2::new(x, y), &self.burst)
            .len()
    }

    pub fn scroll(&mut self, offset: f32, extent: f32) {
        self.scroll.update(offset, extent);
    }

    // ------------------------------------------------------------------
    // Frame
    // ------------------------------------------------------------------

    /// Advance one animation frame. Returns whether another should be scheduled.
    pub fn frame(&mut self, dt_ms: f64) -> bool {
        if !self.wants_frame() {
            return false;
        }
        let dt = clamp_frame_ms(dt_ms);
        self.scroll.step(dt);

        if let Some(pointer) = self.sampler.position() {
            if !self.placed {
                self.place_all(pointer);
            }
            let pull = self.responder.magnetic_pull(pointer);
            self.glyph.step(pointer + pull, dt);
            self.trail.step(pointer, self.sampler.speed01(), dt);
            self.spotlight.step(pointer, dt);
            if let Some((id, offset)) = self.responder.element_drift(pointer) {
                self.scene
                    .set_element_offset(id, offset, MAGNETIC_ELEMENT_SCALE);
                self.drifted = Some(id);
            }
            self.write_cursor_nodes();
            self.sampler.settle(dt);
        }

        if let Some(bar) = self.nodes.as_ref().and_then(|n| n.progress) {
            self.scene.set_transform(
                bar,
                Transform::new(Vec2::ZERO, 0.0, self.scroll.progress()),
            );
        }

        self.effects.advance(&mut self.scene, dt);
        true
    }

    fn write_cursor_nodes(&mut self) {
        let Some(nodes) = &self.nodes else {
            return;
        };
        let g = self.glyph.state();
        self.scene.set_transform(
            nodes.glyph,
            Transform::new(g.position, GLYPH_DIAMETER_PX, g.scale),
        );
        self.scene.set_opacity(nodes.glyph, g.opacity);
        self.scene.set_fill(nodes.glyph, g.fill);

        for (i, (id, e)) in nodes.echoes.iter().zip(self.trail.echoes()).enumerate() {
            self.scene
                .set_transform(*id, Transform::new(e.position, rest_diameter(i), e.scale));
            self.scene.set_opacity(*id, e.opacity);
        }

        if let Some(id) = nodes.spotlight {
            self.scene.set_transform(
                id,
                Transform::new(self.spotlight.position(), SPOTLIGHT_DIAMETER_PX, 1.0),
            );
            self.scene.set_opacity(id, 1.0);
        }
    }
}

fn trail_params(config: &AuraConfig) -> TrailParams {
    TrailParams {
        base_ease: config.trail_base_ease,
        ease_step: config.trail_ease_step,
        strength: config.trail_strength,
    }
}
