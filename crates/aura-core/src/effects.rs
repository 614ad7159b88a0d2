//! One-shot click feedback: expanding rings and outward particles.
//!
//! Each instance owns exactly one scene node from spawn until the frame its
//! animation completes, when the node is removed and the instance dropped in
//! the same step. Nothing else holds the node id, so removal happens once.

use crate::color::Rgba;
use crate::constants::*;
use crate::easing::{lerp, power2_out};
use crate::scene::{NodeId, NodeKind, NodeSpec, SceneGraph, Transform};
use glam::Vec2;
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    pub offset: Vec2,
    pub scale: f32,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstParams {
    pub ring_count: usize,
    pub ring_duration_ms: f64,
    pub particle_count: usize,
    pub particle_distance: f32,
    pub particle_duration_ms: f64,
    pub particle_color: Rgba,
}

impl Default for BurstParams {
    fn default() -> Self {
        Self {
            ring_count: DEFAULT_RING_COUNT,
            ring_duration_ms: DEFAULT_RING_DURATION_MS,
            particle_count: DEFAULT_PARTICLE_COUNT,
            particle_distance: DEFAULT_PARTICLE_DISTANCE_PX,
            particle_duration_ms: DEFAULT_PARTICLE_DURATION_MS,
            particle_color: Rgba::from_u8(30, 58, 95, 0.8),
        }
    }
}

#[derive(Clone, Debug)]
struct LiveEffect {
    node: NodeId,
    origin: Vec2,
    diameter: f32,
    delay_ms: f64,
    duration_ms: f64,
    elapsed_ms: f64,
    from: Keyframe,
    to: Keyframe,
}

impl LiveEffect {
    fn lifetime_ms(&self) -> f64 {
        self.delay_ms + self.duration_ms
    }

    fn sample(&self) -> Keyframe {
        let t = ((self.elapsed_ms - self.delay_ms) / self.duration_ms).clamp(0.0, 1.0) as f32;
        let e = power2_out(t);
        Keyframe {
            offset: self.from.offset.lerp(self.to.offset, e),
            scale: lerp(self.from.scale, self.to.scale, e),
            opacity: lerp(self.from.opacity, self.to.opacity, e),
        }
    }
}

pub type SpawnedNodes = SmallVec<[NodeId; 16]>;

#[derive(Debug)]
pub struct Effects {
    live: VecDeque<LiveEffect>,
    capacity: usize,
    spawned_total: u64,
    removed_total: u64,
}

impl Default for Effects {
    fn default() -> Self {
        Self::with_capacity(MAX_LIVE_EFFECTS)
    }
}

impl Effects {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            live: VecDeque::new(),
            capacity: capacity.max(1),
            spawned_total: 0,
            removed_total: 0,
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn spawned_total(&self) -> u64 {
        self.spawned_total
    }

    pub fn removed_total(&self) -> u64 {
        self.removed_total
    }

    /// Spawn the rings and particles for a click at `at`.
    pub fn spawn_burst<S: SceneGraph>(
        &mut self,
        scene: &mut S,
        at: Vec2,
        params: &BurstParams,
    ) -> SpawnedNodes {
        let mut out = SpawnedNodes::new();

        for i in 0..params.ring_count {
            let end_diameter = RING_END_DIAMETER_PX + i as f32 * RING_DIAMETER_STEP_PX;
            let start_opacity = (RING_START_OPACITY - i as f32 * RING_OPACITY_STEP).max(0.05);
            let from = Keyframe {
                offset: Vec2::ZERO,
                scale: 1.0,
                opacity: start_opacity,
            };
            let to = Keyframe {
                offset: Vec2::ZERO,
                scale: end_diameter / RING_START_DIAMETER_PX,
                opacity: 0.0,
            };
            let outline = params.particle_color.with_alpha(1.0);
            out.push(self.spawn_one(
                scene,
                NodeKind::Ring,
                at,
                RING_START_DIAMETER_PX,
                Rgba::TRANSPARENT,
                Some(outline),
                i as f64 * RING_STAGGER_MS,
                params.ring_duration_ms,
                from,
                to,
            ));
        }

        let n = params.particle_count;
        for i in 0..n {
            let angle = TAU * i as f32 / n as f32;
            let from = Keyframe {
                offset: Vec2::ZERO,
                scale: 1.0,
                opacity: PARTICLE_START_OPACITY,
            };
            let to = Keyframe {
                offset: Vec2::from_angle(angle) * params.particle_distance,
                scale: PARTICLE_END_SCALE,
                opacity: 0.0,
            };
            out.push(self.spawn_one(
                scene,
                NodeKind::Particle,
                at,
                PARTICLE_DIAMETER_PX,
                params.particle_color.with_alpha(1.0),
                None,
                0.0,
                params.particle_duration_ms,
                from,
                to,
            ));
        }

        out
    }

    #[allow(clippy::too_many_arguments)]
    fn spawn_one<S: SceneGraph>(
        &mut self,
        scene: &mut S,
        kind: NodeKind,
        origin: Vec2,
        diameter: f32,
        fill: Rgba,
        outline: Option<Rgba>,
        delay_ms: f64,
        duration_ms: f64,
        from: Keyframe,
        to: Keyframe,
    ) -> NodeId {
        if self.live.len() >= self.capacity {
            self.retire_oldest(scene);
        }
        let node = scene.spawn(NodeSpec {
            kind,
            transform: Transform::new(origin + from.offset, diameter, from.scale),
            opacity: from.opacity,
            fill,
            outline,
        });
        self.live.push_back(LiveEffect {
            node,
            origin,
            diameter,
            delay_ms,
            duration_ms: duration_ms.max(1.0),
            elapsed_ms: 0.0,
            from,
            to,
        });
        self.spawned_total += 1;
        node
    }

    fn retire_oldest<S: SceneGraph>(&mut self, scene: &mut S) {
        if let Some(fx) = self.live.pop_front() {
            scene.remove(fx.node);
            self.removed_total += 1;
        }
    }

    /// Advance every live instance; completed ones are written at their final
    /// keyframe and removed. Returns how many were removed.
    pub fn advance<S: SceneGraph>(&mut self, scene: &mut S, dt_ms: f64) -> usize {
        let before = self.live.len();
        let mut removed = 0u64;
        self.live.retain_mut(|fx| {
            fx.elapsed_ms += dt_ms.max(0.0);
            if fx.elapsed_ms >= fx.lifetime_ms() {
                scene.set_transform(
                    fx.node,
                    Transform::new(fx.origin + fx.to.offset, fx.diameter, fx.to.scale),
                );
                scene.set_opacity(fx.node, fx.to.opacity);
                scene.remove(fx.node);
                removed += 1;
                return false;
            }
            let k = fx.sample();
            scene.set_transform(
                fx.node,
                Transform::new(fx.origin + k.offset, fx.diameter, k.scale),
            );
            scene.set_opacity(fx.node, k.opacity);
            true
        });
        self.removed_total += removed;
        before - self.live.len()
    }

    /// Remove every live instance. Returns how many were removed.
    pub fn clear<S: SceneGraph>(&mut self, scene: &mut S) -> usize {
        let n = self.live.len();
        for fx in self.live.drain(..) {
            scene.remove(fx.node);
        }
        self.removed_total += n as u64;
        n
    }
}
