//! Comet-tail echoes chasing the pointer.
//!
//! Echo 0 follows the pointer, every later echo follows the echo in front of
//! it. Each echo is a first-order exponential filter whose factor grows a
//! little with the index, so the tail stays bounded instead of stretching.

use crate::constants::{
    MAX_TRAIL_LENGTH, SNAP_EPSILON_PX, SNAP_EPSILON_STYLE, TRAIL_BASE_EASE, TRAIL_DIAMETER_STEP_PX,
    TRAIL_EASE_STEP, TRAIL_HEAD_DIAMETER_PX, TRAIL_HEAD_OPACITY, TRAIL_MIN_DIAMETER_PX,
    TRAIL_MIN_OPACITY, TRAIL_OPACITY_STEP, TRAIL_SPEED_OPACITY_BOOST, TRAIL_SPEED_SCALE_BOOST,
    TRAIL_STYLE_EASE,
};
use crate::easing::{approach, approach_vec2, frame_factor, MAX_FACTOR, MIN_FACTOR};
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Echo {
    pub position: Vec2,
    pub scale: f32,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailParams {
    pub base_ease: f32,
    pub ease_step: f32,
    /// Multiplier on the speed-driven scale/opacity boost; 0 disables it.
    pub strength: f32,
}

impl Default for TrailParams {
    fn default() -> Self {
        Self {
            base_ease: TRAIL_BASE_EASE,
            ease_step: TRAIL_EASE_STEP,
            strength: 1.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Trail {
    echoes: Vec<Echo>,
    params: TrailParams,
    pulse: f32,
}

impl Trail {
    /// `len` is clamped to `1..=MAX_TRAIL_LENGTH` and never changes afterwards.
    pub fn new(len: usize, params: TrailParams) -> Self {
        let len = len.clamp(1, MAX_TRAIL_LENGTH);
        let echoes = (0..len)
            .map(|i| Echo {
                position: Vec2::ZERO,
                scale: 1.0,
                opacity: rest_opacity(i),
            })
            .collect();
        Self {
            echoes,
            params,
            pulse: 1.0,
        }
    }

    pub fn len(&self) -> usize {
        self.echoes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.echoes.is_empty()
    }

    pub fn echoes(&self) -> &[Echo] {
        &self.echoes
    }

    pub fn params(&self) -> TrailParams {
        self.params
    }

    /// Per-nominal-frame easing factor of echo `index`, strictly inside (0, 1).
    pub fn ease_for(&self, index: usize) -> f32 {
        (self.params.base_ease + index as f32 * self.params.ease_step).clamp(MIN_FACTOR, MAX_FACTOR)
    }

    /// Hover pulse multiplier applied to every echo's scale target.
    pub fn set_pulse(&mut self, pulse: f32) {
        self.pulse = pulse.max(0.0);
    }

    pub fn pulse(&self) -> f32 {
        self.pulse
    }

    /// Teleport the whole chain, used on the first pointer sample.
    pub fn place_all(&mut self, position: Vec2) {
        for e in &mut self.echoes {
            e.position = position;
        }
    }

    /// Advance one frame toward `pointer`; `speed01` is the sampler's normalised speed.
    pub fn step(&mut self, pointer: Vec2, speed01: f32, dt_ms: f64) {
        let len = self.echoes.len() as f32;
        let boost = self.params.strength.max(0.0) * speed01.clamp(0.0, 1.0);
        let style_k = frame_factor(TRAIL_STYLE_EASE, dt_ms);
        let mut target = pointer;
        for i in 0..self.echoes.len() {
            let k = frame_factor(self.ease_for(i), dt_ms);
            // Near echoes react most to speed.
            let nearness = 1.0 - i as f32 / len;
            let scale_target = self.pulse * (1.0 + TRAIL_SPEED_SCALE_BOOST * boost * nearness);
            let opacity_target =
                (rest_opacity(i) + TRAIL_SPEED_OPACITY_BOOST * boost * nearness).min(1.0);

            let e = &mut self.echoes[i];
            e.position = approach_vec2(e.position, target, k, SNAP_EPSILON_PX);
            e.scale = approach(e.scale, scale_target, style_k, SNAP_EPSILON_STYLE);
            e.opacity = approach(e.opacity, opacity_target, style_k, SNAP_EPSILON_STYLE);
            target = e.position;
        }
    }
}

/// Base diameter of echo `index` in CSS pixels.
pub fn rest_diameter(index: usize) -> f32 {
    (TRAIL_HEAD_DIAMETER_PX - index as f32 * TRAIL_DIAMETER_STEP_PX).max(TRAIL_MIN_DIAMETER_PX)
}

pub fn rest_opacity(index: usize) -> f32 {
    (TRAIL_HEAD_OPACITY - index as f32 * TRAIL_OPACITY_STEP).max(TRAIL_MIN_OPACITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NOMINAL_FRAME_MS;

    #[test]
    fn ease_increases_with_index() {
        let t = Trail::new(8, TrailParams::default());
        for i in 1..t.len() {
            assert!(t.ease_for(i) > t.ease_for(i - 1));
            assert!(t.ease_for(i) < 1.0);
        }
    }

    #[test]
    fn length_is_clamped() {
        assert_eq!(Trail::new(0, TrailParams::default()).len(), 1);
        assert_eq!(Trail::new(1000, TrailParams::default()).len(), MAX_TRAIL_LENGTH);
    }

    #[test]
    fn fast_pointer_boosts_near_echoes_more() {
        let mut t = Trail::new(8, TrailParams::default());
        for _ in 0..20 {
            t.step(Vec2::ZERO, 1.0, NOMINAL_FRAME_MS);
        }
        let e = t.echoes();
        assert!(e[0].scale > e[7].scale);
        assert!(e[0].scale > 1.0);
    }

    #[test]
    fn zero_strength_disables_speed_boost() {
        let params = TrailParams {
            strength: 0.0,
            ..TrailParams::default()
        };
        let mut t = Trail::new(4, params);
        for _ in 0..200 {
            t.step(Vec2::ZERO, 1.0, NOMINAL_FRAME_MS);
        }
        assert!(t.echoes().iter().all(|e| e.scale == 1.0));
        assert_eq!(t.echoes()[0].opacity, rest_opacity(0));
    }

    #[test]
    fn rest_sizes_shrink_and_floor() {
        assert_eq!(rest_diameter(0), 16.0);
        assert!(rest_diameter(1) < rest_diameter(0));
        assert_eq!(rest_diameter(31), TRAIL_MIN_DIAMETER_PX);
        assert_eq!(rest_opacity(31), TRAIL_MIN_OPACITY);
    }
}
