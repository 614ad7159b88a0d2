//! The main cursor glyph and the soft spotlight that follows it.

use crate::color::Rgba;
use crate::constants::{
    GLYPH_EASE, GLYPH_REST_OPACITY, GLYPH_STYLE_EASE, PRESS_SCALE, SNAP_EPSILON_PX,
    SNAP_EPSILON_STYLE, SPOTLIGHT_EASE,
};
use crate::easing::{approach, approach_vec2, frame_factor};
use glam::Vec2;

/// What the glyph (and the trail pulse) should settle to for a hover state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualTarget {
    pub scale: f32,
    pub opacity: f32,
    pub fill: Rgba,
    pub outline: Rgba,
    pub trail_pulse: f32,
}

impl VisualTarget {
    pub fn rest() -> Self {
        Self {
            scale: 1.0,
            opacity: GLYPH_REST_OPACITY,
            fill: Rgba::TRANSPARENT,
            outline: Rgba::from_u8(30, 58, 95, 0.2),
            trail_pulse: 1.0,
        }
    }
}

impl Default for VisualTarget {
    fn default() -> Self {
        Self::rest()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphState {
    pub position: Vec2,
    pub scale: f32,
    pub opacity: f32,
    pub fill: Rgba,
    pub outline: Rgba,
}

#[derive(Clone, Debug)]
pub struct Glyph {
    state: GlyphState,
    target: VisualTarget,
    pressed: bool,
    ease: f32,
}

impl Glyph {
    pub fn new(ease: f32) -> Self {
        let rest = VisualTarget::rest();
        Self {
            state: GlyphState {
                position: Vec2::ZERO,
                scale: rest.scale,
                // fades in from nothing once the first pointer sample lands
                opacity: 0.0,
                fill: rest.fill,
                outline: rest.outline,
            },
            target: rest,
            pressed: false,
            ease,
        }
    }

    pub fn state(&self) -> GlyphState {
        self.state
    }

    pub fn target(&self) -> VisualTarget {
        self.target
    }

    pub fn set_target(&mut self, target: VisualTarget) {
        self.target = target;
        self.state.outline = target.outline;
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn place(&mut self, position: Vec2) {
        self.state.position = position;
    }

    pub fn step(&mut self, position_target: Vec2, dt_ms: f64) {
        let k = frame_factor(self.ease, dt_ms);
        let style_k = frame_factor(GLYPH_STYLE_EASE, dt_ms);
        let scale_target = if self.pressed {
            self.target.scale * PRESS_SCALE
        } else {
            self.target.scale
        };
        let s = &mut self.state;
        s.position = approach_vec2(s.position, position_target, k, SNAP_EPSILON_PX);
        s.scale = approach(s.scale, scale_target, style_k, SNAP_EPSILON_STYLE);
        s.opacity = approach(s.opacity, self.target.opacity, style_k, SNAP_EPSILON_STYLE);
        s.fill = if s.fill.max_channel_delta(self.target.fill) <= SNAP_EPSILON_STYLE {
            self.target.fill
        } else {
            s.fill.lerp(self.target.fill, style_k)
        };
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::new(GLYPH_EASE)
    }
}

/// Large radial glow that lags the pointer more than the glyph does.
#[derive(Clone, Debug)]
pub struct Spotlight {
    position: Vec2,
    ease: f32,
}

impl Spotlight {
    pub fn new(ease: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            ease,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn place(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn step(&mut self, pointer: Vec2, dt_ms: f64) {
        let k = frame_factor(self.ease, dt_ms);
        self.position = approach_vec2(self.position, pointer, k, SNAP_EPSILON_PX);
    }
}

impl Default for Spotlight {
    fn default() -> Self {
        Self::new(SPOTLIGHT_EASE)
    }
}
