//! Exponential-decay filters and one-shot easing curves.
//!
//! Every continuous follower in this crate (trail echoes, the glyph, the
//! spotlight) is the same first-order filter:
//! `value += (target - value) * factor` with `0 < factor < 1`, which converges
//! monotonically and never overshoots.

use crate::constants::{MAX_FRAME_MS, MIN_FRAME_MS, NOMINAL_FRAME_MS};
use glam::Vec2;

/// Smallest and largest factor handed to the filter.
pub const MIN_FACTOR: f32 = 1e-3;
pub const MAX_FACTOR: f32 = 0.999;

/// Clamp a frame delta into the range the filters are tuned for.
#[inline]
pub fn clamp_frame_ms(dt_ms: f64) -> f64 {
    if dt_ms.is_finite() {
        dt_ms.clamp(MIN_FRAME_MS, MAX_FRAME_MS)
    } else {
        NOMINAL_FRAME_MS
    }
}

/// Convert a per-nominal-frame factor to the factor for a frame of `dt_ms`,
/// so convergence speed does not depend on the display refresh rate.
/// The result is always strictly inside (0, 1).
#[inline]
pub fn frame_factor(per_frame: f32, dt_ms: f64) -> f32 {
    let f = per_frame.clamp(MIN_FACTOR, MAX_FACTOR) as f64;
    let frames = clamp_frame_ms(dt_ms) / NOMINAL_FRAME_MS;
    let scaled = 1.0 - (1.0 - f).powf(frames);
    (scaled as f32).clamp(MIN_FACTOR, MAX_FACTOR)
}

#[inline]
pub fn approach(current: f32, target: f32, factor: f32, epsilon: f32) -> f32 {
    let next = current + (target - current) * factor;
    if (target - next).abs() <= epsilon {
        target
    } else {
        next
    }
}

#[inline]
pub fn approach_vec2(current: Vec2, target: Vec2, factor: f32, epsilon: f32) -> Vec2 {
    let next = current + (target - current) * factor;
    if next.distance(target) <= epsilon {
        target
    } else {
        next
    }
}

/// GSAP-style "power2.out": fast start, gentle landing.
#[inline]
pub fn power2_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
