//! Pointer sampling: latest position plus a frame-rate independent velocity.

use crate::constants::{
    MAX_POINTER_SPEED, MIN_SAMPLE_GAP_MS, NOMINAL_FRAME_MS, SPEED_FOR_FULL_BOOST,
    VELOCITY_SETTLE_PER_FRAME,
};
use crate::easing::clamp_frame_ms;
use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub position: Vec2,
    /// Pixels per nominal (60 Hz) frame.
    pub velocity: Vec2,
    pub time_ms: f64,
}

/// Holds only the most recent sample; bursts of events between two frames
/// coalesce into whichever arrived last.
#[derive(Clone, Debug, Default)]
pub struct PointerSampler {
    latest: Option<PointerSample>,
}

impl PointerSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer position. Non-finite input is ignored and returns `None`.
    pub fn record(&mut self, x: f32, y: f32, time_ms: f64) -> Option<PointerSample> {
        if !(x.is_finite() && y.is_finite() && time_ms.is_finite()) {
            return None;
        }
        let position = Vec2::new(x, y);
        let velocity = match self.latest {
            None => Vec2::ZERO,
            Some(prev) => {
                // Out-of-order timestamps count as the minimum gap.
                let elapsed = (time_ms - prev.time_ms).max(MIN_SAMPLE_GAP_MS);
                let per_frame = (NOMINAL_FRAME_MS / elapsed) as f32;
                ((position - prev.position) * per_frame).clamp_length_max(MAX_POINTER_SPEED)
            }
        };
        let sample = PointerSample {
            position,
            velocity,
            time_ms,
        };
        self.latest = Some(sample);
        Some(sample)
    }

    pub fn latest(&self) -> Option<PointerSample> {
        self.latest
    }

    pub fn position(&self) -> Option<Vec2> {
        self.latest.map(|s| s.position)
    }

    pub fn velocity(&self) -> Vec2 {
        self.latest.map(|s| s.velocity).unwrap_or(Vec2::ZERO)
    }

    pub fn speed(&self) -> f32 {
        self.velocity().length()
    }

    /// Speed normalised to 0..=1 for driving visual boosts.
    pub fn speed01(&self) -> f32 {
        (self.speed() / SPEED_FOR_FULL_BOOST).clamp(0.0, 1.0)
    }

    /// Bleed velocity off between events so a resting pointer stops boosting the trail.
    pub fn settle(&mut self, dt_ms: f64) {
        if let Some(s) = self.latest.as_mut() {
            let frames = (clamp_frame_ms(dt_ms) / NOMINAL_FRAME_MS) as f32;
            s.velocity *= VELOCITY_SETTLE_PER_FRAME.powf(frames);
        }
    }
}
