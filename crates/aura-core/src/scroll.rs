use crate::constants::SCROLL_SMOOTH_TAU_MS;
use crate::easing::clamp_frame_ms;

/// Raw and smoothed page scroll, plus progress through the scrollable extent.
#[derive(Clone, Debug, Default)]
pub struct ScrollState {
    offset: f32,
    extent: f32,
    smoothed: f32,
    initialized: bool,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `extent` is the maximum scroll offset (document height minus viewport).
    pub fn update(&mut self, offset: f32, extent: f32) {
        if !(offset.is_finite() && extent.is_finite()) {
            return;
        }
        self.offset = offset.max(0.0);
        self.extent = extent;
        if !self.initialized {
            self.smoothed = self.offset;
            self.initialized = true;
        }
    }

    pub fn step(&mut self, dt_ms: f64) {
        let alpha = 1.0 - (-clamp_frame_ms(dt_ms) / SCROLL_SMOOTH_TAU_MS).exp();
        self.smoothed += (self.offset - self.smoothed) * alpha as f32;
        if (self.offset - self.smoothed).abs() < 0.05 {
            self.smoothed = self.offset;
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn smoothed(&self) -> f32 {
        self.smoothed
    }

    /// 0..=1; zero when the page cannot scroll.
    pub fn progress(&self) -> f32 {
        if self.extent <= 0.0 {
            0.0
        } else {
            (self.smoothed / self.extent).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NOMINAL_FRAME_MS;

    #[test]
    fn progress_is_zero_without_extent() {
        let mut s = ScrollState::new();
        s.update(300.0, 0.0);
        assert_eq!(s.progress(), 0.0);
        s.update(300.0, -10.0);
        assert_eq!(s.progress(), 0.0);
    }

    #[test]
    fn smoothed_offset_converges() {
        let mut s = ScrollState::new();
        s.update(0.0, 1000.0);
        s.update(500.0, 1000.0);
        s.step(NOMINAL_FRAME_MS);
        assert!(s.smoothed() > 0.0 && s.smoothed() < 500.0);
        for _ in 0..200 {
            s.step(NOMINAL_FRAME_MS);
        }
        assert_eq!(s.smoothed(), 500.0);
        assert!((s.progress() - 0.5).abs() < 1e-6);
    }
}
