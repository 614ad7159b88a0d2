//! Tunable knobs, read once from an element's `data-*` attributes.

use crate::color::Rgba;
use crate::constants::*;
use crate::responder::Magnet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("data-{key}: expected a number, got {value:?}")]
    InvalidNumber { key: String, value: String },
    #[error("data-{key}: expected a non-negative integer, got {value:?}")]
    InvalidCount { key: String, value: String },
    #[error("data-{key}: expected a hex colour like #00A8E8, got {value:?}")]
    InvalidColor { key: String, value: String },
    #[error("data-{key}: expected true/false, got {value:?}")]
    InvalidFlag { key: String, value: String },
}

pub(crate) fn parse_f32(key: &str, value: &str) -> Result<f32, ConfigError> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::InvalidNumber {
            key: key.to_owned(),
            value: value.to_owned(),
        })
}

fn parse_count(key: &str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| ConfigError::InvalidCount {
            key: key.to_owned(),
            value: value.to_owned(),
        })
}

fn parse_color(key: &str, value: &str) -> Result<Rgba, ConfigError> {
    Rgba::parse_hex(value).ok_or_else(|| ConfigError::InvalidColor {
        key: key.to_owned(),
        value: value.to_owned(),
    })
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim() {
        "" | "true" | "1" | "on" => Ok(true),
        "false" | "0" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key: key.to_owned(),
            value: value.to_owned(),
        }),
    }
}

fn clamp_ease(v: f32) -> f32 {
    v.clamp(0.01, 0.95)
}

#[derive(Clone, Debug, PartialEq)]
pub struct AuraConfig {
    pub trail_length: usize,
    pub trail_base_ease: f32,
    pub trail_ease_step: f32,
    pub trail_strength: f32,
    pub glyph_ease: f32,
    pub spotlight_ease: f32,
    pub spotlight: bool,
    pub ring_count: usize,
    pub ring_duration_ms: f64,
    pub particle_count: usize,
    pub particle_distance: f32,
    pub particle_duration_ms: f64,
    pub particle_color: Rgba,
    pub interaction_radius: f32,
    pub magnet_strength: f32,
    pub progress_bar: bool,
}

impl Default for AuraConfig {
    fn default() -> Self {
        Self {
            trail_length: DEFAULT_TRAIL_LENGTH,
            trail_base_ease: TRAIL_BASE_EASE,
            trail_ease_step: TRAIL_EASE_STEP,
            trail_strength: DEFAULT_TRAIL_STRENGTH,
            glyph_ease: GLYPH_EASE,
            spotlight_ease: SPOTLIGHT_EASE,
            spotlight: true,
            ring_count: DEFAULT_RING_COUNT,
            ring_duration_ms: DEFAULT_RING_DURATION_MS,
            particle_count: DEFAULT_PARTICLE_COUNT,
            particle_distance: DEFAULT_PARTICLE_DISTANCE_PX,
            particle_duration_ms: DEFAULT_PARTICLE_DURATION_MS,
            particle_color: Rgba::from_u8(30, 58, 95, 0.8),
            interaction_radius: DEFAULT_MAGNET_RADIUS_PX,
            magnet_strength: DEFAULT_MAGNET_STRENGTH,
            progress_bar: false,
        }
    }
}

impl AuraConfig {
    /// Page-wide magnet every `data-magnetic` element starts from.
    pub fn magnet(&self) -> Magnet {
        Magnet {
            strength: self.magnet_strength,
            radius: self.interaction_radius,
        }
    }

    /// Overlay known keys (attribute names without the `data-` prefix) on the
    /// defaults. Unknown keys are skipped; out-of-range values are clamped.
    pub fn from_attributes<'a, I>(attrs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut c = AuraConfig::default();
        for (key, value) in attrs {
            match key {
                "trail-length" => {
                    c.trail_length = parse_count(key, value)?.clamp(1, MAX_TRAIL_LENGTH)
                }
                "trail-ease" => c.trail_base_ease = clamp_ease(parse_f32(key, value)?),
                "trail-ease-step" => c.trail_ease_step = parse_f32(key, value)?.clamp(0.0, 0.1),
                "trail-strength" => c.trail_strength = parse_f32(key, value)?.clamp(0.0, 4.0),
                "cursor-ease" => c.glyph_ease = clamp_ease(parse_f32(key, value)?),
                "spotlight-ease" => c.spotlight_ease = clamp_ease(parse_f32(key, value)?),
                "spotlight" => c.spotlight = parse_flag(key, value)?,
                "ring-count" => c.ring_count = parse_count(key, value)?.min(MAX_PARTICLE_COUNT),
                "ring-duration" => c.ring_duration_ms = (parse_f32(key, value)? as f64).max(1.0),
                "particle-count" => {
                    c.particle_count = parse_count(key, value)?.min(MAX_PARTICLE_COUNT)
                }
                "particle-distance" => c.particle_distance = parse_f32(key, value)?.max(0.0),
                "particle-duration" => {
                    c.particle_duration_ms = (parse_f32(key, value)? as f64).max(1.0)
                }
                "particle-color" => c.particle_color = parse_color(key, value)?,
                "interaction-radius" => c.interaction_radius = parse_f32(key, value)?.max(1.0),
                "magnetic-strength" => c.magnet_strength = parse_f32(key, value)?.clamp(0.0, 1.0),
                "progress" => c.progress_bar = parse_flag(key, value)?,
                _ => {}
            }
        }
        Ok(c)
    }
}
