pub mod color;
pub mod config;
pub mod constants;
pub mod controller;
pub mod decor;
pub mod easing;
pub mod effects;
pub mod glyph;
pub mod responder;
pub mod sampler;
pub mod scene;
pub mod scroll;
pub mod trail;

pub use color::Rgba;
pub use config::{AuraConfig, ConfigError};
pub use controller::{CursorFx, Environment, Lifecycle};
pub use decor::{ParticleField, RingField, TorusVertex};
pub use effects::{BurstParams, Effects};
pub use glyph::{Glyph, Spotlight, VisualTarget};
pub use responder::{ElementId, ElementRegistry, ElementRole, Magnet, Responder};
pub use sampler::{PointerSample, PointerSampler};
pub use scene::{NodeId, NodeKind, NodeSpec, SceneGraph, Transform};
pub use scroll::ScrollState;
pub use trail::{Echo, Trail, TrailParams};

// Decorative ring shader, shared with the web renderer
pub static RINGS_WGSL: &str = include_str!("../../../shaders/rings.wgsl");
