// Tuning constants shared by the trail, glyph, effects and decorative layer.
// Per-frame ease factors are expressed against a 60 Hz nominal frame.

// Timing
pub const NOMINAL_FRAME_MS: f64 = 1000.0 / 60.0;
pub const MIN_SAMPLE_GAP_MS: f64 = 1.0; // floor on elapsed time between pointer samples
pub const MIN_FRAME_MS: f64 = 1.0;
pub const MAX_FRAME_MS: f64 = 100.0; // long stalls (tab switch) are clamped to this

// Pointer sampling (pixels per nominal frame)
pub const MAX_POINTER_SPEED: f32 = 120.0;
pub const SPEED_FOR_FULL_BOOST: f32 = 40.0;
pub const VELOCITY_SETTLE_PER_FRAME: f32 = 0.85; // velocity decay while no events arrive

// Trail
pub const DEFAULT_TRAIL_LENGTH: usize = 8;
pub const MAX_TRAIL_LENGTH: usize = 32;
pub const TRAIL_BASE_EASE: f32 = 0.15;
pub const TRAIL_EASE_STEP: f32 = 0.03;
pub const TRAIL_HEAD_DIAMETER_PX: f32 = 16.0;
pub const TRAIL_DIAMETER_STEP_PX: f32 = 1.5;
pub const TRAIL_MIN_DIAMETER_PX: f32 = 2.0;
pub const TRAIL_HEAD_OPACITY: f32 = 0.3;
pub const TRAIL_OPACITY_STEP: f32 = 0.03;
pub const TRAIL_MIN_OPACITY: f32 = 0.02;
pub const TRAIL_HOVER_PULSE: f32 = 1.5;
pub const TRAIL_SPEED_SCALE_BOOST: f32 = 0.6;
pub const TRAIL_SPEED_OPACITY_BOOST: f32 = 0.25;
pub const TRAIL_STYLE_EASE: f32 = 0.2;
pub const DEFAULT_TRAIL_STRENGTH: f32 = 1.0;

// Main glyph and spotlight
pub const GLYPH_EASE: f32 = 0.25;
pub const GLYPH_STYLE_EASE: f32 = 0.3;
pub const GLYPH_DIAMETER_PX: f32 = 40.0;
pub const GLYPH_REST_OPACITY: f32 = 0.4;
pub const PRESS_SCALE: f32 = 0.8;
pub const SPOTLIGHT_EASE: f32 = 0.18;
pub const SPOTLIGHT_DIAMETER_PX: f32 = 400.0;

// Snap thresholds so settled values land exactly on their targets
pub const SNAP_EPSILON_PX: f32 = 0.01;
pub const SNAP_EPSILON_STYLE: f32 = 1e-4;

// Click rings
pub const DEFAULT_RING_COUNT: usize = 3;
pub const RING_START_DIAMETER_PX: f32 = 10.0;
pub const RING_END_DIAMETER_PX: f32 = 120.0;
pub const RING_DIAMETER_STEP_PX: f32 = 20.0;
pub const RING_START_OPACITY: f32 = 0.6;
pub const RING_OPACITY_STEP: f32 = 0.15;
pub const RING_STAGGER_MS: f64 = 100.0;
pub const DEFAULT_RING_DURATION_MS: f64 = 1000.0;

// Click particles
pub const DEFAULT_PARTICLE_COUNT: usize = 8;
pub const MAX_PARTICLE_COUNT: usize = 64;
pub const DEFAULT_PARTICLE_DISTANCE_PX: f32 = 60.0;
pub const PARTICLE_DIAMETER_PX: f32 = 8.0;
pub const PARTICLE_START_OPACITY: f32 = 0.8;
pub const PARTICLE_END_SCALE: f32 = 0.3;
pub const DEFAULT_PARTICLE_DURATION_MS: f64 = 800.0;

// Upper bound on simultaneously live transient effects
pub const MAX_LIVE_EFFECTS: usize = 512;

// Magnetic elements
pub const DEFAULT_MAGNET_STRENGTH: f32 = 0.3;
pub const DEFAULT_MAGNET_RADIUS_PX: f32 = 100.0;

// Scroll smoothing
pub const SCROLL_SMOOTH_TAU_MS: f64 = 150.0;

// Decorative rings
pub const DECOR_RING_BASE_SPEED: f32 = 0.3;
pub const DECOR_RING_SPEED_STEP: f32 = 0.1;
pub const DECOR_POINTER_INFLUENCE: f32 = 0.8;
pub const DECOR_MIN_SCROLL_SCALE: f32 = 0.7;
pub const DECOR_SCROLL_SHRINK_PER_PX: f32 = 0.0005;
pub const DECOR_BASE_EMISSIVE: f32 = 0.5;

// Sparkle particle field
pub const DEFAULT_SPARKLE_COUNT: usize = 120;
pub const SPARKLE_INNER_RADIUS: f32 = 2.8;
pub const SPARKLE_OUTER_RADIUS: f32 = 4.5;
pub const SPARKLE_ORBIT_SPEED: f32 = 0.08; // radians per second
