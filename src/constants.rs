/// Browser-side wiring and decorative-layer tuning.
///
/// Animation tuning lives in `aura_core::constants`; what is here only
/// concerns how the web shell finds things on the page and draws them.
// Page hooks
pub const CONFIG_ELEMENT_ID: &str = "cursor-aura";
pub const DECOR_CANVAS_ID: &str = "aura-canvas";
pub const INTERACTIVE_SELECTOR: &str =
    "a, button, input, textarea, select, [role='button'], [data-cursor], [data-magnetic]";
pub const MAGNETIC_ATTR: &str = "data-magnetic";
pub const DATA_PREFIX: &str = "data-";

// Media queries
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
pub const FINE_POINTER_QUERY: &str = "(pointer: fine)";

// Class set on <body> while the custom cursor replaces the system one
pub const BODY_ACTIVE_CLASS: &str = "aura-active";

// Stacking order of spawned nodes (CSS z-index)
pub const Z_SPOTLIGHT: i32 = 9990;
pub const Z_EFFECT: i32 = 9995;
pub const Z_ECHO: i32 = 9997;
pub const Z_GLYPH: i32 = 9999;
pub const Z_PROGRESS: i32 = 10000;

// Progress bar thickness (CSS px)
pub const PROGRESS_BAR_HEIGHT_PX: f32 = 3.0;

// Camera
pub const CAMERA_Z: f32 = 6.0;
pub const CAMERA_FOV_Y_DEG: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;

// Torus tessellation
pub const TORUS_RADIAL_SEGMENTS: u32 = 16;
pub const TORUS_TUBULAR_SEGMENTS: u32 = 100;

// Ring material
pub const RING_ALPHA: f32 = 0.85;
pub const SPARKLE_COLOR: [f32; 3] = [0.58, 0.77, 0.99];
