// Host-side tests for the web shell's tuning constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../crates/aura-core/src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn layers_stack_in_the_intended_order() {
    // spotlight under effects under the trail under the glyph
    assert!(Z_SPOTLIGHT < Z_EFFECT);
    assert!(Z_EFFECT < Z_ECHO);
    assert!(Z_ECHO < Z_GLYPH);
    assert!(Z_GLYPH < Z_PROGRESS);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_frames_the_rings() {
    assert!(CAMERA_NEAR > 0.0 && CAMERA_NEAR < CAMERA_FAR);
    assert!(CAMERA_FOV_Y_DEG > 10.0 && CAMERA_FOV_Y_DEG < 120.0);
    // widest ring (radius 2.5 plus tube) stays in front of the camera at any scale
    assert!(CAMERA_Z - 2.7 > CAMERA_NEAR);
    let half_height = CAMERA_Z * (CAMERA_FOV_Y_DEG.to_radians() * 0.5).tan();
    assert!(half_height > 2.0, "rings would be clipped: {half_height}");
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn mesh_and_material_are_sane() {
    assert!(TORUS_RADIAL_SEGMENTS >= 3);
    assert!(TORUS_TUBULAR_SEGMENTS >= TORUS_RADIAL_SEGMENTS);
    assert!(RING_ALPHA > 0.0 && RING_ALPHA <= 1.0);
    assert!(SPARKLE_COLOR.iter().all(|c| (0.0..=1.0).contains(c)));
    assert!(PROGRESS_BAR_HEIGHT_PX > 0.0);
}

#[test]
fn selectors_and_queries_are_well_formed() {
    assert!(!CONFIG_ELEMENT_ID.starts_with('#'));
    assert!(!DECOR_CANVAS_ID.starts_with('#'));
    assert!(INTERACTIVE_SELECTOR.contains(&format!("[{MAGNETIC_ATTR}]")));
    assert!(MAGNETIC_ATTR.starts_with(DATA_PREFIX));
    for q in [REDUCED_MOTION_QUERY, FINE_POINTER_QUERY] {
        assert!(q.starts_with('(') && q.ends_with(')'));
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn progress_bar_sits_above_every_spawned_node() {
    use core_constants::MAX_LIVE_EFFECTS;
    // each effect shares one z-index, so the pool size never affects stacking
    assert!(MAX_LIVE_EFFECTS > 0);
    assert!(Z_PROGRESS > Z_GLYPH);
}
