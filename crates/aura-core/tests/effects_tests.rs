// Click burst lifetimes and node accounting.

mod common;

use aura_core::constants::{MAX_LIVE_EFFECTS, NOMINAL_FRAME_MS};
use aura_core::{AuraConfig, BurstParams, CursorFx, Effects, Environment, NodeKind};
use common::RecordingScene;
use glam::Vec2;

const FRAME: f64 = NOMINAL_FRAME_MS;

fn running_fx(config: AuraConfig) -> CursorFx<RecordingScene> {
    let mut fx = CursorFx::new(config, RecordingScene::default());
    fx.start(Environment::default());
    fx.pointer_move(50.0, 50.0, 0.0);
    fx
}

#[test]
fn twelve_particles_fly_out_fade_and_are_removed() {
    let config = AuraConfig {
        particle_count: 12,
        particle_duration_ms: 600.0,
        ..AuraConfig::default()
    };
    let mut fx = running_fx(config);
    let origin = Vec2::new(50.0, 50.0);
    let spawned = fx.click(origin.x, origin.y);
    assert_eq!(spawned, 12 + 3);
    assert_eq!(fx.scene().live_particles().len(), 12);

    let snapshot = |fx: &CursorFx<RecordingScene>| -> Vec<(f32, f32)> {
        fx.scene()
            .live_particles()
            .iter()
            .map(|n| (n.transform.centre.distance(origin), n.opacity))
            .collect()
    };
    let mut prev = snapshot(&fx);
    for _ in 0..35 {
        fx.frame(FRAME);
        let now = snapshot(&fx);
        assert_eq!(now.len(), 12);
        for ((d0, o0), (d1, o1)) in prev.iter().zip(&now) {
            assert!(d1 > d0, "particles move outward");
            assert!(o1 < o0, "particles fade");
        }
        prev = now;
    }
    assert!(prev.iter().all(|&(d, o)| o < 0.01 && d > 55.0 && d <= 60.0 + 1e-3));

    // every direction is distinct
    let mut dirs: Vec<f32> = fx
        .scene()
        .live_particles()
        .iter()
        .map(|n| {
            let v = n.transform.centre - origin;
            v.y.atan2(v.x)
        })
        .collect();
    dirs.sort_by(f32::total_cmp);
    assert!(dirs.windows(2).all(|w| w[1] - w[0] > 0.1));

    fx.frame(FRAME);
    fx.frame(FRAME);
    assert!(fx.scene().live_particles().is_empty());
    assert_eq!(fx.scene().stale_calls, 0);
}

#[test]
fn completed_particles_are_written_at_their_final_keyframe() {
    let config = AuraConfig {
        particle_count: 8,
        particle_distance: 60.0,
        particle_duration_ms: 600.0,
        ..AuraConfig::default()
    };
    let mut fx = running_fx(config);
    let origin = Vec2::new(50.0, 50.0);
    fx.click(origin.x, origin.y);
    for _ in 0..40 {
        fx.frame(FRAME);
    }
    assert!(fx.scene().live_particles().is_empty());

    let finished: Vec<_> = fx
        .scene()
        .retired
        .values()
        .filter(|n| n.spec.kind == NodeKind::Particle)
        .collect();
    assert_eq!(finished.len(), 8);
    for n in finished {
        assert_eq!(n.opacity, 0.0);
        let d = n.transform.centre.distance(origin);
        assert!((d - 60.0).abs() < 1e-3, "ended {d} px out");
    }
    assert_eq!(fx.scene().stale_calls, 0);
}

#[test]
fn rings_are_removed_within_a_frame_of_their_lifetime() {
    let mut fx = running_fx(AuraConfig::default());
    fx.click(50.0, 50.0);
    let mut rings_after = Vec::new();
    for _ in 0..80 {
        fx.frame(FRAME);
        rings_after.push(fx.scene().live_of(NodeKind::Ring));
    }
    // ring i lives for i * 100 ms of stagger plus 1000 ms, i.e. 60 + 6i frames
    let rings_at = |frame: usize| rings_after[frame - 1];
    assert_eq!(rings_at(59), 3);
    assert_eq!(rings_at(61), 2);
    assert_eq!(rings_at(65), 2);
    assert_eq!(rings_at(67), 1);
    assert_eq!(rings_at(71), 1);
    assert_eq!(rings_at(73), 0);
}

#[test]
fn staggered_ring_waits_at_its_start_keyframe() {
    let mut fx = running_fx(AuraConfig::default());
    fx.click(50.0, 50.0);
    fx.frame(FRAME);
    let mut scales: Vec<f32> = fx
        .scene()
        .live
        .values()
        .filter(|n| n.spec.kind == NodeKind::Ring)
        .map(|n| n.transform.scale)
        .collect();
    scales.sort_by(f32::total_cmp);
    // rings 1 and 2 are still inside their delay
    assert_eq!(scales[0], 1.0);
    assert_eq!(scales[1], 1.0);
    assert!(scales[2] > 1.0);
}

#[test]
fn a_thousand_clicks_leave_no_residue() {
    let mut fx = running_fx(AuraConfig::default());
    let owned = fx.scene().live.len();
    for i in 0..1_000 {
        let p = (i % 97) as f32 * 7.0;
        fx.click(p, 400.0 - p);
        assert!(fx.effects().live_count() <= MAX_LIVE_EFFECTS);
        fx.frame(FRAME);
    }
    for _ in 0..200 {
        if fx.effects().live_count() == 0 {
            break;
        }
        fx.frame(FRAME);
    }

    let scene = fx.scene();
    assert_eq!(fx.effects().live_count(), 0);
    assert_eq!(scene.live_of(NodeKind::Ring), 0);
    assert_eq!(scene.live_of(NodeKind::Particle), 0);
    assert_eq!(scene.live.len(), owned);
    assert_eq!(scene.spawned - scene.removed, owned as u64);
    assert_eq!(scene.stale_calls, 0);
    assert_eq!(fx.effects().spawned_total(), 11_000);
    assert_eq!(fx.effects().removed_total(), 11_000);
}

#[test]
fn pool_overflow_retires_the_oldest_instances() {
    let mut scene = RecordingScene::default();
    let mut effects = Effects::with_capacity(5);
    let nodes = effects.spawn_burst(&mut scene, Vec2::ZERO, &BurstParams::default());
    assert_eq!(nodes.len(), 11);
    assert_eq!(effects.live_count(), 5);
    assert_eq!(scene.live.len(), 5);
    assert_eq!(scene.removed, 6);
    // the survivors are the last five spawned
    for id in &nodes[6..] {
        assert!(scene.live.contains_key(id));
    }
    assert_eq!(effects.clear(&mut scene), 5);
    assert!(scene.live.is_empty());
    assert_eq!(scene.stale_calls, 0);
}

#[test]
fn empty_burst_spawns_nothing() {
    let mut scene = RecordingScene::default();
    let mut effects = Effects::default();
    let params = BurstParams {
        ring_count: 0,
        particle_count: 0,
        ..BurstParams::default()
    };
    assert!(effects
        .spawn_burst(&mut scene, Vec2::ONE, &params)
        .is_empty());
    assert_eq!(effects.advance(&mut scene, FRAME), 0);
    assert_eq!(scene.spawned, 0);
}

#[test]
fn teardown_mid_burst_removes_each_node_once() {
    let mut fx = running_fx(AuraConfig::default());
    fx.click(10.0, 10.0);
    fx.click(20.0, 20.0);
    for _ in 0..10 {
        fx.frame(FRAME);
    }
    fx.dispose();
    let scene = fx.scene();
    assert!(scene.live.is_empty());
    assert_eq!(scene.spawned, scene.removed);
    assert_eq!(scene.stale_calls, 0);
    // nothing left to advance
    assert!(!fx.frame(FRAME));
}
