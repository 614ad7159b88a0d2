// Host-side integration tests driving the cursor context through a recording scene.

mod common;

use aura_core::constants::{GLYPH_REST_OPACITY, NOMINAL_FRAME_MS};
use aura_core::{
    AuraConfig, CursorFx, ElementId, ElementRole, Environment, Lifecycle, Magnet, NodeKind,
};
use common::RecordingScene;
use glam::Vec2;

const FRAME: f64 = NOMINAL_FRAME_MS;

fn running_fx(config: AuraConfig) -> CursorFx<RecordingScene> {
    let mut fx = CursorFx::new(config, RecordingScene::default());
    assert_eq!(fx.start(Environment::default()), Lifecycle::Running);
    fx
}

fn run_frames(fx: &mut CursorFx<RecordingScene>, n: usize) {
    for _ in 0..n {
        assert!(fx.frame(FRAME));
    }
}

#[test]
fn start_creates_glyph_echoes_and_spotlight() {
    let fx = running_fx(AuraConfig::default());
    let scene = fx.scene();
    assert_eq!(scene.live_of(NodeKind::Glyph), 1);
    assert_eq!(scene.live_of(NodeKind::Spotlight), 1);
    assert_eq!(scene.live_of(NodeKind::ProgressBar), 0);
    assert_eq!(scene.live.len(), 1 + 8 + 1);
    assert_eq!(fx.owned_node_count(), scene.live.len());
}

#[test]
fn first_echo_converges_monotonically_on_a_still_pointer() {
    let mut fx = running_fx(AuraConfig::default());
    fx.pointer_move(0.0, 0.0, 0.0);
    run_frames(&mut fx, 3);
    let target = Vec2::new(200.0, -50.0);
    fx.pointer_move(target.x, target.y, FRAME * 4.0);

    let mut prev_echo = fx.trail().echoes()[0].position.distance(target);
    let mut prev_glyph = fx.glyph().state().position.distance(target);
    assert!(prev_echo > 0.0);
    for _ in 0..400 {
        fx.frame(FRAME);
        let d_echo = fx.trail().echoes()[0].position.distance(target);
        let d_glyph = fx.glyph().state().position.distance(target);
        if prev_echo > 0.0 {
            assert!(d_echo < prev_echo, "echo distance went {prev_echo} -> {d_echo}");
        } else {
            assert_eq!(d_echo, 0.0);
        }
        if prev_glyph > 0.0 {
            assert!(d_glyph < prev_glyph);
        }
        prev_echo = d_echo;
        prev_glyph = d_glyph;
    }
    assert_eq!(prev_echo, 0.0, "a settled echo lands exactly on its target");
    // with the pointer held, the whole chain eventually rests on it
    assert!(fx.trail().echoes().iter().all(|e| e.position == target));
}

#[test]
fn echo_count_is_constant_across_many_frames() {
    let mut fx = running_fx(AuraConfig::default());
    let echoes_before = fx.scene().live_of(NodeKind::Echo(0));
    for i in 0..2_000 {
        let t = i as f64 * FRAME;
        let a = i as f32 * 0.05;
        fx.pointer_move(300.0 + 200.0 * a.cos(), 300.0 + 200.0 * a.sin(), t);
        fx.frame(FRAME);
        assert_eq!(fx.trail().len(), 8);
    }
    assert_eq!(echoes_before, 1);
    let echo_nodes = (0..8)
        .map(|i| fx.scene().live_of(NodeKind::Echo(i)))
        .sum::<usize>();
    assert_eq!(echo_nodes, 8);
    assert_eq!(fx.scene().stale_calls, 0);
}

#[test]
fn hover_enter_leave_twice_returns_to_identical_rest() {
    let mut fx = running_fx(AuraConfig::default());
    let button = fx.register_element(ElementRole::Button, None);
    fx.pointer_move(120.0, 80.0, 0.0);
    run_frames(&mut fx, 200);
    let rest = fx.glyph().state();
    assert_eq!(rest.scale, 1.0);
    assert_eq!(rest.opacity, GLYPH_REST_OPACITY);

    for _ in 0..2 {
        assert!(fx.hover_enter(button, Vec2::new(120.0, 80.0)));
        run_frames(&mut fx, 30);
        assert!(fx.glyph().state().scale > 2.0);
        assert!(fx.trail().pulse() > 1.0);
        assert!(fx.hover_leave(button));
        run_frames(&mut fx, 200);
    }

    let after = fx.glyph().state();
    assert_eq!(after.scale, rest.scale);
    assert_eq!(after.opacity, rest.opacity);
    assert_eq!(after.fill, rest.fill);
    assert_eq!(after.outline, rest.outline);
    assert_eq!(fx.trail().pulse(), 1.0);
}

#[test]
fn roles_produce_distinct_targets() {
    let mut fx = running_fx(AuraConfig::default());
    let link = fx.register_element(ElementRole::Link, None);
    let input = fx.register_element(ElementRole::Input, None);
    fx.pointer_move(10.0, 10.0, 0.0);
    fx.hover_enter(link, Vec2::ZERO);
    let link_target = fx.glyph().target();
    fx.hover_leave(link);
    fx.hover_enter(input, Vec2::ZERO);
    let input_target = fx.glyph().target();
    assert_ne!(link_target, input_target);
    assert!(input_target.scale < 1.0);
}

#[test]
fn unknown_element_hover_is_a_no_op() {
    let mut fx = running_fx(AuraConfig::default());
    fx.pointer_move(10.0, 10.0, 0.0);
    assert!(!fx.hover_enter(ElementId(1234), Vec2::ZERO));
    assert!(!fx.hover_leave(ElementId(1234)));
    assert_eq!(fx.responder().hovered(), None);
}

#[test]
fn reduced_motion_at_start_creates_nothing_and_schedules_nothing() {
    let mut fx = CursorFx::new(AuraConfig::default(), RecordingScene::default());
    let env = Environment {
        reduced_motion: true,
        pointer_fine: true,
    };
    assert_eq!(fx.start(env), Lifecycle::Disabled);
    assert!(!fx.wants_frame());

    fx.pointer_move(10.0, 10.0, 0.0);
    fx.pointer_down();
    assert_eq!(fx.click(10.0, 10.0), 0);
    let mut scheduled = 0;
    for _ in 0..60 {
        if fx.frame(FRAME) {
            scheduled += 1;
        }
    }
    assert_eq!(scheduled, 0);
    assert_eq!(fx.scene().spawned, 0);
    assert!(fx.scene().live.is_empty());
}

#[test]
fn coarse_pointer_disables_like_reduced_motion() {
    let mut fx = CursorFx::new(AuraConfig::default(), RecordingScene::default());
    let env = Environment {
        reduced_motion: false,
        pointer_fine: false,
    };
    assert_eq!(fx.start(env), Lifecycle::Disabled);
    assert_eq!(fx.scene().spawned, 0);
}

#[test]
fn reduced_motion_mid_session_tears_down_and_does_not_auto_resume() {
    let mut fx = running_fx(AuraConfig::default());
    fx.pointer_move(50.0, 50.0, 0.0);
    run_frames(&mut fx, 5);
    fx.click(50.0, 50.0);
    assert!(fx.effects().live_count() > 0);

    fx.set_reduced_motion(true);
    assert_eq!(fx.lifecycle(), Lifecycle::Disabled);
    assert!(fx.scene().live.is_empty());
    assert_eq!(fx.scene().spawned, fx.scene().removed);
    assert_eq!(fx.effects().live_count(), 0);
    assert!(!fx.frame(FRAME));

    fx.set_reduced_motion(false);
    assert_eq!(fx.lifecycle(), Lifecycle::Disabled);
    assert!(!fx.frame(FRAME));
    assert!(fx.scene().live.is_empty());

    // explicit restart
    assert_eq!(fx.start(fx.environment()), Lifecycle::Running);
    assert_eq!(fx.scene().live.len(), 10);
    assert!(fx.frame(FRAME));
    assert_eq!(fx.scene().stale_calls, 0);
}

#[test]
fn hidden_page_pauses_without_removing_nodes() {
    let mut fx = running_fx(AuraConfig::default());
    fx.pointer_move(5.0, 5.0, 0.0);
    fx.set_page_visible(false);
    assert!(!fx.frame(FRAME));
    assert_eq!(fx.scene().live.len(), 10);
    fx.set_page_visible(true);
    assert!(fx.frame(FRAME));
}

#[test]
fn dispose_is_final() {
    let mut fx = running_fx(AuraConfig::default());
    fx.dispose();
    assert!(fx.scene().live.is_empty());
    assert_eq!(fx.start(Environment::default()), Lifecycle::Disposed);
    assert_eq!(fx.scene().live.len(), 0);
}

#[test]
fn stop_then_start_rebuilds_the_same_node_set() {
    let mut fx = running_fx(AuraConfig::default());
    fx.stop();
    assert_eq!(fx.lifecycle(), Lifecycle::Idle);
    assert!(fx.scene().live.is_empty());
    fx.start(Environment::default());
    assert_eq!(fx.scene().live.len(), 10);
    assert_eq!(fx.scene().removed, 10);
}

#[test]
fn pointer_sweep_settles_and_tail_lags() {
    let mut fx = running_fx(AuraConfig::default());
    fx.pointer_move(0.0, 0.0, 0.0);
    fx.frame(FRAME);

    // (0,0) -> (100,100) over 500 ms, one sample per frame
    let steps = 30;
    let mut lag_checked = false;
    for i in 1..=steps {
        let p = 100.0 * i as f32 / steps as f32;
        fx.pointer_move(p, p, i as f64 * 500.0 / steps as f64);
        fx.frame(FRAME);
        if i == 5 {
            let pointer = Vec2::splat(p);
            let echoes = fx.trail().echoes();
            let first = echoes[0].position.distance(pointer);
            let eighth = echoes[7].position.distance(pointer);
            assert!(eighth > first + 5.0, "eighth {eighth} vs first {first}");
            lag_checked = true;
        }
    }
    assert!(lag_checked);

    run_frames(&mut fx, 30);
    let first = fx.trail().echoes()[0].position;
    assert!(first.distance(Vec2::new(100.0, 100.0)) <= 1.0, "{first:?}");
}

#[test]
fn fast_movement_raises_near_echo_scale() {
    let mut fx = running_fx(AuraConfig::default());
    fx.pointer_move(0.0, 0.0, 0.0);
    run_frames(&mut fx, 2);
    for i in 1..10 {
        fx.pointer_move(i as f32 * 60.0, 0.0, i as f64 * FRAME);
        fx.frame(FRAME);
    }
    let e = fx.trail().echoes();
    assert!(e[0].scale > 1.0);
    assert!(e[0].scale > e[7].scale);
}

#[test]
fn magnetic_hover_pulls_glyph_and_drifts_element() {
    let mut fx = running_fx(AuraConfig::default());
    let magnet = Magnet {
        strength: 0.5,
        radius: 100.0,
    };
    let id = fx.register_element(ElementRole::Button, Some(magnet));
    let centre = Vec2::new(100.0, 100.0);
    fx.pointer_move(130.0, 100.0, 0.0);
    fx.hover_enter(id, centre);
    run_frames(&mut fx, 200);

    let glyph_x = fx.glyph().state().position.x;
    assert!(glyph_x < 130.0 && glyph_x > 100.0, "glyph at {glyph_x}");
    let (offset, scale) = fx.scene().element_offsets[&id];
    assert!(offset.x > 0.0);
    assert!(scale > 1.0);

    fx.hover_leave(id);
    assert_eq!(fx.scene().element_offsets[&id], (Vec2::ZERO, 1.0));
    run_frames(&mut fx, 200);
    assert_eq!(fx.glyph().state().position, Vec2::new(130.0, 100.0));
}

#[test]
fn magnet_follows_an_element_that_moves_mid_hover() {
    let mut fx = running_fx(AuraConfig::default());
    let magnet = Magnet {
        strength: 0.2,
        radius: 100.0,
    };
    let id = fx.register_element(ElementRole::Button, Some(magnet));
    fx.pointer_move(100.0, 100.0, 0.0);
    fx.hover_enter(id, Vec2::new(100.0, 100.0));
    run_frames(&mut fx, 200);
    assert_eq!(fx.glyph().state().position, Vec2::new(100.0, 100.0));
    assert_eq!(fx.hovered_element(), Some(id));

    // the page scrolls 60 px under a resting pointer
    fx.update_hover_centre(id, Vec2::new(100.0, 40.0));
    run_frames(&mut fx, 200);

    let glyph = fx.glyph().state().position;
    assert!(glyph.y < 100.0 && glyph.y > 40.0, "glyph at {glyph}");
    assert!((glyph.x - 100.0).abs() < 1e-3);
    let (offset, _) = fx.scene().element_offsets[&id];
    assert!(offset.y > 0.0, "element drifts toward the pointer");
}

#[test]
fn press_and_release_scale_the_glyph() {
    let mut fx = running_fx(AuraConfig::default());
    fx.pointer_move(1.0, 1.0, 0.0);
    fx.pointer_down();
    run_frames(&mut fx, 200);
    assert!(fx.glyph().state().scale < 1.0);
    fx.pointer_up();
    run_frames(&mut fx, 200);
    assert_eq!(fx.glyph().state().scale, 1.0);
}

#[test]
fn progress_bar_tracks_scroll() {
    let config = AuraConfig {
        progress_bar: true,
        ..AuraConfig::default()
    };
    let mut fx = running_fx(config);
    assert_eq!(fx.scene().live_of(NodeKind::ProgressBar), 1);
    fx.scroll(0.0, 2000.0);
    fx.scroll(1000.0, 2000.0);
    run_frames(&mut fx, 120);
    let bar = fx
        .scene()
        .live
        .values()
        .find(|n| n.spec.kind == NodeKind::ProgressBar)
        .unwrap();
    assert!((bar.transform.scale - 0.5).abs() < 1e-3);
}

#[test]
fn echoes_stay_hidden_until_first_pointer_sample() {
    let mut fx = running_fx(AuraConfig::default());
    run_frames(&mut fx, 10);
    let echo = fx
        .scene()
        .live
        .values()
        .find(|n| n.spec.kind == NodeKind::Echo(0))
        .unwrap();
    assert_eq!(echo.opacity, 0.0);
    fx.pointer_move(40.0, 40.0, 0.0);
    fx.frame(FRAME);
    let echo = fx
        .scene()
        .live
        .values()
        .find(|n| n.spec.kind == NodeKind::Echo(0))
        .unwrap();
    assert!(echo.opacity > 0.0);
    assert_eq!(echo.transform.centre, Vec2::new(40.0, 40.0));
}
