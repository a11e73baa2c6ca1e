use fan_flow::{
    animation::{AnimationState, FrameLoop},
    config::{AnimationConfig, SceneConfig},
    controls::Speed,
    data_structures::scene_graph::SceneNode,
};

use crate::common::test_utils::{advance_frames, default_fan, running_fan};

mod common;

#[test]
fn initial_state() {
    let state = AnimationState::default();
    assert_eq!(state.spin, 0.0);
    assert_eq!(state.sway, 0.0);
    assert_eq!(state.sway_direction, 1.0);
    assert_eq!(state.speed, Speed::Medium);
    assert_eq!(state.sway_limit(), 1.0);
    assert_eq!(state.sway_step(), 0.005);
}

#[test]
fn speed_values() {
    assert_eq!(Speed::High.value(), 0.75);
    assert_eq!(Speed::Medium.value(), 0.5);
    assert_eq!(Speed::Low.value(), 0.25);
    assert_eq!(Speed::default(), Speed::Medium);
}

#[test]
fn speed_keys() {
    assert_eq!(Speed::from_key("1"), Some(Speed::High));
    assert_eq!(Speed::from_key("H"), Some(Speed::High));
    assert_eq!(Speed::from_key("m"), Some(Speed::Medium));
    assert_eq!(Speed::from_key("3"), Some(Speed::Low));
    assert_eq!(Speed::from_key("x"), None);
    assert_eq!(Speed::from_key(""), None);
}

#[test]
fn spin_decreases_by_speed_each_frame() {
    let mut state = AnimationState::default();
    for _ in 0..10 {
        state.step();
    }
    assert_eq!(state.spin, -5.0);

    state.speed = Speed::Low;
    for _ in 0..4 {
        state.step();
    }
    assert_eq!(state.spin, -6.0);
}

#[test]
fn spin_is_unbounded() {
    let mut state = AnimationState::default();
    state.speed = Speed::High;
    for _ in 0..1000 {
        state.step();
    }
    assert_eq!(state.spin, -750.0);
}

#[test]
fn speed_change_applies_to_next_frame() {
    let (mut fan, mut frame_loop) = running_fan();
    advance_frames(&mut frame_loop, &mut fan, 4);
    assert_eq!(frame_loop.state().spin, -2.0);

    frame_loop.set_speed(Speed::High);
    advance_frames(&mut frame_loop, &mut fan, 1);
    assert_eq!(frame_loop.state().spin, -2.75);

    frame_loop.set_speed(Speed::Low);
    frame_loop.set_speed(Speed::High);
    frame_loop.set_speed(Speed::Low);
    advance_frames(&mut frame_loop, &mut fan, 1);
    assert_eq!(frame_loop.state().spin, -3.0);
}

#[test]
fn sway_checks_limit_before_adding() {
    let mut state = AnimationState::default();

    state.sway = 0.999;
    state.step();
    // below the limit when checked, so it overshoots by one step
    assert!((state.sway - 1.004).abs() < 1e-12);
    assert_eq!(state.sway_direction, 1.0);

    state.step();
    assert_eq!(state.sway_direction, -1.0);
    assert!((state.sway - 0.999).abs() < 1e-12);
}

#[test]
fn sway_reflects_at_exact_limit() {
    let mut state = AnimationState::default();
    state.sway = 1.0;
    state.step();
    assert_eq!(state.sway_direction, -1.0);
    assert!((state.sway - 0.995).abs() < 1e-12);

    state.sway = -1.0;
    state.step();
    assert_eq!(state.sway_direction, 1.0);
    assert!((state.sway + 0.995).abs() < 1e-12);
}

#[test]
fn sway_stays_within_limit_plus_one_step() {
    let mut state = AnimationState::default();
    let bound = state.sway_limit() + state.sway_step() + 1e-9;
    let mut reversals = 0;
    let mut direction = state.sway_direction;
    for _ in 0..5000 {
        state.step();
        assert!(state.sway.abs() <= bound, "sway {} out of bounds", state.sway);
        if state.sway_direction != direction {
            reversals += 1;
            direction = state.sway_direction;
        }
    }
    // 5000 steps of 0.005 cover 25 units, a reversal every 2 units
    assert!(reversals >= 5, "only {} reversals", reversals);
}

#[test]
fn sway_is_independent_of_speed() {
    let mut slow = AnimationState::default();
    slow.speed = Speed::Low;
    let mut fast = AnimationState::default();
    fast.speed = Speed::High;
    for _ in 0..300 {
        slow.step();
        fast.step();
    }
    assert_eq!(slow.sway, fast.sway);
    assert_eq!(slow.sway_direction, fast.sway_direction);
    assert!(slow.spin > fast.spin);
}

#[test]
fn custom_limit_and_step() {
    let mut state = AnimationState::new(&AnimationConfig {
        initial_speed: Speed::Low,
        sway_limit: 0.5,
        sway_step: 0.25,
    });
    let sways: Vec<f64> = (0..6)
        .map(|_| {
            state.step();
            state.sway
        })
        .collect();
    assert_eq!(sways, vec![0.25, 0.5, 0.25, 0.0, -0.25, -0.5]);
    assert_eq!(state.spin, -1.5);
}

#[test]
fn stopped_loop_does_nothing() {
    let config = SceneConfig::default();
    let mut fan = default_fan();
    let mut frame_loop = FrameLoop::new(&config.animation);
    assert!(!frame_loop.is_running());

    let wing_before = fan
        .scene
        .node(&fan.wing)
        .map(|n| n.get_local_transform().clone());
    assert!(!frame_loop.advance(&mut fan));
    assert_eq!(frame_loop.frames(), 0);
    assert_eq!(frame_loop.state().spin, 0.0);
    assert_eq!(
        fan.scene
            .node(&fan.wing)
            .map(|n| n.get_local_transform().clone()),
        wing_before
    );
}

#[test]
fn start_stop_cycle() {
    let (mut fan, mut frame_loop) = running_fan();
    assert!(frame_loop.is_running());
    advance_frames(&mut frame_loop, &mut fan, 3);
    assert_eq!(frame_loop.frames(), 3);

    frame_loop.stop();
    assert!(!frame_loop.is_running());
    assert!(!frame_loop.advance(&mut fan));
    assert_eq!(frame_loop.frames(), 3);
    assert_eq!(frame_loop.state().spin, -1.5);

    frame_loop.start();
    frame_loop.start();
    advance_frames(&mut frame_loop, &mut fan, 1);
    assert_eq!(frame_loop.frames(), 4);
    assert_eq!(frame_loop.state().spin, -2.0);
}
