use std::f32::consts::FRAC_1_SQRT_2;

use wasd_point::{InputEvent, KeyRouter, MovementState, Vec2};

fn approx(a: Vec2, b: Vec2) -> bool {
    (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
}

#[test]
fn straight_then_diagonal() {
    let mut state = MovementState::new().with_speed(2.0);

    state.add_key('w');
    assert_eq!(state.apply_movement(0.5), Vec2::new(0.0, 1.0));

    state.add_key('d');
    let p = state.apply_movement(0.5);
    assert!(
        approx(p, Vec2::new(FRAC_1_SQRT_2, 1.0 + FRAC_1_SQRT_2)),
        "got {:?}",
        p
    );
}

#[test]
fn all_four_keys_hold_still() {
    let mut state = MovementState::new().with_position(Vec2::new(2.5, -4.0));
    for c in ['w', 'a', 's', 'd'] {
        state.add_key(c);
    }
    assert_eq!(state.calculate_movement_vector(), Vec2::ZERO);
    assert_eq!(state.apply_movement(10.0), Vec2::new(2.5, -4.0));
}

#[test]
fn driving_into_a_corner_stops_at_the_boundary() {
    let mut state = MovementState::new().with_speed(3.0);
    state.add_key('a');
    state.add_key('s');

    for _ in 0..600 {
        state.apply_movement(1.0 / 60.0);
    }
    let p = state.position();
    assert_eq!(p, Vec2::new(-10.0, -10.0));

    state.remove_key('s');
    state.add_key('d');
    state.remove_key('a');
    state.add_key('w');
    let p = state.apply_movement(1.0);
    assert!(p.x > -10.0 && p.y > -10.0);
}

#[test]
fn many_small_steps_match_one_large_step() {
    let mut stepped = MovementState::new().with_speed(1.0);
    let mut single = MovementState::new().with_speed(1.0);
    stepped.add_key('d');
    single.add_key('d');

    for _ in 0..100 {
        stepped.apply_movement(0.05);
    }
    single.apply_movement(5.0);

    assert!((stepped.position().x - single.position().x).abs() < 1e-4);
    assert_eq!(stepped.position().y, 0.0);
}

#[test]
fn router_driven_session() {
    let router = KeyRouter::default();
    let mut state = MovementState::new().with_speed(2.0);

    for event in [
        InputEvent::Pressed('W'),
        InputEvent::Pressed('x'),
        InputEvent::Pressed('w'),
    ] {
        router.route(&mut state, event);
    }
    assert_eq!(state.pressed_keys().len(), 1);
    assert_eq!(state.apply_movement(0.5), Vec2::new(0.0, 1.0));

    router.route(&mut state, InputEvent::FocusLost);
    assert_eq!(state.apply_movement(0.5), Vec2::new(0.0, 1.0));

    router.route(&mut state, InputEvent::Pressed('q'));
    assert!(state.should_quit());

    state.reset();
    assert!(!state.should_quit());
    assert_eq!(state.position(), Vec2::ZERO);
}

#[test]
fn out_of_range_start_is_clamped() {
    let mut state = MovementState::new().with_position(Vec2::new(50.0, 0.0));
    assert_eq!(state.position(), Vec2::new(10.0, 0.0));

    state.add_key('d');
    assert_eq!(state.apply_movement(1.0), Vec2::new(10.0, 0.0));
    state.remove_key('d');
    state.add_key('a');
    assert_eq!(state.apply_movement(1.0), Vec2::new(8.0, 0.0));
}
