//! Locomotion Tests
//!
//! Tests for:
//! - Walking along the heading at walk speed
//! - Run speed coupled to turn input
//! - Jump launch, flight time and landing
//! - Jump request handling while airborne
//! - Animation state selection before, during and after a jump

use std::f32::consts::TAU;
use std::sync::Arc;

use glam::Vec3;

use wayfarer::animation::library::{self, ClipLibrary};
use wayfarer::animation::mixer::AnimationMixer;
use wayfarer::character::{Character, LocomotionController, LocomotionSettings, MovementState};
use wayfarer::input::InputState;

const DT: f32 = 1.0 / 60.0;
const EPSILON: f32 = 1e-2;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

struct Rig {
    character: Character,
    controller: LocomotionController,
    mixer: AnimationMixer,
}

impl Rig {
    fn new() -> Self {
        let mut mixer = AnimationMixer::new(Arc::new(ClipLibrary::builtin().unwrap()));
        mixer.request_state(library::IDLE, 0.0, false).unwrap();
        Self {
            character: Character::default(),
            controller: LocomotionController::new(LocomotionSettings::default()),
            mixer,
        }
    }

    /// One tick the way the viewer runs it: locomotion, then the mixer.
    fn tick(&mut self, input: &mut InputState) {
        self.controller
            .update(&mut self.character, input, &mut self.mixer, DT);
        self.mixer.advance(DT);
        input.end_tick();
    }

    fn run_ticks(&mut self, input: &mut InputState, n: usize) {
        for _ in 0..n {
            self.tick(input);
        }
    }
}

fn forward_only() -> InputState {
    InputState {
        forward: true,
        ..Default::default()
    }
}

// ============================================================================
// Ground movement
// ============================================================================

#[test]
fn walk_forward_one_second() {
    let mut rig = Rig::new();
    let mut input = forward_only();

    rig.run_ticks(&mut input, 60);

    let p = rig.character.position;
    assert!(approx(p.z, 220.0), "Expected z=220, got {}", p.z);
    assert!(approx(p.x, 0.0));
    assert!(approx(p.y, 0.0));
    assert_eq!(rig.character.yaw, 0.0);
    assert_eq!(rig.controller.state(), MovementState::Walk);
}

#[test]
fn walk_backward_reverses_direction() {
    let mut rig = Rig::new();
    let mut input = InputState {
        back: true,
        ..Default::default()
    };

    rig.run_ticks(&mut input, 30);

    assert!(approx(rig.character.position.z, -110.0));
    assert_eq!(rig.controller.state(), MovementState::Walk);
}

#[test]
fn forward_and_back_cancel() {
    let mut rig = Rig::new();
    let mut input = InputState {
        forward: true,
        back: true,
        ..Default::default()
    };

    rig.run_ticks(&mut input, 10);

    assert_eq!(rig.character.position, Vec3::ZERO);
    assert_eq!(rig.controller.state(), MovementState::Idle);
}

#[test]
fn turning_in_place_stays_idle() {
    let mut rig = Rig::new();
    let mut input = InputState {
        turn_right: true,
        ..Default::default()
    };

    rig.run_ticks(&mut input, 60);

    assert!(approx(rig.character.yaw, TAU - 2.5));
    assert_eq!(rig.character.position, Vec3::ZERO);
    assert_eq!(rig.controller.state(), MovementState::Idle);
}

#[test]
fn yaw_wraps_into_one_turn() {
    let mut rig = Rig::new();
    let mut left = InputState {
        turn_left: true,
        ..Default::default()
    };
    // 25 radians: just under four full turns.
    rig.run_ticks(&mut left, 600);
    let yaw = rig.character.yaw;
    assert!((0.0..TAU).contains(&yaw), "yaw {yaw} left [0, TAU)");
    assert!(approx(yaw, 25.0_f32.rem_euclid(TAU)));

    let mut right = InputState {
        turn_right: true,
        ..Default::default()
    };
    rig.run_ticks(&mut right, 1200);
    let yaw = rig.character.yaw;
    assert!((0.0..TAU).contains(&yaw), "yaw {yaw} left [0, TAU)");
    assert!(approx(yaw, (-25.0_f32).rem_euclid(TAU)));
}

#[test]
fn heading_rotates_forward_axis() {
    let mut character = Character::default();
    character.yaw = std::f32::consts::FRAC_PI_2;
    let forward = character.forward();
    assert!(approx(forward.x, 1.0));
    assert!(approx(forward.z, 0.0));
    assert_eq!(forward.y, 0.0);
}

// ============================================================================
// Run coupling
// ============================================================================

#[test]
fn moving_while_turning_runs() {
    let mut rig = Rig::new();
    let mut input = InputState {
        forward: true,
        turn_left: true,
        ..Default::default()
    };

    let before = rig.character.position;
    rig.tick(&mut input);
    let step = (rig.character.position - before).length();

    assert!(approx(step, 480.0 * DT), "Expected run step, got {step}");
    assert!(approx(rig.character.yaw, 2.5 * DT));
    assert_eq!(rig.controller.state(), MovementState::Run);

    rig.run_ticks(&mut input, 59);
    assert!(approx(rig.character.yaw, 2.5));
}

#[test]
fn run_modifier_does_not_change_ground_speed() {
    let mut rig = Rig::new();
    let mut input = InputState {
        forward: true,
        run_modifier: true,
        ..Default::default()
    };

    rig.run_ticks(&mut input, 60);

    assert!(approx(rig.character.position.z, 220.0));
    assert_eq!(rig.controller.state(), MovementState::Walk);
}

#[test]
fn state_requests_reach_the_mixer() {
    let mut rig = Rig::new();
    let mut input = InputState {
        forward: true,
        turn_left: true,
        ..Default::default()
    };

    rig.tick(&mut input);
    assert_eq!(rig.mixer.active_name(), Some(library::RUN));
    assert!(rig.mixer.is_transitioning());

    let mut idle = InputState::default();
    rig.run_ticks(&mut idle, 30);
    assert_eq!(rig.mixer.active_name(), Some(library::IDLE));
    assert!(!rig.mixer.is_transitioning());
}

// ============================================================================
// Jumping
// ============================================================================

#[test]
fn jump_flight_time_matches_ballistics() {
    let mut rig = Rig::new();
    let mut input = InputState {
        jump_requested: true,
        ..Default::default()
    };

    rig.tick(&mut input);
    assert!(!rig.character.grounded);
    assert!(rig.character.position.y > 0.0);

    let mut airborne_ticks = 1;
    let mut apex = 0.0_f32;
    let mut idle = InputState::default();
    while !rig.character.grounded {
        rig.tick(&mut idle);
        apex = apex.max(rig.character.position.y);
        airborne_ticks += 1;
        assert!(airborne_ticks < 120, "character never landed");
    }

    let flight = airborne_ticks as f32 * DT;
    assert!(
        (flight - 0.8).abs() <= 2.0 * DT,
        "Expected ~0.8s of flight, got {flight}"
    );
    assert!((apex - 72.0).abs() < 5.0, "Expected apex near 72, got {apex}");
    assert_eq!(rig.character.position.y, 0.0);
    assert_eq!(rig.character.vertical_velocity, 0.0);
}

#[test]
fn grounded_character_has_zero_vertical_velocity() {
    let mut rig = Rig::new();
    let mut input = forward_only();

    for _ in 0..30 {
        rig.tick(&mut input);
        assert!(rig.character.grounded);
        assert_eq!(rig.character.vertical_velocity, 0.0);
    }
}

#[test]
fn jump_request_while_airborne_is_dropped() {
    let mut rig = Rig::new();
    let mut input = InputState {
        jump_requested: true,
        ..Default::default()
    };
    rig.tick(&mut input);

    let mut idle = InputState::default();
    rig.run_ticks(&mut idle, 10);
    let velocity_before = rig.character.vertical_velocity;

    let mut again = InputState {
        jump_requested: true,
        ..Default::default()
    };
    rig.tick(&mut again);

    assert!(!again.jump_requested, "request must be consumed");
    assert!(rig.character.vertical_velocity < velocity_before);
    assert!(
        (rig.character.vertical_velocity - (velocity_before - 900.0 * DT)).abs() < 1e-3
    );
}

#[test]
fn jump_state_holds_until_clip_finishes() {
    let mut rig = Rig::new();
    let mut input = InputState {
        forward: true,
        jump_requested: true,
        ..Default::default()
    };

    rig.tick(&mut input);
    assert_eq!(rig.controller.state(), MovementState::Jump);
    assert!(rig.controller.is_jump_animating());
    assert_eq!(rig.mixer.active_name(), Some(library::JUMP));

    // Still moving forward mid-air, but the jump clip keeps playing
    rig.run_ticks(&mut input, 20);
    assert_eq!(rig.controller.state(), MovementState::Jump);
    assert_eq!(rig.mixer.active_name(), Some(library::JUMP));

    // Jump clip is 0.8s long
    rig.run_ticks(&mut input, 40);
    assert!(!rig.controller.is_jump_animating());
    assert_eq!(rig.controller.state(), MovementState::Walk);
    assert_eq!(rig.mixer.active_name(), Some(library::WALK));
}

#[test]
fn jump_restarts_clip_on_every_launch() {
    let mut rig = Rig::new();
    let mut jump = InputState {
        jump_requested: true,
        ..Default::default()
    };
    let mut idle = InputState::default();

    rig.tick(&mut jump);
    rig.run_ticks(&mut idle, 70);
    assert!(rig.character.grounded);
    assert_eq!(rig.controller.state(), MovementState::Idle);

    jump.jump_requested = true;
    rig.tick(&mut jump);
    assert_eq!(rig.controller.state(), MovementState::Jump);
    let action = rig.mixer.action(library::JUMP).unwrap();
    assert!(action.enabled);
    assert!(!action.is_finished());
    assert!(action.time <= DT + 1e-6);
}
