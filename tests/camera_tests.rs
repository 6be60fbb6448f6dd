//! Camera Rig Tests
//!
//! Tests for:
//! - Orbit follow: damped convergence, frame-rate independent damping
//! - Orbit distance and polar angle limits
//! - Right-drag pan on top of the follow point
//! - Free fly: paired translation of camera and target, vertical movement
//! - Mode switching on the camera modifier

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use wayfarer::camera::{CameraMode, CameraRig, CameraSettings, OrbitSettings, OrbitState};
use wayfarer::input::{ButtonState, Input, InputState, MouseButton};

const DT: f32 = 1.0 / 60.0;
const EPSILON: f32 = 1e-3;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn approx_vec(a: Vec3, b: Vec3) -> bool {
    a.distance(b) < 1e-2
}

fn default_rig() -> CameraRig {
    CameraRig::new(
        Vec3::new(0.0, 100.0, 200.0),
        Vec3::ZERO,
        CameraSettings::default(),
    )
}

fn free_fly_input() -> InputState {
    InputState {
        camera_modifier: true,
        ..Default::default()
    }
}

// ============================================================================
// Orbit follow
// ============================================================================

#[test]
fn orbit_is_the_initial_mode() {
    let rig = default_rig();
    assert!(matches!(rig.mode(), CameraMode::OrbitFollow(_)));
    assert!(!rig.is_free_fly());
}

#[test]
fn orbit_target_chases_follow_point() {
    let mut rig = default_rig();
    let pointer = Input::new();
    let follow = Vec3::new(0.0, 60.0, 0.0);

    rig.update(&InputState::default(), &pointer, follow, DT);
    // 5% of the remaining distance per 60 Hz tick
    assert!(approx(rig.target().y, 3.0), "got {}", rig.target().y);

    for _ in 0..600 {
        rig.update(&InputState::default(), &pointer, follow, DT);
    }
    assert!(approx_vec(rig.target(), follow));

    let radius = rig.position().distance(rig.target());
    assert!((radius - Vec3::new(0.0, 100.0, 200.0).length()).abs() < 0.1);
}

#[test]
fn orbit_damping_is_frame_rate_independent() {
    let pointer = Input::new();
    let follow = Vec3::new(50.0, 60.0, -20.0);

    let mut fine = default_rig();
    fine.update(&InputState::default(), &pointer, follow, DT);
    fine.update(&InputState::default(), &pointer, follow, DT);

    let mut coarse = default_rig();
    coarse.update(&InputState::default(), &pointer, follow, 2.0 * DT);

    assert!(approx_vec(fine.target(), coarse.target()));
    assert!(approx_vec(fine.position(), coarse.position()));
}

#[test]
fn orbit_ignores_movement_keys() {
    let mut rig = default_rig();
    let pointer = Input::new();
    let start = rig.position();
    let keys = InputState {
        forward: true,
        turn_left: true,
        jump_held: true,
        run_modifier: true,
        ..Default::default()
    };

    for _ in 0..30 {
        rig.update(&keys, &pointer, Vec3::ZERO, DT);
    }

    assert!(approx_vec(rig.position(), start));
    assert!(approx_vec(rig.target(), Vec3::ZERO));
}

#[test]
fn orbit_zoom_respects_min_distance() {
    let mut rig = default_rig();
    let mut pointer = Input::new();
    pointer.inject_scroll(0.0, 500.0);

    rig.update(&InputState::default(), &pointer, Vec3::ZERO, DT);
    pointer.end_frame();
    for _ in 0..1200 {
        rig.update(&InputState::default(), &pointer, Vec3::ZERO, DT);
    }

    let distance = rig.position().distance(rig.target());
    assert!(approx(distance, 10.0), "Expected min distance 10, got {distance}");
}

#[test]
fn orbit_zoom_respects_max_distance() {
    let mut rig = default_rig();
    let mut pointer = Input::new();
    pointer.inject_scroll(0.0, -500.0);

    rig.update(&InputState::default(), &pointer, Vec3::ZERO, DT);
    pointer.end_frame();
    for _ in 0..1200 {
        rig.update(&InputState::default(), &pointer, Vec3::ZERO, DT);
    }

    let distance = rig.position().distance(rig.target());
    assert!((distance - 2000.0).abs() < 0.5, "got {distance}");
}

#[test]
fn orbit_stays_above_horizon() {
    let mut rig = default_rig();
    let mut pointer = Input::new();
    pointer.inject_resize(800, 600);
    pointer.inject_mouse_button(MouseButton::Left, ButtonState::Pressed);
    pointer.inject_mouse_motion(0.0, -600.0);

    rig.update(&InputState::default(), &pointer, Vec3::ZERO, DT);
    pointer.end_frame();
    for _ in 0..1200 {
        rig.update(&InputState::default(), &pointer, Vec3::ZERO, DT);
    }

    let CameraMode::OrbitFollow(state) = rig.mode() else {
        panic!("expected orbit mode");
    };
    assert!(state.phi <= FRAC_PI_2 + 1e-6);
    assert!(rig.position().y >= rig.target().y - EPSILON);
}

#[test]
fn right_drag_pans_and_keeps_following() {
    let mut rig = default_rig();
    let mut pointer = Input::new();
    pointer.inject_resize(800, 600);
    pointer.inject_mouse_button(MouseButton::Right, ButtonState::Pressed);
    pointer.inject_mouse_motion(100.0, 0.0);

    rig.update(&InputState::default(), &pointer, Vec3::ZERO, DT);
    pointer.end_frame();
    for _ in 0..1200 {
        rig.update(&InputState::default(), &pointer, Vec3::ZERO, DT);
    }

    // Dragging right slides the view left by the distance under the cursor
    let radius = Vec3::new(0.0, 100.0, 200.0).length();
    let half_fov = 75.0_f32.to_radians() * 0.5;
    let pan = 100.0 * 2.0 * radius * half_fov.tan() / 600.0;
    let offset = Vec3::new(-pan, 0.0, 0.0);
    assert!(approx_vec(rig.target(), offset), "target {}", rig.target());

    let follow = Vec3::new(0.0, 0.0, 100.0);
    for _ in 0..1200 {
        rig.update(&InputState::default(), &pointer, follow, DT);
    }
    assert!(approx_vec(rig.target(), follow + offset));
    assert!((rig.position().distance(rig.target()) - radius).abs() < 1e-2);
}

#[test]
fn orbit_state_clamps_initial_pose() {
    let settings = OrbitSettings::default();
    let state = OrbitState::from_camera(Vec3::new(0.0, 0.0, 5000.0), Vec3::ZERO, &settings);
    assert!(approx(state.radius, 2000.0));
    assert!(approx(state.phi, FRAC_PI_2));
}

// ============================================================================
// Free fly
// ============================================================================

#[test]
fn free_fly_moves_camera_and_target_together() {
    let mut rig = default_rig();
    let pointer = Input::new();
    let input = InputState {
        forward: true,
        ..free_fly_input()
    };

    let start_position = rig.position();
    let start_target = rig.target();
    let start_dir = (start_target - start_position).normalize();

    for _ in 0..60 {
        rig.update(&input, &pointer, Vec3::ZERO, DT);
    }

    let moved = rig.position() - start_position;
    assert!(approx_vec(rig.target() - start_target, moved));
    // Flattened view direction is -Z, speed 50 units/s
    assert!(approx_vec(moved, Vec3::new(0.0, 0.0, -50.0)));
    let dir = (rig.target() - rig.position()).normalize();
    assert!(approx_vec(dir, start_dir));
}

#[test]
fn free_fly_strafes_along_right_axis() {
    let mut rig = default_rig();
    let pointer = Input::new();
    let input = InputState {
        turn_right: true,
        ..free_fly_input()
    };

    let start = rig.position();
    for _ in 0..60 {
        rig.update(&input, &pointer, Vec3::ZERO, DT);
    }

    // Looking down -Z, right is +X
    assert!(approx_vec(rig.position() - start, Vec3::new(50.0, 0.0, 0.0)));
}

#[test]
fn free_fly_vertical_movement() {
    let mut rig = default_rig();
    let pointer = Input::new();
    let start = rig.position();

    let up = InputState {
        jump_held: true,
        ..free_fly_input()
    };
    for _ in 0..30 {
        rig.update(&up, &pointer, Vec3::ZERO, DT);
    }
    assert!(approx(rig.position().y - start.y, 25.0));

    let down = InputState {
        run_modifier: true,
        ..free_fly_input()
    };
    for _ in 0..60 {
        rig.update(&down, &pointer, Vec3::ZERO, DT);
    }
    assert!(approx(rig.position().y - start.y, -25.0));
    assert!(approx(rig.position().x, start.x));
    assert!(approx(rig.position().z, start.z));
}

// ============================================================================
// Mode switching
// ============================================================================

#[test]
fn mode_switch_is_immediate() {
    let mut rig = default_rig();
    let pointer = Input::new();

    rig.update(&free_fly_input(), &pointer, Vec3::ZERO, DT);
    assert!(rig.is_free_fly());

    rig.update(&InputState::default(), &pointer, Vec3::ZERO, DT);
    assert!(!rig.is_free_fly());
}

#[test]
fn returning_to_orbit_starts_from_current_pose() {
    let mut rig = default_rig();
    let pointer = Input::new();
    let input = InputState {
        turn_left: true,
        ..free_fly_input()
    };

    for _ in 0..20 {
        rig.update(&input, &pointer, Vec3::ZERO, DT);
    }
    let position = rig.position();
    let target = rig.target();

    // Following the current target, the first orbit tick must not jump
    rig.update(&InputState::default(), &pointer, target, DT);
    assert!(matches!(rig.mode(), CameraMode::OrbitFollow(_)));
    assert!(approx_vec(rig.position(), position));
    assert!(approx_vec(rig.target(), target));
}
