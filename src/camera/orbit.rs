use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::input::{Input, MouseButton};

const EPS: f32 = 0.0001;

/// Frame rate the damping factor is expressed against.
const DAMPING_REFERENCE_FPS: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    /// Fraction of the remaining distance covered per 60 Hz tick.
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Largest polar angle from +Y; π/2 keeps the camera above the horizon.
    pub max_polar_angle: f32,
    /// Height above the character's feet that the camera looks at.
    pub follow_height: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    /// Right-drag pan; 1.0 keeps the point under the cursor under it.
    pub pan_speed: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            damping_factor: 0.05,
            min_distance: 10.0,
            max_distance: 2000.0,
            max_polar_angle: FRAC_PI_2,
            follow_height: 60.0,
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            pan_speed: 1.0,
        }
    }
}

impl OrbitSettings {
    fn clamp_radius(&self, radius: f32) -> f32 {
        radius.clamp(self.min_distance, self.max_distance.max(self.min_distance))
    }

    fn clamp_phi(&self, phi: f32) -> f32 {
        phi.clamp(EPS, self.max_polar_angle.clamp(EPS, PI - EPS))
    }
}

/// Damped spherical coordinates around a look target.
///
/// The `desired_*` values are where the user (mouse) and the follow target
/// want the camera to be; the current values chase them exponentially.
/// `pan_offset` is added to the follow point, so a panned view keeps
/// tracking the character from the shifted spot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    pub center: Vec3,
    pub radius: f32,
    /// Azimuth about +Y, zero on +Z.
    pub theta: f32,
    /// Polar angle from +Y.
    pub phi: f32,

    pub desired_center: Vec3,
    pub desired_radius: f32,
    pub desired_theta: f32,
    pub desired_phi: f32,

    pub pan_offset: Vec3,
}

impl OrbitState {
    /// Derives spherical coordinates from an existing camera pose.
    #[must_use]
    pub fn from_camera(position: Vec3, target: Vec3, settings: &OrbitSettings) -> Self {
        let offset = position - target;
        let length = offset.length();
        let (theta, phi) = if length > EPS {
            (offset.x.atan2(offset.z), (offset.y / length).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, FRAC_PI_2)
        };
        let radius = settings.clamp_radius(length);
        let phi = settings.clamp_phi(phi);

        Self {
            center: target,
            radius,
            theta,
            phi,
            desired_center: target,
            desired_radius: radius,
            desired_theta: theta,
            desired_phi: phi,
            pan_offset: Vec3::ZERO,
        }
    }

    /// Camera position for the current coordinates.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.center + spherical_offset(self.radius, self.theta, self.phi)
    }

    /// Adjusts the desired orbit from mouse drag and scroll: left button
    /// rotates, right button pans in the screen plane, scroll zooms.
    /// Movement keys are never read.
    pub fn apply_pointer(&mut self, input: &Input, settings: &OrbitSettings, fov_degrees: f32) {
        let screen_height = input.viewport().y.max(1.0);
        let delta = input.pointer_delta();

        if input.is_button_held(MouseButton::Left) {
            let rotate_per_pixel = 2.0 * PI / screen_height;
            self.desired_theta -= delta.x * rotate_per_pixel * settings.rotate_speed;
            self.desired_phi -= delta.y * rotate_per_pixel * settings.rotate_speed;
        }

        if input.is_button_held(MouseButton::Right) && delta != Vec2::ZERO {
            // World units per pixel at the target distance.
            let half_fov = fov_degrees.to_radians() * 0.5;
            let world_per_pixel = 2.0 * self.radius * half_fov.tan() / screen_height;

            let forward = -spherical_offset(1.0, self.theta, self.phi);
            let right = forward.cross(Vec3::Y).normalize_or_zero();
            let up = right.cross(forward).normalize_or_zero();

            self.pan_offset +=
                (right * -delta.x + up * delta.y) * world_per_pixel * settings.pan_speed;
        }

        let scroll = input.scroll_delta().y;
        if scroll != 0.0 {
            let scale = (1.0 - settings.zoom_speed).powf(scroll.abs());
            if scroll > 0.0 {
                self.desired_radius *= scale;
            } else {
                self.desired_radius /= scale;
            }
        }
    }

    /// Moves the current coordinates toward the desired ones and returns the
    /// camera `(position, look_target)`.
    pub fn update(&mut self, settings: &OrbitSettings, follow_point: Vec3, dt: f32) -> (Vec3, Vec3) {
        self.desired_center = follow_point + self.pan_offset;
        self.desired_radius = settings.clamp_radius(self.desired_radius);
        self.desired_phi = settings.clamp_phi(self.desired_phi);

        let damping = settings.damping_factor.clamp(0.0, 1.0);
        let retention = (1.0 - damping).powf(dt * DAMPING_REFERENCE_FPS);
        let k = 1.0 - retention;

        self.center += (self.desired_center - self.center) * k;
        self.radius += (self.desired_radius - self.radius) * k;
        self.theta += (self.desired_theta - self.theta) * k;
        self.phi += (self.desired_phi - self.phi) * k;

        self.radius = settings.clamp_radius(self.radius);
        self.phi = settings.clamp_phi(self.phi);

        (self.position(), self.center)
    }
}

fn spherical_offset(radius: f32, theta: f32, phi: f32) -> Vec3 {
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vec3::new(
        radius * sin_phi * sin_theta,
        radius * cos_phi,
        radius * sin_phi * cos_theta,
    )
}
