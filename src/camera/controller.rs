use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use crate::camera::core::Camera;
use crate::geometry::OrbitLimits;
use crate::options::ControlOptions;

/// Keeps the polar angle off the poles so the view basis stays defined.
const POLAR_EPSILON: f32 = 1e-6;

/// Pending motion below this magnitude is treated as settled.
const SETTLE_EPSILON: f32 = 1e-6;

/// Orbit controller: spins and dollies the camera around a target point.
///
/// Gestures only accumulate pending motion; [`OrbitControls::update`]
/// applies it once per frame, decaying it by the damping factor.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    /// Point the camera orbits around and looks at.
    pub target: Vec3,
    /// Closest allowed eye-to-target distance.
    pub min_distance: f32,
    /// Farthest allowed eye-to-target distance.
    pub max_distance: f32,
    /// Fraction of pending motion applied per update; `0` applies all of
    /// it at once.
    pub damping_factor: f32,
    rotate_speed: f32,
    zoom_speed: f32,
    /// Pending (azimuth, polar) rotation in radians.
    spherical_delta: Vec2,
    /// Pending radius multiplier.
    scale: f32,
}

impl OrbitControls {
    /// Create controls targeting the origin.
    #[must_use]
    pub fn new(options: &ControlOptions) -> Self {
        Self {
            target: Vec3::ZERO,
            min_distance: options.min_distance,
            max_distance: options.max_distance.max(options.min_distance),
            damping_factor: options.damping_factor.clamp(0.0, 1.0),
            rotate_speed: options.rotate_speed,
            zoom_speed: options.zoom_speed,
            spherical_delta: Vec2::ZERO,
            scale: 1.0,
        }
    }

    /// Replace the distance limits.
    pub fn set_limits(&mut self, limits: OrbitLimits) {
        self.min_distance = limits.min_distance;
        self.max_distance = limits.max_distance.max(limits.min_distance);
    }

    /// Queue a rotation for a pointer drag of `delta` pixels on a surface
    /// `surface_height` pixels tall. A full-height drag spins a full turn.
    pub fn rotate(&mut self, delta: Vec2, surface_height: f32) {
        if surface_height <= 0.0 {
            return;
        }
        let radians_per_px = 2.0 * PI / surface_height * self.rotate_speed;
        self.spherical_delta -= delta * radians_per_px;
    }

    /// Queue a dolly. Positive `delta` moves toward the target.
    pub fn zoom(&mut self, delta: f32) {
        let step = 0.95_f32.powf(self.zoom_speed * delta.abs());
        if delta > 0.0 {
            self.scale *= step;
        } else if delta < 0.0 {
            self.scale /= step;
        }
    }

    /// Whether gestures are still waiting to be applied.
    #[must_use]
    pub fn has_pending_motion(&self) -> bool {
        self.spherical_delta.abs().max_element() > SETTLE_EPSILON
            || (self.scale - 1.0).abs() > SETTLE_EPSILON
    }

    /// Drop queued motion without applying it.
    pub fn reset_motion(&mut self) {
        self.spherical_delta = Vec2::ZERO;
        self.scale = 1.0;
    }

    /// Apply pending motion and distance limits to `camera`.
    ///
    /// Leaves the camera untouched when nothing is pending and the current
    /// distance already lies within the limits. Returns whether the eye
    /// moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        camera.target = self.target;

        let offset = camera.eye - self.target;
        let radius = offset.length();
        let clamped = self.clamp_radius(radius * self.scale);
        if !self.has_pending_motion() && clamped == radius {
            self.reset_motion();
            return false;
        }

        let (theta, phi) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI / 2.0)
        };

        let applied = if self.damping_factor > 0.0 {
            self.spherical_delta * self.damping_factor
        } else {
            self.spherical_delta
        };
        let theta = theta + applied.x;
        let phi = (phi + applied.y).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();
        let new_offset =
            Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
                * clamped;
        camera.eye = self.target + new_offset;

        if self.damping_factor > 0.0 {
            self.spherical_delta *= 1.0 - self.damping_factor;
            if self.spherical_delta.abs().max_element() <= SETTLE_EPSILON {
                self.spherical_delta = Vec2::ZERO;
            }
        } else {
            self.spherical_delta = Vec2::ZERO;
        }
        self.scale = 1.0;
        true
    }

    fn clamp_radius(&self, radius: f32) -> f32 {
        radius.max(self.min_distance).min(self.max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CameraOptions;

    fn setup(damping: f32) -> (OrbitControls, Camera) {
        let options = ControlOptions {
            damping_factor: damping,
            ..ControlOptions::default()
        };
        let controls = OrbitControls::new(&options);
        let camera = Camera::from_options(&CameraOptions::default(), 1.0);
        (controls, camera)
    }

    #[test]
    fn idle_update_leaves_camera_untouched() {
        let (mut controls, mut camera) = setup(0.05);
        let before = camera.eye;
        assert!(!controls.update(&mut camera));
        assert_eq!(camera.eye, before);
    }

    #[test]
    fn rotate_keeps_distance() {
        let (mut controls, mut camera) = setup(0.0);
        controls.rotate(Vec2::new(100.0, 30.0), 600.0);
        assert!(controls.update(&mut camera));
        assert!((camera.distance_to_target() - 10.0).abs() < 1e-4);
        assert!(camera.eye.x.abs() > 0.1);
        assert!(!controls.has_pending_motion());
    }

    #[test]
    fn damping_spreads_motion_over_frames() {
        let (mut controls, mut camera) = setup(0.5);
        controls.rotate(Vec2::new(150.0, 0.0), 600.0);
        assert!(controls.update(&mut camera));
        let first = camera.eye;
        assert!(controls.has_pending_motion());
        assert!(controls.update(&mut camera));
        assert_ne!(camera.eye, first);
    }

    #[test]
    fn zoom_is_clamped_to_limits() {
        let (mut controls, mut camera) = setup(0.0);
        controls.set_limits(OrbitLimits {
            min_distance: 9.0,
            max_distance: 12.0,
        });
        for _ in 0..50 {
            controls.zoom(1.0);
        }
        let _ = controls.update(&mut camera);
        assert!((camera.distance_to_target() - 9.0).abs() < 1e-4);

        for _ in 0..100 {
            controls.zoom(-1.0);
        }
        let _ = controls.update(&mut camera);
        assert!((camera.distance_to_target() - 12.0).abs() < 1e-4);
    }

    #[test]
    fn out_of_range_distance_is_pulled_in_without_input() {
        let (mut controls, mut camera) = setup(0.05);
        controls.set_limits(OrbitLimits {
            min_distance: 1.0,
            max_distance: 5.0,
        });
        assert!(controls.update(&mut camera));
        assert!((camera.distance_to_target() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn inverted_limits_do_not_panic() {
        let (mut controls, mut camera) = setup(0.0);
        controls.set_limits(OrbitLimits {
            min_distance: 20.0,
            max_distance: 2.0,
        });
        assert_eq!(controls.max_distance, 20.0);
        let _ = controls.update(&mut camera);
        assert!((camera.distance_to_target() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn polar_angle_never_flips_over_pole() {
        let (mut controls, mut camera) = setup(0.0);
        controls.rotate(Vec2::new(0.0, 10_000.0), 600.0);
        let _ = controls.update(&mut camera);
        assert!(camera.eye.is_finite());
        assert!(camera.eye.y > 9.99);
    }
}
