use glam::{Mat4, Vec2, Vec3};

use crate::geometry::{ClipPlanes, Ray};
use crate::options::CameraOptions;

/// Eye position and look-at target: the part of the camera that
/// transitions animate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
}

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Camera looking at the origin from the configured initial eye.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        Self {
            eye: Vec3::from_array(options.initial_eye),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Vertical field of view in radians.
    #[must_use]
    pub fn fovy_radians(&self) -> f32 {
        self.fovy.to_radians()
    }

    /// Current eye and target.
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            eye: self.eye,
            target: self.target,
        }
    }

    /// Move the eye and target, leaving projection untouched.
    pub fn set_pose(&mut self, pose: CameraPose) {
        self.eye = pose.eye;
        self.target = pose.target;
    }

    /// Replace the near/far planes.
    pub fn set_clip_planes(&mut self, planes: ClipPlanes) {
        self.znear = planes.near;
        self.zfar = planes.far;
    }

    /// Distance from eye to target.
    #[must_use]
    pub fn distance_to_target(&self) -> f32 {
        self.eye.distance(self.target)
    }

    /// View matrix.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Projection matrix ([0,1] depth range).
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }

    /// Ray from the eye through a point in normalized device coordinates
    /// (`x` right, `y` up, both in [-1, 1]).
    ///
    /// Built from the camera basis rather than by unprojecting through the
    /// inverse view-projection, so a huge far/near ratio costs no
    /// precision.
    #[must_use]
    pub fn ray_through_ndc(&self, ndc: Vec2) -> Ray {
        let forward = (self.target - self.eye).normalize_or(Vec3::NEG_Z);
        let right = forward.cross(self.up).normalize_or(Vec3::X);
        let up = right.cross(forward);

        let half_height = (self.fovy_radians() / 2.0).tan();
        let half_width = half_height * self.aspect;
        let direction =
            forward + right * (ndc.x * half_width) + up * (ndc.y * half_height);
        Ray::new(self.eye, direction)
    }
}
