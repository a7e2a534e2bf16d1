//! A single time-bounded camera move, sampled by wall-clock time.

use web_time::{Duration, Instant};

use super::easing::EasingFunction;
use crate::camera::CameraPose;

/// Interpolation of camera eye and look-at target between two poses.
///
/// This is a value object: it holds no reference to the camera and is
/// polled with the current time by [`CameraAnimator`](super::CameraAnimator).
#[derive(Debug, Clone, PartialEq)]
pub struct CameraTransition {
    /// Pose at `start_time`.
    pub start: CameraPose,
    /// Pose at `start_time + duration`.
    pub end: CameraPose,
    /// When the transition began.
    pub start_time: Instant,
    /// Total length of the move.
    pub duration: Duration,
    /// Curve applied to raw progress before interpolating.
    pub easing: EasingFunction,
}

impl CameraTransition {
    /// Create a transition from `start` to `end` beginning at `now`.
    #[must_use]
    pub fn new(
        start: CameraPose,
        end: CameraPose,
        duration: Duration,
        easing: EasingFunction,
        now: Instant,
    ) -> Self {
        Self {
            start,
            end,
            start_time: now,
            duration,
            easing,
        }
    }

    /// Raw progress `clamp((now - start) / duration, 0, 1)`. A zero
    /// duration is complete immediately.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start_time);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Whether `now` is at or past the end of the transition.
    #[must_use]
    pub fn is_complete(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Pose at `now`. Eye and target are lerped with the eased progress;
    /// at completion the end pose is returned exactly.
    #[must_use]
    pub fn sample(&self, now: Instant) -> CameraPose {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.end;
        }
        let eased = self.easing.evaluate(t);
        CameraPose {
            eye: self.start.eye.lerp(self.end.eye, eased),
            target: self.start.target.lerp(self.end.target, eased),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn pose(eye: Vec3, target: Vec3) -> CameraPose {
        CameraPose { eye, target }
    }

    #[test]
    fn sample_uses_eased_progress() {
        let now = Instant::now();
        let t = CameraTransition::new(
            pose(Vec3::ZERO, Vec3::ZERO),
            pose(Vec3::new(8.0, 0.0, 0.0), Vec3::new(0.0, 4.0, 0.0)),
            Duration::from_millis(400),
            EasingFunction::QuadraticInOut,
            now,
        );
        // Quarter of the way in time, eased to 0.125.
        let p = t.sample(now + Duration::from_millis(100));
        assert!((p.eye.x - 1.0).abs() < 1e-5);
        assert!((p.target.y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn completion_snaps_exactly() {
        let now = Instant::now();
        let end = pose(Vec3::new(0.1, 0.2, 0.3), Vec3::new(-1.7, 3.3, 0.9));
        let t = CameraTransition::new(
            pose(Vec3::new(13.0, -2.0, 7.0), Vec3::ONE),
            end,
            Duration::from_millis(600),
            EasingFunction::QuadraticInOut,
            now,
        );
        assert!(!t.is_complete(now + Duration::from_millis(599)));
        assert!(t.is_complete(now + Duration::from_millis(600)));
        assert_eq!(t.sample(now + Duration::from_secs(5)), end);
    }

    #[test]
    fn zero_duration_is_immediately_complete() {
        let now = Instant::now();
        let end = pose(Vec3::X, Vec3::Y);
        let t = CameraTransition::new(
            pose(Vec3::ZERO, Vec3::ZERO),
            end,
            Duration::ZERO,
            EasingFunction::Linear,
            now,
        );
        assert_eq!(t.progress(now), 1.0);
        assert_eq!(t.sample(now), end);
    }

    #[test]
    fn time_before_start_clamps_to_start() {
        let now = Instant::now();
        let start = pose(Vec3::Z, Vec3::ZERO);
        let t = CameraTransition::new(
            start,
            pose(Vec3::X, Vec3::Y),
            Duration::from_millis(500),
            EasingFunction::QuadraticInOut,
            now + Duration::from_millis(50),
        );
        assert_eq!(t.progress(now), 0.0);
        assert_eq!(t.sample(now), start);
    }
}
