//! Owner of the single in-flight camera transition.

use web_time::{Duration, Instant};

use super::easing::EasingFunction;
use super::transition::CameraTransition;
use crate::camera::CameraPose;

/// Runs at most one [`CameraTransition`] at a time.
///
/// Starting a transition while another is running drops the old one
/// without blending; the newest request always wins. There is no abort:
/// cancellation only happens by superseding.
#[derive(Debug, Clone, Default)]
pub struct CameraAnimator {
    active: Option<CameraTransition>,
    easing: EasingFunction,
}

impl CameraAnimator {
    /// Create an idle animator using `easing` for every transition.
    #[must_use]
    pub fn new(easing: EasingFunction) -> Self {
        Self {
            active: None,
            easing,
        }
    }

    /// Start moving from `from` to `to` over `duration`, superseding any
    /// running transition.
    ///
    /// `from` must be the camera's current pose so motion stays continuous
    /// when a running transition is replaced mid-flight.
    pub fn begin(
        &mut self,
        from: CameraPose,
        to: CameraPose,
        duration: Duration,
        now: Instant,
    ) {
        if self.active.is_some() {
            log::debug!("camera transition superseded");
        }
        self.active = Some(CameraTransition::new(
            from,
            to,
            duration,
            self.easing,
            now,
        ));
    }

    /// Advance to `now`. Returns the pose to apply this frame, or `None`
    /// when idle. On the final step the exact end pose is returned and the
    /// animator becomes idle.
    pub fn step(&mut self, now: Instant) -> Option<CameraPose> {
        let transition = self.active.as_ref()?;
        let pose = transition.sample(now);
        if transition.is_complete(now) {
            self.active = None;
        }
        Some(pose)
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The running transition, if any.
    #[must_use]
    pub fn current(&self) -> Option<&CameraTransition> {
        self.active.as_ref()
    }

    /// Curve used for new transitions.
    #[must_use]
    pub fn easing(&self) -> EasingFunction {
        self.easing
    }

    /// Change the curve for subsequent transitions.
    pub fn set_easing(&mut self, easing: EasingFunction) {
        self.easing = easing;
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
    fn runs_to_completion_and_goes_idle() {
        let now = Instant::now();
        let mut animator = CameraAnimator::default();
        let end = pose(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.3, 0.0, -0.7));
        animator.begin(
            pose(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO),
            end,
            Duration::from_millis(600),
            now,
        );
        assert!(animator.is_active());

        let mid = animator.step(now + Duration::from_millis(300));
        assert!(mid.is_some());
        assert!(animator.is_active());

        let last = animator.step(now + Duration::from_millis(600));
        assert_eq!(last, Some(end));
        assert!(!animator.is_active());
        assert_eq!(animator.step(now + Duration::from_millis(700)), None);
    }

    #[test]
    fn superseding_restarts_from_supplied_pose() {
        let now = Instant::now();
        let mut animator = CameraAnimator::default();
        let pos0 = pose(Vec3::ZERO, Vec3::ZERO);
        let pos1 = pose(Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO);
        animator.begin(pos0, pos1, Duration::from_millis(1000), now);

        let halfway = now + Duration::from_millis(500);
        let p_mid = animator.step(halfway).unwrap();
        assert!((p_mid.eye.x - 5.0).abs() < 1e-4);

        let dest = pose(Vec3::new(0.0, 10.0, 0.0), Vec3::Y);
        animator.begin(p_mid, dest, Duration::from_millis(1000), halfway);
        let current = animator.current().unwrap();
        assert_eq!(current.start, p_mid);
        assert_eq!(current.end, dest);

        // First sample of B is the mid pose, not pos0.
        assert_eq!(animator.step(halfway), Some(p_mid));
    }

    #[test]
    fn idle_animator_yields_nothing() {
        let mut animator = CameraAnimator::new(EasingFunction::Linear);
        assert_eq!(animator.easing(), EasingFunction::Linear);
        assert!(animator.step(Instant::now()).is_none());
    }
}
