//! Field-of-view based camera distances, clip planes, and orbit limits
//! sized to an object's extent.

/// Smallest near plane ever produced, to keep depth precision sane at
/// zero extent.
pub const MIN_NEAR_PLANE: f32 = 1e-4;

/// Far plane never drops below this.
pub const MIN_FAR_PLANE: f32 = 1000.0;

/// Far plane multiplier over the camera distance.
const FAR_PLANE_SCALE: f32 = 20.0;

/// Raw distance at which an object of `max_extent` spans the vertical field
/// of view: `|max_extent / 2 / tan(fov / 2)|`.
#[must_use]
pub fn fov_distance(max_extent: f32, vertical_fov: f32) -> f32 {
    (max_extent / 2.0 / (vertical_fov / 2.0).tan()).abs()
}

/// [`fov_distance`] scaled by `margin` and floored at `floor`.
///
/// Non-finite intermediate results (zero FOV, NaN extent) collapse to
/// `floor`, so the returned distance is always finite and positive when
/// `floor` is.
#[must_use]
pub fn framing_distance(
    max_extent: f32,
    vertical_fov: f32,
    margin: f32,
    floor: f32,
) -> f32 {
    let distance = fov_distance(max_extent, vertical_fov) * margin;
    if distance.is_finite() {
        distance.max(floor)
    } else {
        floor
    }
}

/// Distance used when focusing a sub-object: the larger of the FOV fit and
/// the raw extent, both scaled by `margin`, then floored.
#[must_use]
pub fn focus_distance(
    max_extent: f32,
    vertical_fov: f32,
    margin: f32,
    floor: f32,
) -> f32 {
    let by_extent = max_extent * margin;
    let distance = framing_distance(max_extent, vertical_fov, margin, floor);
    if by_extent.is_finite() {
        distance.max(by_extent)
    } else {
        distance
    }
}

/// Near and far clip plane distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlanes {
    /// Near plane distance.
    pub near: f32,
    /// Far plane distance.
    pub far: f32,
}

impl ClipPlanes {
    /// Planes for viewing a whole model: a near plane small enough to zoom
    /// into components and a far plane well behind the framing distance.
    #[must_use]
    pub fn for_model(max_extent: f32, distance: f32) -> Self {
        Self {
            near: (max_extent / 10_000.0).max(MIN_NEAR_PLANE),
            far: (distance * FAR_PLANE_SCALE).max(MIN_FAR_PLANE),
        }
    }

    /// Tighter planes for close inspection of a focused sub-object.
    #[must_use]
    pub fn for_focus(max_extent: f32, distance: f32) -> Self {
        Self {
            near: (max_extent / 1000.0).max(1e-3).min(0.01),
            far: (distance * FAR_PLANE_SCALE).max(MIN_FAR_PLANE),
        }
    }
}

/// Orbit distance bounds for the controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLimits {
    /// Closest the camera may dolly to the target.
    pub min_distance: f32,
    /// Farthest the camera may dolly from the target.
    pub max_distance: f32,
}

impl OrbitLimits {
    /// Limits for a freshly loaded model: very close inspection allowed,
    /// generous pull-back.
    #[must_use]
    pub fn for_model(max_extent: f32, distance: f32) -> Self {
        Self {
            min_distance: (max_extent * 0.001).max(MIN_NEAR_PLANE),
            max_distance: (distance * 2.0).max(max_extent * 50.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOV_75: f32 = 75.0 * std::f32::consts::PI / 180.0;

    #[test]
    fn zero_extent_framing_uses_floor() {
        let d = framing_distance(0.0, FOV_75, 1.2, 0.2);
        assert_eq!(d, 0.2);
        let d = focus_distance(0.0, FOV_75, 1.2, 0.2);
        assert_eq!(d, 0.2);
    }

    #[test]
    fn focus_distance_prefers_extent_for_wide_fov() {
        // 1 / tan(37.5°) ≈ 1.303, × 1.2 ≈ 1.56 < 2 × 1.2
        let fov_only = framing_distance(2.0, FOV_75, 1.2, 0.2);
        assert!((fov_only - 1.564).abs() < 1e-2);
        let d = focus_distance(2.0, FOV_75, 1.2, 0.2);
        assert!((d - 2.4).abs() < 1e-6);
    }

    #[test]
    fn narrow_fov_distance_wins_over_extent() {
        let fov = 10.0_f32.to_radians();
        let d = focus_distance(2.0, fov, 1.2, 0.2);
        assert!((d - fov_distance(2.0, fov) * 1.2).abs() < 1e-4);
        assert!(d > 2.4);
    }

    #[test]
    fn degenerate_fov_falls_back_to_floor() {
        assert_eq!(framing_distance(1.0, 0.0, 1.5, 0.2), 0.2);
        assert_eq!(framing_distance(f32::NAN, FOV_75, 1.5, 0.2), 0.2);
    }

    #[test]
    fn model_clip_planes_scale_with_extent() {
        let small = ClipPlanes::for_model(0.0, 0.2);
        assert_eq!(small.near, MIN_NEAR_PLANE);
        assert_eq!(small.far, MIN_FAR_PLANE);

        let large = ClipPlanes::for_model(100_000.0, 200_000.0);
        assert_eq!(large.near, 10.0);
        assert_eq!(large.far, 4_000_000.0);
    }

    #[test]
    fn focus_clip_near_is_clamped() {
        assert_eq!(ClipPlanes::for_focus(0.0, 1.0).near, 1e-3);
        assert_eq!(ClipPlanes::for_focus(5.0, 1.0).near, 5e-3);
        assert_eq!(ClipPlanes::for_focus(500.0, 1.0).near, 0.01);
    }

    #[test]
    fn orbit_limits_bracket_framing_distance() {
        let limits = OrbitLimits::for_model(2.0, 3.9);
        assert!(limits.min_distance < 3.9);
        assert!(limits.max_distance > 3.9);
        assert_eq!(limits.max_distance, 100.0);
    }
}
