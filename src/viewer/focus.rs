//! Double-click pick and focus.
//!
//! Two states: idle (no focus) and focused. A hit on a mesh node flies
//! the camera to frame it and outlines it; a miss while focused flies back
//! to the view recorded before the first focus.

use glam::{Vec2, Vec3};
use web_time::{Duration, Instant};

use super::{ClipMode, FramedRegion, SelectionHighlight, ViewerSession};
use crate::camera::CameraPose;
use crate::geometry::{focus_distance, ClipPlanes};
use crate::options::HistoryPolicy;
use crate::scene::NodeId;

/// What a double-click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// No model attached or the surface has no area; nothing changed.
    Ignored,
    /// Empty space with no focus to cancel; nothing changed.
    Missed,
    /// A sub-object was hit and the camera is moving to frame it.
    Focused {
        /// The mesh node that was hit.
        node: NodeId,
        /// Its display name.
        name: String,
    },
    /// Empty space while focused; the camera is returning to the
    /// pre-focus view.
    Restored,
}

/// One-slot memory of the camera pose before focusing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FocusHistory {
    slot: Option<CameraPose>,
}

impl FocusHistory {
    /// Store `pose` according to `policy`. Returns whether the slot was
    /// written.
    pub fn record(&mut self, pose: CameraPose, policy: HistoryPolicy) -> bool {
        if policy == HistoryPolicy::PreserveOriginal && self.slot.is_some() {
            return false;
        }
        self.slot = Some(pose);
        true
    }

    /// Remove and return the stored pose.
    pub fn take(&mut self) -> Option<CameraPose> {
        self.slot.take()
    }

    /// The stored pose, if any.
    #[must_use]
    pub fn peek(&self) -> Option<CameraPose> {
        self.slot
    }

    /// Forget the stored pose.
    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// Whether no pose is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

impl ViewerSession {
    /// Handle a double-click at surface pixel `screen`.
    ///
    /// Casts a ray through the point against the active model's meshes.
    /// The nearest hit is focused; empty space cancels an active focus.
    /// Accepted during a running transition, which it supersedes from the
    /// current interpolated pose.
    pub fn on_double_click(&mut self, screen: Vec2, now: Instant) -> PickOutcome {
        let Some(model) = self.active.as_ref() else {
            log::debug!("pick ignored: no model attached");
            return PickOutcome::Ignored;
        };
        let Some(ndc) = self.viewport.screen_to_ndc(screen) else {
            log::debug!("pick ignored: zero-size surface");
            return PickOutcome::Ignored;
        };

        let ray = self.viewport.camera.ray_through_ndc(ndc);
        let Some(hit) = model.graph.raycast(&ray) else {
            return self.cancel_focus(now);
        };
        log::debug!(
            "pick hit node {:?} at distance {:.4}",
            hit.node,
            hit.distance
        );
        self.focus_node(hit.node, now)
    }

    /// Fly to frame `node` and outline it.
    fn focus_node(&mut self, node: NodeId, now: Instant) -> PickOutcome {
        let Some(model) = self.active.as_ref() else {
            return PickOutcome::Ignored;
        };
        let focus = &self.options.focus;
        let bounds = model.graph.subtree_bounds(node);
        let name = model
            .graph
            .node(node)
            .map(|n| n.name.clone())
            .unwrap_or_default();
        let highlight = SelectionHighlight::for_node(
            &model.graph,
            node,
            focus.highlight_color,
        );

        let camera = &self.viewport.camera;
        let current = camera.pose();
        let snapshot = CameraPose {
            eye: camera.eye,
            target: self.viewport.controls.target,
        };
        if self.history.record(snapshot, focus.history_policy) {
            log::debug!("focus history recorded");
        }

        let distance = focus_distance(
            bounds.max_extent,
            camera.fovy_radians(),
            focus.focus_margin,
            focus.min_distance,
        );
        let direction = (current.eye - current.target).normalize_or(Vec3::Z);
        let end = CameraPose {
            eye: bounds.center + direction * distance,
            target: bounds.center,
        };
        let duration = Duration::from_millis(focus.focus_duration_ms);

        self.viewport
            .camera
            .set_clip_planes(ClipPlanes::for_focus(bounds.max_extent, distance));
        self.framed = Some(FramedRegion {
            max_extent: bounds.max_extent,
            mode: ClipMode::Focus,
        });
        self.highlight = Some(highlight);
        self.viewport.controls.reset_motion();
        self.animator.begin(current, end, duration, now);

        log::debug!(
            "focusing '{name}': extent {:.4}, distance {distance:.4}",
            bounds.max_extent
        );
        PickOutcome::Focused { node, name }
    }

    /// Fly back to the pre-focus view, if there is one.
    fn cancel_focus(&mut self, now: Instant) -> PickOutcome {
        let Some(previous) = self.history.take() else {
            return PickOutcome::Missed;
        };
        self.highlight = None;

        if let Some(model) = &self.active {
            let extent = model.bounds.max_extent;
            let distance = previous.eye.distance(previous.target);
            self.viewport
                .camera
                .set_clip_planes(ClipPlanes::for_model(extent, distance));
            self.framed = Some(FramedRegion {
                max_extent: extent,
                mode: ClipMode::Model,
            });
        }

        let duration = Duration::from_millis(self.options.focus.return_duration_ms);
        self.viewport.controls.reset_motion();
        self.animator
            .begin(self.viewport.camera.pose(), previous, duration, now);
        log::debug!("focus cancelled, returning to previous view");
        PickOutcome::Restored
    }
}
