//! The viewer session: single owner of all mutable viewer state.
//!
//! [`ViewerSession`] holds the viewport (camera, orbit controls, surface
//! size), the active model, the selection highlight, the focus history,
//! and the camera animator. Its methods are split across submodules by
//! concern:
//!
//! - `lifecycle`: loading, replacing, and unloading the active model
//! - `focus`: double-click picking and the focus/cancel-back state machine
//!
//! The host drives it with [`ViewerSession::execute`] for input and
//! [`ViewerSession::tick`] once per frame.

mod command;
mod focus;
mod highlight;
mod lifecycle;
mod viewport;

pub use command::ViewerCommand;
pub use focus::{FocusHistory, PickOutcome};
use glam::Vec2;
pub use highlight::SelectionHighlight;
pub use lifecycle::{
    ActiveModel, AssetSource, DecodeError, LoadOutcome, LoadState, LoadTicket,
    MeshProvider,
};
pub use viewport::Viewport;
use web_time::Instant;

use crate::animation::CameraAnimator;
use crate::camera::{Camera, OrbitControls};
use crate::catalog::ModelMetadata;
use crate::geometry::ClipPlanes;
use crate::options::Options;

/// Which clip-plane rule the current framing was computed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClipMode {
    Model,
    Focus,
}

/// Extent of whatever the camera is currently framed on, kept so a
/// resize can recompute clip planes.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FramedRegion {
    max_extent: f32,
    mode: ClipMode,
}

impl FramedRegion {
    fn clip_planes(self, distance: f32) -> ClipPlanes {
        match self.mode {
            ClipMode::Model => ClipPlanes::for_model(self.max_extent, distance),
            ClipMode::Focus => ClipPlanes::for_focus(self.max_extent, distance),
        }
    }
}

/// Interactive 3D asset viewer session.
///
/// Owns at most one [`ActiveModel`]. All state changes go through its
/// methods; nothing is shared or global.
///
/// ```ignore
/// let mut session = ViewerSession::new(Options::default(), 1280, 720, Box::new(decoder));
/// session.load_model(metadata, &bytes)?;
/// loop {
///     for event in events {
///         if let Some(cmd) = input.handle_event(event, Instant::now()) {
///             let _ = session.execute(cmd, Instant::now());
///         }
///     }
///     let _ = session.tick(Instant::now());
/// }
/// ```
pub struct ViewerSession {
    viewport: Viewport,
    active: Option<ActiveModel>,
    highlight: Option<SelectionHighlight>,
    animator: CameraAnimator,
    history: FocusHistory,
    framed: Option<FramedRegion>,
    load_state: LoadState,
    /// Latest load request; completions for any other ticket are stale.
    pending: Option<(LoadTicket, ModelMetadata)>,
    next_ticket: u64,
    decoder: Box<dyn MeshProvider>,
    options: Options,
}

impl ViewerSession {
    /// Create an empty session for a `width` x `height` surface.
    #[must_use]
    pub fn new(
        options: Options,
        width: u32,
        height: u32,
        decoder: Box<dyn MeshProvider>,
    ) -> Self {
        log::info!("viewer session created ({width}x{height})");
        let options = options.clamped();
        Self {
            viewport: Viewport::new(&options, width, height),
            active: None,
            highlight: None,
            animator: CameraAnimator::new(options.focus.easing),
            history: FocusHistory::default(),
            framed: None,
            load_state: LoadState::Idle,
            pending: None,
            next_ticket: 0,
            decoder,
            options,
        }
    }

    /// Advance one frame. A running transition owns the camera; otherwise
    /// pending orbit motion is applied. Returns whether the camera moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(pose) = self.animator.step(now) {
            self.viewport.camera.set_pose(pose);
            self.viewport.controls.target = pose.target;
            return true;
        }
        self.viewport.controls.update(&mut self.viewport.camera)
    }

    /// Dispatch one command. Picks report their outcome; every other
    /// command returns `None`.
    pub fn execute(
        &mut self,
        command: ViewerCommand,
        now: Instant,
    ) -> Option<PickOutcome> {
        match command {
            ViewerCommand::Orbit { delta } => {
                if !self.animator.is_active() {
                    self.viewport
                        .controls
                        .rotate(delta, self.viewport.height as f32);
                }
                None
            }
            ViewerCommand::Zoom { delta } => {
                if !self.animator.is_active() {
                    self.viewport.controls.zoom(delta);
                }
                None
            }
            ViewerCommand::Pick { x, y } => {
                Some(self.on_double_click(Vec2::new(x, y), now))
            }
            ViewerCommand::Resize { width, height } => {
                self.resize(width, height);
                None
            }
        }
    }

    /// Track a new render surface size: updates the aspect ratio and
    /// recomputes clip planes for whatever is currently framed.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
        if let Some(framed) = self.framed {
            let distance = self.viewport.camera.distance_to_target();
            self.viewport
                .camera
                .set_clip_planes(framed.clip_planes(distance));
        }
        log::debug!("viewport resized to {width}x{height}");
    }

    // ── Accessors ──

    /// Camera, controls, and surface size.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The perspective camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.viewport.camera
    }

    /// The orbit controller.
    #[must_use]
    pub fn controls(&self) -> &OrbitControls {
        &self.viewport.controls
    }

    /// The displayed model, if any.
    #[must_use]
    pub fn active_model(&self) -> Option<&ActiveModel> {
        self.active.as_ref()
    }

    /// Outline around the focused sub-object, if focused.
    #[must_use]
    pub fn highlight(&self) -> Option<&SelectionHighlight> {
        self.highlight.as_ref()
    }

    /// The one-slot pre-focus view memory.
    #[must_use]
    pub fn focus_history(&self) -> &FocusHistory {
        &self.history
    }

    /// Progress of the most recent load request.
    #[must_use]
    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Whether a camera transition currently owns the view.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.animator.is_active()
    }

    /// The camera animator.
    #[must_use]
    pub fn animator(&self) -> &CameraAnimator {
        &self.animator
    }

    /// Options the session was created with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }
}

impl Drop for ViewerSession {
    fn drop(&mut self) {
        self.highlight = None;
        if let Some(model) = self.active.take() {
            log::debug!("tearing down session with model {}", model.metadata.id);
        }
        log::info!("viewer session closed");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use glam::Vec3;

    use super::{DecodeError, MeshProvider};
    use crate::catalog::ModelMetadata;
    use crate::scene::{Mesh, SceneNode};

    /// Decodes every non-empty payload into the same scene.
    pub(crate) struct FixedScene(pub(crate) fn() -> SceneNode);

    impl MeshProvider for FixedScene {
        fn decode(&self, _bytes: &[u8]) -> Result<SceneNode, DecodeError> {
            Ok((self.0)())
        }
    }

    /// Rejects every payload.
    pub(crate) struct Corrupt;

    impl MeshProvider for Corrupt {
        fn decode(&self, _bytes: &[u8]) -> Result<SceneNode, DecodeError> {
            Err(DecodeError("bad magic".to_owned()))
        }
    }

    /// A single 2x2x2 cube centered on the origin.
    pub(crate) fn unit_cube() -> SceneNode {
        SceneNode::with_mesh("cube", Mesh::cuboid(Vec3::ZERO, Vec3::ONE))
    }

    pub(crate) fn metadata(id: u64) -> ModelMetadata {
        ModelMetadata {
            id,
            name: format!("model-{id}"),
            description: String::new(),
            file_url: format!("/uploads/{id}.glb"),
            file_name: format!("{id}.glb"),
            archive_id: None,
            uploaded_by: 1,
            file_size: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use web_time::Duration;

    use super::testing::{metadata, unit_cube, FixedScene};
    use super::*;

    fn session() -> ViewerSession {
        ViewerSession::new(
            Options::default(),
            600,
            600,
            Box::new(FixedScene(unit_cube)),
        )
    }

    #[test]
    fn orbit_moves_camera_over_ticks() {
        let mut s = session();
        s.load_model(metadata(1), b"cube").unwrap();
        let before = s.camera().eye;
        let now = Instant::now();
        let _ = s.execute(
            ViewerCommand::Orbit {
                delta: Vec2::new(60.0, 0.0),
            },
            now,
        );
        assert!(s.tick(now));
        assert_ne!(s.camera().eye, before);
        let distance = s.camera().distance_to_target();
        assert!((distance - before.length()).abs() < 1e-4);
    }

    #[test]
    fn gestures_during_transition_are_discarded() {
        let mut s = session();
        s.load_model(metadata(1), b"cube").unwrap();
        let now = Instant::now();
        let outcome = s.execute(ViewerCommand::Pick { x: 300.0, y: 300.0 }, now);
        assert!(matches!(outcome, Some(PickOutcome::Focused { .. })));
        let _ = s.execute(ViewerCommand::Zoom { delta: 5.0 }, now);
        let _ = s.execute(
            ViewerCommand::Orbit {
                delta: Vec2::new(100.0, 0.0),
            },
            now,
        );
        assert!(!s.controls().has_pending_motion());

        let done = now + Duration::from_millis(700);
        assert!(s.tick(done));
        assert!(!s.is_transitioning());
        let settled = s.camera().eye;
        assert!(!s.tick(done));
        assert_eq!(s.camera().eye, settled);
    }

    #[test]
    fn resize_updates_aspect_and_clip_planes() {
        let mut s = session();
        s.load_model(metadata(1), b"cube").unwrap();
        let before = s.camera().clone();
        let _ = s.execute(
            ViewerCommand::Resize {
                width: 1200,
                height: 600,
            },
            Instant::now(),
        );
        assert!((s.camera().aspect - 2.0).abs() < 1e-6);
        assert_eq!(s.camera().znear, before.znear);
        assert_eq!(s.camera().zfar, before.zfar);
        assert_eq!(s.viewport().width, 1200);
    }

    #[test]
    fn resize_while_focused_keeps_focus_clip_planes() {
        let mut s = session();
        s.load_model(metadata(1), b"cube").unwrap();
        let now = Instant::now();
        let outcome = s.execute(ViewerCommand::Pick { x: 300.0, y: 300.0 }, now);
        assert!(matches!(outcome, Some(PickOutcome::Focused { .. })));
        assert!(s.tick(now + Duration::from_millis(700)));
        assert!(!s.is_transitioning());

        let _ = s.execute(
            ViewerCommand::Resize {
                width: 1200,
                height: 600,
            },
            now,
        );
        let distance = s.camera().distance_to_target();
        let expected = ClipPlanes::for_focus(2.0, distance);
        assert!((distance - 2.4).abs() < 1e-4);
        assert!((s.camera().znear - expected.near).abs() < 1e-9);
        assert_eq!(s.camera().zfar, expected.far);
        assert!((s.camera().znear - ClipPlanes::for_model(2.0, distance).near).abs() > 1e-4);
        assert!((s.camera().aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn idle_session_tick_is_a_no_op() {
        let mut s = session();
        let eye = s.camera().eye;
        assert!(!s.tick(Instant::now()));
        assert_eq!(eye, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(s.camera().eye, eye);
    }
}
