//! Active model lifecycle: decode, atomic attach, auto-framing, unload, and
//! ticketed async loads where the latest request wins.

use std::fmt;
use std::future::Future;

use glam::Vec3;

use super::{ClipMode, FramedRegion, ViewerSession};
use crate::animation::CameraAnimator;
use crate::camera::CameraPose;
use crate::catalog::ModelMetadata;
use crate::error::VitrineError;
use crate::geometry::{
    compute_bounds, framing_distance, Bounds, ClipPlanes, OrbitLimits,
};
use crate::scene::{ModelGraph, SceneNode};

/// Turns a mesh payload into a scene-graph tree.
pub trait MeshProvider {
    /// Decode a complete payload.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the payload is not a mesh this provider
    /// understands.
    fn decode(&self, bytes: &[u8]) -> Result<SceneNode, DecodeError>;
}

/// Reason a [`MeshProvider`] rejected a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError(pub String);

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for DecodeError {}

/// Asynchronous byte source for model payloads.
pub trait AssetSource {
    /// Fetch the full payload at `url`.
    fn fetch(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<Vec<u8>, VitrineError>>;

    /// Base that relative model URLs are resolved against.
    fn base_url(&self) -> &str {
        ""
    }
}

/// The model currently attached to the session.
#[derive(Debug)]
pub struct ActiveModel {
    /// Catalog record the model was loaded from.
    pub metadata: ModelMetadata,
    /// Flattened, world-space scene graph.
    pub graph: ModelGraph,
    /// Bounds of the whole model.
    pub bounds: Bounds,
}

impl Drop for ActiveModel {
    fn drop(&mut self) {
        log::info!(
            "released model {} '{}' ({} nodes)",
            self.metadata.id,
            self.metadata.name,
            self.graph.len()
        );
    }
}

/// Progress of the most recent load, backing a loading/error indicator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet, or the model was unloaded.
    #[default]
    Idle,
    /// Waiting for the payload of `model_id`.
    Loading {
        /// Model being fetched.
        model_id: u64,
    },
    /// The requested model is attached.
    Ready,
    /// The latest load failed; any previous model is still attached.
    Failed {
        /// Model whose load failed.
        model_id: u64,
        /// Error text for display.
        message: String,
    },
}

/// Generation number of a load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

/// Result of completing a load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The model is now active.
    Attached {
        /// Identifier of the attached model.
        model_id: u64,
    },
    /// A newer request was issued meanwhile; the payload was discarded.
    Superseded,
}

impl ViewerSession {
    /// Decode `bytes` and make it the active model, replacing any previous
    /// one and framing the camera on it.
    ///
    /// The swap is atomic: on error the previous model, camera, and focus
    /// state are left exactly as they were. Any load still waiting on
    /// [`ViewerSession::complete_load`] is superseded.
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::ModelLoad`] for an empty payload or a
    /// decoder failure.
    pub fn load_model(
        &mut self,
        metadata: ModelMetadata,
        bytes: &[u8],
    ) -> Result<(), VitrineError> {
        self.drop_pending("direct load");
        self.apply_load(metadata, bytes)
    }

    /// Decode and attach, recording failure in the load state.
    fn apply_load(
        &mut self,
        metadata: ModelMetadata,
        bytes: &[u8],
    ) -> Result<(), VitrineError> {
        let model_id = metadata.id;
        match self.prepare_model(metadata, bytes) {
            Ok(model) => {
                self.attach(model);
                Ok(())
            }
            Err(e) => {
                log::warn!("{e}");
                self.load_state = LoadState::Failed {
                    model_id,
                    message: e.to_string(),
                };
                Err(e)
            }
        }
    }

    /// Start a load for `metadata`. Only the ticket from the latest call
    /// will be attached by [`ViewerSession::complete_load`].
    pub fn request_load(&mut self, metadata: ModelMetadata) -> LoadTicket {
        self.next_ticket += 1;
        let ticket = LoadTicket(self.next_ticket);
        log::info!("loading model {} '{}'", metadata.id, metadata.name);
        self.load_state = LoadState::Loading {
            model_id: metadata.id,
        };
        if let Some((stale, previous)) =
            self.pending.replace((ticket, metadata))
        {
            log::debug!(
                "load {stale:?} of model {} superseded by {ticket:?}",
                previous.id
            );
        }
        ticket
    }

    /// Finish the load identified by `ticket` with the fetched payload.
    ///
    /// A stale ticket is discarded without touching the session.
    ///
    /// # Errors
    ///
    /// A fetch error or decode failure marks the load as failed and is
    /// returned.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        bytes: Result<Vec<u8>, VitrineError>,
    ) -> Result<LoadOutcome, VitrineError> {
        let metadata = match self.pending.take() {
            Some((latest, metadata)) if latest == ticket => metadata,
            other => {
                self.pending = other;
                log::debug!("discarding stale load {ticket:?}");
                return Ok(LoadOutcome::Superseded);
            }
        };
        let model_id = metadata.id;

        let bytes = bytes.inspect_err(|e| {
            log::warn!("{e}");
            self.load_state = LoadState::Failed {
                model_id,
                message: e.to_string(),
            };
        })?;
        self.apply_load(metadata, &bytes)?;
        Ok(LoadOutcome::Attached { model_id })
    }

    /// Fetch the payload for `metadata` from `source` and attach it.
    ///
    /// # Errors
    ///
    /// Returns the source's fetch error or [`VitrineError::ModelLoad`].
    pub async fn load_from_source<S: AssetSource>(
        &mut self,
        source: &S,
        metadata: ModelMetadata,
    ) -> Result<LoadOutcome, VitrineError> {
        let url = metadata.resolve_url(source.base_url());
        let ticket = self.request_load(metadata);
        let bytes = source.fetch(&url).await;
        self.complete_load(ticket, bytes)
    }

    /// Detach and release the active model and all focus state, and cancel
    /// any load in flight. Returns whether a model was attached.
    pub fn unload_model(&mut self) -> bool {
        self.drop_pending("unload");
        self.clear_focus_state();
        self.framed = None;
        self.load_state = LoadState::Idle;
        self.active.take().is_some()
    }

    /// Forget the in-flight load so its completion is discarded as stale.
    fn drop_pending(&mut self, reason: &str) {
        if let Some((ticket, metadata)) = self.pending.take() {
            log::debug!(
                "load {ticket:?} of model {} cancelled by {reason}",
                metadata.id
            );
        }
    }

    /// Build everything the new model needs before the old one is touched.
    fn prepare_model(
        &self,
        metadata: ModelMetadata,
        bytes: &[u8],
    ) -> Result<ActiveModel, VitrineError> {
        if bytes.is_empty() {
            return Err(VitrineError::ModelLoad {
                model_id: metadata.id,
                reason: "empty payload".to_owned(),
            });
        }
        let root = self.decoder.decode(bytes).map_err(|e| {
            VitrineError::ModelLoad {
                model_id: metadata.id,
                reason: e.to_string(),
            }
        })?;
        let bounds = compute_bounds(&root);
        let graph = ModelGraph::from_scene(root);
        Ok(ActiveModel {
            metadata,
            graph,
            bounds,
        })
    }

    /// Swap in `model` and frame the camera on it.
    fn attach(&mut self, model: ActiveModel) {
        self.clear_focus_state();
        if let Some(previous) = self.active.take() {
            log::debug!("detaching model {}", previous.metadata.id);
        }

        let bounds = model.bounds;
        let focus = &self.options.focus;
        let distance = framing_distance(
            bounds.max_extent,
            self.viewport.camera.fovy_radians(),
            focus.load_margin,
            focus.min_distance,
        );
        let pose = CameraPose {
            eye: bounds.center + Vec3::Z * distance,
            target: bounds.center,
        };

        let viewport = &mut self.viewport;
        viewport.camera.set_pose(pose);
        viewport
            .camera
            .set_clip_planes(ClipPlanes::for_model(bounds.max_extent, distance));
        viewport.controls.target = bounds.center;
        viewport
            .controls
            .set_limits(OrbitLimits::for_model(bounds.max_extent, distance));
        viewport.controls.reset_motion();
        self.framed = Some(FramedRegion {
            max_extent: bounds.max_extent,
            mode: ClipMode::Model,
        });

        log::info!(
            "attached model {} '{}': {} nodes, extent {:.4}, camera distance {:.4}",
            model.metadata.id,
            model.metadata.name,
            model.graph.len(),
            bounds.max_extent,
            distance
        );
        self.active = Some(model);
        self.load_state = LoadState::Ready;
    }

    /// Drop the highlight, the focus history, and any running transition.
    fn clear_focus_state(&mut self) {
        self.highlight = None;
        self.history.clear();
        self.animator = CameraAnimator::new(self.animator.easing());
    }
}
