//! Model catalog: metadata records served by the asset backend and the
//! rules for picking which one to show.
//!
//! The backend wraps lists in a `{ "message": ..., "data": [...] }`
//! envelope; [`ModelCatalog::from_json`] also accepts a bare array.

use serde::{Deserialize, Serialize};

use crate::error::VitrineError;

/// Shown in place of an empty model description.
pub const NO_DESCRIPTION: &str = "No description";

/// One uploaded model as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Backend identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Free-form description; may be empty.
    #[serde(default)]
    pub description: String,
    /// Asset path or absolute URL of the mesh payload.
    pub file_url: String,
    /// Original upload file name.
    #[serde(default)]
    pub file_name: String,
    /// Archive folder the file was stored under.
    #[serde(default)]
    pub archive_id: Option<u64>,
    /// Identifier of the uploading user.
    #[serde(default)]
    pub uploaded_by: u64,
    /// Payload size in bytes.
    #[serde(default)]
    pub file_size: u64,
}

impl ModelMetadata {
    /// Payload size in kibibytes.
    #[must_use]
    pub fn size_kb(&self) -> f64 {
        self.file_size as f64 / 1024.0
    }

    /// The description, or [`NO_DESCRIPTION`] when blank.
    #[must_use]
    pub fn description_or_default(&self) -> &str {
        if self.description.trim().is_empty() {
            NO_DESCRIPTION
        } else {
            &self.description
        }
    }

    /// One-line summary for the info panel.
    #[must_use]
    pub fn info_line(&self) -> String {
        format!(
            "Uploaded by: {} | Size: {:.2} KB",
            self.uploaded_by,
            self.size_kb()
        )
    }

    /// Absolute URL of the payload. Paths are joined onto `base`; URLs
    /// that already carry a scheme are returned unchanged.
    #[must_use]
    pub fn resolve_url(&self, base: &str) -> String {
        if self.file_url.contains("://") || base.is_empty() {
            return self.file_url.clone();
        }
        let base = base.trim_end_matches('/');
        if self.file_url.starts_with('/') {
            format!("{base}{}", self.file_url)
        } else {
            format!("{base}/{}", self.file_url)
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogPayload {
    Bare(Vec<ModelMetadata>),
    Envelope {
        #[serde(default)]
        data: Option<Vec<ModelMetadata>>,
    },
}

/// Read-only list of models available to the viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelCatalog {
    models: Vec<ModelMetadata>,
}

impl ModelCatalog {
    /// Wrap an already parsed list.
    #[must_use]
    pub fn new(models: Vec<ModelMetadata>) -> Self {
        Self { models }
    }

    /// Parse a backend response. A missing or null `data` field is an
    /// empty catalog.
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::Catalog`] for malformed JSON or records
    /// missing required fields.
    pub fn from_json(json: &str) -> Result<Self, VitrineError> {
        let payload: CatalogPayload = serde_json::from_str(json)
            .map_err(|e| VitrineError::Catalog(e.to_string()))?;
        let models = match payload {
            CatalogPayload::Bare(models) => models,
            CatalogPayload::Envelope { data } => data.unwrap_or_default(),
        };
        log::debug!("catalog parsed: {} models", models.len());
        Ok(Self { models })
    }

    /// All models in backend order.
    #[must_use]
    pub fn models(&self) -> &[ModelMetadata] {
        &self.models
    }

    /// Number of models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the catalog lists no models.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Model with identifier `id`.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&ModelMetadata> {
        self.models.iter().find(|m| m.id == id)
    }

    /// The model to show first: the requested one when an id is given
    /// (`None` if it is not listed), otherwise the first model.
    #[must_use]
    pub fn select(&self, requested: Option<u64>) -> Option<&ModelMetadata> {
        requested.map_or_else(|| self.models.first(), |id| self.get(id))
    }
}
