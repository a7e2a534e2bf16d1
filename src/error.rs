//! Crate-level error types.

use std::fmt;

/// Errors produced by the vitrine crate.
#[derive(Debug)]
pub enum VitrineError {
    /// The mesh payload for a model was empty or could not be decoded.
    /// The previously active model is left untouched.
    ModelLoad {
        /// Identifier of the model whose load failed.
        model_id: u64,
        /// Human-readable cause reported by the decoder or the loader.
        reason: String,
    },
    /// Retrieving asset bytes from an [`AssetSource`](crate::viewer::AssetSource)
    /// failed.
    Fetch {
        /// Resolved URL that was requested.
        url: String,
        /// Transport-level cause.
        reason: String,
    },
    /// The model catalog could not be parsed.
    Catalog(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for VitrineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModelLoad { model_id, reason } => {
                write!(f, "failed to load model {model_id}: {reason}")
            }
            Self::Fetch { url, reason } => {
                write!(f, "failed to fetch {url}: {reason}")
            }
            Self::Catalog(msg) => write!(f, "catalog error: {msg}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for VitrineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VitrineError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl VitrineError {
    /// Model identifier carried by a [`VitrineError::ModelLoad`], if any.
    #[must_use]
    pub fn model_id(&self) -> Option<u64> {
        match self {
            Self::ModelLoad { model_id, .. } => Some(*model_id),
            _ => None,
        }
    }
}
