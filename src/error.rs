//! Error types shared by the renderer and the editor.
//!
//! Library code returns [`GalleryError`]; the binaries wrap it in
//! `anyhow::Result` at the top level.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    /// The gallery file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The gallery file is not a valid document.
    #[error("malformed gallery document {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialise gallery document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The URL supplied for a video item does not carry a recognisable id.
    #[error("invalid YouTube URL: {0:?}")]
    InvalidVideoUrl(String),

    #[error("image URL must not be empty")]
    MissingSource,

    #[error("item with ID {0} not found")]
    ItemNotFound(u64),

    /// Some item already carries the largest representable id.
    #[error("no item ID left to assign")]
    IdSpaceExhausted,

    #[error("not a valid item ID: {0:?}")]
    InvalidId(String),

    /// The host page has no element with the configured container id.
    #[error("gallery container #{0} not found")]
    MissingTarget(String),

    #[error("no gallery document loaded")]
    MissingDocument,
}

impl GalleryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = GalleryError> = std::result::Result<T, E>;
