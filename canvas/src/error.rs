//! Error types for the store layer and core operations.

use crate::note::NoteId;

/// Failure reported by a [`KeyValueStore`](crate::store::KeyValueStore) write.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be reached (no `localStorage`, unreadable file).
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// The store refused the write (quota exceeded, permission denied).
    #[error("store rejected write: {0}")]
    WriteRejected(String),
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a core canvas or note operation. No variant leaves partial state.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("no active canvas; select or create a canvas first")]
    NoActiveCanvas,
    #[error("invalid color: {0:?}")]
    InvalidColor(String),
    #[error("note not found: {0}")]
    NoteNotFound(NoteId),
    #[error("note ids exhausted on this canvas")]
    NoteIdsExhausted,
    #[error("save failed: {0}")]
    Store(#[from] StoreError),
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl EngineError {
    /// Stable machine-readable code for hosts.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoActiveCanvas => "E_NO_ACTIVE_CANVAS",
            Self::InvalidColor(_) => "E_INVALID_COLOR",
            Self::NoteNotFound(_) => "E_NOTE_NOT_FOUND",
            Self::NoteIdsExhausted => "E_NOTE_IDS_EXHAUSTED",
            Self::Store(_) => "E_STORE",
            Self::Serialize(_) => "E_SERIALIZE",
        }
    }
}
