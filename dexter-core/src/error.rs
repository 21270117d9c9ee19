//! Error types for Dexter operations

use crate::record::RecordId;
use std::time::Duration;
use thiserror::Error;

/// Catalog read errors.
///
/// `Clone` because a single in-flight fetch hands its result to every caller
/// that joined it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("No catalog record with id {id}")]
    NotFound { id: RecordId },

    #[error("Catalog request for id {id} failed: {reason}")]
    Transport { id: RecordId, reason: String },

    #[error("Malformed catalog response for id {id}: {reason}")]
    MalformedResponse { id: RecordId, reason: String },
}

impl CatalogError {
    /// Identifier the failed request was for.
    pub fn id(&self) -> RecordId {
        match self {
            CatalogError::NotFound { id }
            | CatalogError::Transport { id, .. }
            | CatalogError::MalformedResponse { id, .. } => *id,
        }
    }
}

/// Navigation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NavError {
    #[error("Navigation locked for another {remaining:?}")]
    Locked { remaining: Duration },
}

/// Host speech errors. Never surfaced past the announcer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpeechError {
    #[error("Speech backend unavailable: {reason}")]
    Unavailable { reason: String },
}
