//! Error types for the occurrence finder.

use crate::types::NodeIdentifier;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the finder API, repository and tooling.
#[derive(Debug, Error)]
pub enum FinderError {
    /// The tree query for one dimension combination failed.
    #[error("Traversal failed for dimensions [{dimensions}]: {reason}")]
    Traversal { dimensions: String, reason: String },

    /// An ancestor chain loops back on itself.
    #[error("Malformed ancestor chain at node {0}: cycle detected")]
    Structural(NodeIdentifier),

    /// Single-node lookup found nothing; the message is user-facing.
    #[error("{0}")]
    NotFound(String),

    #[error("Workspace not found: {0}")]
    WorkspaceNotFound(String),

    #[error("Invalid context path: {0}")]
    InvalidContextPath(String),

    /// Every dimension combination of a search failed.
    #[error("Search failed in every dimension combination: {0}")]
    SearchFailed(String),

    #[error("Search timed out after {0:?}")]
    Timeout(Duration),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FinderError {
    pub fn traversal(dimensions: impl ToString, reason: impl Into<String>) -> Self {
        FinderError::Traversal {
            dimensions: dimensions.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<config::ConfigError> for FinderError {
    fn from(err: config::ConfigError) -> Self {
        FinderError::ConfigError(err.to_string())
    }
}
