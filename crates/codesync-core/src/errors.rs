use crate::types::NodeId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Select a frame to export.")]
    NoSelection,
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),
    #[error("Malformed message: {0}")]
    MalformedMessage(#[from] serde_json::Error),
    #[error(transparent)]
    Host(#[from] anyhow::Error),
}

pub type SyncResult<T> = Result<T, SyncError>;
