//! Remote synchronization
//!
//! Fetching the remote quote feed and reconciling it with the local
//! collection under a remote-wins conflict policy.

pub mod reconcile;
pub mod remote;
pub mod service;

use crate::storage::StorageError;
use thiserror::Error;

/// Sync errors
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Sync request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Remote returned status {0}")]
    Status(reqwest::StatusCode),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
