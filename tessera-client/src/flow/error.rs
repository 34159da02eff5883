//! Deployment flow errors

use tessera_core::domain::deployment::DeploymentStatus;
use tessera_core::schedule::ScheduleError;
use thiserror::Error;

use crate::error::ClientError;

/// Errors surfaced by the deployment flow
///
/// None of these are fatal: the flow stays usable after any of them.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Failed to create the ingestion workflow: {0}")]
    CreateFailed(#[source] ClientError),

    #[error("Failed to update the ingestion workflow: {0}")]
    UpdateFailed(#[source] ClientError),

    #[error("Failed to deploy the ingestion workflow: {0}")]
    DeployFailed(#[source] ClientError),

    #[error("A request is already in flight (status: {0})")]
    Busy(DeploymentStatus),

    #[error("Cannot go from '{from}' to '{to}'")]
    InvalidTransition {
        from: DeploymentStatus,
        to: DeploymentStatus,
    },

    #[error("Invalid pipeline draft: {0}")]
    InvalidDraft(#[from] ScheduleError),

    #[error("No ingestion pipeline to deploy")]
    MissingIdentity,

    #[error("Failed to encode pipeline record: {0}")]
    Encode(#[from] serde_json::Error),
}

impl FlowError {
    /// Whether the same action can simply be attempted again
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FlowError::CreateFailed(_) | FlowError::UpdateFailed(_) | FlowError::DeployFailed(_)
        )
    }
}
