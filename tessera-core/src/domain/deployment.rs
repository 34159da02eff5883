//! Deployment status machine and progress checkpoints
//!
//! A single create/update/deploy action moves through a linear set of
//! statuses. Progress is not measured; it jumps between fixed checkpoints
//! and never goes backwards within one run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Progress before anything has been submitted
pub const PROGRESS_IDLE: u8 = 0;

/// Progress while the create/update request is in flight
pub const INGESTION_PROGRESS_START: u8 = 20;

/// Progress once the pipeline exists and deployment has started
pub const INGESTION_PROGRESS_END: u8 = 80;

/// Progress once the backend accepted the deployment
pub const DEPLOYED_PROGRESS: u8 = 100;

/// Lifecycle status of one deployment flow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentStatus {
    #[default]
    Idle,
    Creating,
    Updating,
    Deploying,
    Deployed,
    DeployError,
}

impl DeploymentStatus {
    /// Whether moving from `self` to `next` is a legal transition
    pub fn can_transition_to(self, next: DeploymentStatus) -> bool {
        use DeploymentStatus::*;

        matches!(
            (self, next),
            (Idle, Creating)
                | (Idle, Updating)
                | (Creating, Deploying)
                | (Updating, Deploying)
                | (Creating, Idle)
                | (Updating, Idle)
                | (Deploying, Deployed)
                | (Deploying, DeployError)
                | (DeployError, Deploying)
        )
    }

    /// A network call is outstanding in this status
    pub fn is_in_flight(self) -> bool {
        matches!(
            self,
            DeploymentStatus::Creating | DeploymentStatus::Updating | DeploymentStatus::Deploying
        )
    }

    /// The record exists on the server (created or updated)
    pub fn is_created(self) -> bool {
        matches!(
            self,
            DeploymentStatus::Deploying | DeploymentStatus::Deployed | DeploymentStatus::DeployError
        )
    }

    /// No further transitions are possible
    pub fn is_terminal(self) -> bool {
        matches!(self, DeploymentStatus::Deployed)
    }

    /// Progress checkpoint reached on entering this status
    pub fn checkpoint(self) -> Progress {
        match self {
            DeploymentStatus::Idle => Progress::new(PROGRESS_IDLE),
            DeploymentStatus::Creating | DeploymentStatus::Updating => {
                Progress::new(INGESTION_PROGRESS_START)
            }
            DeploymentStatus::Deploying | DeploymentStatus::DeployError => {
                Progress::new(INGESTION_PROGRESS_END)
            }
            DeploymentStatus::Deployed => Progress::new(DEPLOYED_PROGRESS),
        }
    }

    /// Action message shown in the progress overlay
    pub fn action_message(self) -> &'static str {
        match self {
            DeploymentStatus::Idle => "Idle",
            DeploymentStatus::Creating => "Creating",
            DeploymentStatus::Updating => "Updating",
            DeploymentStatus::Deploying => "Deploying",
            DeploymentStatus::Deployed => "Deployed",
            DeploymentStatus::DeployError => "Deploying error",
        }
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action_message())
    }
}

/// Visual progress in `[0, 100]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Progress(u8);

impl Progress {
    /// Creates a progress value, clamped to 100
    pub fn new(value: u8) -> Self {
        Self(value.min(DEPLOYED_PROGRESS))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Moves forward to `checkpoint`, never backwards
    pub fn advance(self, checkpoint: Progress) -> Progress {
        self.max(checkpoint)
    }

    pub fn is_complete(self) -> bool {
        self.0 == DEPLOYED_PROGRESS
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
