//! Observable flow state

use serde::Serialize;
use std::fmt;
use tessera_core::domain::deployment::{DeploymentStatus, Progress};
use tessera_core::domain::pipeline::IngestionPipeline;

/// Whether the flow creates a new pipeline or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowMode {
    Create,
    Update,
}

impl FlowMode {
    /// Status entered when the request is issued
    pub fn pending_status(self) -> DeploymentStatus {
        match self {
            FlowMode::Create => DeploymentStatus::Creating,
            FlowMode::Update => DeploymentStatus::Updating,
        }
    }

    /// Past-tense wording used in user messages
    pub fn past_tense(self) -> &'static str {
        match self {
            FlowMode::Create => "created",
            FlowMode::Update => "updated",
        }
    }
}

impl fmt::Display for FlowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowMode::Create => write!(f, "create"),
            FlowMode::Update => write!(f, "update"),
        }
    }
}

/// Point-in-time view of a deployment flow
///
/// Published through a `tokio::sync::watch` channel on every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSnapshot {
    pub mode: FlowMode,
    pub status: DeploymentStatus,
    pub progress: Progress,
    /// Latest record returned by the server, or the existing one
    pub pipeline: Option<IngestionPipeline>,
    /// Retry-deploy is offered
    pub show_deploy_button: bool,
    /// Progress overlay is on screen
    pub overlay_visible: bool,
    /// User-facing message of the last failure, cleared on the next attempt
    pub last_error: Option<String>,
}

impl FlowSnapshot {
    pub(super) fn new(mode: FlowMode, pipeline: Option<IngestionPipeline>) -> Self {
        Self {
            mode,
            status: DeploymentStatus::Idle,
            progress: DeploymentStatus::Idle.checkpoint(),
            pipeline,
            show_deploy_button: false,
            overlay_visible: false,
            last_error: None,
        }
    }

    /// A create or update request is outstanding
    pub fn is_submitting(&self) -> bool {
        matches!(
            self.status,
            DeploymentStatus::Creating | DeploymentStatus::Updating
        )
    }

    /// The pipeline was stored; the flow shows its success view
    pub fn is_created(&self) -> bool {
        self.status.is_created()
    }

    pub fn is_deployed(&self) -> bool {
        self.status == DeploymentStatus::Deployed
    }

    /// Moves to `next`, advancing progress to its checkpoint
    ///
    /// Falling back to `Idle` starts a new run, so progress resets there.
    pub(super) fn enter(&mut self, next: DeploymentStatus) {
        self.progress = match next {
            DeploymentStatus::Idle => next.checkpoint(),
            _ => self.progress.advance(next.checkpoint()),
        };
        self.status = next;
    }
}

/// Defaults the schedule form starts from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefaults {
    pub schedule: String,
    pub enable_debug_log: bool,
}

/// How the user left the flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowExit {
    /// Left the schedule form without submitting
    Cancelled,
    /// Navigated back to the test suite
    ViewTestSuite { test_suite: String },
}
