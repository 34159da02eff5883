//! Test-suite ingestion deployment flow
//!
//! Drives one schedule submission end to end: create or patch the ingestion
//! pipeline, then ask the backend to deploy it. State is published as
//! [`FlowSnapshot`] values on a watch channel so a UI (or the CLI) can render
//! progress while the calls are in flight.
//!
//! ```text
//! Idle -> Creating | Updating -> Deploying -> Deployed
//!              |                     |
//!              v                     v
//!            Idle               DeployError -> Deploying (retry)
//! ```

mod error;
mod payload;
mod settings;
mod snapshot;

#[cfg(test)]
mod tests;

pub use error::FlowError;
pub use payload::{default_display_name, pipeline_diff};
pub use settings::{DEFAULT_OVERLAY_DISMISS_DELAY, FlowSettings};
pub use snapshot::{FlowExit, FlowMode, FlowSnapshot, FormDefaults};

use json_patch::Patch;
use std::sync::{Arc, Mutex};
use tessera_core::domain::deployment::DeploymentStatus;
use tessera_core::domain::pipeline::{IngestionPipeline, LogLevel, PipelineDraft};
use tessera_core::domain::test_suite::TestSuite;
use tessera_core::dto::pipeline::CreateIngestionPipeline;
use tessera_core::schedule::{
    default_limited_schedule, default_test_suite_schedule, normalize_schedule,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::api::IngestionApi;
use payload::PipelineSettings;

/// What the flow operates on
#[derive(Debug, Clone)]
pub struct FlowInput {
    /// Suite whose test cases the pipeline runs
    pub test_suite: TestSuite,
    /// Test cases bound to the pipeline
    pub test_case_names: Vec<String>,
    /// Display name to give the pipeline
    pub pipeline_name: Option<String>,
    /// Pipeline being edited; `None` creates a new one
    pub existing: Option<IngestionPipeline>,
}

impl FlowInput {
    pub fn new(test_suite: TestSuite, test_case_names: Vec<String>) -> Self {
        Self {
            test_suite,
            test_case_names,
            pipeline_name: None,
            existing: None,
        }
    }

    pub fn with_pipeline_name(mut self, name: impl Into<String>) -> Self {
        self.pipeline_name = Some(name.into());
        self
    }

    pub fn with_existing(mut self, pipeline: IngestionPipeline) -> Self {
        self.existing = Some(pipeline);
        self
    }
}

/// Request prepared before any state changes
enum StoreRequest {
    Create(CreateIngestionPipeline),
    Update { pipeline_id: Uuid, patch: Patch },
}

/// Controller for scheduling a test suite
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use tessera_client::{CatalogClient, DeploymentFlow, FlowInput, FlowSettings};
/// use tessera_core::domain::pipeline::PipelineDraft;
///
/// # async fn run() -> anyhow::Result<()> {
/// let client = CatalogClient::new("http://localhost:8585");
/// let suite = client.get_test_suite_by_name("mysql.shop.public.orders.testSuite").await?;
///
/// let flow = DeploymentFlow::new(
///     Arc::new(client),
///     FlowInput::new(suite, vec!["orders_not_null".into()]),
///     FlowSettings::default(),
/// );
/// flow.submit(PipelineDraft::new("0 * * * *", false)).await?;
/// # Ok(())
/// # }
/// ```
pub struct DeploymentFlow {
    api: Arc<dyn IngestionApi>,
    input: FlowInput,
    settings: FlowSettings,
    state: Arc<watch::Sender<FlowSnapshot>>,
    overlay_timer: Mutex<Option<JoinHandle<()>>>,
}

impl DeploymentFlow {
    /// Create a flow in the `Idle` state
    ///
    /// The mode is fixed here: update when an existing pipeline is given,
    /// create otherwise.
    pub fn new(api: Arc<dyn IngestionApi>, input: FlowInput, settings: FlowSettings) -> Self {
        let mode = if input.existing.is_some() {
            FlowMode::Update
        } else {
            FlowMode::Create
        };
        let (state, _) = watch::channel(FlowSnapshot::new(mode, input.existing.clone()));

        Self {
            api,
            input,
            settings,
            state: Arc::new(state),
            overlay_timer: Mutex::new(None),
        }
    }

    /// Receive every state change from now on
    pub fn subscribe(&self) -> watch::Receiver<FlowSnapshot> {
        self.state.subscribe()
    }

    /// Current state
    pub fn snapshot(&self) -> FlowSnapshot {
        self.state.borrow().clone()
    }

    pub fn mode(&self) -> FlowMode {
        self.state.borrow().mode
    }

    pub fn input(&self) -> &FlowInput {
        &self.input
    }

    /// Defaults for the schedule form
    pub fn initial_form(&self) -> FormDefaults {
        let existing = self.input.existing.as_ref();

        let schedule = match existing.and_then(|p| p.schedule()) {
            Some(schedule) => schedule.to_string(),
            None if self.settings.limits_enabled => default_limited_schedule(),
            None => default_test_suite_schedule(),
        };

        FormDefaults {
            schedule,
            enable_debug_log: existing.is_some_and(|p| p.logger_level == LogLevel::Debug),
        }
    }

    // =============================================================================
    // Submission
    // =============================================================================

    /// Store the pipeline described by `draft`, then deploy it
    ///
    /// # Returns
    /// The stored pipeline once it was deployed. When the deploy itself
    /// fails, the pipeline is still stored and `FlowError::DeployFailed` is
    /// returned; use [`retry_deploy`](Self::retry_deploy) from there.
    pub async fn submit(&self, draft: PipelineDraft) -> Result<IngestionPipeline, FlowError> {
        let mode = self.mode();
        let request = self.prepare(&draft, mode)?;

        self.begin(mode.pending_status(), |snap| snap.last_error = None)?;

        let stored = match request {
            StoreRequest::Create(req) => {
                tracing::info!(
                    "Creating test suite pipeline: {}",
                    req.display_name.as_deref().unwrap_or(&req.name)
                );
                self.api
                    .create_pipeline(req)
                    .await
                    .map_err(FlowError::CreateFailed)
            }
            StoreRequest::Update { pipeline_id, patch } => {
                tracing::info!(
                    "Updating pipeline {} with {} patch operation(s)",
                    pipeline_id,
                    patch.0.len()
                );
                self.api
                    .update_pipeline(pipeline_id, patch)
                    .await
                    .map_err(FlowError::UpdateFailed)
            }
        };

        let pipeline = match stored {
            Ok(pipeline) => pipeline,
            Err(err) => {
                tracing::error!("{}", err);
                self.transition(DeploymentStatus::Idle, |snap| {
                    snap.last_error = Some(err.to_string());
                })?;
                return Err(err);
            }
        };

        let pipeline_id = pipeline.id;
        self.transition(DeploymentStatus::Deploying, |snap| {
            snap.pipeline = Some(pipeline.clone());
        })?;
        self.run_deploy(pipeline_id).await?;

        Ok(pipeline)
    }

    /// Validate the draft and build the request for `mode`
    fn prepare(&self, draft: &PipelineDraft, mode: FlowMode) -> Result<StoreRequest, FlowError> {
        let settings = PipelineSettings {
            schedule: normalize_schedule(&draft.schedule, self.settings.allowed_schedules())?,
            logger_level: LogLevel::from_debug_flag(draft.enable_debug_log),
        };
        let pipeline_name = self.input.pipeline_name.as_deref();

        match mode {
            FlowMode::Create => Ok(StoreRequest::Create(payload::create_request(
                &self.input.test_suite,
                &self.input.test_case_names,
                pipeline_name,
                settings,
            ))),
            FlowMode::Update => {
                let existing = self.input.existing.as_ref().ok_or(FlowError::MissingIdentity)?;
                let updated = payload::updated_record(
                    existing,
                    &self.input.test_case_names,
                    pipeline_name,
                    settings,
                );

                Ok(StoreRequest::Update {
                    pipeline_id: existing.id,
                    patch: pipeline_diff(existing, &updated)?,
                })
            }
        }
    }

    // =============================================================================
    // Deployment
    // =============================================================================

    /// Deploy the stored pipeline again after a failed deploy
    ///
    /// Issues exactly one deploy call per invocation.
    pub async fn retry_deploy(&self) -> Result<(), FlowError> {
        let pipeline_id = self
            .state
            .borrow()
            .pipeline
            .as_ref()
            .map(|p| p.id)
            .ok_or(FlowError::MissingIdentity)?;

        self.begin(DeploymentStatus::Deploying, |_| {})?;
        tracing::info!("Retrying deployment of pipeline {}", pipeline_id);

        self.run_deploy(pipeline_id).await
    }

    /// Issue the deploy call; the status must already be `Deploying`
    async fn run_deploy(&self, pipeline_id: Uuid) -> Result<(), FlowError> {
        self.cancel_overlay_timer();
        self.state.send_modify(|snap| {
            snap.overlay_visible = true;
            snap.last_error = None;
        });

        tracing::info!("Deploying pipeline {}", pipeline_id);
        let outcome = match self.api.deploy_pipeline(pipeline_id).await {
            Ok(()) => {
                tracing::info!("Pipeline {} deployed", pipeline_id);
                self.transition(DeploymentStatus::Deployed, |snap| {
                    snap.show_deploy_button = false;
                })
            }
            Err(err) => {
                let err = FlowError::DeployFailed(err);
                tracing::error!("{}", err);
                self.transition(DeploymentStatus::DeployError, |snap| {
                    snap.show_deploy_button = true;
                    snap.last_error = Some(err.to_string());
                })?;
                Err(err)
            }
        };

        self.schedule_overlay_dismissal();
        outcome
    }

    // =============================================================================
    // Result View
    // =============================================================================

    /// Message for the success view, once the pipeline is stored
    pub fn success_message(&self) -> Option<String> {
        let snap = self.state.borrow();
        if !snap.is_created() {
            return None;
        }

        let entity = self
            .input
            .pipeline_name
            .as_deref()
            .or_else(|| snap.pipeline.as_ref().map(|p| p.label()))
            .unwrap_or("Test Suite");
        let status = snap.mode.past_tense();

        Some(if snap.show_deploy_button {
            format!("\"{}\" has been {} successfully, but failed to deploy", entity, status)
        } else {
            format!("\"{}\" has been {} and deployed successfully", entity, status)
        })
    }

    /// Leave the flow without going to the test suite
    pub fn cancel(self) -> FlowExit {
        tracing::debug!("Deployment flow cancelled");
        FlowExit::Cancelled
    }

    /// Leave the flow and go back to the test suite
    pub fn view(self) -> FlowExit {
        let test_suite = self
            .input
            .test_suite
            .fully_qualified_name
            .clone()
            .unwrap_or_else(|| self.input.test_suite.name.clone());

        FlowExit::ViewTestSuite { test_suite }
    }

    // =============================================================================
    // State Helpers
    // =============================================================================

    /// Enter `next` from a user action: rejected while a call is in flight
    fn begin(
        &self,
        next: DeploymentStatus,
        update: impl FnOnce(&mut FlowSnapshot),
    ) -> Result<(), FlowError> {
        let mut outcome = Ok(());
        self.state.send_if_modified(|snap| {
            if snap.status.is_in_flight() {
                outcome = Err(FlowError::Busy(snap.status));
                return false;
            }
            Self::apply(snap, next, update, &mut outcome)
        });
        outcome
    }

    /// Enter `next` as part of an action already running
    fn transition(
        &self,
        next: DeploymentStatus,
        update: impl FnOnce(&mut FlowSnapshot),
    ) -> Result<(), FlowError> {
        let mut outcome = Ok(());
        self.state
            .send_if_modified(|snap| Self::apply(snap, next, update, &mut outcome));
        outcome
    }

    fn apply(
        snap: &mut FlowSnapshot,
        next: DeploymentStatus,
        update: impl FnOnce(&mut FlowSnapshot),
        outcome: &mut Result<(), FlowError>,
    ) -> bool {
        if !snap.status.can_transition_to(next) {
            *outcome = Err(FlowError::InvalidTransition {
                from: snap.status,
                to: next,
            });
            return false;
        }

        snap.enter(next);
        update(snap);
        true
    }

    fn cancel_overlay_timer(&self) {
        let mut timer = self
            .overlay_timer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(handle) = timer.take() {
            handle.abort();
        }
    }

    /// Hide the overlay once the dismissal delay has passed
    fn schedule_overlay_dismissal(&self) {
        let state = Arc::clone(&self.state);
        let delay = self.settings.overlay_dismiss_delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            state.send_if_modified(|snap| std::mem::replace(&mut snap.overlay_visible, false));
        });

        let mut timer = self
            .overlay_timer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = timer.replace(handle) {
            previous.abort();
        }
    }
}

impl Drop for DeploymentFlow {
    fn drop(&mut self) {
        let timer = match self.overlay_timer.get_mut() {
            Ok(timer) => timer.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(handle) = timer {
            handle.abort();
        }
    }
}
