use super::*;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::time::Duration;
use tessera_core::domain::deployment::Progress;
use tessera_core::schedule::{ScheduleError, ScheduleFrequency};
use tokio::sync::Notify;

use crate::error::{ClientError, Result};

/// Recorded call against the fake
#[derive(Debug, Clone, PartialEq)]
enum Call {
    Create(Value),
    Update(Uuid, Value),
    Deploy(Uuid),
}

/// In-memory ingestion API that records every call
#[derive(Default)]
struct FakeApi {
    calls: Mutex<Vec<Call>>,
    fail_create: bool,
    fail_update: bool,
    /// Deploy outcomes consumed in order; an empty queue succeeds
    deploy_failures: Mutex<VecDeque<u16>>,
    /// Blocks create/update until notified
    gate: Option<Arc<Notify>>,
    created_id: Option<Uuid>,
}

impl FakeApi {
    fn failing_deploys(statuses: &[u16]) -> Self {
        Self {
            deploy_failures: Mutex::new(statuses.iter().copied().collect()),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn deploy_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Deploy(_)))
            .count()
    }

    async fn wait_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl IngestionApi for FakeApi {
    async fn create_pipeline(&self, req: CreateIngestionPipeline) -> Result<IngestionPipeline> {
        let body = serde_json::to_value(&req).unwrap();
        self.calls.lock().unwrap().push(Call::Create(body.clone()));
        self.wait_gate().await;

        if self.fail_create {
            return Err(ClientError::api_error(400, "name already taken"));
        }

        let mut stored = body;
        stored["id"] = json!(self.created_id.unwrap_or_else(Uuid::new_v4));
        Ok(serde_json::from_value(stored).unwrap())
    }

    async fn update_pipeline(&self, pipeline_id: Uuid, patch: Patch) -> Result<IngestionPipeline> {
        let ops = serde_json::to_value(&patch).unwrap();
        self.calls
            .lock()
            .unwrap()
            .push(Call::Update(pipeline_id, ops));
        self.wait_gate().await;

        if self.fail_update {
            return Err(ClientError::api_error(500, "database unavailable"));
        }

        let mut doc = serde_json::to_value(existing_pipeline()).unwrap();
        json_patch::patch(&mut doc, &patch.0).unwrap();
        Ok(serde_json::from_value(doc).unwrap())
    }

    async fn deploy_pipeline(&self, pipeline_id: Uuid) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Deploy(pipeline_id));

        match self.deploy_failures.lock().unwrap().pop_front() {
            Some(status) => Err(ClientError::api_error(status, "airflow unreachable")),
            None => Ok(()),
        }
    }
}

fn test_suite() -> TestSuite {
    serde_json::from_value(json!({
        "id": "0d3c6f7e-1b2a-4c5d-8e9f-a0b1c2d3e4f5",
        "name": "orders.testSuite",
        "fullyQualifiedName": "mysql.shop.public.orders.testSuite",
        "executableEntityReference": {
            "id": "5c3c6f7e-1b2a-4c5d-8e9f-a0b1c2d3e4f5",
            "type": "table",
            "fullyQualifiedName": "mysql.shop.public.orders"
        }
    }))
    .unwrap()
}

fn existing_pipeline() -> IngestionPipeline {
    serde_json::from_value(json!({
        "id": "6f1c3c7e-8f7b-4b8e-9a55-3f3c3c2a1b10",
        "name": "orders_TestSuite",
        "displayName": "Orders checks",
        "pipelineType": "TestSuite",
        "airflowConfig": { "scheduleInterval": "0 0 * * *" },
        "loggerLevel": "DEBUG",
        "sourceConfig": {
            "config": {
                "type": "TestSuite",
                "entityFullyQualifiedName": "mysql.shop.public.orders",
                "testCases": ["c1"]
            }
        }
    }))
    .unwrap()
}

fn settings() -> FlowSettings {
    FlowSettings {
        overlay_dismiss_delay: Duration::from_millis(10),
        ..Default::default()
    }
}

fn create_flow(api: &Arc<FakeApi>) -> DeploymentFlow {
    let input = FlowInput::new(test_suite(), vec!["c1".into(), "c2".into()]);
    DeploymentFlow::new(api.clone(), input, settings())
}

fn update_flow(api: &Arc<FakeApi>, test_cases: Vec<String>) -> DeploymentFlow {
    let input = FlowInput::new(test_suite(), test_cases).with_existing(existing_pipeline());
    DeploymentFlow::new(api.clone(), input, settings())
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_with_empty_schedule_then_deploys_returned_id() {
    let id = Uuid::new_v4();
    let api = Arc::new(FakeApi {
        created_id: Some(id),
        ..Default::default()
    });
    let flow = create_flow(&api);

    let pipeline = flow.submit(PipelineDraft::new("", false)).await.unwrap();

    assert_eq!(pipeline.id, id);
    let calls = api.calls();
    assert_eq!(calls.len(), 2);

    let Call::Create(body) = &calls[0] else {
        panic!("expected create, got {:?}", calls[0]);
    };
    assert!(body["airflowConfig"].get("scheduleInterval").is_none());
    assert_eq!(body["loggerLevel"], "INFO");
    assert_eq!(body["displayName"], "orders_TestSuite");
    assert_eq!(body["sourceConfig"]["config"]["testCases"], json!(["c1", "c2"]));
    assert_eq!(calls[1], Call::Deploy(id));

    let snap = flow.snapshot();
    assert_eq!(snap.status, DeploymentStatus::Deployed);
    assert!(snap.progress.is_complete());
    assert!(!snap.show_deploy_button);
    assert!(snap.is_created());
}

#[tokio::test]
async fn test_create_uses_supplied_pipeline_name() {
    let api = Arc::new(FakeApi::default());
    let input = FlowInput::new(test_suite(), vec![]).with_pipeline_name("Nightly orders");
    let flow = DeploymentFlow::new(api.clone(), input, settings());

    flow.submit(PipelineDraft::new("0 0 * * *", true)).await.unwrap();

    let Call::Create(body) = &api.calls()[0] else {
        panic!("expected create");
    };
    assert_eq!(body["displayName"], "Nightly orders");
    assert_eq!(body["loggerLevel"], "DEBUG");
    assert_eq!(body["airflowConfig"]["scheduleInterval"], "0 0 * * *");
    assert_eq!(
        flow.success_message().unwrap(),
        "\"Nightly orders\" has been created and deployed successfully"
    );
}

#[tokio::test]
async fn test_create_failure_returns_to_idle_without_deploy() {
    let api = Arc::new(FakeApi {
        fail_create: true,
        ..Default::default()
    });
    let flow = create_flow(&api);

    let err = flow.submit(PipelineDraft::new("", false)).await.unwrap_err();

    assert!(matches!(err, FlowError::CreateFailed(_)));
    assert!(err.is_retryable());
    assert_eq!(api.deploy_count(), 0);

    let snap = flow.snapshot();
    assert_eq!(snap.status, DeploymentStatus::Idle);
    assert_eq!(snap.progress, Progress::new(0));
    assert!(snap.last_error.is_some());
    assert!(flow.success_message().is_none());
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_clearing_schedule_patches_only_edited_fields() {
    let api = Arc::new(FakeApi::default());
    let flow = update_flow(&api, vec!["c1".into(), "c2".into()]);

    let pipeline = flow.submit(PipelineDraft::new("", true)).await.unwrap();

    let calls = api.calls();
    assert_eq!(calls.len(), 2);
    let Call::Update(pipeline_id, ops) = &calls[0] else {
        panic!("expected update, got {:?}", calls[0]);
    };
    assert_eq!(*pipeline_id, existing_pipeline().id);

    let paths: Vec<&str> = ops
        .as_array()
        .unwrap()
        .iter()
        .map(|op| op["path"].as_str().unwrap())
        .collect();
    assert!(paths.contains(&"/airflowConfig/scheduleInterval"));
    assert!(paths.iter().all(|p| {
        *p == "/airflowConfig/scheduleInterval" || p.starts_with("/sourceConfig/config/testCases")
    }));

    assert_eq!(pipeline.schedule(), None);
    assert_eq!(pipeline.display_name.as_deref(), Some("Orders checks"));
    assert_eq!(calls[1], Call::Deploy(pipeline.id));
}

#[tokio::test]
async fn test_update_never_creates() {
    let api = Arc::new(FakeApi::default());
    let flow = update_flow(&api, vec!["c1".into()]);
    assert_eq!(flow.mode(), FlowMode::Update);

    flow.submit(PipelineDraft::new("0 * * * *", false)).await.unwrap();

    assert!(!api.calls().iter().any(|c| matches!(c, Call::Create(_))));
    assert_eq!(
        flow.success_message().unwrap(),
        "\"Orders checks\" has been updated and deployed successfully"
    );
}

#[tokio::test]
async fn test_update_failure_is_surfaced() {
    let api = Arc::new(FakeApi {
        fail_update: true,
        ..Default::default()
    });
    let flow = update_flow(&api, vec!["c1".into()]);

    let err = flow.submit(PipelineDraft::new("0 * * * *", false)).await.unwrap_err();

    assert!(matches!(err, FlowError::UpdateFailed(_)));
    assert_eq!(api.deploy_count(), 0);
    assert_eq!(flow.snapshot().status, DeploymentStatus::Idle);
}

#[tokio::test]
async fn test_update_deploy_failure_retries_patched_id() {
    let api = Arc::new(FakeApi::failing_deploys(&[503]));
    let flow = update_flow(&api, vec!["c1".into(), "c2".into()]);

    let err = flow
        .submit(PipelineDraft::new("0 * * * *", false))
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::DeployFailed(_)));

    let snap = flow.snapshot();
    assert_eq!(snap.status, DeploymentStatus::DeployError);
    assert!(snap.show_deploy_button);
    assert_eq!(
        flow.success_message().unwrap(),
        "\"Orders checks\" has been updated successfully, but failed to deploy"
    );

    let patched_id = snap.pipeline.as_ref().map(|p| p.id).unwrap();
    flow.retry_deploy().await.unwrap();

    let calls = api.calls();
    assert!(matches!(calls[0], Call::Update(..)));
    assert_eq!(&calls[1..], &[Call::Deploy(patched_id), Call::Deploy(patched_id)]);
    assert!(flow.snapshot().is_deployed());
}

// =============================================================================
// Deploy and retry
// =============================================================================

#[tokio::test]
async fn test_deploy_failure_offers_retry() {
    let api = Arc::new(FakeApi::failing_deploys(&[503]));
    let flow = create_flow(&api);

    let err = flow.submit(PipelineDraft::new("", false)).await.unwrap_err();
    assert!(matches!(err, FlowError::DeployFailed(_)));

    let snap = flow.snapshot();
    assert_eq!(snap.status, DeploymentStatus::DeployError);
    assert_eq!(snap.progress.value(), 80);
    assert!(snap.show_deploy_button);
    assert!(snap.is_created());
    assert_eq!(
        flow.success_message().unwrap(),
        "\"orders_TestSuite\" has been created successfully, but failed to deploy"
    );

    flow.retry_deploy().await.unwrap();

    assert_eq!(api.deploy_count(), 2);
    let snap = flow.snapshot();
    assert_eq!(snap.status, DeploymentStatus::Deployed);
    assert!(!snap.show_deploy_button);
    assert!(snap.last_error.is_none());
}

#[tokio::test]
async fn test_each_retry_issues_one_deploy() {
    let api = Arc::new(FakeApi::failing_deploys(&[503, 502, 500]));
    let flow = create_flow(&api);

    assert!(flow.submit(PipelineDraft::new("", false)).await.is_err());
    assert!(flow.retry_deploy().await.is_err());
    assert_eq!(api.deploy_count(), 2);
    assert!(flow.retry_deploy().await.is_err());
    assert_eq!(api.deploy_count(), 3);
    assert!(flow.retry_deploy().await.is_ok());
    assert_eq!(api.deploy_count(), 4);
}

#[tokio::test]
async fn test_retry_before_create_is_rejected() {
    let api = Arc::new(FakeApi::default());
    let flow = create_flow(&api);

    assert!(matches!(
        flow.retry_deploy().await,
        Err(FlowError::MissingIdentity)
    ));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_retry_after_deployed_is_rejected() {
    let api = Arc::new(FakeApi::default());
    let flow = create_flow(&api);
    flow.submit(PipelineDraft::new("", false)).await.unwrap();

    assert!(matches!(
        flow.retry_deploy().await,
        Err(FlowError::InvalidTransition { .. })
    ));
    assert_eq!(api.deploy_count(), 1);
}

#[tokio::test]
async fn test_submit_after_creation_is_rejected() {
    let api = Arc::new(FakeApi::failing_deploys(&[503]));
    let flow = create_flow(&api);
    let _ = flow.submit(PipelineDraft::new("", false)).await;

    assert!(matches!(
        flow.submit(PipelineDraft::new("", false)).await,
        Err(FlowError::InvalidTransition { .. })
    ));
    assert_eq!(api.calls().len(), 2);
}

#[tokio::test]
async fn test_second_submit_while_in_flight_is_busy() {
    let gate = Arc::new(Notify::new());
    let api = Arc::new(FakeApi {
        gate: Some(gate.clone()),
        ..Default::default()
    });
    let flow = create_flow(&api);

    let (first, second) = tokio::join!(flow.submit(PipelineDraft::new("", false)), async {
        tokio::task::yield_now().await;
        let second = flow.submit(PipelineDraft::new("", false)).await;
        gate.notify_one();
        second
    });

    assert!(first.is_ok());
    assert!(matches!(
        second,
        Err(FlowError::Busy(DeploymentStatus::Creating))
    ));
    assert_eq!(
        api.calls()
            .iter()
            .filter(|c| matches!(c, Call::Create(_)))
            .count(),
        1
    );
}

// =============================================================================
// Progress and overlay
// =============================================================================

#[tokio::test]
async fn test_progress_is_monotonic_through_a_run() {
    let api = Arc::new(FakeApi::failing_deploys(&[503]));
    let flow = create_flow(&api);
    let mut rx = flow.subscribe();

    let watcher = tokio::spawn(async move {
        let mut seen = vec![rx.borrow().progress];
        while rx.changed().await.is_ok() {
            seen.push(rx.borrow().progress);
        }
        seen
    });

    let _ = flow.submit(PipelineDraft::new("", false)).await;
    flow.retry_deploy().await.unwrap();
    drop(flow);

    let seen = watcher.await.unwrap();
    assert!(seen.windows(2).all(|w| w[0] <= w[1]), "{:?}", seen);
    assert_eq!(seen.last().map(|p| p.value()), Some(100));
}

#[tokio::test]
async fn test_overlay_hides_after_delay() {
    let api = Arc::new(FakeApi::default());
    let flow = create_flow(&api);

    flow.submit(PipelineDraft::new("", false)).await.unwrap();
    assert!(flow.snapshot().overlay_visible);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!flow.snapshot().overlay_visible);
}

#[tokio::test]
async fn test_overlay_timer_aborted_on_drop() {
    let api = Arc::new(FakeApi::default());
    let flow = create_flow(&api);
    let rx = flow.subscribe();

    flow.submit(PipelineDraft::new("", false)).await.unwrap();
    let handle = flow
        .overlay_timer
        .lock()
        .unwrap()
        .as_ref()
        .map(|h| h.abort_handle())
        .unwrap();
    drop(flow);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(handle.is_finished());
    assert!(rx.borrow().overlay_visible);
}

// =============================================================================
// Drafts and form defaults
// =============================================================================

#[tokio::test]
async fn test_invalid_cron_is_rejected_before_any_call() {
    let api = Arc::new(FakeApi::default());
    let flow = create_flow(&api);

    let err = flow
        .submit(PipelineDraft::new("every day", false))
        .await
        .unwrap_err();

    assert!(matches!(err, FlowError::InvalidDraft(_)));
    assert!(!err.is_retryable());
    assert!(api.calls().is_empty());
    assert_eq!(flow.snapshot().status, DeploymentStatus::Idle);
}

#[tokio::test]
async fn test_named_cron_fields_reach_the_server() {
    let api = Arc::new(FakeApi::default());
    let flow = create_flow(&api);

    flow.submit(PipelineDraft::new("0 9 * * MON-FRI", false))
        .await
        .unwrap();

    let Call::Create(body) = &api.calls()[0] else {
        panic!("expected create");
    };
    assert_eq!(body["airflowConfig"]["scheduleInterval"], "0 9 * * MON-FRI");
}

#[tokio::test]
async fn test_schedule_must_match_allowed_options() {
    let api = Arc::new(FakeApi::default());
    let flow = DeploymentFlow::new(
        api.clone(),
        FlowInput::new(test_suite(), vec![]),
        FlowSettings {
            schedule_options: Some(vec![ScheduleFrequency::Weekly]),
            limits_enabled: true,
            ..settings()
        },
    );

    let err = flow
        .submit(PipelineDraft::new("0 * * * *", false))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        FlowError::InvalidDraft(ScheduleError::NotAllowed {
            frequency: ScheduleFrequency::Hourly,
            ..
        })
    ));

    flow.submit(PipelineDraft::new(flow.initial_form().schedule, false))
        .await
        .unwrap();
}

#[test]
fn test_initial_form_defaults() {
    let api = Arc::new(FakeApi::default());

    let flow = create_flow(&api);
    assert_eq!(
        flow.initial_form(),
        FormDefaults {
            schedule: "0 * * * *".to_string(),
            enable_debug_log: false,
        }
    );

    let limited = DeploymentFlow::new(
        api.clone(),
        FlowInput::new(test_suite(), vec![]),
        FlowSettings {
            limits_enabled: true,
            ..settings()
        },
    );
    assert_eq!(limited.initial_form().schedule, "0 0 * * 0");

    let editing = update_flow(&api, vec![]);
    assert_eq!(
        editing.initial_form(),
        FormDefaults {
            schedule: "0 0 * * *".to_string(),
            enable_debug_log: true,
        }
    );
}

#[test]
fn test_exits() {
    let api = Arc::new(FakeApi::default());

    assert_eq!(create_flow(&api).cancel(), FlowExit::Cancelled);
    assert_eq!(
        create_flow(&api).view(),
        FlowExit::ViewTestSuite {
            test_suite: "mysql.shop.public.orders.testSuite".to_string()
        }
    );
}
