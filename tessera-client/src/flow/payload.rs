//! Request payloads built from a draft

use json_patch::Patch;
use tessera_core::domain::entity::EntityReference;
use tessera_core::domain::pipeline::{
    AirflowConfig, ConfigType, IngestionPipeline, LogLevel, PipelineType, SourceConfig,
    TestSuitePipelineConfig,
};
use tessera_core::domain::test_suite::TestSuite;
use tessera_core::dto::pipeline::CreateIngestionPipeline;
use tessera_core::naming::{ingestion_name, name_from_fqn, replace_special_chars};
use uuid::Uuid;

/// Validated form values, schedule already normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PipelineSettings {
    pub schedule: Option<String>,
    pub logger_level: LogLevel,
}

/// Display name for a new pipeline when none was supplied
///
/// Derived from the last FQN segment of the suite's bound entity.
pub fn default_display_name(test_suite: &TestSuite) -> String {
    let table_name = replace_special_chars(&name_from_fqn(test_suite.entity_fqn()));
    ingestion_name(&table_name, PipelineType::TestSuite)
}

/// Builds the create request for a brand new test-suite pipeline
pub(super) fn create_request(
    test_suite: &TestSuite,
    test_case_names: &[String],
    pipeline_name: Option<&str>,
    settings: PipelineSettings,
) -> CreateIngestionPipeline {
    let entity_fqn = test_suite
        .executable_entity_reference
        .as_ref()
        .and_then(|r| r.fully_qualified_name.clone());

    CreateIngestionPipeline {
        name: Uuid::new_v4().to_string(),
        display_name: Some(
            pipeline_name
                .map(str::to_string)
                .unwrap_or_else(|| default_display_name(test_suite)),
        ),
        pipeline_type: PipelineType::TestSuite,
        airflow_config: AirflowConfig::with_schedule(settings.schedule),
        logger_level: settings.logger_level,
        source_config: SourceConfig {
            config: TestSuitePipelineConfig {
                config_type: ConfigType::TestSuite,
                entity_fully_qualified_name: entity_fqn,
                test_cases: Some(test_case_names.to_vec()),
                extra: Default::default(),
            },
        },
        service: EntityReference::new(
            test_suite.id,
            PipelineType::TestSuite.service_entity_type(),
        ),
    }
}

/// Copy of `existing` with the editable fields replaced
///
/// Everything else, including unmodelled fields, is carried over untouched.
pub(super) fn updated_record(
    existing: &IngestionPipeline,
    test_case_names: &[String],
    pipeline_name: Option<&str>,
    settings: PipelineSettings,
) -> IngestionPipeline {
    let mut updated = existing.clone();

    // Without a new name the stored display name is kept, not cleared.
    if let Some(name) = pipeline_name {
        updated.display_name = Some(name.to_string());
    }
    updated.airflow_config.schedule_interval = settings.schedule;
    updated.logger_level = settings.logger_level;
    updated.source_config.config.test_cases = Some(test_case_names.to_vec());

    updated
}

/// JSON Patch turning `before` into `after`
pub fn pipeline_diff(
    before: &IngestionPipeline,
    after: &IngestionPipeline,
) -> Result<Patch, serde_json::Error> {
    let before = serde_json::to_value(before)?;
    let after = serde_json::to_value(after)?;
    Ok(json_patch::diff(&before, &after))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn suite() -> TestSuite {
        serde_json::from_value(json!({
            "id": "0d3c6f7e-1b2a-4c5d-8e9f-a0b1c2d3e4f5",
            "name": "orders.testSuite",
            "executableEntityReference": {
                "id": "5c3c6f7e-1b2a-4c5d-8e9f-a0b1c2d3e4f5",
                "type": "table",
                "fullyQualifiedName": "mysql.shop.public.\"order items\""
            }
        }))
        .unwrap()
    }

    fn existing() -> IngestionPipeline {
        serde_json::from_value(json!({
            "id": "6f1c3c7e-8f7b-4b8e-9a55-3f3c3c2a1b10",
            "name": "orders_TestSuite",
            "displayName": "Orders checks",
            "pipelineType": "TestSuite",
            "airflowConfig": { "scheduleInterval": "0 0 * * *", "retries": 3 },
            "loggerLevel": "INFO",
            "sourceConfig": {
                "config": {
                    "type": "TestSuite",
                    "entityFullyQualifiedName": "mysql.shop.public.orders",
                    "testCases": ["orders_not_null"]
                }
            }
        }))
        .unwrap()
    }

    fn ops(patch: &Patch) -> Vec<(String, String)> {
        let value = serde_json::to_value(patch).unwrap();
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|op| {
                (
                    op["op"].as_str().unwrap().to_string(),
                    op["path"].as_str().unwrap().to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn test_default_display_name_sanitizes_table_name() {
        assert_eq!(default_display_name(&suite()), "order_items_TestSuite");
    }

    #[test]
    fn test_create_request_wire_shape() {
        let req = create_request(
            &suite(),
            &["c1".to_string(), "c2".to_string()],
            None,
            PipelineSettings {
                schedule: None,
                logger_level: LogLevel::Info,
            },
        );
        let value = serde_json::to_value(&req).unwrap();

        assert!(Uuid::parse_str(value["name"].as_str().unwrap()).is_ok());
        assert_eq!(value["displayName"], "order_items_TestSuite");
        assert_eq!(value["pipelineType"], "TestSuite");
        assert_eq!(value["loggerLevel"], "INFO");
        assert_eq!(value["airflowConfig"], json!({}));
        assert_eq!(value["service"]["type"], "testSuite");
        assert_eq!(value["service"]["id"], "0d3c6f7e-1b2a-4c5d-8e9f-a0b1c2d3e4f5");
        assert_eq!(
            value["sourceConfig"]["config"],
            json!({
                "type": "TestSuite",
                "entityFullyQualifiedName": "mysql.shop.public.\"order items\"",
                "testCases": ["c1", "c2"]
            })
        );
    }

    #[test]
    fn test_create_request_prefers_supplied_name() {
        let req = create_request(
            &suite(),
            &[],
            Some("Nightly checks"),
            PipelineSettings {
                schedule: Some("0 0 * * *".to_string()),
                logger_level: LogLevel::Debug,
            },
        );

        assert_eq!(req.display_name.as_deref(), Some("Nightly checks"));
        assert_eq!(req.airflow_config.schedule_interval.as_deref(), Some("0 0 * * *"));
    }

    #[test]
    fn test_fresh_names_per_request() {
        let settings = PipelineSettings {
            schedule: None,
            logger_level: LogLevel::Info,
        };
        let a = create_request(&suite(), &[], None, settings.clone());
        let b = create_request(&suite(), &[], None, settings);
        assert_ne!(a.name, b.name);
    }

    #[test]
    fn test_diff_clearing_schedule_touches_only_edited_fields() {
        let before = existing();
        let after = updated_record(
            &before,
            &["orders_not_null".to_string(), "orders_unique".to_string()],
            None,
            PipelineSettings {
                schedule: None,
                logger_level: LogLevel::Info,
            },
        );

        let patch = pipeline_diff(&before, &after).unwrap();
        let ops = ops(&patch);

        assert!(ops.contains(&(
            "remove".to_string(),
            "/airflowConfig/scheduleInterval".to_string()
        )));
        assert!(
            ops.iter()
                .all(|(_, path)| path.starts_with("/airflowConfig/scheduleInterval")
                    || path.starts_with("/sourceConfig/config/testCases"))
        );
    }

    #[test]
    fn test_diff_applies_cleanly() {
        let before = existing();
        let after = updated_record(
            &before,
            &[],
            Some("Renamed"),
            PipelineSettings {
                schedule: Some("0 * * * *".to_string()),
                logger_level: LogLevel::Debug,
            },
        );

        let patch = pipeline_diff(&before, &after).unwrap();
        let mut doc: Value = serde_json::to_value(&before).unwrap();
        json_patch::patch(&mut doc, &patch.0).unwrap();

        assert_eq!(doc, serde_json::to_value(&after).unwrap());
        assert_eq!(doc["airflowConfig"]["retries"], 3);
    }

    #[test]
    fn test_update_without_name_keeps_display_name() {
        let before = existing();
        let settings = PipelineSettings {
            schedule: Some("0 0 * * *".to_string()),
            logger_level: LogLevel::Info,
        };

        let kept = updated_record(&before, &["orders_not_null".to_string()], None, settings.clone());
        assert_eq!(kept.display_name.as_deref(), Some("Orders checks"));
        assert!(pipeline_diff(&before, &kept).unwrap().0.is_empty());

        let renamed = updated_record(&before, &[], Some("Renamed"), settings);
        assert_eq!(renamed.display_name.as_deref(), Some("Renamed"));
    }

    #[test]
    fn test_unchanged_record_has_empty_diff() {
        let before = existing();
        let patch = pipeline_diff(&before, &before).unwrap();
        assert!(patch.0.is_empty());
    }
}
