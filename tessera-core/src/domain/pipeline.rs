//! Ingestion pipeline domain types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

use super::entity::EntityReference;

/// Ingestion pipeline record as stored by the catalog
///
/// Fields the deployment flow does not model are kept in `extra` so that a
/// record can be diffed against an edited copy without touching them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionPipeline {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
    pub pipeline_type: PipelineType,
    #[serde(default)]
    pub airflow_config: AirflowConfig,
    #[serde(default)]
    pub logger_level: LogLevel,
    pub source_config: SourceConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<EntityReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployed: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IngestionPipeline {
    /// Cron schedule, if the pipeline is scheduled
    pub fn schedule(&self) -> Option<&str> {
        self.airflow_config.schedule_interval.as_deref()
    }

    /// Names of the test cases bound to this pipeline
    pub fn test_cases(&self) -> &[String] {
        self.source_config.config.test_cases.as_deref().unwrap_or(&[])
    }

    /// Display name if set, otherwise the pipeline name
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// What the user submitted from the schedule form
///
/// An empty `schedule` means the pipeline is not scheduled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineDraft {
    pub schedule: String,
    pub enable_debug_log: bool,
}

impl PipelineDraft {
    pub fn new(schedule: impl Into<String>, enable_debug_log: bool) -> Self {
        Self {
            schedule: schedule.into(),
            enable_debug_log,
        }
    }
}

/// Scheduler settings handed to the orchestration backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirflowConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_interval: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AirflowConfig {
    /// Config carrying only a schedule
    pub fn with_schedule(schedule_interval: Option<String>) -> Self {
        Self {
            schedule_interval,
            extra: Map::new(),
        }
    }
}

/// Source configuration wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub config: TestSuitePipelineConfig,
}

/// Test-suite specific source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuitePipelineConfig {
    #[serde(rename = "type")]
    pub config_type: ConfigType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_fully_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_cases: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Source config type marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigType {
    TestSuite,
}

/// Kind of ingestion pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipelineType {
    #[serde(rename = "metadata")]
    Metadata,
    #[serde(rename = "usage")]
    Usage,
    #[serde(rename = "lineage")]
    Lineage,
    #[serde(rename = "profiler")]
    Profiler,
    #[serde(rename = "TestSuite")]
    TestSuite,
    #[serde(rename = "dataInsight")]
    DataInsight,
    #[serde(rename = "elasticSearchReindex")]
    ElasticSearchReindex,
    #[serde(rename = "dbt")]
    Dbt,
    #[serde(rename = "application")]
    Application,
}

impl PipelineType {
    /// Wire value of the pipeline type
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineType::Metadata => "metadata",
            PipelineType::Usage => "usage",
            PipelineType::Lineage => "lineage",
            PipelineType::Profiler => "profiler",
            PipelineType::TestSuite => "TestSuite",
            PipelineType::DataInsight => "dataInsight",
            PipelineType::ElasticSearchReindex => "elasticSearchReindex",
            PipelineType::Dbt => "dbt",
            PipelineType::Application => "application",
        }
    }

    /// Entity type used when binding a pipeline of this kind to its service
    pub fn service_entity_type(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for PipelineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logger level of the ingestion workflow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Level selected by the debug-log toggle
    pub fn from_debug_flag(enable_debug_log: bool) -> Self {
        if enable_debug_log {
            LogLevel::Debug
        } else {
            LogLevel::Info
        }
    }
}
