//! Pipeline DTOs for the catalog API

use serde::{Deserialize, Serialize};

use crate::domain::entity::EntityReference;
use crate::domain::pipeline::{AirflowConfig, LogLevel, PipelineType, SourceConfig};

/// Request to create a new ingestion pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIngestionPipeline {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub pipeline_type: PipelineType,
    pub airflow_config: AirflowConfig,
    pub logger_level: LogLevel,
    pub source_config: SourceConfig,
    pub service: EntityReference,
}
