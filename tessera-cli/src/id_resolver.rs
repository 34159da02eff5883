//! ID resolver module
//!
//! Resolves pipeline references by querying the API. This lets users name a
//! pipeline by FQN instead of by UUID.

use anyhow::{Context, Result};
use tessera_client::CatalogClient;
use tessera_core::domain::pipeline::IngestionPipeline;
use uuid::Uuid;

use crate::types::PipelineRef;

/// Resolve a pipeline reference to its UUID
///
/// A UUID is returned as is; an FQN is looked up on the server.
///
/// # Errors
/// Returns an error if no pipeline has the FQN or the API call fails
pub async fn resolve_pipeline_id(client: &CatalogClient, pipeline: &PipelineRef) -> Result<Uuid> {
    if let Some(id) = pipeline.as_uuid() {
        return Ok(id);
    }

    resolve_pipeline(client, pipeline).await.map(|p| p.id)
}

/// Fetch the full pipeline record behind a reference
pub async fn resolve_pipeline(
    client: &CatalogClient,
    pipeline: &PipelineRef,
) -> Result<IngestionPipeline> {
    let record = match pipeline {
        PipelineRef::Id(id) => client.get_pipeline(*id).await,
        PipelineRef::Fqn(fqn) => client.get_pipeline_by_name(fqn).await,
    };

    record.with_context(|| format!("Failed to resolve pipeline '{}'", pipeline))
}
