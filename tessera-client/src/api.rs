//! Ingestion API seam
//!
//! The deployment flow only needs three calls. They sit behind a trait so the
//! flow can run against the HTTP client or an in-memory fake.

use async_trait::async_trait;
use json_patch::Patch;
use tessera_core::domain::pipeline::IngestionPipeline;
use tessera_core::dto::pipeline::CreateIngestionPipeline;
use uuid::Uuid;

use crate::CatalogClient;
use crate::error::Result;

/// Calls the deployment flow makes against the catalog
#[async_trait]
pub trait IngestionApi: Send + Sync {
    /// Creates a pipeline and returns the stored record
    async fn create_pipeline(&self, req: CreateIngestionPipeline) -> Result<IngestionPipeline>;

    /// Patches a pipeline and returns the stored record
    async fn update_pipeline(&self, pipeline_id: Uuid, patch: Patch) -> Result<IngestionPipeline>;

    /// Triggers deployment; resolves once the backend accepted or refused it
    async fn deploy_pipeline(&self, pipeline_id: Uuid) -> Result<()>;
}

#[async_trait]
impl IngestionApi for CatalogClient {
    async fn create_pipeline(&self, req: CreateIngestionPipeline) -> Result<IngestionPipeline> {
        CatalogClient::create_pipeline(self, &req).await
    }

    async fn update_pipeline(&self, pipeline_id: Uuid, patch: Patch) -> Result<IngestionPipeline> {
        CatalogClient::update_pipeline(self, pipeline_id, &patch).await
    }

    async fn deploy_pipeline(&self, pipeline_id: Uuid) -> Result<()> {
        CatalogClient::deploy_pipeline(self, pipeline_id).await
    }
}
