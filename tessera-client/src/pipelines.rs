//! Ingestion pipeline API endpoints

use json_patch::Patch;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use tessera_core::domain::pipeline::IngestionPipeline;
use tessera_core::dto::pipeline::CreateIngestionPipeline;
use uuid::Uuid;

use crate::CatalogClient;
use crate::error::{ClientError, Result};

const JSON_PATCH_CONTENT_TYPE: &str = "application/json-patch+json";

impl CatalogClient {
    // =============================================================================
    // Ingestion Pipelines
    // =============================================================================

    /// Create a new ingestion pipeline
    ///
    /// # Arguments
    /// * `req` - The pipeline creation request
    ///
    /// # Returns
    /// The created pipeline, with its server-assigned id
    pub async fn create_pipeline(&self, req: &CreateIngestionPipeline) -> Result<IngestionPipeline> {
        let response = self
            .request(Method::POST, "services/ingestionPipelines")
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Apply a JSON Patch to an ingestion pipeline
    ///
    /// # Arguments
    /// * `pipeline_id` - The pipeline UUID
    /// * `patch` - Ordered patch operations from the current record to the desired one
    ///
    /// # Returns
    /// The updated pipeline
    pub async fn update_pipeline(&self, pipeline_id: Uuid, patch: &Patch) -> Result<IngestionPipeline> {
        let path = format!("services/ingestionPipelines/{}", pipeline_id);
        let response = self
            .request(Method::PATCH, &path)
            .header(CONTENT_TYPE, JSON_PATCH_CONTENT_TYPE)
            .json(patch)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Trigger deployment of an ingestion pipeline to the orchestration backend
    ///
    /// Success only means the backend accepted the deployment; nothing is polled.
    pub async fn deploy_pipeline(&self, pipeline_id: Uuid) -> Result<()> {
        let path = format!("services/ingestionPipelines/deploy/{}", pipeline_id);
        let response = self.request(Method::POST, &path).send().await?;

        self.handle_empty_response(response).await
    }

    /// Get an ingestion pipeline by ID
    pub async fn get_pipeline(&self, pipeline_id: Uuid) -> Result<IngestionPipeline> {
        let path = format!("services/ingestionPipelines/{}", pipeline_id);
        let response = self.request(Method::GET, &path).send().await?;

        self.handle_response(response).await.map_err(|e| {
            if e.is_not_found() {
                ClientError::NotFound(format!("ingestion pipeline {}", pipeline_id))
            } else {
                e
            }
        })
    }

    /// Get an ingestion pipeline by its fully-qualified name
    pub async fn get_pipeline_by_name(&self, fqn: &str) -> Result<IngestionPipeline> {
        let url = self.name_url("services/ingestionPipelines", fqn)?;
        let response = self.authorize(self.client.get(url)).send().await?;

        self.handle_response(response).await.map_err(|e| {
            if e.is_not_found() {
                ClientError::NotFound(format!("ingestion pipeline '{}'", fqn))
            } else {
                e
            }
        })
    }
}
