//! Tessera HTTP Client
//!
//! A type-safe HTTP client for the catalog's ingestion pipeline API, plus the
//! deployment flow that drives create/update/deploy of a test-suite pipeline.
//!
//! # Example
//!
//! ```no_run
//! use tessera_client::CatalogClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = CatalogClient::new("http://localhost:8585").with_token("jwt");
//!
//!     let suite = client.get_test_suite_by_name("mysql.shop.public.orders.testSuite").await?;
//!
//!     println!("Test suite: {}", suite.id);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
pub mod flow;
mod pipelines;
mod test_suites;

// Re-export commonly used types
pub use api::IngestionApi;
pub use error::{ClientError, Result};
pub use flow::{
    DeploymentFlow, FlowError, FlowExit, FlowInput, FlowMode, FlowSettings, FlowSnapshot,
    FormDefaults,
};
pub use json_patch::Patch;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

/// HTTP client for the catalog API
///
/// Endpoints are grouped by resource:
/// - Ingestion pipelines (create, patch, deploy, lookup by FQN)
/// - Test suites (lookup by FQN)
#[derive(Debug, Clone)]
pub struct CatalogClient {
    /// Base URL of the catalog server (e.g., "http://localhost:8585")
    base_url: String,
    /// Bearer token sent with every request, if any
    token: Option<String>,
    /// HTTP client instance
    client: Client,
}

impl CatalogClient {
    /// Create a new catalog client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the catalog server (e.g., "http://localhost:8585")
    ///
    /// # Example
    /// ```
    /// use tessera_client::CatalogClient;
    ///
    /// let client = CatalogClient::new("http://localhost:8585");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new catalog client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the catalog server
    /// * `client` - A configured reqwest Client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            client,
        }
    }

    /// Authenticate every request with a bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the base URL of the catalog server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an absolute API URL from a path under `/api/v1`
    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// URL of a resource looked up by FQN, e.g. `services/ingestionPipelines/name/{fqn}`
    ///
    /// The FQN is percent-encoded as a single path segment.
    fn name_url(&self, collection: &str, fqn: &str) -> Result<Url> {
        if fqn.trim().is_empty() {
            return Err(ClientError::InvalidRequest("FQN cannot be empty".to_string()));
        }

        let mut url = Url::parse(&self.url(collection))
            .map_err(|e| ClientError::InvalidRequest(format!("Invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidRequest("Invalid base URL".to_string()))?
            .push("name")
            .push(fqn);

        Ok(url)
    }

    /// Start a request, attaching the bearer token when configured
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.authorize(self.client.request(method, self.url(path)))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response whose body is not needed (e.g., deploy triggers)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = CatalogClient::new("http://localhost:8585");
        assert_eq!(client.base_url(), "http://localhost:8585");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = CatalogClient::new("http://localhost:8585/");
        assert_eq!(client.base_url(), "http://localhost:8585");
    }

    #[test]
    fn test_api_url_building() {
        let client = CatalogClient::new("http://localhost:8585/");
        assert_eq!(
            client.url("/services/ingestionPipelines"),
            "http://localhost:8585/api/v1/services/ingestionPipelines"
        );
        assert_eq!(
            client.url("dataQuality/testSuites"),
            "http://localhost:8585/api/v1/dataQuality/testSuites"
        );
    }

    #[test]
    fn test_name_url_encodes_fqn() {
        let client = CatalogClient::new("http://localhost:8585");
        let url = client
            .name_url("dataQuality/testSuites", "mysql.shop.\"orders v2\".testSuite")
            .unwrap();

        assert_eq!(
            url.as_str(),
            "http://localhost:8585/api/v1/dataQuality/testSuites/name/mysql.shop.%22orders%20v2%22.testSuite"
        );
    }

    #[test]
    fn test_name_url_rejects_empty_fqn() {
        let client = CatalogClient::new("http://localhost:8585");
        assert!(matches!(
            client.name_url("services/ingestionPipelines", "  "),
            Err(ClientError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_request_carries_bearer_token() {
        let client = CatalogClient::new("http://localhost:8585").with_token("secret");
        let request = client
            .request(Method::GET, "services/ingestionPipelines")
            .build()
            .unwrap();

        assert_eq!(
            request.headers()[reqwest::header::AUTHORIZATION],
            "Bearer secret"
        );
    }

    #[test]
    fn test_request_without_token_has_no_auth_header() {
        let client = CatalogClient::with_client("http://localhost:8585", Client::new());
        let request = client
            .request(Method::GET, "services/ingestionPipelines")
            .build()
            .unwrap();

        assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }
}
