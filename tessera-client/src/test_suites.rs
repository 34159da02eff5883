//! Test suite API endpoints

use tessera_core::domain::test_suite::TestSuite;

use crate::CatalogClient;
use crate::error::{ClientError, Result};

impl CatalogClient {
    /// Get a test suite by its fully-qualified name
    ///
    /// The bound entity reference is requested so the suite can be scheduled.
    pub async fn get_test_suite_by_name(&self, fqn: &str) -> Result<TestSuite> {
        let mut url = self.name_url("dataQuality/testSuites", fqn)?;
        url.query_pairs_mut()
            .append_pair("fields", "executableEntityReference");
        let response = self.authorize(self.client.get(url)).send().await?;

        self.handle_response(response).await.map_err(|e| {
            if e.is_not_found() {
                ClientError::NotFound(format!("test suite '{}'", fqn))
            } else {
                e
            }
        })
    }
}
