//! Test suite domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::EntityReference;

/// A named collection of data-quality test cases bound to one entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuite {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// The table this suite executes against, if it is an executable suite
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable_entity_reference: Option<EntityReference>,
}

impl TestSuite {
    /// FQN of the bound entity, or an empty string for logical suites
    pub fn entity_fqn(&self) -> &str {
        self.executable_entity_reference
            .as_ref()
            .and_then(|r| r.fully_qualified_name.as_deref())
            .unwrap_or("")
    }
}
