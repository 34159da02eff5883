//! Entity reference types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to another catalog entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityReference {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
}

impl EntityReference {
    /// Creates a bare reference with only id and type set
    pub fn new(id: Uuid, entity_type: impl Into<String>) -> Self {
        Self {
            id,
            entity_type: entity_type.into(),
            name: None,
            fully_qualified_name: None,
        }
    }
}
