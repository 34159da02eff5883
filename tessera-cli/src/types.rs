//! Common types used across CLI modules

use uuid::Uuid;

/// Identifier of an ingestion pipeline: its UUID or its fully-qualified name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineRef {
    /// Pipeline UUID
    Id(Uuid),
    /// Pipeline FQN, looked up on the server
    Fqn(String),
}

impl PipelineRef {
    /// Parse a string into a PipelineRef
    ///
    /// Attempts to parse as a UUID first, otherwise treats it as an FQN
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if let Ok(uuid) = Uuid::parse_str(input) {
            PipelineRef::Id(uuid)
        } else {
            PipelineRef::Fqn(input.to_string())
        }
    }

    /// Get the UUID if it was given directly
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            PipelineRef::Id(uuid) => Some(*uuid),
            PipelineRef::Fqn(_) => None,
        }
    }
}

impl std::fmt::Display for PipelineRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineRef::Id(uuid) => write!(f, "{}", uuid),
            PipelineRef::Fqn(fqn) => write!(f, "{}", fqn),
        }
    }
}

impl From<Uuid> for PipelineRef {
    fn from(uuid: Uuid) -> Self {
        PipelineRef::Id(uuid)
    }
}
