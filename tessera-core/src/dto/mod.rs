//! Data Transfer Objects sent to the catalog API
//!
//! DTOs are the request payloads of the ingestion pipeline endpoints.
//! Responses come back as the domain types in [`crate::domain`].

pub mod pipeline;
