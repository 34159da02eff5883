//! Core domain types
//!
//! This module contains the catalog entities the deployment flow works with.
//! Wire names follow the catalog API (camelCase), so these types are shared
//! between the HTTP client (serialization) and the flow controller (diffing).

pub mod deployment;
pub mod entity;
pub mod pipeline;
pub mod test_suite;
