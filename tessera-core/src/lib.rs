//! Tessera Core
//!
//! Core types and lookups for scheduling data-quality test suites as
//! ingestion pipelines.
//!
//! This crate contains:
//! - Domain types: Core catalog entities (IngestionPipeline, TestSuite, etc.)
//! - DTOs: Request payloads sent to the catalog API
//! - Deployment status machine and progress checkpoints
//! - Schedule parsing and naming helpers
//! - Service catalog: static service-type lookups (icons, names, explore tabs)

pub mod catalog;
pub mod domain;
pub mod dto;
pub mod naming;
pub mod schedule;
