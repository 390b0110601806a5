//! AWS-oriented adapters and handlers for the CRM lead pipeline.
//!
//! This crate owns runtime integration details (Lambda handlers, queue and
//! topic dispatch, object storage, the lead lookup client, environment
//! configuration and log setup). Domain types live in `crm_pipeline_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod telemetry;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
