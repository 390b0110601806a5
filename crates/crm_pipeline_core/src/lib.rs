//! Shared CRM lead pipeline domain primitives.
//!
//! This crate owns the lead event contract, the enrichment merge, the
//! notification summary, storage key layout, and the error taxonomy shared by
//! both pipeline stages. It intentionally excludes AWS SDK and Lambda runtime
//! concerns.

pub mod contract;
pub mod error;
pub mod json_format;
pub mod notification;
pub mod storage_keys;
