pub mod enrich;
pub mod ingest;
pub mod invocation;
pub mod response;
