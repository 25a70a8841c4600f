pub mod ingest;
pub mod walker;
