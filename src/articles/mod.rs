pub mod feedback;
pub mod ingest;
pub mod query;
pub mod stats;
pub mod types;
