use anyhow::{Context, Result};
use std::path::Path;

use seithi::articles::ingest::{ingest_article, IngestOutcome};
use seithi::articles::types::NewArticle;
use seithi::config::SeithiConfig;
use seithi::error::ServiceError;

/// Ingest articles from a JSON file containing an array of article payloads.
///
/// Uses the same write path as `POST /api/ingest`: duplicates by url are
/// skipped, and invalid entries are reported without stopping the run.
pub fn import(config: &SeithiConfig, file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read import file: {}", file.display()))?;

    let articles: Vec<NewArticle> =
        serde_json::from_str(&json).context("failed to parse import JSON")?;

    let db_path = config.resolved_db_path();
    let conn = seithi::db::open_database(&db_path)?;

    let mut imported = 0u64;
    let mut skipped = 0u64;
    let mut invalid = 0u64;

    println!("Importing {} articles...", articles.len());

    for (index, article) in articles.iter().enumerate() {
        match ingest_article(&conn, article) {
            Ok(IngestOutcome::Created { .. }) => imported += 1,
            Ok(IngestOutcome::Ignored) => skipped += 1,
            Err(ServiceError::Validation(msg)) => {
                eprintln!("Warning: entry {index} rejected: {msg}");
                invalid += 1;
            }
            Err(e) => return Err(e).with_context(|| format!("failed to import entry {index}")),
        }
    }

    println!("Import complete:");
    println!("  Articles imported: {imported}");
    println!("  Articles skipped:  {skipped} (url already exists)");
    if invalid > 0 {
        println!("  Articles invalid:  {invalid}");
    }

    Ok(())
}
