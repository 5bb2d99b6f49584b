//! CLI `doctor` command: run database diagnostics and print a health report.

use anyhow::{Context, Result};

use seithi::config::SeithiConfig;
use seithi::db;

/// Run database diagnostics and print a health report.
pub fn doctor(config: &SeithiConfig) -> Result<()> {
    let db_path = config.resolved_db_path();

    if !db_path.exists() {
        println!("Database: not found at {}", db_path.display());
        println!("Run `seithi serve` or `seithi import` to initialize.");
        return Ok(());
    }

    let file_size = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);

    let conn = db::open_database(&db_path).context("failed to open database (may be corrupt)")?;

    let report = db::check_database_health(&conn).context("failed to run health check")?;

    println!("Seithi Health Report");
    println!("====================");
    println!();
    println!("Database:          {}", db_path.display());
    println!("File size:         {}", format_bytes(file_size));
    println!("Schema version:    {}", report.schema_version);
    println!(
        "Ingest secret:     {}",
        if config.ingest.secret.is_some() { "configured" } else { "MISSING (ingest disabled)" }
    );
    println!();
    println!("Row counts:");
    println!("  Articles:        {}", report.article_count);
    println!("  Feedback:        {}", report.feedback_count);
    println!();
    if report.integrity_ok {
        println!("Integrity check:   PASSED");
    } else {
        println!("Integrity check:   FAILED ({})", report.integrity_details);
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
