use anyhow::Result;

use seithi::config::SeithiConfig;

/// Display article statistics in the terminal.
pub fn stats(config: &SeithiConfig) -> Result<()> {
    let db_path = config.resolved_db_path();
    let conn = seithi::db::open_database(&db_path)?;

    let stats = seithi::articles::stats::compute_stats(&conn)?;

    println!("Article Statistics");
    println!("{}", "=".repeat(40));
    println!("  Total articles:      {}", stats.total_articles);
    println!("  Avg facts score:     {:.3}", stats.avg_facts_score);
    println!("  Avg calm score:      {:.3}", stats.avg_calm_score);
    println!("  Avg deep score:      {:.3}", stats.avg_deep_score);

    Ok(())
}
