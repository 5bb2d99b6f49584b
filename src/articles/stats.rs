use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::error::ServiceResult;

/// Aggregate scores over the whole article store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_articles: u64,
    pub avg_facts_score: f64,
    pub avg_calm_score: f64,
    pub avg_deep_score: f64,
}

/// Compute article statistics. An empty store reports zeros, never nulls.
pub fn compute_stats(conn: &Connection) -> ServiceResult<Stats> {
    let stats = conn.query_row(
        "SELECT
            COUNT(*),
            COALESCE(AVG(epistemic_facts_score), 0.0),
            COALESCE(AVG(emotive_calm_score), 0.0),
            COALESCE(AVG(density_deep_score), 0.0)
         FROM articles",
        [],
        |row| {
            Ok(Stats {
                total_articles: row.get::<_, i64>(0)? as u64,
                avg_facts_score: row.get(1)?,
                avg_calm_score: row.get(2)?,
                avg_deep_score: row.get(3)?,
            })
        },
    )?;
    Ok(stats)
}
