//! SQL DDL for the Seithi tables.
//!
//! Defines `articles`, `feedback_log`, and `schema_meta`. All DDL uses
//! `IF NOT EXISTS` for idempotent initialization; later columns and indexes
//! arrive through [`super::migrations`].

use rusqlite::Connection;

/// Version-1 schema.
const SCHEMA_SQL: &str = r#"
-- Scored articles, unique by url
CREATE TABLE IF NOT EXISTS articles (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    url TEXT NOT NULL UNIQUE,
    domain TEXT NOT NULL,
    content TEXT,
    published_at TEXT,
    epistemic_opinion_score REAL NOT NULL DEFAULT 0.333,
    epistemic_mixed_score REAL NOT NULL DEFAULT 0.333,
    epistemic_facts_score REAL NOT NULL DEFAULT 0.334,
    emotive_triggering_score REAL NOT NULL DEFAULT 0.333,
    emotive_mixed_score REAL NOT NULL DEFAULT 0.333,
    emotive_calm_score REAL NOT NULL DEFAULT 0.334,
    density_fluff_score REAL NOT NULL DEFAULT 0.333,
    density_standard_score REAL NOT NULL DEFAULT 0.333,
    density_deep_score REAL NOT NULL DEFAULT 0.334
);

CREATE INDEX IF NOT EXISTS idx_articles_domain ON articles(domain);

-- User corrections; article_id is advisory (no FK)
CREATE TABLE IF NOT EXISTS feedback_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    article_id TEXT NOT NULL,
    axis TEXT NOT NULL,
    user_score INTEGER NOT NULL CHECK(user_score IN (0, 1, 2))
);

CREATE INDEX IF NOT EXISTS idx_feedback_article ON feedback_log(article_id);

-- Schema metadata
CREATE TABLE IF NOT EXISTS schema_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Initialize all schema tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    // Set initial schema version if not already present
    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES ('schema_version', '1')",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"articles".to_string()));
        assert!(tables.contains(&"feedback_log".to_string()));
        assert!(tables.contains(&"schema_meta".to_string()));
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap(); // second call should not error
    }

    #[test]
    fn user_score_check_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        let bad = conn.execute(
            "INSERT INTO feedback_log (article_id, axis, user_score) VALUES ('a', 'epistemic', 3)",
            [],
        );
        assert!(bad.is_err(), "user_score outside 0..=2 should be rejected");
    }
}
