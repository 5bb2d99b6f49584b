#![allow(dead_code)]

use rusqlite::Connection;
use seithi::articles::ingest::ingest_article;
use seithi::articles::types::NewArticle;
use seithi::db;

/// Open a fresh in-memory database with schema and migrations applied.
pub fn test_db() -> Connection {
    db::open_memory_database().unwrap()
}

/// Build a payload with the required fields plus the three filterable scores.
pub fn scored_article(id: &str, facts: f64, calm: f64, deep: f64) -> NewArticle {
    let mut a = NewArticle::new(id, format!("Title {id}"), format!("https://news.test/{id}"), "news.test");
    a.epistemic_facts_score = Some(facts);
    a.emotive_calm_score = Some(calm);
    a.density_deep_score = Some(deep);
    a
}

/// Insert an article through the ingestion path. Panics unless it was created.
pub fn insert_article(conn: &Connection, article: &NewArticle) {
    let outcome = ingest_article(conn, article).unwrap();
    assert!(
        matches!(outcome, seithi::articles::ingest::IngestOutcome::Created { .. }),
        "expected article to be created"
    );
}

/// Count rows in a table.
pub fn row_count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .unwrap()
}
