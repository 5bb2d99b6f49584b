//! Write path: validate an article payload and insert it unless its url exists.
//!
//! [`ingest_article`] is a single `INSERT ... ON CONFLICT(url) DO NOTHING
//! RETURNING id`. The unique constraint on `url` resolves concurrent
//! ingestion of the same article; there is no separate existence check.

use rusqlite::{params, Connection, OptionalExtension};

use super::types::NewArticle;
use crate::error::{ServiceError, ServiceResult};

/// Result of a successful ingestion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// A new row was written with the caller-supplied id.
    Created { id: String },
    /// An article with the same url already exists; nothing changed.
    Ignored,
}

/// Validate and insert one article.
///
/// Missing `id`, `title`, `url`, or `domain` (absent or empty) yields
/// [`ServiceError::Validation`] naming every missing field. A duplicate `id`
/// with a new `url` is not handled here and surfaces as a storage error.
pub fn ingest_article(conn: &Connection, article: &NewArticle) -> ServiceResult<IngestOutcome> {
    let (id, title, url, domain) = required_fields(article)?;
    let scores = article.resolved_scores();

    let inserted: Option<String> = conn
        .query_row(
            "INSERT INTO articles (
                id, title, url, domain, content, published_at,
                epistemic_opinion_score, epistemic_mixed_score, epistemic_facts_score,
                emotive_triggering_score, emotive_mixed_score, emotive_calm_score,
                density_fluff_score, density_standard_score, density_deep_score
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
             ON CONFLICT(url) DO NOTHING
             RETURNING id",
            params![
                id,
                title,
                url,
                domain,
                non_empty(article.content.as_deref()),
                non_empty(article.published_at.as_deref()),
                scores.epistemic_opinion_score,
                scores.epistemic_mixed_score,
                scores.epistemic_facts_score,
                scores.emotive_triggering_score,
                scores.emotive_mixed_score,
                scores.emotive_calm_score,
                scores.density_fluff_score,
                scores.density_standard_score,
                scores.density_deep_score,
            ],
            |row| row.get(0),
        )
        .optional()?;

    match inserted {
        Some(id) => {
            tracing::info!(id = %id, url = %url, domain = %domain, "article ingested");
            Ok(IngestOutcome::Created { id })
        }
        None => {
            tracing::info!(url = %url, "article url already exists, ignored");
            Ok(IngestOutcome::Ignored)
        }
    }
}

/// Extract the four required fields or name every one that is missing.
fn required_fields(article: &NewArticle) -> ServiceResult<(&str, &str, &str, &str)> {
    let id = non_empty(article.id.as_deref());
    let title = non_empty(article.title.as_deref());
    let url = non_empty(article.url.as_deref());
    let domain = non_empty(article.domain.as_deref());

    if let (Some(id), Some(title), Some(url), Some(domain)) = (id, title, url, domain) {
        return Ok((id, title, url, domain));
    }

    let missing: Vec<&str> = [("id", id), ("title", title), ("url", url), ("domain", domain)]
        .iter()
        .filter(|(_, v)| v.is_none())
        .map(|(name, _)| *name)
        .collect();
    Err(ServiceError::Validation(format!(
        "Missing core article fields: {}",
        missing.join(", ")
    )))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::articles::query::get_article;
    use crate::articles::types::DEFAULT_TRIAD_LAST_SCORE;
    use crate::db;

    fn test_db() -> Connection {
        db::open_memory_database().unwrap()
    }

    fn count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_ingest_new_article() {
        let conn = test_db();
        let outcome = ingest_article(&conn, &NewArticle::new("a1", "T", "http://x", "x.com")).unwrap();
        assert_eq!(outcome, IngestOutcome::Created { id: "a1".into() });

        let stored = get_article(&conn, "a1").unwrap().unwrap();
        assert_eq!(stored.url, "http://x");
        assert_eq!(stored.scores.density_deep_score, DEFAULT_TRIAD_LAST_SCORE);
    }

    #[test]
    fn test_missing_fields_are_all_named() {
        let conn = test_db();
        let payload = NewArticle {
            title: Some("T".into()),
            url: Some(String::new()),
            ..Default::default()
        };
        let err = ingest_article(&conn, &payload).unwrap_err();
        match err {
            ServiceError::Validation(msg) => {
                assert!(msg.contains("id"));
                assert!(msg.contains("url"));
                assert!(msg.contains("domain"));
                assert!(!msg.contains("title"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(count(&conn), 0);
    }

    #[test]
    fn test_duplicate_url_is_ignored() {
        let conn = test_db();
        ingest_article(&conn, &NewArticle::new("a1", "First", "http://x", "x.com")).unwrap();

        let mut again = NewArticle::new("a2", "Second", "http://x", "y.com");
        again.density_deep_score = Some(0.99);
        assert_eq!(ingest_article(&conn, &again).unwrap(), IngestOutcome::Ignored);

        assert_eq!(count(&conn), 1);
        let stored = get_article(&conn, "a1").unwrap().unwrap();
        assert_eq!(stored.title, "First");
        assert_eq!(stored.scores.density_deep_score, DEFAULT_TRIAD_LAST_SCORE);
        assert!(get_article(&conn, "a2").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_id_with_new_url_is_storage_error() {
        let conn = test_db();
        ingest_article(&conn, &NewArticle::new("a1", "T", "http://x", "x.com")).unwrap();
        let err = ingest_article(&conn, &NewArticle::new("a1", "T", "http://other", "x.com"))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));
    }

    #[test]
    fn test_empty_optional_fields_stored_as_null() {
        let conn = test_db();
        let mut payload = NewArticle::new("a1", "T", "http://x", "x.com");
        payload.content = Some(String::new());
        payload.published_at = Some(String::new());
        ingest_article(&conn, &payload).unwrap();

        let (content, published): (Option<String>, Option<String>) = conn
            .query_row(
                "SELECT content, published_at FROM articles WHERE id = 'a1'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert!(content.is_none());
        assert!(published.is_none());
    }
}
