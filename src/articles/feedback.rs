use rusqlite::{params, Connection};

use super::types::FeedbackRequest;
use crate::error::{ServiceError, ServiceResult};

/// Append one feedback row. Repeated identical submissions each add a row.
///
/// `axis` is free text and `article_id` is not checked against `articles`.
pub fn submit_feedback(conn: &Connection, feedback: &FeedbackRequest) -> ServiceResult<()> {
    let article_id = feedback.article_id.as_deref().unwrap_or_default();
    let axis = feedback.axis.as_deref().unwrap_or_default();
    if article_id.is_empty() || axis.is_empty() {
        return Err(ServiceError::Validation("Missing required fields".into()));
    }

    let user_score = match feedback.user_score {
        Some(score @ 0..=2) => score,
        _ => {
            return Err(ServiceError::Validation(
                "user_score must be 0, 1, or 2".into(),
            ))
        }
    };

    conn.execute(
        "INSERT INTO feedback_log (article_id, axis, user_score, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![article_id, axis, user_score, chrono::Utc::now().to_rfc3339()],
    )?;

    tracing::info!(article_id, axis, user_score, "feedback recorded");
    Ok(())
}
