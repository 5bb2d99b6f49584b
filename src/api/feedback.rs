use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::{json_body, ApiError, AppState};
use crate::articles::feedback::submit_feedback;
use crate::articles::types::FeedbackRequest;

/// `POST /api/feedback`
pub(super) async fn submit(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let feedback: FeedbackRequest = json_body(body)?;

    state
        .with_conn(move |conn| submit_feedback(conn, &feedback))
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to save feedback"))?;

    Ok((StatusCode::CREATED, Json(json!({ "status": "success" }))))
}
