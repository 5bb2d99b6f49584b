use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::{json_body, ApiError, AppState};
use crate::articles::ingest::{ingest_article, IngestOutcome};
use crate::articles::types::NewArticle;
use crate::error::ServiceError;

/// `POST /api/ingest`
///
/// The bearer check runs before the body is looked at, so an unauthorized
/// caller never sees validation messages.
pub(super) async fn ingest(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let expected = state.config.ingest.secret.as_deref();
    if !is_authorized(&headers, expected) {
        tracing::warn!("ingest rejected: bad or missing bearer token");
        return Err(ApiError::from_service(ServiceError::Unauthorized, "Unauthorized"));
    }

    let article: NewArticle = json_body(body)?;

    let outcome = state
        .with_conn(move |conn| ingest_article(conn, &article))
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to ingest article"))?;

    let response = match outcome {
        IngestOutcome::Created { id } => (
            StatusCode::CREATED,
            Json(json!({ "status": "success", "id": id })),
        ),
        IngestOutcome::Ignored => (
            StatusCode::OK,
            Json(json!({ "status": "ignored", "message": "Article URL already exists" })),
        ),
    };
    Ok(response.into_response())
}

/// `Authorization` must be exactly `Bearer <secret>`. With no secret
/// configured nothing is authorized.
fn is_authorized(headers: &HeaderMap, expected: Option<&str>) -> bool {
    let Some(secret) = expected.filter(|s| !s.is_empty()) else {
        return false;
    };
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| token == secret)
}
