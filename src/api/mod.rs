//! JSON HTTP API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/api/articles` | Filtered, sorted, paginated listing |
//! | `GET`  | `/api/articles/{id}` | Single article |
//! | `POST` | `/api/feedback` | Append a user correction |
//! | `POST` | `/api/ingest` | Upsert-by-url (bearer token required) |
//! | `GET`  | `/api/stats` | Aggregate averages |
//! | `GET`  | `/health` | Liveness and version |
//!
//! Errors are `{ "error": "...", "details": "..." }` with `details` omitted
//! when there is nothing useful to add.

mod articles;
mod feedback;
mod ingest;
mod stats;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::SeithiConfig;
use crate::error::ServiceError;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: Arc<SeithiConfig>,
}

impl AppState {
    pub fn new(conn: Connection, config: SeithiConfig) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            config: Arc::new(config),
        }
    }

    /// Run a synchronous storage call on the blocking pool.
    pub(crate) async fn with_conn<T, F>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&Connection) -> Result<T, ServiceError> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let conn = db
                .lock()
                .map_err(|e| ServiceError::Internal(format!("db lock poisoned: {e}")))?;
            f(&conn)
        })
        .await
        .map_err(|e| ServiceError::Internal(format!("db task failed: {e}")))?
    }
}

/// Build the application router with CORS and request tracing.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    Router::new()
        .route("/api/articles", get(articles::list))
        .route("/api/articles/{id}", get(articles::show))
        .route("/api/feedback", post(feedback::submit))
        .route("/api/ingest", post(ingest::ingest))
        .route("/api/stats", get(stats::stats))
        .route("/health", get(handle_health))
        .layer(DefaultBodyLimit::max(state.config.server.max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let patterns = origins.to_vec();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .is_ok_and(|o| patterns.iter().any(|p| origin_matches(p, o)))
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(300))
}

/// Exact match, or `scheme://host:*` for any (or no) port on that host.
fn origin_matches(pattern: &str, origin: &str) -> bool {
    match pattern.strip_suffix(":*") {
        Some(host) => match origin.strip_prefix(host) {
            Some("") => true,
            Some(rest) => rest
                .strip_prefix(':')
                .is_some_and(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())),
            None => false,
        },
        None => pattern == origin,
    }
}

/// Decode a JSON request body whatever its `Content-Type` says.
///
/// Bodies over the configured limit are 413; anything unreadable or not
/// valid JSON for `T` is 400.
pub(crate) fn json_body<T: DeserializeOwned>(
    body: Result<Bytes, BytesRejection>,
) -> Result<T, ApiError> {
    let bytes = body.map_err(|rejection| {
        let status = rejection.status();
        let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
            "Request body too large"
        } else {
            "Invalid request body"
        };
        ApiError::new(status, message).with_details(rejection.body_text())
    })?;

    serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::bad_request("Invalid request body").with_details(e.to_string()))
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// An error on its way out as a JSON response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    details: Option<String>,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Map a service error, using `context` as the generic message for faults.
    fn from_service(err: ServiceError, context: &str) -> Self {
        match err {
            ServiceError::Validation(msg) => Self::bad_request(msg),
            ServiceError::Unauthorized => Self::new(StatusCode::UNAUTHORIZED, "Unauthorized"),
            ServiceError::NotFound(what) => Self::new(StatusCode::NOT_FOUND, format!("{what} not found")),
            ServiceError::Storage(e) => {
                tracing::error!(error = %e, "{context}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, context).with_details(e.to_string())
            }
            ServiceError::Internal(msg) => {
                tracing::error!(error = %msg, "{context}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, context).with_details(msg)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
