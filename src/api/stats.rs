use axum::{extract::State, Json};

use super::{ApiError, AppState};
use crate::articles::stats::{compute_stats, Stats};

/// `GET /api/stats`
pub(super) async fn stats(State(state): State<AppState>) -> Result<Json<Stats>, ApiError> {
    let stats = state
        .with_conn(compute_stats)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to fetch stats"))?;
    Ok(Json(stats))
}
