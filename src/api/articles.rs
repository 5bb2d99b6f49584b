use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{ApiError, AppState};
use crate::articles::query::{self, ArticleList, ListParams, RawListQuery};
use crate::articles::types::Article;
use crate::error::ServiceError;

/// `GET /api/articles`
pub(super) async fn list(
    State(state): State<AppState>,
    Query(raw): Query<RawListQuery>,
) -> Result<Json<ArticleList>, ApiError> {
    let params = ListParams::from_raw(&raw);
    let list = state
        .with_conn(move |conn| query::list_articles(conn, &params))
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to fetch articles"))?;
    Ok(Json(list))
}

/// `GET /api/articles/{id}`
pub(super) async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Article>, ApiError> {
    let article = state
        .with_conn(move |conn| {
            query::get_article(conn, &id)?.ok_or_else(|| ServiceError::NotFound("Article".into()))
        })
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to fetch article"))?;
    Ok(Json(article))
}
