//! Typed HTTP client for the Seithi API.
//!
//! One method per endpoint, no retries. Any non-2xx response becomes
//! [`ClientError::Status`] carrying the status and raw body.

use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::articles::query::ArticleList;
use crate::articles::stats::Stats;
use crate::articles::types::{Article, FeedbackRequest, NewArticle};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid base url: {0}")]
    BaseUrl(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Listing filters sent as query parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArticleQuery {
    pub limit: i64,
    pub offset: i64,
    pub min_facts: f64,
    pub min_calm: f64,
    pub min_deep: f64,
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
            min_facts: 0.0,
            min_calm: 0.0,
            min_deep: 0.0,
        }
    }
}

/// Body of a successful `POST /api/ingest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestResponse {
    /// `"success"` for a new article, `"ignored"` when the url already exists.
    pub status: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl IngestResponse {
    pub fn is_ignored(&self) -> bool {
        self.status == "ignored"
    }
}

/// Client for a running Seithi server.
#[derive(Debug, Clone)]
pub struct SeithiClient {
    http: reqwest::Client,
    base: Url,
    ingest_secret: Option<String>,
}

impl SeithiClient {
    /// `base_url` is the server root, e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let mut base = Url::parse(base_url).map_err(|e| ClientError::BaseUrl(e.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base,
            ingest_secret: None,
        })
    }

    /// Attach the bearer secret used by [`SeithiClient::ingest`].
    pub fn with_ingest_secret(mut self, secret: impl Into<String>) -> Self {
        self.ingest_secret = Some(secret.into());
        self
    }

    fn url(&self, path: &str) -> ClientResult<Url> {
        self.base
            .join(path)
            .map_err(|e| ClientError::BaseUrl(e.to_string()))
    }

    /// `GET /api/articles`
    pub async fn get_articles(&self, query: &ArticleQuery) -> ClientResult<ArticleList> {
        let mut url = self.url("api/articles")?;
        url.query_pairs_mut()
            .append_pair("limit", &query.limit.to_string())
            .append_pair("offset", &query.offset.to_string())
            .append_pair("min_facts", &query.min_facts.to_string())
            .append_pair("min_calm", &query.min_calm.to_string())
            .append_pair("min_deep", &query.min_deep.to_string());
        send_json(self.http.get(url)).await
    }

    /// `GET /api/articles/{id}`
    pub async fn get_article(&self, id: &str) -> ClientResult<Article> {
        let mut url = self.url("api/articles")?;
        url.path_segments_mut()
            .map_err(|_| ClientError::BaseUrl("base url cannot have path segments".into()))?
            .push(id);
        send_json(self.http.get(url)).await
    }

    /// `POST /api/feedback`
    pub async fn submit_feedback(&self, feedback: &FeedbackRequest) -> ClientResult<()> {
        let url = self.url("api/feedback")?;
        send(self.http.post(url).json(feedback)).await?;
        Ok(())
    }

    /// `POST /api/ingest`
    pub async fn ingest(&self, article: &NewArticle) -> ClientResult<IngestResponse> {
        let url = self.url("api/ingest")?;
        let mut req = self.http.post(url).json(article);
        if let Some(secret) = &self.ingest_secret {
            req = req.bearer_auth(secret);
        }
        send_json(req).await
    }

    /// `GET /api/stats`
    pub async fn stats(&self) -> ClientResult<Stats> {
        let url = self.url("api/stats")?;
        send_json(self.http.get(url)).await
    }
}

async fn send(req: RequestBuilder) -> ClientResult<reqwest::Response> {
    let response = req.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(%status, body = %body, "request failed");
        return Err(ClientError::Status { status, body });
    }
    Ok(response)
}

async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> ClientResult<T> {
    Ok(send(req).await?.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let client = SeithiClient::new("http://localhost:8080/prefix").unwrap();
        assert_eq!(
            client.url("api/stats").unwrap().as_str(),
            "http://localhost:8080/prefix/api/stats"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            SeithiClient::new("not a url"),
            Err(ClientError::BaseUrl(_))
        ));
    }

    #[test]
    fn ingest_response_flags_ignored() {
        let r: IngestResponse =
            serde_json::from_str(r#"{"status":"ignored","message":"Article URL already exists"}"#)
                .unwrap();
        assert!(r.is_ignored());
        assert!(r.id.is_none());
    }
}
