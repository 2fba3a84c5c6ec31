use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use crate::models::{MovieDetail, MovieId, MovieSummary, SearchResultSet, TrendingCatalog};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Status { status: u16, message: Option<String> },
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// The collaborator's own explanation, when it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// Message for the error banner: the collaborator's reason or `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// The remote movie service. Everything the client knows about movies comes
/// through here.
#[async_trait]
pub trait MovieApi: Send + Sync {
    async fn trending(&self) -> Result<TrendingCatalog, ApiError>;

    async fn recommendations(&self, genre: &str) -> Result<Vec<MovieSummary>, ApiError>;

    async fn search(&self, query: &str, top_k: usize) -> Result<SearchResultSet, ApiError>;

    async fn movie(&self, id: &MovieId) -> Result<MovieDetail, ApiError>;

    /// `Ok(None)` means the movie has no trailer, which is not an error.
    async fn trailer(&self, id: &MovieId) -> Result<Option<String>, ApiError>;

    async fn health(&self) -> Result<HealthStatus, ApiError>;
}

#[derive(Deserialize)]
struct TrendingResponse {
    results: TrendingCatalog,
}

#[derive(Deserialize)]
struct RecommendationResponse {
    #[serde(default)]
    results: Vec<MovieSummary>,
}

#[derive(Deserialize)]
struct TrailerResponse {
    #[serde(rename = "trailerKey", default)]
    trailer_key: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Pulls `error` out of a failure body, if the body is the usual JSON shape.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct HttpMovieApi {
    client: Client,
    base_url: String,
}

impl HttpMovieApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = base_url.trim_end_matches('/').to_string();
        info!("[HttpMovieApi] Using collaborator at {}", base_url);

        Ok(Self { client, base_url })
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            debug!("[HttpMovieApi] {} -> {}", status, body);
            Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            })
        }
    }
}

#[async_trait]
impl MovieApi for HttpMovieApi {
    async fn trending(&self) -> Result<TrendingCatalog, ApiError> {
        let response: TrendingResponse = self
            .execute(self.client.get(self.build_url("trending")))
            .await?;
        Ok(response.results)
    }

    async fn recommendations(&self, genre: &str) -> Result<Vec<MovieSummary>, ApiError> {
        let url = self.build_url(&format!("recommend/{}", urlencoding::encode(genre)));
        let response: RecommendationResponse = self.execute(self.client.get(url)).await?;
        Ok(response.results)
    }

    async fn search(&self, query: &str, top_k: usize) -> Result<SearchResultSet, ApiError> {
        let request = self
            .client
            .post(self.build_url("search"))
            .json(&json!({ "query": query, "top_k": top_k }));
        self.execute(request).await
    }

    async fn movie(&self, id: &MovieId) -> Result<MovieDetail, ApiError> {
        let url = self.build_url(&format!("movie/{}", urlencoding::encode(id.as_str())));
        self.execute(self.client.get(url)).await
    }

    async fn trailer(&self, id: &MovieId) -> Result<Option<String>, ApiError> {
        let url = self.build_url(&format!(
            "movie/{}/trailer",
            urlencoding::encode(id.as_str())
        ));
        match self.execute::<TrailerResponse>(self.client.get(url)).await {
            Ok(response) => Ok(response.trailer_key.filter(|k| !k.is_empty())),
            // The service answers 404 when it has no trailer for the movie.
            Err(ApiError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = format!("{}/", self.base_url);
        self.execute(self.client.get(url)).await
    }
}
