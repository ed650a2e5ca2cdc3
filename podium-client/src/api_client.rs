//! API client layer for the Podium REST endpoints.

use crate::config::{AuthConfig, ClientConfig};
use podium_api::error::ApiError;
use podium_api::pagination::{Connection, OffsetPage};
use podium_api::query::{CursorPageQuery, OffsetPageQuery, QueryError};
use podium_api::types::{LeaderboardRow, SubmissionBoardRow, SubmissionRow};
use podium_core::{ContestId, EntityIdType};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("Config error: {0}")]
    Config(String),
}

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: HeaderMap,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiClientError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let auth_header = build_auth_headers(&config.auth)?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            auth_header,
        })
    }

    pub async fn leaderboard(
        &self,
        contest_id: ContestId,
        params: &CursorPageQuery,
    ) -> Result<Connection<LeaderboardRow>, ApiClientError> {
        params.validate()?;
        let path = format!("/api/v1/contests/{}/leaderboard", contest_id.as_uuid());
        self.get_json(&path, params).await
    }

    pub async fn submission_board(
        &self,
        contest_id: ContestId,
        params: &CursorPageQuery,
    ) -> Result<Connection<SubmissionBoardRow>, ApiClientError> {
        params.validate()?;
        let path = format!("/api/v1/contests/{}/submission-board", contest_id.as_uuid());
        self.get_json(&path, params).await
    }

    pub async fn submissions(
        &self,
        contest_id: ContestId,
        params: &OffsetPageQuery,
    ) -> Result<OffsetPage<SubmissionRow>, ApiClientError> {
        params.validate()?;
        let path = format!("/api/v1/contests/{}/submissions", contest_id.as_uuid());
        self.get_json(&path, params).await
    }

    async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let request = self
            .client
            .get(url)
            .headers(self.auth_header.clone())
            .query(query);
        let response = request.send().await?;
        self.parse_response(response).await
    }

    /// Split the response into the three failure categories the view layer
    /// distinguishes: transport (reqwest), shape (serde on a 2xx body), and
    /// server-reported (non-2xx, with or without a structured payload).
    async fn parse_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiClientError> {
        let status = response.status();
        let text = response.text().await?;
        if status.is_success() {
            Ok(serde_json::from_str::<T>(&text)?)
        } else {
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&text) {
                return Err(ApiClientError::Api(api_error));
            }
            Err(ApiClientError::InvalidResponse(format!(
                "HTTP {}: {}",
                status.as_u16(),
                text
            )))
        }
    }
}

fn build_auth_headers(auth: &AuthConfig) -> Result<HeaderMap, ApiClientError> {
    let mut headers = HeaderMap::new();
    if let Some(api_key) = &auth.api_key {
        headers.insert(
            HeaderName::from_static("x-api-key"),
            HeaderValue::from_str(api_key).map_err(|e| ApiClientError::Config(e.to_string()))?,
        );
    }
    if let Some(jwt) = &auth.jwt {
        let value = format!("Bearer {}", jwt);
        headers.insert(
            HeaderName::from_static("authorization"),
            HeaderValue::from_str(&value).map_err(|e| ApiClientError::Config(e.to_string()))?,
        );
    }
    Ok(headers)
}
