use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::csrf::CSRF_HEADER_NAME;
use super::{ApiError, ApiResult};
use contentflow_types::*;

/// Path of the like-toggle endpoint, relative to the site root
pub const LIKE_TOGGLE_PATH: &str = "/likes/ajax/like-toggle/";

/// The server operations the like toggle depends on
#[async_trait]
pub trait LikeApi: Send + Sync {
    /// Flip the current user's like on a post and return the new state
    async fn toggle_like(&self, post_id: &PostId) -> ApiResult<LikeToggleResponse>;
}

/// API client for the Contentflow site
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    csrf_token: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            csrf_token: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the anti-forgery token sent with state-changing requests
    pub fn with_csrf_token(mut self, token: Option<String>) -> Self {
        self.csrf_token = token;
        self
    }

    /// Helper to add the CSRF header to a request if a token is known
    fn add_csrf_header(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.csrf_token {
            req.header(CSRF_HEADER_NAME, token)
        } else {
            req
        }
    }

    /// Helper to handle API responses. Only the status decides success;
    /// error bodies are kept for diagnostics.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            Ok(serde_json::from_slice(&body)?)
        } else {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            // Django debug pages and proxies answer with full HTML documents
            let clean_error = if error_text.contains("<html") || error_text.contains("<!DOCTYPE") {
                format!("Server returned {} error", status.as_u16())
            } else {
                error_text
            };

            match status.as_u16() {
                404 => Err(ApiError::NotFound(clean_error)),
                401 => Err(ApiError::Unauthorized(clean_error)),
                403 => Err(ApiError::Forbidden(clean_error)),
                400 => Err(ApiError::BadRequest(clean_error)),
                code => Err(ApiError::Api {
                    status: code,
                    message: clean_error,
                }),
            }
        }
    }
}

#[async_trait]
impl LikeApi for ApiClient {
    async fn toggle_like(&self, post_id: &PostId) -> ApiResult<LikeToggleResponse> {
        let url = format!("{}{}", self.base_url, LIKE_TOGGLE_PATH);
        let form = [("post_id", post_id.as_str())];
        let req = self.add_csrf_header(self.client.post(&url).form(&form));
        let response = req.send().await?;
        self.handle_response(response).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        let base_url = std::env::var("CONTENTFLOW_SERVER_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());
        Self::new(base_url)
    }
}
