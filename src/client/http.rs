//! reqwest-backed CommunityAPI client

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use super::{ApiError, ApiResult, CommunityApi, TokenSource};
use crate::config::ApiConfig;
use crate::model::{
    Announcement, AnnouncementCount, Community, CommunityId, ErrorBody, JoinRequest, Member,
    NewPost, Post, UserProfile,
};

const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// HTTP client for CommunityAPI
#[derive(Clone)]
pub struct HttpCommunityApi {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl HttpCommunityApi {
    /// Create a client for the configured base URL.
    ///
    /// The token source is consulted on every request.
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenSource>) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: sanitize_base_url(&config.base_url),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and return the 2xx response, or the mapped error
    async fn dispatch<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<Response> {
        let url = format!("{}{}", self.base_url, path);
        let request_id = Uuid::new_v4().to_string();
        let span = tracing::debug_span!("api_request", %method, path, request_id = %request_id);

        async move {
            let mut request = self
                .client
                .request(method, &url)
                .header(CONTENT_TYPE, "application/json")
                .header(REQUEST_ID_HEADER, &request_id);

            if let Some(token) = self.tokens.token() {
                request = request.bearer_auth(token);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request.send().await.map_err(|e| {
                let err = if e.is_timeout() {
                    ApiError::Transport(format!("request timed out: {}", e))
                } else if e.is_connect() {
                    ApiError::Transport(format!("connection failed: {}", e))
                } else {
                    ApiError::Transport(e.to_string())
                };
                tracing::error!(error = %err, "Request failed");
                err
            })?;

            let status = response.status();
            tracing::debug!(status = status.as_u16(), "Response received");

            if status.is_success() {
                Ok(response)
            } else {
                Err(status_error(response).await)
            }
        }
        .instrument(span)
        .await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.dispatch::<()>(Method::GET, path, None).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// List endpoints answer with a JSON array; `null` reads as empty
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Vec<T>> {
        let items: Option<Vec<T>> = self.get_json(path).await?;
        Ok(items.unwrap_or_default())
    }
}

/// Build an [`ApiError::Status`] from a non-2xx response
async fn status_error(response: Response) -> ApiError {
    let status = response.status();
    let status_text = status.canonical_reason().unwrap_or("Unknown Status").to_string();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.message)
        .filter(|m| !m.trim().is_empty());

    tracing::warn!(status = status.as_u16(), ?message, "API returned an error status");

    ApiError::Status {
        status: status.as_u16(),
        status_text,
        message,
    }
}

/// Ensure the base URL has a scheme and no trailing slash
pub(crate) fn sanitize_base_url(input: &str) -> String {
    let trimmed = input.trim();
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };
    with_scheme.trim_end_matches('/').to_string()
}

#[async_trait]
impl CommunityApi for HttpCommunityApi {
    async fn list_communities(&self) -> ApiResult<Vec<Community>> {
        self.get_list("/communities/all").await
    }

    async fn list_joined_communities(&self) -> ApiResult<Vec<Community>> {
        self.get_list("/communities/user/communities/joined").await
    }

    async fn join_community(&self, id: CommunityId) -> ApiResult<()> {
        let body = JoinRequest { community_id: id };
        self.dispatch(Method::POST, "/communities/user/communities/join", Some(&body))
            .await?;
        Ok(())
    }

    async fn leave_community(&self, id: CommunityId) -> ApiResult<()> {
        let path = format!("/communities/user/communities/leave/{}", id);
        self.dispatch::<()>(Method::DELETE, &path, None).await?;
        Ok(())
    }

    async fn community_posts(&self, id: CommunityId) -> ApiResult<Vec<Post>> {
        self.get_list(&format!("/communities/communities/{}/posts", id))
            .await
    }

    async fn community_announcements(&self, id: CommunityId) -> ApiResult<Vec<Announcement>> {
        self.get_list(&format!("/communities/communities/{}/announcements", id))
            .await
    }

    async fn community_members(&self, id: CommunityId) -> ApiResult<Vec<Member>> {
        self.get_list(&format!("/communities/communities/{}/members", id))
            .await
    }

    async fn create_post(&self, id: CommunityId, post: &NewPost) -> ApiResult<()> {
        let path = format!("/communities/communities/{}/posts", id);
        self.dispatch(Method::POST, &path, Some(post)).await?;
        Ok(())
    }

    async fn user_profile(&self) -> ApiResult<UserProfile> {
        self.get_json("/user/profile").await
    }

    async fn all_posts(&self) -> ApiResult<Vec<Post>> {
        self.get_list("/posts/all").await
    }

    async fn announcement_count(&self) -> ApiResult<AnnouncementCount> {
        self.get_json("/announcements/count").await
    }
}
