//! CommunityAPI Client
//!
//! The [`CommunityApi`] trait is the single seam between the page controllers
//! and the REST backend. [`HttpCommunityApi`] is the reqwest implementation;
//! tests substitute fakes or run the real client against a stub server.
//!
//! ## Endpoints
//!
//! - `GET /communities/all`
//! - `GET /communities/user/communities/joined`
//! - `POST /communities/user/communities/join`
//! - `DELETE /communities/user/communities/leave/{id}`
//! - `GET /communities/communities/{id}/posts`
//! - `GET /communities/communities/{id}/announcements`
//! - `GET /communities/communities/{id}/members`
//! - `POST /communities/communities/{id}/posts`
//! - `GET /user/profile`
//! - `GET /posts/all`
//! - `GET /announcements/count`

mod http;
mod token;

pub use http::HttpCommunityApi;
pub use token::{FileTokenStore, StaticToken, TokenError, TokenSource};

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{
    Announcement, AnnouncementCount, Community, CommunityId, Member, NewPost, Post, UserProfile,
};

/// Operations the controllers need from CommunityAPI
#[async_trait]
pub trait CommunityApi: Send + Sync {
    /// Full community catalog
    async fn list_communities(&self) -> ApiResult<Vec<Community>>;

    /// Communities the current user has joined
    async fn list_joined_communities(&self) -> ApiResult<Vec<Community>>;

    async fn join_community(&self, id: CommunityId) -> ApiResult<()>;

    async fn leave_community(&self, id: CommunityId) -> ApiResult<()>;

    async fn community_posts(&self, id: CommunityId) -> ApiResult<Vec<Post>>;

    async fn community_announcements(&self, id: CommunityId) -> ApiResult<Vec<Announcement>>;

    async fn community_members(&self, id: CommunityId) -> ApiResult<Vec<Member>>;

    /// Create a post in a community. Any 2xx is success; the body is ignored.
    async fn create_post(&self, id: CommunityId, post: &NewPost) -> ApiResult<()>;

    async fn user_profile(&self) -> ApiResult<UserProfile>;

    /// Global post feed
    async fn all_posts(&self) -> ApiResult<Vec<Post>>;

    async fn announcement_count(&self) -> ApiResult<AnnouncementCount>;
}

// ============================================
// Errors
// ============================================

/// Errors returned by [`CommunityApi`] implementations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Connect, timeout or I/O failure before a response arrived
    #[error("Network error: {0}")]
    Transport(String),

    /// A 2xx response whose body was not the expected JSON
    #[error("Parse error: {0}")]
    Decode(String),

    /// Non-2xx response
    #[error("API error {status} {status_text}")]
    Status {
        status: u16,
        status_text: String,
        message: Option<String>,
    },
}

impl ApiError {
    /// Text shown to the user after a failed mutation: the server-provided
    /// message, else the HTTP status text.
    pub fn reason(&self) -> String {
        match self {
            ApiError::Status {
                status_text,
                message,
                ..
            } => message.clone().unwrap_or_else(|| status_text.clone()),
            ApiError::Transport(msg) | ApiError::Decode(msg) => msg.clone(),
        }
    }

    /// True for failures where no application-level answer was received
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Decode(_))
    }
}

/// Result type for API calls
pub type ApiResult<T> = Result<T, ApiError>;
