//! HTTP API Client
//!
//! Functions for communicating with the CommunityAPI REST backend.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8084";

const API_BASE_KEY: &str = "community_hub_api_url";
const TOKEN_KEY: &str = "token";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = local_storage()
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    normalize_base(&url)
}

/// Bearer token, read fresh for every request
pub fn get_token() -> Option<String> {
    local_storage()
        .and_then(|storage| storage.get_item(TOKEN_KEY).ok().flatten())
        .filter(|t| !t.trim().is_empty())
}

pub fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

// ============ Response Types ============

/// Explicit `null` reads like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub member_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub community_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Announcement {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Member {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile_pic: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct AnnouncementCount {
    #[serde(default)]
    pub count: Option<u64>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

// ============ Errors ============

/// Why an API call did not produce data
#[derive(Debug, Clone, PartialEq)]
pub enum ApiFailure {
    /// The request never got an answer
    Network(String),
    /// 2xx with a body that is not the expected JSON
    Parse(String),
    /// Non-2xx answer
    Status {
        status: u16,
        status_text: String,
        message: Option<String>,
    },
}

impl ApiFailure {
    /// Server message, else the HTTP status text
    pub fn reason(&self) -> String {
        match self {
            ApiFailure::Status {
                status_text,
                message,
                ..
            } => message.clone().unwrap_or_else(|| status_text.clone()),
            ApiFailure::Network(msg) | ApiFailure::Parse(msg) => msg.clone(),
        }
    }

    pub fn is_transport(&self) -> bool {
        !matches!(self, ApiFailure::Status { .. })
    }
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiFailure::Network(e) => write!(f, "Network error: {}", e),
            ApiFailure::Parse(e) => write!(f, "Parse error: {}", e),
            ApiFailure::Status {
                status,
                status_text,
                ..
            } => write!(f, "API error {} {}", status, status_text),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiFailure>;

// ============ Request helpers ============

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    let builder = builder.header("Content-Type", "application/json");
    match get_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn check(response: Response) -> ApiResult<Response> {
    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let status_text = response.status_text();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .filter(|m| !m.trim().is_empty());

    Err(ApiFailure::Status {
        status,
        status_text,
        message,
    })
}

async fn get_json<T: DeserializeOwned>(path: &str) -> ApiResult<T> {
    let response = authorized(Request::get(&format!("{}{}", get_api_base(), path)))
        .send()
        .await
        .map_err(|e| ApiFailure::Network(e.to_string()))?;

    check(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ApiFailure::Parse(e.to_string()))
}

/// List endpoints answer with a JSON array; `null` reads as empty
async fn get_list<T: DeserializeOwned>(path: &str) -> ApiResult<Vec<T>> {
    let items: Option<Vec<T>> = get_json(path).await?;
    Ok(items.unwrap_or_default())
}

// ============ API Functions ============

pub async fn fetch_all_communities() -> ApiResult<Vec<Community>> {
    get_list("/communities/all").await
}

pub async fn fetch_joined_communities() -> ApiResult<Vec<Community>> {
    get_list("/communities/user/communities/joined").await
}

pub async fn join_community(id: i64) -> ApiResult<()> {
    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct JoinRequest {
        community_id: i64,
    }

    let request = authorized(Request::post(&format!(
        "{}/communities/user/communities/join",
        get_api_base()
    )))
    .json(&JoinRequest { community_id: id })
    .map_err(|e| ApiFailure::Network(e.to_string()))?;

    let response = request
        .send()
        .await
        .map_err(|e| ApiFailure::Network(e.to_string()))?;
    check(response).await.map(|_| ())
}

pub async fn leave_community(id: i64) -> ApiResult<()> {
    let response = authorized(Request::delete(&format!(
        "{}/communities/user/communities/leave/{}",
        get_api_base(),
        id
    )))
    .send()
    .await
    .map_err(|e| ApiFailure::Network(e.to_string()))?;
    check(response).await.map(|_| ())
}

pub async fn fetch_community_posts(id: i64) -> ApiResult<Vec<Post>> {
    get_list(&format!("/communities/communities/{}/posts", id)).await
}

pub async fn fetch_community_announcements(id: i64) -> ApiResult<Vec<Announcement>> {
    get_list(&format!("/communities/communities/{}/announcements", id)).await
}

pub async fn fetch_community_members(id: i64) -> ApiResult<Vec<Member>> {
    get_list(&format!("/communities/communities/{}/members", id)).await
}

pub async fn create_post(id: i64, title: &str, content: &str) -> ApiResult<()> {
    #[derive(serde::Serialize)]
    struct CreatePostRequest<'a> {
        title: &'a str,
        content: &'a str,
    }

    let request = authorized(Request::post(&format!(
        "{}/communities/communities/{}/posts",
        get_api_base(),
        id
    )))
    .json(&CreatePostRequest { title, content })
    .map_err(|e| ApiFailure::Network(e.to_string()))?;

    let response = request
        .send()
        .await
        .map_err(|e| ApiFailure::Network(e.to_string()))?;
    check(response).await.map(|_| ())
}

pub async fn fetch_user_profile() -> ApiResult<UserProfile> {
    get_json("/user/profile").await
}

pub async fn fetch_all_posts() -> ApiResult<Vec<Post>> {
    get_list("/posts/all").await
}

pub async fn fetch_announcement_count() -> ApiResult<AnnouncementCount> {
    get_json("/announcements/count").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("http://localhost:8084/"), "http://localhost:8084");
        assert_eq!(normalize_base(" https://hub.example.com "), "https://hub.example.com");
    }

    #[test]
    fn test_failure_reason() {
        let failure = ApiFailure::Status {
            status: 409,
            status_text: "Conflict".to_string(),
            message: None,
        };
        assert_eq!(failure.reason(), "Conflict");
        assert!(!failure.is_transport());
        assert!(ApiFailure::Network("offline".into()).is_transport());
    }

    #[test]
    fn test_listing_post_shape() {
        let post: Post = serde_json::from_str(r#"{"id": 5, "title": "Hello"}"#).unwrap();
        assert_eq!(post.content, "");
        assert!(post.community_id.is_none());
    }

    #[test]
    fn test_null_text_fields_keep_the_list() {
        let members: Vec<Member> = serde_json::from_str(
            r#"[{"name": "Ana", "role": null}, {"name": "Bo", "role": "Admin"}]"#,
        )
        .unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].role, "");

        let feed: Vec<Post> =
            serde_json::from_str(r#"[{"id": 1, "title": "Hi", "content": null, "imageUrl": null}]"#)
                .unwrap();
        assert_eq!(feed[0].content, "");
    }
}
