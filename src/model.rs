//! Wire Models
//!
//! Transient view-models hydrated straight from CommunityAPI responses.
//! Nothing here is persisted; every view rebuild starts from a fresh fetch.

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned community identifier
pub type CommunityId = i64;

/// Server-assigned post identifier
pub type PostId = i64;

/// Treats an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============ Response Types ============

/// A community as returned by the catalog and joined endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: CommunityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub member_count: Option<u64>,
}

/// A post, either from a community listing (id/title only) or the global feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub community_id: Option<CommunityId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

/// A community member. `role` is kept verbatim; see [`Role`] for the mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
}

impl Member {
    pub fn role(&self) -> Role {
        Role::parse(&self.role)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile_pic: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementCount {
    #[serde(default)]
    pub count: Option<u64>,
}

/// Error body returned by the API on non-2xx responses
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// ============ Request Types ============

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub community_id: CommunityId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

// ============ Roles ============

/// Member role with its fixed display color
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Student,
    Faculty,
    Alumni,
    Admin,
    Unknown(String),
}

/// Accent color used for a member's role text and left border
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleColor {
    Orange,
    Blue,
    Green,
    Red,
    Gray,
}

impl Role {
    /// Role names are matched exactly; anything else is unknown
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Student" => Role::Student,
            "Faculty" => Role::Faculty,
            "Alumni" => Role::Alumni,
            "Admin" => Role::Admin,
            other => Role::Unknown(other.to_string()),
        }
    }

    pub fn color(&self) -> RoleColor {
        match self {
            Role::Student => RoleColor::Orange,
            Role::Faculty => RoleColor::Blue,
            Role::Alumni => RoleColor::Green,
            Role::Admin => RoleColor::Red,
            Role::Unknown(_) => RoleColor::Gray,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Role::Student => "Student",
            Role::Faculty => "Faculty",
            Role::Alumni => "Alumni",
            Role::Admin => "Admin",
            Role::Unknown(raw) => raw,
        }
    }
}

impl RoleColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleColor::Orange => "orange",
            RoleColor::Blue => "blue",
            RoleColor::Green => "green",
            RoleColor::Red => "red",
            RoleColor::Gray => "gray",
        }
    }
}
