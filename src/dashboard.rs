//! DashboardView
//!
//! Headless controller for the dashboard page: profile header, community
//! slider, global post feed with per-card actions, and the announcement
//! badge. Each region loads and fails on its own.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::browser::failure_alert;
use crate::client::CommunityApi;
use crate::inflight::{Action, InFlight};
use crate::model::{Community, CommunityId, Post, PostId, UserProfile};
use crate::view::{Alerts, Panel, Region};

pub const DEFAULT_AVATAR: &str = "default-profile.png";
pub const COMMUNITY_IMAGE_PLACEHOLDER: &str = "https://via.placeholder.com/300x200?text=Community";
pub const POST_IMAGE_PLACEHOLDER: &str = "https://via.placeholder.com/600x400?text=Post";

/// Name used in join alerts when a post's community is not in the slider
const UNNAMED_COMMUNITY: &str = "this community";

/// Controller handle. Clones share the same view state.
#[derive(Clone)]
pub struct DashboardView {
    api: Arc<dyn CommunityApi>,
    state: Arc<RwLock<DashboardState>>,
}

// ============ Regions ============

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileHeader {
    pub name: String,
    pub avatar: String,
    pub greeting: String,
    pub is_guest: bool,
}

impl ProfileHeader {
    pub fn guest() -> Self {
        Self {
            name: "Guest".to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
            greeting: "Welcome, Guest!".to_string(),
            is_guest: true,
        }
    }

    pub fn from_profile(profile: UserProfile) -> Self {
        let name = profile
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "User".to_string());
        let avatar = profile
            .profile_pic
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_AVATAR.to_string());

        Self {
            greeting: format!("Welcome, {}!", name),
            name,
            avatar,
            is_guest: false,
        }
    }
}

/// A card in the community slider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunityCard {
    pub id: CommunityId,
    pub name: String,
    pub image_url: String,
    pub members_label: String,
    pub description: String,
}

impl CommunityCard {
    pub const BUTTON_LABEL: &'static str = "Join now";
}

impl From<Community> for CommunityCard {
    fn from(community: Community) -> Self {
        Self {
            id: community.id,
            name: community.name,
            image_url: community
                .image_url
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| COMMUNITY_IMAGE_PLACEHOLDER.to_string()),
            members_label: format!("{} members", community.member_count.unwrap_or(0)),
            description: community
                .description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "No description available.".to_string()),
        }
    }
}

/// A card in the post feed. Its action buttons are addressed by `post_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostCard {
    pub post_id: PostId,
    pub community_id: Option<CommunityId>,
    pub image_url: String,
    pub title: String,
    pub content: String,
    pub liked: bool,
    pub joined: bool,
}

impl PostCard {
    pub const SHARE_LABEL: &'static str = "Share 🔄";

    pub fn like_label(&self) -> &'static str {
        if self.liked {
            "Liked ✅"
        } else {
            "Like ❤️"
        }
    }

    pub fn join_label(&self) -> &'static str {
        if self.joined {
            "Joined"
        } else {
            "Join Community"
        }
    }
}

impl From<Post> for PostCard {
    fn from(post: Post) -> Self {
        Self {
            post_id: post.id,
            community_id: post.community_id,
            image_url: post
                .image_url
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| POST_IMAGE_PLACEHOLDER.to_string()),
            title: post.title,
            content: post.content,
            liked: false,
            joined: false,
        }
    }
}

#[derive(Debug)]
struct DashboardState {
    profile: ProfileHeader,
    slider: Panel<CommunityCard>,
    feed: Panel<PostCard>,
    badge: String,
    alerts: Alerts,
    in_flight: InFlight,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            profile: ProfileHeader::guest(),
            slider: Panel::new(Region::CommunitySlider),
            feed: Panel::new(Region::PostFeed),
            badge: "0".to_string(),
            alerts: Alerts::default(),
            in_flight: InFlight::default(),
        }
    }
}

/// Point-in-time copy of everything the dashboard shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub profile: ProfileHeader,
    pub communities: Panel<CommunityCard>,
    pub feed: Panel<PostCard>,
    pub announcement_badge: String,
}

impl DashboardView {
    pub fn new(api: Arc<dyn CommunityApi>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(DashboardState::default())),
        }
    }

    /// Load profile, slider, feed and badge, in that order
    pub async fn init(&self) {
        self.fetch_user_profile().await;
        self.fetch_all_communities().await;
        self.fetch_posts().await;
        self.fetch_announcements_count().await;
    }

    /// Never fails: any error shows the guest header
    pub async fn fetch_user_profile(&self) {
        let profile = match self.api.user_profile().await {
            Ok(profile) => ProfileHeader::from_profile(profile),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch user profile, showing guest");
                ProfileHeader::guest()
            }
        };
        self.state.write().await.profile = profile;
    }

    pub async fn fetch_all_communities(&self) {
        self.state.write().await.slider.start_loading();
        let result = self.api.list_communities().await;
        self.state
            .write()
            .await
            .slider
            .resolve_with(result, CommunityCard::from);
    }

    /// "Join now" on a slider card. The name comes from the rendered card.
    pub async fn join_community(&self, id: CommunityId) {
        let name = {
            let state = self.state.read().await;
            state
                .slider
                .items()
                .iter()
                .find(|card| card.id == id)
                .map(|card| card.name.clone())
        };

        match name {
            Some(name) => {
                self.join(id, &name).await;
            }
            None => tracing::warn!(community_id = id, "Join on a card that is not rendered"),
        }
    }

    /// Issue a join and report it. Returns true only on a confirmed success.
    async fn join(&self, id: CommunityId, name: &str) -> bool {
        if !self.state.write().await.in_flight.begin(Action::Join, id) {
            return false;
        }

        tracing::info!(community_id = id, name, "Joining community from dashboard");
        let joined = match self.api.join_community(id).await {
            Ok(()) => {
                self.alert(format!("Successfully joined {}!", name)).await;
                self.fetch_all_communities().await;
                true
            }
            Err(e) => {
                let prefix = format!("Failed to join {}", name);
                self.alert(failure_alert(
                    &e,
                    &prefix,
                    "An error occurred while trying to join the community.",
                ))
                .await;
                false
            }
        };

        self.state.write().await.in_flight.finish(Action::Join, id);
        joined
    }

    pub async fn fetch_posts(&self) {
        self.state.write().await.feed.start_loading();
        let result = self.api.all_posts().await;
        self.state
            .write()
            .await
            .feed
            .resolve_with(result, PostCard::from);
    }

    /// Toggle the like label on a card. Purely local.
    pub async fn like_post(&self, post_id: PostId) {
        let mut state = self.state.write().await;
        match state.feed.items_mut().iter_mut().find(|c| c.post_id == post_id) {
            Some(card) => card.liked = !card.liked,
            None => tracing::warn!(post_id, "Like on a post that is not rendered"),
        }
    }

    pub async fn share_post(&self, post_id: PostId) {
        tracing::debug!(post_id, "Sharing post");
        self.alert("Post shared successfully!".to_string()).await;
    }

    /// "Join Community" on a feed card. The button flips to "Joined" only
    /// after the server accepts the join.
    pub async fn toggle_join(&self, post_id: PostId) {
        let target = {
            let state = self.state.read().await;
            state
                .feed
                .items()
                .iter()
                .find(|c| c.post_id == post_id)
                .map(|card| {
                    let name = card.community_id.and_then(|cid| {
                        state
                            .slider
                            .items()
                            .iter()
                            .find(|c| c.id == cid)
                            .map(|c| c.name.clone())
                    });
                    (card.joined, card.community_id, name)
                })
        };

        let Some((already_joined, community_id, name)) = target else {
            tracing::warn!(post_id, "Join on a post that is not rendered");
            return;
        };

        if already_joined {
            self.alert("You are already part of this community.".to_string())
                .await;
            return;
        }

        let Some(community_id) = community_id else {
            tracing::warn!(post_id, "Post has no community to join");
            return;
        };

        let name = name.unwrap_or_else(|| UNNAMED_COMMUNITY.to_string());
        if self.join(community_id, &name).await {
            let mut state = self.state.write().await;
            if let Some(card) = state.feed.items_mut().iter_mut().find(|c| c.post_id == post_id) {
                card.joined = true;
            }
        }
    }

    /// Badge shows the count, or "0" when it is unavailable
    pub async fn fetch_announcements_count(&self) {
        let badge = match self.api.announcement_count().await {
            Ok(count) => count.count.unwrap_or(0).to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch announcement count");
                "0".to_string()
            }
        };
        self.state.write().await.badge = badge;
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let state = self.state.read().await;
        DashboardSnapshot {
            profile: state.profile.clone(),
            communities: state.slider.clone(),
            feed: state.feed.clone(),
            announcement_badge: state.badge.clone(),
        }
    }

    pub async fn take_alerts(&self) -> Vec<String> {
        self.state.write().await.alerts.take()
    }

    async fn alert(&self, message: String) {
        self.state.write().await.alerts.push(message);
    }
}
