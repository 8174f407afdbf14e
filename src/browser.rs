//! CommunityBrowser
//!
//! Headless controller for the community page: the all/joined lists, the
//! joined-community cache, per-community detail (posts, announcements,
//! members) behind a tab strip, and the post-creation form.
//!
//! ## Selection lifecycle
//!
//! `NoneSelected → Loading → Loaded | LoadFailed`. Every selection restarts
//! from `Loading`; results of a superseded load are discarded.

use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::client::{ApiError, CommunityApi};
use crate::inflight::{Action, InFlight};
use crate::model::{Announcement, Community, CommunityId, Member, NewPost, Post, RoleColor};
use crate::view::{Alerts, Panel, Region, Tab, TabStrip};

/// Controller handle. Clones share the same view state.
#[derive(Clone)]
pub struct CommunityBrowser {
    api: Arc<dyn CommunityApi>,
    state: Arc<RwLock<BrowserState>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    NoneSelected,
    Loading,
    Loaded,
    LoadFailed,
}

/// Detail heading; its id scopes the tabs and the post form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub id: CommunityId,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PostForm {
    pub visible: bool,
    pub title: String,
    pub content: String,
}

/// A member line with its role accent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberRow {
    pub name: String,
    pub role: String,
    pub color: RoleColor,
}

impl From<Member> for MemberRow {
    fn from(member: Member) -> Self {
        let role = member.role();
        Self {
            color: role.color(),
            role: role.label().to_string(),
            name: member.name,
        }
    }
}

/// Which community list a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    All,
    Joined,
}

impl ListKind {
    pub fn button_label(&self) -> &'static str {
        match self {
            ListKind::All => "Join",
            ListKind::Joined => "Leave",
        }
    }
}

/// Part of a community row that received a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Row,
    Button,
}

#[derive(Debug)]
struct BrowserState {
    all: Panel<Community>,
    joined: Panel<Community>,
    joined_ids: HashSet<CommunityId>,
    heading: Option<Heading>,
    selection: Selection,
    posts: Panel<Post>,
    announcements: Panel<Announcement>,
    members: Panel<MemberRow>,
    tabs: TabStrip,
    form: PostForm,
    alerts: Alerts,
    in_flight: InFlight,
    /// Bumped on every selection so stale detail responses can be dropped
    generation: u64,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self {
            all: Panel::new(Region::AllCommunities),
            joined: Panel::new(Region::JoinedCommunities),
            joined_ids: HashSet::new(),
            heading: None,
            selection: Selection::NoneSelected,
            posts: Panel::new(Region::Posts),
            announcements: Panel::new(Region::Announcements),
            members: Panel::new(Region::Members),
            tabs: TabStrip::default(),
            form: PostForm::default(),
            alerts: Alerts::default(),
            in_flight: InFlight::default(),
            generation: 0,
        }
    }
}

/// Point-in-time copy of everything the page shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowserSnapshot {
    pub all_communities: Panel<Community>,
    pub joined_communities: Panel<Community>,
    /// Cached joined ids, sorted
    pub joined_ids: Vec<CommunityId>,
    pub heading: Option<Heading>,
    pub selection: Selection,
    pub posts: Panel<Post>,
    pub announcements: Panel<Announcement>,
    pub members: Panel<MemberRow>,
    pub active_tab: Tab,
    pub post_form: PostForm,
}

impl CommunityBrowser {
    pub fn new(api: Arc<dyn CommunityApi>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(BrowserState::default())),
        }
    }

    // ============ Community lists ============

    /// Render the all-communities list, then the joined list
    pub async fn fetch_and_render_communities(&self) {
        self.render_all().await;
        self.render_joined().await;
    }

    pub async fn render_all(&self) {
        self.state.write().await.all.start_loading();
        let result = self.api.list_communities().await;
        self.state.write().await.all.resolve(result);
    }

    /// Render the joined list and replace the joined cache wholesale.
    /// A failed fetch empties the cache.
    pub async fn render_joined(&self) {
        self.state.write().await.joined.start_loading();
        let result = self.api.list_joined_communities().await;

        let mut state = self.state.write().await;
        match &result {
            Ok(communities) => state.joined_ids = communities.iter().map(|c| c.id).collect(),
            Err(_) => state.joined_ids.clear(),
        }
        state.joined.resolve(result);
    }

    /// Dispatch a click on a community row. Button clicks run the row's
    /// join/leave action and never select the community.
    pub async fn click_row(&self, list: ListKind, id: CommunityId, target: ClickTarget) {
        let name = {
            let state = self.state.read().await;
            let panel = match list {
                ListKind::All => &state.all,
                ListKind::Joined => &state.joined,
            };
            panel
                .items()
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.clone())
        };

        let Some(name) = name else {
            tracing::warn!(community_id = id, ?list, "Click on a row that is not rendered");
            return;
        };

        match (target, list) {
            (ClickTarget::Row, _) => self.load_community_data(id, &name).await,
            (ClickTarget::Button, ListKind::All) => self.add_to_joined_communities(id, &name).await,
            (ClickTarget::Button, ListKind::Joined) => {
                self.remove_from_joined_communities(id, &name).await
            }
        }
    }

    // ============ Membership ============

    pub async fn add_to_joined_communities(&self, id: CommunityId, name: &str) {
        {
            let mut state = self.state.write().await;
            if state.joined_ids.contains(&id) {
                state.alerts.push(format!("You have already joined {}.", name));
                return;
            }
            if !state.in_flight.begin(Action::Join, id) {
                return;
            }
        }

        tracing::info!(community_id = id, name, "Joining community");
        match self.api.join_community(id).await {
            Ok(()) => {
                self.alert(format!("Successfully joined {}!", name)).await;
                self.fetch_and_render_communities().await;
            }
            Err(e) => {
                self.alert(failure_alert(
                    &e,
                    "Failed to join",
                    "An error occurred while trying to join the community.",
                ))
                .await
            }
        }

        self.state.write().await.in_flight.finish(Action::Join, id);
    }

    pub async fn remove_from_joined_communities(&self, id: CommunityId, name: &str) {
        if !self.state.write().await.in_flight.begin(Action::Leave, id) {
            return;
        }

        tracing::info!(community_id = id, name, "Leaving community");
        match self.api.leave_community(id).await {
            Ok(()) => {
                self.alert(format!("Successfully left {}!", name)).await;
                self.fetch_and_render_communities().await;
            }
            Err(e) => {
                self.alert(failure_alert(
                    &e,
                    "Failed to leave",
                    "An error occurred while trying to leave the community.",
                ))
                .await
            }
        }

        self.state.write().await.in_flight.finish(Action::Leave, id);
    }

    // ============ Community detail ============

    /// Select a community and load its posts, announcements and members.
    ///
    /// The three panels load independently. The selection ends `Loaded` if
    /// any of them loaded, which activates the Posts tab and reveals the post
    /// form; it ends `LoadFailed` only if all three failed.
    pub async fn load_community_data(&self, id: CommunityId, name: &str) {
        tracing::info!(community_id = id, name, "Loading community detail");

        let generation = {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.heading = Some(Heading {
                id,
                name: name.to_string(),
            });
            state.selection = Selection::Loading;
            state.posts.start_loading();
            state.announcements.start_loading();
            state.members.start_loading();
            state.tabs.select(Tab::Posts);
            state.form.visible = false;
            state.generation
        };

        let posts = self.api.community_posts(id).await;
        if !self.apply_detail(generation, |s| s.posts.resolve(posts)).await {
            return;
        }

        let announcements = self.api.community_announcements(id).await;
        if !self
            .apply_detail(generation, |s| s.announcements.resolve(announcements))
            .await
        {
            return;
        }

        let members = self.api.community_members(id).await;
        if !self
            .apply_detail(generation, |s| s.members.resolve_with(members, MemberRow::from))
            .await
        {
            return;
        }

        let mut state = self.state.write().await;
        if state.generation != generation {
            return;
        }
        if state.posts.is_failed() && state.announcements.is_failed() && state.members.is_failed() {
            tracing::warn!(community_id = id, "Every detail panel failed to load");
            state.selection = Selection::LoadFailed;
            state.form.visible = false;
        } else {
            state.selection = Selection::Loaded;
            state.tabs.select(Tab::Posts);
            state.form.visible = true;
        }
    }

    /// Apply a detail result unless a newer selection superseded this load
    async fn apply_detail(&self, generation: u64, f: impl FnOnce(&mut BrowserState)) -> bool {
        let mut state = self.state.write().await;
        if state.generation != generation {
            tracing::debug!(generation, current = state.generation, "Dropping stale detail response");
            return false;
        }
        f(&mut *state);
        true
    }

    pub async fn select_tab(&self, tab: Tab) {
        self.state.write().await.tabs.select(tab);
    }

    // ============ Post form ============

    pub async fn set_post_title(&self, title: &str) {
        self.state.write().await.form.title = title.to_string();
    }

    pub async fn set_post_content(&self, content: &str) {
        self.state.write().await.form.content = content.to_string();
    }

    /// Submit the post form for the community on the heading
    pub async fn submit_post(&self) {
        let (heading, post) = {
            let mut state = self.state.write().await;
            let Some(heading) = state.heading.clone() else {
                state.alerts.push("Please select a community first to post.");
                return;
            };

            let title = state.form.title.trim().to_string();
            let content = state.form.content.trim().to_string();
            if title.is_empty() || content.is_empty() {
                state
                    .alerts
                    .push("Please fill in both the post title and description.");
                return;
            }

            if !state.in_flight.begin(Action::CreatePost, heading.id) {
                return;
            }
            (heading, NewPost { title, content })
        };

        tracing::info!(community_id = heading.id, title = %post.title, "Creating post");
        match self.api.create_post(heading.id, &post).await {
            Ok(()) => {
                {
                    let mut state = self.state.write().await;
                    state.alerts.push("Post created successfully!");
                    state.form.title.clear();
                    state.form.content.clear();
                }
                self.load_community_data(heading.id, &heading.name).await;
            }
            Err(e) => {
                self.alert(failure_alert(
                    &e,
                    "Failed to create post",
                    "An error occurred while trying to create the post.",
                ))
                .await
            }
        }

        self.state
            .write()
            .await
            .in_flight
            .finish(Action::CreatePost, heading.id);
    }

    // ============ Inspection ============

    pub async fn snapshot(&self) -> BrowserSnapshot {
        let state = self.state.read().await;
        let mut joined_ids: Vec<CommunityId> = state.joined_ids.iter().copied().collect();
        joined_ids.sort_unstable();

        BrowserSnapshot {
            all_communities: state.all.clone(),
            joined_communities: state.joined.clone(),
            joined_ids,
            heading: state.heading.clone(),
            selection: state.selection,
            posts: state.posts.clone(),
            announcements: state.announcements.clone(),
            members: state.members.clone(),
            active_tab: state.tabs.active(),
            post_form: state.form.clone(),
        }
    }

    /// Drain alerts raised since the last call
    pub async fn take_alerts(&self) -> Vec<String> {
        self.state.write().await.alerts.take()
    }

    async fn alert(&self, message: String) {
        self.state.write().await.alerts.push(message);
    }
}

/// Alert text for a failed mutation
pub(crate) fn failure_alert(err: &ApiError, prefix: &str, transport_text: &str) -> String {
    if err.is_transport() {
        tracing::error!(error = %err, "{}", transport_text);
        transport_text.to_string()
    } else {
        format!("{}: {}", prefix, err.reason())
    }
}
