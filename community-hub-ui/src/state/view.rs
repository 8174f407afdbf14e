//! View Helpers
//!
//! Pure display rules shared by the pages: panel states with their
//! placeholder texts, tab order, role colors and card defaults.

use std::collections::HashSet;
use std::future::Future;

use leptos::StoredValue;

use crate::api::ApiResult;

// ============ Panels ============

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    AllCommunities,
    JoinedCommunities,
    Posts,
    Announcements,
    Members,
    CommunitySlider,
    PostFeed,
}

impl Region {
    pub fn loading_text(&self) -> &'static str {
        match self {
            Region::AllCommunities => "Loading all communities...",
            Region::JoinedCommunities => "Loading joined communities...",
            Region::Posts | Region::PostFeed => "Loading posts...",
            Region::Announcements => "Loading announcements...",
            Region::Members => "Loading members...",
            Region::CommunitySlider => "Loading communities...",
        }
    }

    pub fn empty_text(&self) -> &'static str {
        match self {
            Region::AllCommunities | Region::CommunitySlider => "No communities available.",
            Region::JoinedCommunities => "No joined communities.",
            Region::Posts => "No posts found for this community.",
            Region::Announcements => "No announcements found for this community.",
            Region::Members => "No members found for this community.",
            Region::PostFeed => "No posts available.",
        }
    }

    pub fn failed_text(&self) -> &'static str {
        match self {
            Region::AllCommunities | Region::CommunitySlider => "Failed to load communities.",
            Region::JoinedCommunities => "Failed to load joined communities.",
            Region::Posts | Region::PostFeed => "Failed to load posts.",
            Region::Announcements => "Failed to load announcements.",
            Region::Members => "Failed to load members.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelState<T> {
    Idle,
    Loading,
    Populated(Vec<T>),
    Empty,
    Failed,
}

impl<T> PanelState<T> {
    /// Map a fetch outcome; any failure drops the items
    pub fn from_result(result: ApiResult<Vec<T>>, region: Region) -> Self {
        match result {
            Ok(items) if items.is_empty() => PanelState::Empty,
            Ok(items) => PanelState::Populated(items),
            Err(e) => {
                web_sys::console::warn_1(
                    &format!("Failed to load {:?}: {}", region, e).into(),
                );
                PanelState::Failed
            }
        }
    }

    pub fn placeholder(&self, region: Region) -> Option<&'static str> {
        match self {
            PanelState::Loading => Some(region.loading_text()),
            PanelState::Empty => Some(region.empty_text()),
            PanelState::Failed => Some(region.failed_text()),
            PanelState::Idle | PanelState::Populated(_) => None,
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            PanelState::Populated(items) => items,
            _ => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, PanelState::Failed)
    }
}

// ============ Tabs ============

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Posts,
    Announcements,
    Members,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Posts, Tab::Announcements, Tab::Members];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Posts => "Posts",
            Tab::Announcements => "Announcements",
            Tab::Members => "Members",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    NoneSelected,
    Loading,
    Loaded,
    LoadFailed,
}

// ============ Display rules ============

/// Role accent color; unknown roles are gray
pub fn role_color(role: &str) -> &'static str {
    match role {
        "Student" => "orange",
        "Faculty" => "blue",
        "Alumni" => "green",
        "Admin" => "red",
        _ => "gray",
    }
}

pub const DEFAULT_AVATAR: &str = "default-profile.png";
pub const COMMUNITY_IMAGE_PLACEHOLDER: &str = "https://via.placeholder.com/300x200?text=Community";
pub const POST_IMAGE_PLACEHOLDER: &str = "https://via.placeholder.com/600x400?text=Post";

pub const NO_DESCRIPTION: &str = "No description available.";

pub fn members_label(count: Option<u64>) -> String {
    format!("{} members", count.unwrap_or(0))
}

pub fn or_default(value: &Option<String>, fallback: &str) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

pub fn like_label(liked: bool) -> &'static str {
    if liked {
        "Liked ✅"
    } else {
        "Like ❤️"
    }
}

pub fn join_label(joined: bool) -> &'static str {
    if joined {
        "Joined"
    } else {
        "Join Community"
    }
}

/// Header shown for a loaded profile, or the guest header on failure
pub fn profile_header(profile: Option<&crate::api::UserProfile>) -> (String, String, String) {
    match profile {
        Some(profile) => {
            let name = or_default(&profile.name, "User");
            let avatar = or_default(&profile.profile_pic, DEFAULT_AVATAR);
            let greeting = format!("Welcome, {}!", name);
            (name, avatar, greeting)
        }
        None => (
            "Guest".to_string(),
            DEFAULT_AVATAR.to_string(),
            "Welcome, Guest!".to_string(),
        ),
    }
}

/// Alert for a failed mutation: the prefixed reason for non-2xx, the fixed
/// text when no answer arrived
pub fn failure_alert(err: &crate::api::ApiFailure, prefix: &str, transport_text: &str) -> String {
    if err.is_transport() {
        web_sys::console::error_1(&format!("{}: {}", transport_text, err).into());
        transport_text.to_string()
    } else {
        format!("{}: {}", prefix, err.reason())
    }
}

// ============ In-flight guard ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Join,
    Leave,
    CreatePost,
}

#[derive(Debug, Clone, Default)]
pub struct InFlight {
    pending: HashSet<(Action, i64)>,
}

impl InFlight {
    pub fn begin(&mut self, action: Action, id: i64) -> bool {
        self.pending.insert((action, id))
    }

    pub fn finish(&mut self, action: Action, id: i64) {
        self.pending.remove(&(action, id));
    }
}

/// Somewhere an [`InFlight`] set lives
pub trait GuardCell: Copy {
    fn begin(self, action: Action, id: i64) -> bool;
    fn finish(self, action: Action, id: i64);
}

impl GuardCell for StoredValue<InFlight> {
    fn begin(self, action: Action, id: i64) -> bool {
        self.try_update_value(|guard| guard.begin(action, id))
            .unwrap_or(false)
    }

    fn finish(self, action: Action, id: i64) {
        self.update_value(|guard| guard.finish(action, id));
    }
}

/// Run `body` holding `(action, id)`, including any refetch it awaits.
/// Returns `None` without running it when the pair is already held.
pub async fn exclusive<G, F>(guard: G, action: Action, id: i64, body: F) -> Option<F::Output>
where
    G: GuardCell,
    F: Future,
{
    if !guard.begin(action, id) {
        return None;
    }
    let output = body.await;
    guard.finish(action, id);
    Some(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiFailure, UserProfile};
    use futures::executor::block_on;
    use std::cell::RefCell;

    impl GuardCell for &RefCell<InFlight> {
        fn begin(self, action: Action, id: i64) -> bool {
            self.borrow_mut().begin(action, id)
        }

        fn finish(self, action: Action, id: i64) {
            self.borrow_mut().finish(action, id);
        }
    }

    #[test]
    fn test_panel_from_result() {
        let empty: PanelState<i64> = PanelState::from_result(Ok(vec![]), Region::Posts);
        assert_eq!(
            empty.placeholder(Region::Posts),
            Some("No posts found for this community.")
        );

        let items = PanelState::from_result(Ok(vec![1, 2]), Region::Posts);
        assert_eq!(items.items(), &[1, 2]);
        assert!(items.placeholder(Region::Posts).is_none());
    }

    #[test]
    fn test_role_colors() {
        assert_eq!(role_color("Student"), "orange");
        assert_eq!(role_color("Admin"), "red");
        assert_eq!(role_color("admin"), "gray");
    }

    #[test]
    fn test_profile_header() {
        let (name, avatar, greeting) = profile_header(Some(&UserProfile::default()));
        assert_eq!(name, "User");
        assert_eq!(avatar, DEFAULT_AVATAR);
        assert_eq!(greeting, "Welcome, User!");

        let (name, _, greeting) = profile_header(None);
        assert_eq!(name, "Guest");
        assert_eq!(greeting, "Welcome, Guest!");
    }

    #[test]
    fn test_status_failure_alert() {
        let err = ApiFailure::Status {
            status: 409,
            status_text: "Conflict".into(),
            message: Some("Already a member".into()),
        };
        assert_eq!(
            failure_alert(&err, "Failed to join", "unused"),
            "Failed to join: Already a member"
        );
    }

    #[test]
    fn test_in_flight() {
        let mut guard = InFlight::default();
        assert!(guard.begin(Action::Join, 1));
        assert!(!guard.begin(Action::Join, 1));
        guard.finish(Action::Join, 1);
        assert!(guard.begin(Action::Join, 1));
    }

    #[test]
    fn test_labels() {
        assert_eq!(like_label(false), "Like ❤️");
        assert_eq!(like_label(true), "Liked ✅");
        assert_eq!(join_label(true), "Joined");
        assert_eq!(members_label(None), "0 members");
        assert_eq!(or_default(&Some(String::new()), NO_DESCRIPTION), NO_DESCRIPTION);
    }

    #[test]
    fn test_exclusive_holds_guard_through_body() {
        let guard = RefCell::new(InFlight::default());

        // A second click while the action and its refetch are still running
        let second_click = block_on(exclusive(&guard, Action::Join, 1, async {
            guard.borrow_mut().begin(Action::Join, 1)
        }));
        assert_eq!(second_click, Some(false));

        assert!(guard.borrow_mut().begin(Action::Join, 1));
        assert_eq!(
            block_on(exclusive(&guard, Action::Join, 1, async { 7 })),
            None
        );
    }
}
