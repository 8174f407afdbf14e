//! List Panels
//!
//! Every list region moves through `Loading → Populated | Empty | Failed`
//! on each fetch and shows exactly one placeholder when it has no items.

use serde::Serialize;

use crate::client::ApiResult;

/// A list region and its fixed placeholder texts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
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

/// Render state of one panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "items", rename_all = "snake_case")]
pub enum PanelState<T> {
    /// Nothing requested yet
    Idle,
    Loading,
    Populated(Vec<T>),
    Empty,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel<T> {
    region: Region,
    #[serde(flatten)]
    state: PanelState<T>,
}

impl<T> Panel<T> {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            state: PanelState::Idle,
        }
    }

    pub fn state(&self) -> &PanelState<T> {
        &self.state
    }

    pub fn start_loading(&mut self) {
        self.state = PanelState::Loading;
    }

    /// Apply a fetch outcome. Any error (transport, decode or non-2xx)
    /// renders the failure placeholder and never leaves stale items behind.
    pub fn resolve<E: std::fmt::Display>(&mut self, result: Result<Vec<T>, E>) {
        self.state = match result {
            Ok(items) if items.is_empty() => PanelState::Empty,
            Ok(items) => PanelState::Populated(items),
            Err(e) => {
                tracing::warn!(region = ?self.region, error = %e, "Failed to load region");
                PanelState::Failed
            }
        };
    }

    /// Replace the items with a mapped view of them
    pub fn resolve_with<S, F>(&mut self, result: ApiResult<Vec<S>>, f: F)
    where
        F: FnMut(S) -> T,
    {
        self.resolve(result.map(|items| items.into_iter().map(f).collect::<Vec<T>>()));
    }

    pub fn items(&self) -> &[T] {
        match &self.state {
            PanelState::Populated(items) => items,
            _ => &[],
        }
    }

    pub fn items_mut(&mut self) -> &mut [T] {
        match &mut self.state {
            PanelState::Populated(items) => items,
            _ => &mut [],
        }
    }

    /// The single placeholder line shown instead of items, if any
    pub fn placeholder(&self) -> Option<&'static str> {
        match self.state {
            PanelState::Loading => Some(self.region.loading_text()),
            PanelState::Empty => Some(self.region.empty_text()),
            PanelState::Failed => Some(self.region.failed_text()),
            PanelState::Idle | PanelState::Populated(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, PanelState::Failed)
    }
}
