//! Scripted in-memory CommunityAPI for controller unit tests

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::client::{ApiError, ApiResult, CommunityApi};
use crate::model::{
    Announcement, AnnouncementCount, Community, CommunityId, Member, NewPost, Post, UserProfile,
};

/// A request the fake received
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListCommunities,
    ListJoined,
    Join(CommunityId),
    Leave(CommunityId),
    Posts(CommunityId),
    Announcements(CommunityId),
    Members(CommunityId),
    CreatePost(CommunityId, NewPost),
    Profile,
    AllPosts,
    AnnouncementCount,
}

/// Canned responses. Successful joins and leaves update `joined` so a
/// re-fetch sees the new membership.
pub struct Script {
    pub communities: ApiResult<Vec<Community>>,
    pub joined: ApiResult<Vec<Community>>,
    pub posts: HashMap<CommunityId, ApiResult<Vec<Post>>>,
    pub announcements: HashMap<CommunityId, ApiResult<Vec<Announcement>>>,
    pub members: HashMap<CommunityId, ApiResult<Vec<Member>>>,
    pub join: ApiResult<()>,
    pub leave: ApiResult<()>,
    pub create_post: ApiResult<()>,
    pub profile: ApiResult<UserProfile>,
    pub feed: ApiResult<Vec<Post>>,
    pub count: ApiResult<AnnouncementCount>,
    /// Delay applied to mutations so tests can overlap them
    pub mutation_delay: Option<Duration>,
    /// Per-community delay on the posts read, for overlapping selections
    pub posts_delay: HashMap<CommunityId, Duration>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            communities: Ok(vec![]),
            joined: Ok(vec![]),
            posts: HashMap::new(),
            announcements: HashMap::new(),
            members: HashMap::new(),
            join: Ok(()),
            leave: Ok(()),
            create_post: Ok(()),
            profile: Ok(UserProfile::default()),
            feed: Ok(vec![]),
            count: Ok(AnnouncementCount::default()),
            mutation_delay: None,
            posts_delay: HashMap::new(),
        }
    }
}

#[derive(Default)]
pub struct FakeApi {
    script: Mutex<Script>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new(script: Script) -> Self {
        Self {
            script: Mutex::new(script),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Adjust the script between actions
    pub fn edit(&self, f: impl FnOnce(&mut Script)) {
        f(&mut self.script.lock().unwrap());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn read<T>(&self, f: impl FnOnce(&Script) -> T) -> T {
        f(&self.script.lock().unwrap())
    }

    async fn pause(&self) {
        let delay = self.read(|s| s.mutation_delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

/// A non-2xx error as the HTTP client would report it
pub fn status(code: u16, text: &str, message: Option<&str>) -> ApiError {
    ApiError::Status {
        status: code,
        status_text: text.to_string(),
        message: message.map(str::to_string),
    }
}

pub fn community(id: CommunityId, name: &str) -> Community {
    Community {
        id,
        name: name.to_string(),
        description: None,
        image_url: None,
        member_count: None,
    }
}

pub fn post(id: i64, title: &str) -> Post {
    Post {
        id,
        title: title.to_string(),
        content: String::new(),
        image_url: None,
        community_id: None,
    }
}

#[async_trait]
impl CommunityApi for FakeApi {
    async fn list_communities(&self) -> ApiResult<Vec<Community>> {
        self.record(Call::ListCommunities);
        self.read(|s| s.communities.clone())
    }

    async fn list_joined_communities(&self) -> ApiResult<Vec<Community>> {
        self.record(Call::ListJoined);
        self.read(|s| s.joined.clone())
    }

    async fn join_community(&self, id: CommunityId) -> ApiResult<()> {
        self.record(Call::Join(id));
        self.pause().await;
        let mut script = self.script.lock().unwrap();
        let result = script.join.clone();
        if result.is_ok() {
            let found = script
                .communities
                .as_ref()
                .ok()
                .and_then(|all| all.iter().find(|c| c.id == id).cloned());
            if let (Some(c), Ok(joined)) = (found, script.joined.as_mut()) {
                if !joined.iter().any(|j| j.id == id) {
                    joined.push(c);
                }
            }
        }
        result
    }

    async fn leave_community(&self, id: CommunityId) -> ApiResult<()> {
        self.record(Call::Leave(id));
        self.pause().await;
        let mut script = self.script.lock().unwrap();
        let result = script.leave.clone();
        if result.is_ok() {
            if let Ok(joined) = script.joined.as_mut() {
                joined.retain(|c| c.id != id);
            }
        }
        result
    }

    async fn community_posts(&self, id: CommunityId) -> ApiResult<Vec<Post>> {
        self.record(Call::Posts(id));
        let delay = self.read(|s| s.posts_delay.get(&id).copied());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.read(|s| s.posts.get(&id).cloned().unwrap_or(Ok(vec![])))
    }

    async fn community_announcements(&self, id: CommunityId) -> ApiResult<Vec<Announcement>> {
        self.record(Call::Announcements(id));
        self.read(|s| s.announcements.get(&id).cloned().unwrap_or(Ok(vec![])))
    }

    async fn community_members(&self, id: CommunityId) -> ApiResult<Vec<Member>> {
        self.record(Call::Members(id));
        self.read(|s| s.members.get(&id).cloned().unwrap_or(Ok(vec![])))
    }

    async fn create_post(&self, id: CommunityId, post: &NewPost) -> ApiResult<()> {
        self.record(Call::CreatePost(id, post.clone()));
        self.pause().await;
        self.read(|s| s.create_post.clone())
    }

    async fn user_profile(&self) -> ApiResult<UserProfile> {
        self.record(Call::Profile);
        self.read(|s| s.profile.clone())
    }

    async fn all_posts(&self) -> ApiResult<Vec<Post>> {
        self.record(Call::AllPosts);
        self.read(|s| s.feed.clone())
    }

    async fn announcement_count(&self) -> ApiResult<AnnouncementCount> {
        self.record(Call::AnnouncementCount);
        self.read(|s| s.count.clone())
    }
}
