//! Dashboard Page
//!
//! Profile header, community slider, post feed and the announcement badge.

use std::collections::HashSet;

use leptos::*;

use crate::api::{self, Community, Post};
use crate::components::{CommunityCard, PostCard};
use crate::pages::render_panel;
use crate::state::view::{
    exclusive, failure_alert, profile_header, Action, InFlight, PanelState, Region,
};
use crate::state::GlobalState;

const UNNAMED_COMMUNITY: &str = "this community";
const JOIN_TRANSPORT_ALERT: &str = "An error occurred while trying to join the community.";

/// Signals behind the dashboard; copied into every handler
#[derive(Clone, Copy)]
struct DashboardCtl {
    global: GlobalState,
    /// (name, avatar, greeting)
    profile: RwSignal<(String, String, String)>,
    slider: RwSignal<PanelState<Community>>,
    feed: RwSignal<PanelState<Post>>,
    /// Post ids whose join button reads "Joined"
    joined_posts: RwSignal<HashSet<i64>>,
    in_flight: StoredValue<InFlight>,
}

impl DashboardCtl {
    fn new(global: GlobalState) -> Self {
        Self {
            global,
            profile: create_rw_signal(profile_header(None)),
            slider: create_rw_signal(PanelState::Idle),
            feed: create_rw_signal(PanelState::Idle),
            joined_posts: create_rw_signal(HashSet::new()),
            in_flight: store_value(InFlight::default()),
        }
    }

    async fn init(self) {
        self.fetch_user_profile().await;
        self.fetch_all_communities().await;
        self.fetch_posts().await;
        self.fetch_announcements_count().await;
    }

    async fn fetch_user_profile(self) {
        let result = api::fetch_user_profile().await;
        if let Err(e) = &result {
            web_sys::console::warn_1(&format!("Failed to fetch profile: {}", e).into());
        }
        self.profile.set(profile_header(result.as_ref().ok()));
    }

    async fn fetch_all_communities(self) {
        self.slider.set(PanelState::Loading);
        let result = api::fetch_all_communities().await;
        self.slider
            .set(PanelState::from_result(result, Region::CommunitySlider));
    }

    async fn fetch_posts(self) {
        self.feed.set(PanelState::Loading);
        let result = api::fetch_all_posts().await;
        self.joined_posts.set(HashSet::new());
        self.feed.set(PanelState::from_result(result, Region::PostFeed));
    }

    async fn fetch_announcements_count(self) {
        let badge = match api::fetch_announcement_count().await {
            Ok(count) => count.count.unwrap_or(0).to_string(),
            Err(e) => {
                web_sys::console::warn_1(
                    &format!("Failed to fetch announcement count: {}", e).into(),
                );
                "0".to_string()
            }
        };
        self.global.announcement_badge.set(badge);
    }

    /// Returns whether the server accepted the join
    async fn join(self, id: i64, name: String) -> bool {
        // Held through the slider refetch
        let joined = exclusive(self.in_flight, Action::Join, id, async move {
            match api::join_community(id).await {
                Ok(()) => {
                    self.global
                        .alert(&format!("Successfully joined {}!", name));
                    self.fetch_all_communities().await;
                    true
                }
                Err(e) => {
                    let prefix = format!("Failed to join {}", name);
                    self.global
                        .alert(&failure_alert(&e, &prefix, JOIN_TRANSPORT_ALERT));
                    false
                }
            }
        })
        .await;
        joined.unwrap_or(false)
    }

    fn share_post(self, _post_id: i64) {
        self.global.alert("Post shared successfully!");
    }

    async fn toggle_join(self, post_id: i64) {
        if self.joined_posts.with_untracked(|j| j.contains(&post_id)) {
            self.global.alert("You are already part of this community.");
            return;
        }

        let community_id = self.feed.with_untracked(|feed| {
            feed.items()
                .iter()
                .find(|p| p.id == post_id)
                .and_then(|p| p.community_id)
        });
        let Some(community_id) = community_id else {
            web_sys::console::warn_1(
                &format!("Post {} has no community to join", post_id).into(),
            );
            return;
        };

        let name = self
            .slider
            .with_untracked(|slider| {
                slider
                    .items()
                    .iter()
                    .find(|c| c.id == community_id)
                    .map(|c| c.name.clone())
            })
            .unwrap_or_else(|| UNNAMED_COMMUNITY.to_string());

        if self.join(community_id, name).await {
            self.joined_posts.update(|j| {
                j.insert(post_id);
            });
        }
    }
}

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let ctl = DashboardCtl::new(state);

    // Fetch initial data on mount
    create_effect(move |_| {
        spawn_local(ctl.init());
    });

    view! {
        <div class="space-y-8">
            // Profile header
            <div class="flex items-center space-x-4">
                <img
                    class="profile-pic w-16 h-16 rounded-full"
                    src=move || ctl.profile.get().1
                    alt="Profile"
                />
                <div>
                    <h1 class="welcome-message text-3xl font-bold">{move || ctl.profile.get().2}</h1>
                    <p class="user-name text-gray-400 mt-1">{move || ctl.profile.get().0}</p>
                </div>
            </div>

            // Community slider
            <section>
                <h2 class="text-lg font-semibold mb-4">"Communities"</h2>
                <ul class="community-slider flex space-x-4 overflow-x-auto">
                    {move || {
                        render_panel(ctl.slider.get(), Region::CommunitySlider, |community| {
                            view! {
                                <CommunityCard
                                    community=community
                                    on_join=move |(id, name): (i64, String)| {
                                        spawn_local(async move {
                                            ctl.join(id, name).await;
                                        });
                                    }
                                />
                            }
                        })
                    }}
                </ul>
            </section>

            // Post feed
            <section>
                <h2 class="text-xl font-semibold mb-4">"Latest Posts"</h2>
                <ul class="post-feed space-y-6">
                    {move || {
                        render_panel(ctl.feed.get(), Region::PostFeed, |post| {
                            let post_id = post.id;
                            let joined = Signal::derive(move || {
                                ctl.joined_posts.with(|j| j.contains(&post_id))
                            });
                            view! {
                                <PostCard
                                    post=post
                                    joined=joined
                                    on_share=move |id: i64| ctl.share_post(id)
                                    on_join=move |id: i64| spawn_local(ctl.toggle_join(id))
                                />
                            }
                        })
                    }}
                </ul>
            </section>
        </div>
    }
}
