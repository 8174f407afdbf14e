//! Communities Page
//!
//! All and joined community lists with join/leave, the per-community detail
//! tabs and the post creation form.

use std::collections::HashSet;

use leptos::*;

use crate::api::{self, Announcement, Community, Member, Post};
use crate::components::TabStrip;
use crate::pages::render_panel;
use crate::state::view::{
    exclusive, failure_alert, role_color, Action, InFlight, PanelState, Region, Selection, Tab,
};
use crate::state::GlobalState;

#[derive(Clone, Copy, PartialEq)]
enum ListKind {
    All,
    Joined,
}

/// Signals behind the community browser; copied into every handler
#[derive(Clone, Copy)]
struct BrowserCtl {
    global: GlobalState,
    all: RwSignal<PanelState<Community>>,
    joined: RwSignal<PanelState<Community>>,
    /// Ids from the last successful joined fetch
    joined_ids: StoredValue<HashSet<i64>>,
    heading: RwSignal<Option<(i64, String)>>,
    selection: RwSignal<Selection>,
    posts: RwSignal<PanelState<Post>>,
    announcements: RwSignal<PanelState<Announcement>>,
    members: RwSignal<PanelState<Member>>,
    active_tab: RwSignal<Tab>,
    form_visible: RwSignal<bool>,
    title: RwSignal<String>,
    content: RwSignal<String>,
    in_flight: StoredValue<InFlight>,
    /// Bumped per detail load; older loads stop writing
    generation: StoredValue<u64>,
}

impl BrowserCtl {
    fn new(global: GlobalState) -> Self {
        Self {
            global,
            all: create_rw_signal(PanelState::Idle),
            joined: create_rw_signal(PanelState::Idle),
            joined_ids: store_value(HashSet::new()),
            heading: create_rw_signal(None),
            selection: create_rw_signal(Selection::NoneSelected),
            posts: create_rw_signal(PanelState::Idle),
            announcements: create_rw_signal(PanelState::Idle),
            members: create_rw_signal(PanelState::Idle),
            active_tab: create_rw_signal(Tab::Posts),
            form_visible: create_rw_signal(false),
            title: create_rw_signal(String::new()),
            content: create_rw_signal(String::new()),
            in_flight: store_value(InFlight::default()),
            generation: store_value(0),
        }
    }

    async fn fetch_and_render_communities(self) {
        self.all.set(PanelState::Loading);
        self.joined.set(PanelState::Loading);

        let all = api::fetch_all_communities().await;
        self.all
            .set(PanelState::from_result(all, Region::AllCommunities));

        let joined = api::fetch_joined_communities().await;
        let ids: HashSet<i64> = match &joined {
            Ok(items) => items.iter().map(|c| c.id).collect(),
            Err(_) => HashSet::new(),
        };
        self.joined_ids.set_value(ids);
        self.joined
            .set(PanelState::from_result(joined, Region::JoinedCommunities));
    }

    async fn add_to_joined_communities(self, id: i64, name: String) {
        if self.joined_ids.with_value(|ids| ids.contains(&id)) {
            self.global
                .alert(&format!("You have already joined {}.", name));
            return;
        }

        // Held until the joined cache reflects the result
        exclusive(self.in_flight, Action::Join, id, async move {
            match api::join_community(id).await {
                Ok(()) => {
                    self.global
                        .alert(&format!("Successfully joined {}!", name));
                    self.fetch_and_render_communities().await;
                }
                Err(e) => self.global.alert(&failure_alert(
                    &e,
                    "Failed to join",
                    "An error occurred while trying to join the community.",
                )),
            }
        })
        .await;
    }

    async fn remove_from_joined_communities(self, id: i64, name: String) {
        exclusive(self.in_flight, Action::Leave, id, async move {
            match api::leave_community(id).await {
                Ok(()) => {
                    self.global.alert(&format!("Successfully left {}!", name));
                    self.fetch_and_render_communities().await;
                }
                Err(e) => self.global.alert(&failure_alert(
                    &e,
                    "Failed to leave",
                    "An error occurred while trying to leave the community.",
                )),
            }
        })
        .await;
    }

    async fn load_community_data(self, id: i64, name: String) {
        let generation = self
            .generation
            .try_update_value(|g| {
                *g += 1;
                *g
            })
            .unwrap_or_default();
        let current = move || self.generation.get_value() == generation;

        self.heading.set(Some((id, name)));
        self.selection.set(Selection::Loading);
        self.active_tab.set(Tab::Posts);
        self.form_visible.set(false);
        self.posts.set(PanelState::Loading);
        self.announcements.set(PanelState::Loading);
        self.members.set(PanelState::Loading);

        let posts = api::fetch_community_posts(id).await;
        if !current() {
            return;
        }
        self.posts.set(PanelState::from_result(posts, Region::Posts));

        let announcements = api::fetch_community_announcements(id).await;
        if !current() {
            return;
        }
        self.announcements
            .set(PanelState::from_result(announcements, Region::Announcements));

        let members = api::fetch_community_members(id).await;
        if !current() {
            return;
        }
        self.members
            .set(PanelState::from_result(members, Region::Members));

        let all_failed = self.posts.with_untracked(|p| p.is_failed())
            && self.announcements.with_untracked(|a| a.is_failed())
            && self.members.with_untracked(|m| m.is_failed());
        if all_failed {
            self.selection.set(Selection::LoadFailed);
        } else {
            self.selection.set(Selection::Loaded);
            self.active_tab.set(Tab::Posts);
            self.form_visible.set(true);
        }
    }

    async fn submit_post(self) {
        let Some((id, name)) = self.heading.get_untracked() else {
            self.global.alert("Please select a community first to post.");
            return;
        };

        let title = self.title.get_untracked().trim().to_string();
        let content = self.content.get_untracked().trim().to_string();
        if title.is_empty() || content.is_empty() {
            self.global
                .alert("Please fill in both the post title and description.");
            return;
        }

        exclusive(self.in_flight, Action::CreatePost, id, async move {
            match api::create_post(id, &title, &content).await {
                Ok(()) => {
                    self.global.alert("Post created successfully!");
                    self.title.set(String::new());
                    self.content.set(String::new());
                    self.load_community_data(id, name).await;
                }
                Err(e) => self.global.alert(&failure_alert(
                    &e,
                    "Failed to create post",
                    "An error occurred while trying to create the post.",
                )),
            }
        })
        .await;
    }
}

/// Community browser page component
#[component]
pub fn Communities() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let ctl = BrowserCtl::new(state);

    create_effect(move |_| {
        spawn_local(ctl.fetch_and_render_communities());
    });

    view! {
        <div class="grid md:grid-cols-3 gap-8">
            // Lists
            <aside class="space-y-8">
                <section>
                    <h2 class="text-lg font-semibold mb-4">"All Communities"</h2>
                    <ul id="all-communities" class="space-y-2">
                        {move || {
                            render_panel(ctl.all.get(), Region::AllCommunities, move |c| {
                                community_row(ctl, c, ListKind::All)
                            })
                        }}
                    </ul>
                </section>
                <section>
                    <h2 class="text-lg font-semibold mb-4">"Joined Communities"</h2>
                    <ul id="joined-communities" class="space-y-2">
                        {move || {
                            render_panel(ctl.joined.get(), Region::JoinedCommunities, move |c| {
                                community_row(ctl, c, ListKind::Joined)
                            })
                        }}
                    </ul>
                </section>
            </aside>

            // Detail
            <section class="md:col-span-2 bg-gray-800 rounded-xl p-6">
                <h2 class="community-name text-2xl font-bold mb-4">
                    {move || match ctl.heading.get() {
                        Some((_, name)) => name,
                        None => "Select a community".to_string(),
                    }}
                </h2>

                <Show when=move || ctl.selection.get() != Selection::NoneSelected>
                    <TabStrip active=ctl.active_tab />
                    <DetailPane ctl=ctl />
                </Show>

                <Show when=move || ctl.form_visible.get()>
                    <PostForm ctl=ctl />
                </Show>
            </section>
        </div>
    }
}

/// Row click selects; the button only joins or leaves
fn community_row(ctl: BrowserCtl, community: Community, list: ListKind) -> impl IntoView {
    let id = community.id;
    let name = community.name;
    let select_name = name.clone();
    let action_name = name.clone();
    let label = match list {
        ListKind::All => "Join",
        ListKind::Joined => "Leave",
    };

    view! {
        <li
            class="community-item flex items-center justify-between p-3 bg-gray-800 rounded-lg cursor-pointer hover:bg-gray-700"
            on:click=move |_| spawn_local(ctl.load_community_data(id, select_name.clone()))
        >
            <span>{name}</span>
            <button
                class="px-3 py-1 rounded-lg bg-primary-600 hover:bg-primary-700 text-sm"
                on:click=move |ev| {
                    ev.stop_propagation();
                    let name = action_name.clone();
                    match list {
                        ListKind::All => spawn_local(ctl.add_to_joined_communities(id, name)),
                        ListKind::Joined => {
                            spawn_local(ctl.remove_from_joined_communities(id, name))
                        }
                    }
                }
            >
                {label}
            </button>
        </li>
    }
}

#[component]
fn DetailPane(ctl: BrowserCtl) -> impl IntoView {
    view! {
        <ul class="tab-pane space-y-2">
            {move || match ctl.active_tab.get() {
                Tab::Posts => render_panel(ctl.posts.get(), Region::Posts, |post| {
                    view! {
                        <li class="p-3 bg-gray-700 rounded-lg">
                            <h4 class="font-semibold">{post.title}</h4>
                            <p class="text-gray-300 text-sm">{post.content}</p>
                        </li>
                    }
                }),
                Tab::Announcements => {
                    render_panel(ctl.announcements.get(), Region::Announcements, |a| {
                        view! { <li class="p-3 bg-gray-700 rounded-lg">{a.title}</li> }
                    })
                }
                Tab::Members => render_panel(ctl.members.get(), Region::Members, |member| {
                    let color = role_color(&member.role);
                    view! {
                        <li
                            class="member-item p-3 bg-gray-700 rounded-lg"
                            style:border-left=format!("4px solid {}", color)
                        >
                            {member.name}
                            " - "
                            <span class="member-role" style:color=color>{member.role}</span>
                        </li>
                    }
                }),
            }}
        </ul>
    }
}

#[component]
fn PostForm(ctl: BrowserCtl) -> impl IntoView {
    view! {
        <form
            class="post-form mt-6 space-y-3"
            on:submit=move |ev| {
                ev.prevent_default();
                spawn_local(ctl.submit_post());
            }
        >
            <h3 class="text-lg font-semibold">"Create a Post"</h3>
            <input
                type="text"
                placeholder="Post title"
                class="w-full bg-gray-700 rounded-lg px-3 py-2"
                prop:value=move || ctl.title.get()
                on:input=move |ev| ctl.title.set(event_target_value(&ev))
            />
            <textarea
                placeholder="Post description"
                class="w-full bg-gray-700 rounded-lg px-3 py-2"
                prop:value=move || ctl.content.get()
                on:input=move |ev| ctl.content.set(event_target_value(&ev))
            />
            <button type="submit" class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg">
                "Post"
            </button>
        </form>
    }
}
