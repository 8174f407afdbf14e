//! Community Card Component
//!
//! Slider card on the dashboard with a "Join now" button.

use leptos::*;

use crate::api::Community;
use crate::state::view::{members_label, or_default, COMMUNITY_IMAGE_PLACEHOLDER, NO_DESCRIPTION};

#[component]
pub fn CommunityCard(
    community: Community,
    /// Receives the community id and the card title
    #[prop(into)]
    on_join: Callback<(i64, String)>,
) -> impl IntoView {
    let id = community.id;
    let name = community.name.clone();
    let image = or_default(&community.image_url, COMMUNITY_IMAGE_PLACEHOLDER);
    let description = or_default(&community.description, NO_DESCRIPTION);

    view! {
        <div class="community-card bg-gray-800 rounded-xl overflow-hidden w-72 shrink-0">
            <img src=image alt=community.name.clone() class="w-full h-40 object-cover" />
            <div class="p-4 space-y-2">
                <span class="text-sm text-gray-400">{members_label(community.member_count)}</span>
                <h3 class="text-lg font-semibold">{community.name}</h3>
                <p class="text-gray-300 text-sm">{description}</p>
                <button
                    class="join-btn px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg"
                    on:click=move |_| on_join.call((id, name.clone()))
                >
                    "Join now"
                </button>
            </div>
        </div>
    }
}
