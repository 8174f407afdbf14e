//! Post Card Component
//!
//! Feed card with Like, Share and Join Community actions.

use leptos::*;

use crate::api::Post;
use crate::state::view::{join_label, like_label, or_default, POST_IMAGE_PLACEHOLDER};

#[component]
pub fn PostCard(
    post: Post,
    /// Whether the post's community is joined; owned by the page
    #[prop(into)]
    joined: Signal<bool>,
    #[prop(into)] on_share: Callback<i64>,
    #[prop(into)] on_join: Callback<i64>,
) -> impl IntoView {
    let post_id = post.id;
    let image = or_default(&post.image_url, POST_IMAGE_PLACEHOLDER);
    // Like never reaches the server
    let liked = create_rw_signal(false);

    view! {
        <article class="post-card bg-gray-800 rounded-xl overflow-hidden">
            <img src=image alt=post.title.clone() class="w-full h-64 object-cover" />
            <div class="p-6 space-y-3">
                <h3 class="text-xl font-semibold">{post.title}</h3>
                <p class="text-gray-300">{post.content}</p>
                <div class="flex space-x-2">
                    <button
                        class="like-btn px-3 py-1 rounded-lg bg-gray-700"
                        on:click=move |_| liked.update(|l| *l = !*l)
                    >
                        {move || like_label(liked.get())}
                    </button>
                    <button
                        class="share-btn px-3 py-1 rounded-lg bg-gray-700"
                        on:click=move |_| on_share.call(post_id)
                    >
                        "Share 🔄"
                    </button>
                    <button
                        class="join-community-btn px-3 py-1 rounded-lg bg-primary-600"
                        class:bg-green-700=move || joined.get()
                        on:click=move |_| on_join.call(post_id)
                    >
                        {move || join_label(joined.get())}
                    </button>
                </div>
            </div>
        </article>
    }
}
