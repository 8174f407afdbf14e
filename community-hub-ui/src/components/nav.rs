//! Navigation Component
//!
//! Header navigation bar with brand, links and the announcement badge.

use leptos::*;
use leptos_router::*;

use crate::state::GlobalState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"🏘️"</span>
                        <span class="text-xl font-bold text-white">"Community Hub"</span>
                    </A>

                    <div class="flex items-center space-x-1">
                        <NavLink href="/" label="Dashboard" />
                        <NavLink href="/communities" label="Communities" />

                        // Announcement badge
                        <span class="ml-4 relative" title="Announcements">
                            "🔔"
                            <span class="notification-count absolute -top-2 -right-3 bg-red-600 text-xs rounded-full px-1.5">
                                {move || state.announcement_badge.get()}
                            </span>
                        </span>
                    </div>
                </div>
            </div>
        </nav>
    }
}

#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}
