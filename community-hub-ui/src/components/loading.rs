//! Loading Component
//!
//! The single-row placeholder lists show while loading, empty or failed.

use leptos::*;

/// One list row standing in for the items of a region
#[component]
pub fn Placeholder(text: &'static str, #[prop(optional)] failed: bool) -> impl IntoView {
    view! {
        <li
            class="placeholder py-2 text-gray-400 italic"
            class:text-red-400=failed
        >
            {text}
        </li>
    }
}
