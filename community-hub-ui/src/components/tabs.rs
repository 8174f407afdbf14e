//! Tab Strip Component
//!
//! Posts / Announcements / Members buttons; exactly one is active.

use leptos::*;

use crate::state::view::Tab;

#[component]
pub fn TabStrip(active: RwSignal<Tab>) -> impl IntoView {
    view! {
        <div class="tabs flex space-x-2 border-b border-gray-700 mb-4">
            {Tab::ALL
                .into_iter()
                .map(|tab| {
                    view! {
                        <button
                            class="tab-button px-4 py-2 rounded-t-lg text-gray-300"
                            class:active=move || active.get() == tab
                            class:bg-gray-700=move || active.get() == tab
                            on:click=move |_| active.set(tab)
                        >
                            {tab.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
