//! Pages
//!
//! Top-level page components for each route.

pub mod communities;
pub mod dashboard;

pub use communities::Communities;
pub use dashboard::Dashboard;

use leptos::*;

use crate::components::Placeholder;
use crate::state::view::{PanelState, Region};

/// Items of a populated panel, otherwise the region's placeholder row
pub(crate) fn render_panel<T, V>(
    panel: PanelState<T>,
    region: Region,
    row: impl Fn(T) -> V,
) -> View
where
    T: Clone + 'static,
    V: IntoView,
{
    let failed = panel.is_failed();
    match panel {
        PanelState::Populated(items) => items.into_iter().map(row).collect_view(),
        other => match other.placeholder(region) {
            Some(text) => view! { <Placeholder text=text failed=failed /> }.into_view(),
            None => ().into_view(),
        },
    }
}
