//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

use crate::api;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Backend base URL the pages talk to
    pub api_base: RwSignal<String>,
    /// Most recent user-facing alert, shown in the footer
    pub last_alert: RwSignal<Option<String>>,
    /// Announcement badge text; shared so any page can refresh it
    pub announcement_badge: RwSignal<String>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        api_base: create_rw_signal(api::get_api_base()),
        last_alert: create_rw_signal(None),
        announcement_badge: create_rw_signal("0".to_string()),
    };

    provide_context(state);
}

impl GlobalState {
    /// Show a blocking alert and remember it
    pub fn alert(&self, message: &str) {
        web_sys::console::log_1(&message.into());
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.alert_with_message(message) {
                web_sys::console::error_1(&e);
            }
        }
        self.last_alert.set(Some(message.to_string()));
    }

    pub fn clear_alert(&self) {
        self.last_alert.set(None);
    }
}
