//! View State
//!
//! Renderer-independent pieces shared by both page controllers: list panels
//! with their placeholders, the detail tab strip, the alert queue and the
//! plain-text renderer used by the CLI.

mod panel;
pub mod render;
mod tabs;

pub use panel::{Panel, PanelState, Region};
pub use tabs::{Tab, TabStrip};

/// Blocking user notifications raised by controller actions.
///
/// A browser shows each as `window.alert`; the CLI prints them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alerts {
    pending: Vec<String>,
}

impl Alerts {
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(alert = %message, "Alert raised");
        self.pending.push(message);
    }

    /// Drain alerts in the order they were raised
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
