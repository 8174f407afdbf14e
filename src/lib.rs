//! # Community Hub
//!
//! Client for the CommunityAPI REST backend: browse communities, join and
//! leave them, read per-community posts, announcements and members, create
//! posts, and show a personal dashboard.
//!
//! ## Modules
//!
//! - [`client`]: `CommunityApi` trait, reqwest implementation, token lookup
//! - [`browser`]: CommunityBrowser page controller
//! - [`dashboard`]: DashboardView page controller
//! - [`view`]: panels, tabs, alerts and the text renderer
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use community_hub::{client::HttpCommunityApi, config::Config, CommunityBrowser};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default()?;
//!     let api = HttpCommunityApi::new(&config.api, config.token_source())?;
//!
//!     let browser = CommunityBrowser::new(Arc::new(api));
//!     browser.fetch_and_render_communities().await;
//!     browser.add_to_joined_communities(1, "Chess Club").await;
//!
//!     for alert in browser.take_alerts().await {
//!         println!("{}", alert);
//!     }
//!     Ok(())
//! }
//! ```

pub mod browser;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod inflight;
pub mod model;
pub mod view;

#[cfg(test)]
mod testing;

pub use browser::{BrowserSnapshot, ClickTarget, CommunityBrowser, ListKind, Selection};
pub use client::{ApiError, ApiResult, CommunityApi, HttpCommunityApi};
pub use dashboard::{DashboardSnapshot, DashboardView};
pub use view::Tab;
