//! UI Components
//!
//! Reusable Leptos components for both pages.

pub mod community_card;
pub mod loading;
pub mod nav;
pub mod post_card;
pub mod tabs;

pub use community_card::CommunityCard;
pub use loading::Placeholder;
pub use nav::Nav;
pub use post_card::PostCard;
pub use tabs::TabStrip;
