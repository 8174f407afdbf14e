//! CommunityAPI access from the browser

mod client;

pub use client::*;
