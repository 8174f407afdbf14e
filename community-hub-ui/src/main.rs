//! Community Hub Dashboard
//!
//! Browser frontend for the CommunityAPI backend built with Leptos (WASM).
//!
//! # Features
//!
//! - Dashboard with profile header, community slider, post feed and
//!   notification badge
//! - Community browser with join/leave, per-community tabs and post creation
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to CommunityAPI over HTTP with the bearer token kept
//! in local storage.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
