//! State Management
//!
//! Shared signals and the pure display rules the pages render with.

pub mod global;
pub mod view;

pub use global::{provide_global_state, GlobalState};
