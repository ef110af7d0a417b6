//! Landing page enhancements: lazy hero background, scroll parallax and the mobile
//! navigation menu.
//!
//! The state machines and offset math live in platform-independent modules so they can be
//! exercised natively. The `web` module binds them to the browser and is only compiled for
//! `wasm32`.

pub mod config;
pub mod events;
pub mod hero;
pub mod nav;
pub mod overrides;
pub mod parallax;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::PageConfig;
pub use events::{EventJournal, PageEvent};

/// `document.readyState` while the parser is still running. Boot waits for
/// `DOMContentLoaded` in that case.
pub fn document_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}
