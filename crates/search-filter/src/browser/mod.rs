//! Browser runtime for the search filter.
//!
//! This module bridges the dropdown state machine to live DOM elements
//! through `web-sys`.

// WASM-only modules
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod events;
#[cfg(target_arch = "wasm32")]
pub mod mount;

// Cross-platform modules
pub mod ready;

#[cfg(target_arch = "wasm32")]
pub use dom::DomView;
#[cfg(target_arch = "wasm32")]
pub use events::Listener;
#[cfg(target_arch = "wasm32")]
pub use mount::HeaderSearchFilter;
pub use ready::ReadyState;
