//! Search filter: accessible dropdown for the site header search form.
//!
//! # Browser Usage (WASM)
//!
//! ```javascript
//! import init, { HeaderSearchFilter } from './search_filter.js';
//!
//! async function main() {
//!     await init();
//!     const filter = HeaderSearchFilter.mount();
//!     // ... later, e.g. when the header is swapped out
//!     filter.dispose();
//! }
//! ```
//!
//! Pages using other class names pass the markup contract as JSON:
//!
//! ```javascript
//! HeaderSearchFilter.mountWith('{"root": ".site-filter", "value_attribute": "data-category"}');
//! ```
//!
//! Built with the `auto-mount` feature the module mounts itself once the
//! document has loaded, with no call from the page.

#![allow(
    clippy::doc_markdown,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::needless_pass_by_value,
    clippy::new_ret_no_self
)]

pub use search_filter_core::*;

pub mod browser;

#[cfg(target_arch = "wasm32")]
pub use browser::{DomView, HeaderSearchFilter};

pub use browser::ReadyState;
