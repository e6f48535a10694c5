//! Core types for the header search filter dropdown.
//!
//! The dropdown is split into a pure state machine and a rendering step:
//! - [`DropdownState`] takes a [`Message`] and returns the [`Effects`] to apply
//! - [`View`] is the minimal capability set a host exposes (text, attributes,
//!   form value, focus)
//! - [`DropdownFilter`] owns a view, reads its options and applies effects
//!
//! Nothing here touches a browser. The `search-filter` crate provides the
//! `web-sys` view, `search-filter-test` provides an in-memory one.

mod error;
mod event;
mod filter;
mod markup;
mod option;
mod state;
pub mod view;

pub use error::{FilterError, OptionDefect};
pub use event::{Event, Key};
pub use filter::DropdownFilter;
pub use markup::Markup;
pub use option::{FilterOption, OptionSet};
pub use state::{DropdownState, Effect, Effects, Message};
pub use view::{Part, View};
