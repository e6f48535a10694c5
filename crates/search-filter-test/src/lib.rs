//! Testing harness for the header search filter dropdown.
//!
//! No browser required: [`FakeDom`] stands in for the page markup and
//! [`Harness`] simulates clicks and key presses against it.
//!
//! ```
//! use search_filter_test::Harness;
//! use search_filter_core::Part;
//!
//! let mut h = Harness::with_options(&[("All", "all"), ("Docs", "docs")]);
//! h.click_trigger().press("ArrowDown").press("Enter");
//! h.assert_closed()
//!     .assert_selection("Docs", "docs")
//!     .assert_focused(Part::Trigger);
//! ```

pub mod dom;
pub mod harness;
pub mod selector;

pub use dom::{FakeDom, FakeDomBuilder, FakeNode};
pub use harness::Harness;
pub use selector::{Selector, SelectorError, SelectorParser};
