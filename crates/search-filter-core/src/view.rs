//! The view abstraction the dropdown renders into.
//!
//! A host implements [`View`] over whatever holds the markup: live DOM
//! elements in the browser, an in-memory tree in tests. Event listening is
//! the host's job; it translates interactions into [`crate::Event`]s.

use std::fmt;

/// `aria-expanded` on the trigger.
pub const ARIA_EXPANDED: &str = "aria-expanded";
/// `aria-hidden` on the listbox.
pub const ARIA_HIDDEN: &str = "aria-hidden";
/// `aria-selected` on each option.
pub const ARIA_SELECTED: &str = "aria-selected";
/// Boolean `hidden` attribute on the listbox.
pub const HIDDEN: &str = "hidden";

/// Addressable element of the dropdown markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Part {
    /// Ancestor container of everything below
    Root,
    /// Button that opens and closes the list
    Trigger,
    /// Child of the trigger showing the selected label
    Label,
    /// Container of the options
    Listbox,
    /// Hidden form input receiving the selected value
    HiddenInput,
    /// Option element at a slot
    Option(usize),
    /// Display text child of the option at a slot
    OptionLabel(usize),
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "root"),
            Self::Trigger => write!(f, "trigger"),
            Self::Label => write!(f, "label"),
            Self::Listbox => write!(f, "listbox"),
            Self::HiddenInput => write!(f, "hidden input"),
            Self::Option(slot) => write!(f, "option {slot}"),
            Self::OptionLabel(slot) => write!(f, "option {slot} label"),
        }
    }
}

/// Capabilities the dropdown needs from its host.
///
/// Writes to a part the host does not have are ignored. Reads of such a
/// part return `None`.
pub trait View {
    /// Number of option elements, malformed ones included.
    fn option_count(&self) -> usize;

    /// Text content of a part.
    fn text(&self, part: Part) -> Option<String>;

    /// Replace the text content of a part.
    fn set_text(&mut self, part: Part, text: &str);

    /// Attribute value of a part.
    fn attribute(&self, part: Part, name: &str) -> Option<String>;

    /// Set an attribute on a part.
    fn set_attribute(&mut self, part: Part, name: &str, value: &str);

    /// Remove an attribute from a part.
    fn remove_attribute(&mut self, part: Part, name: &str);

    /// Current form value of a part (the hidden input).
    fn value(&self, part: Part) -> Option<String>;

    /// Set the form value of a part.
    fn set_value(&mut self, part: Part, value: &str);

    /// Move keyboard focus to a part.
    fn focus(&mut self, part: Part);
}
