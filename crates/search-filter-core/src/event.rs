//! Input events for the dropdown.

use serde::{Deserialize, Serialize};

/// Keys the dropdown reacts to.
///
/// Everything else collapses into [`Key::Other`] and is left to the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Down arrow
    Down,
    /// Up arrow
    Up,
    /// Enter/Return
    Enter,
    /// Space bar
    Space,
    /// Escape
    Escape,
    /// Home
    Home,
    /// End
    End,
    /// Any key the dropdown ignores
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    ///
    /// Accepts the legacy IE/Edge names (`Down`, `Esc`, `Spacebar`) as well.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowDown" | "Down" => Self::Down,
            "ArrowUp" | "Up" => Self::Up,
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            "Home" => Self::Home,
            "End" => Self::End,
            _ => Self::Other,
        }
    }

    /// Whether the dropdown claims this key (and suppresses its default).
    #[must_use]
    pub const fn is_handled(self) -> bool {
        !matches!(self, Self::Other)
    }
}

/// Host-level interaction delivered to [`crate::DropdownFilter::handle_event`].
///
/// Slots are document positions of option elements, counting options that
/// were skipped as malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// The trigger was clicked.
    TriggerClick,
    /// An option element was clicked.
    OptionClick {
        /// Slot of the clicked option
        slot: usize,
    },
    /// A click reached the document.
    DocumentClick {
        /// Whether the click target is inside the root container
        inside: bool,
    },
    /// A key was pressed while the trigger or the listbox had focus.
    KeyDown {
        /// Key pressed
        key: Key,
        /// Slot of the option holding focus, if any
        focused_slot: Option<usize>,
    },
}
