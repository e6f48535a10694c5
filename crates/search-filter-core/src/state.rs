//! Dropdown state machine.
//!
//! Follows the Elm Architecture: `State + Message → (State, Effects)`.
//! [`DropdownState::update`] only moves the state; the returned [`Effects`]
//! describe what the host has to do to the view afterwards.
//!
//! # Examples
//!
//! ```
//! use search_filter_core::{DropdownState, Effect, Key, Message};
//!
//! let mut state = DropdownState::new(3);
//! let effects = state.update(Message::Open);
//! assert!(state.is_open());
//! assert!(effects.contains(&Effect::FocusOption(0)));
//!
//! let effects = state.update(Message::Key { key: Key::Enter, focused: Some(2) });
//! assert_eq!(state.selected_index(), 2);
//! assert!(!state.is_open());
//! assert!(effects.prevents_default());
//! ```

use crate::event::Key;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Messages that drive the state machine.
///
/// Option positions in messages are indices into the option set, not slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Open if closed, close if open
    Toggle,
    /// Show the list and focus the selected option
    Open,
    /// Hide the list
    Close,
    /// Select the option at an index
    Select(usize),
    /// Interaction outside the root container
    OutsideClick,
    /// Key press with the currently focused option
    Key {
        /// Key pressed
        key: Key,
        /// Option holding focus, if any
        focused: Option<usize>,
    },
}

/// Side effect to apply to the view after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Re-sync ARIA and visibility attributes with the state
    Render,
    /// Write the option's label and value into the trigger and hidden input
    ShowSelection(usize),
    /// Focus the option at an index
    FocusOption(usize),
    /// Focus the trigger
    FocusTrigger,
    /// Suppress the browser's default action for the event
    PreventDefault,
}

/// Ordered list of effects produced by one update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects {
    items: Vec<Effect>,
}

impl Effects {
    /// No effects.
    #[must_use]
    pub const fn none() -> Self {
        Self { items: Vec::new() }
    }

    /// Append an effect.
    pub fn push(&mut self, effect: Effect) {
        self.items.push(effect);
    }

    /// Whether an effect is present.
    #[must_use]
    pub fn contains(&self, effect: &Effect) -> bool {
        self.items.contains(effect)
    }

    /// Whether the host should call `preventDefault`.
    #[must_use]
    pub fn prevents_default(&self) -> bool {
        self.contains(&Effect::PreventDefault)
    }

    /// Check if there is nothing to do.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, Effect> {
        self.items.iter()
    }
}

impl From<Vec<Effect>> for Effects {
    fn from(items: Vec<Effect>) -> Self {
        Self { items }
    }
}

impl<'a> IntoIterator for &'a Effects {
    type Item = &'a Effect;
    type IntoIter = std::slice::Iter<'a, Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Open/closed flag plus the selected option.
///
/// `selected_index` stays below `option_count` whenever there is at least
/// one option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownState {
    selected_index: usize,
    open: bool,
    option_count: usize,
}

impl DropdownState {
    /// Closed state selecting the first of `option_count` options.
    #[must_use]
    pub const fn new(option_count: usize) -> Self {
        Self {
            selected_index: 0,
            open: false,
            option_count,
        }
    }

    /// Start from a different selection. Out-of-range indices are ignored.
    #[must_use]
    pub const fn with_selected(mut self, index: usize) -> Self {
        if index < self.option_count {
            self.selected_index = index;
        }
        self
    }

    /// Check if the list is shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Index of the selected option.
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Number of options.
    #[must_use]
    pub const fn option_count(&self) -> usize {
        self.option_count
    }

    /// Apply a message.
    pub fn update(&mut self, msg: Message) -> Effects {
        debug!(?msg, open = self.open, selected = self.selected_index, "dropdown update");
        match msg {
            Message::Toggle => {
                if self.open {
                    self.update(Message::Close)
                } else {
                    self.update(Message::Open)
                }
            }
            Message::Open => {
                self.open = true;
                let mut effects = Effects::from(vec![Effect::Render]);
                if self.selected_index < self.option_count {
                    effects.push(Effect::FocusOption(self.selected_index));
                }
                effects
            }
            Message::Close => {
                self.open = false;
                Effects::from(vec![Effect::Render])
            }
            Message::Select(index) => {
                if index >= self.option_count {
                    warn!(index, len = self.option_count, "ignoring selection of missing option");
                    return Effects::none();
                }
                self.selected_index = index;
                self.open = false;
                Effects::from(vec![
                    Effect::ShowSelection(index),
                    Effect::Render,
                    Effect::FocusTrigger,
                ])
            }
            Message::OutsideClick => {
                if self.open {
                    self.update(Message::Close)
                } else {
                    Effects::none()
                }
            }
            Message::Key { key, focused } => self.key(key, focused),
        }
    }

    fn key(&mut self, key: Key, focused: Option<usize>) -> Effects {
        let mut effects = match key {
            Key::Down => {
                if self.open {
                    Self::focus(self.next_index(focused))
                } else {
                    self.update(Message::Open)
                }
            }
            Key::Up => {
                if self.open {
                    Self::focus(self.previous_index(focused))
                } else {
                    Effects::none()
                }
            }
            Key::Enter | Key::Space => {
                if !self.open {
                    self.update(Message::Open)
                } else if let Some(index) = focused {
                    self.update(Message::Select(index))
                } else {
                    Effects::none()
                }
            }
            Key::Escape => {
                let mut effects = self.update(Message::Close);
                effects.push(Effect::FocusTrigger);
                effects
            }
            Key::Home => {
                if self.open {
                    Self::focus(self.first_index())
                } else {
                    Effects::none()
                }
            }
            Key::End => {
                if self.open {
                    Self::focus(self.last_index())
                } else {
                    Effects::none()
                }
            }
            Key::Other => Effects::none(),
        };
        if key.is_handled() {
            effects.push(Effect::PreventDefault);
        }
        effects
    }

    fn focus(index: Option<usize>) -> Effects {
        index.map_or_else(Effects::none, |i| Effects::from(vec![Effect::FocusOption(i)]))
    }

    const fn first_index(&self) -> Option<usize> {
        if self.option_count == 0 {
            None
        } else {
            Some(0)
        }
    }

    const fn last_index(&self) -> Option<usize> {
        self.option_count.checked_sub(1)
    }

    // Focus off the options counts as "before the first one".
    fn next_index(&self, focused: Option<usize>) -> Option<usize> {
        let last = self.last_index()?;
        Some(focused.map_or(0, |i| (i + 1).min(last)))
    }

    fn previous_index(&self, focused: Option<usize>) -> Option<usize> {
        let last = self.last_index()?;
        Some(focused.map_or(0, |i| i.saturating_sub(1).min(last)))
    }
}
