//! Test harness for driving a dropdown over a [`FakeDom`].
//!
//! Simulates what the browser binding wires up: clicks reach the trigger,
//! option and document listeners in bubbling order, and key presses only
//! reach the dropdown while focus is on the trigger, the listbox or an
//! option.

use crate::dom::FakeDom;
use search_filter_core::view::{ARIA_EXPANDED, ARIA_HIDDEN, HIDDEN};
use search_filter_core::{DropdownFilter, Event, Key, Markup, Part, View};

/// Test harness for interacting with a dropdown.
#[derive(Debug)]
pub struct Harness {
    filter: DropdownFilter<FakeDom>,
    last_prevented: bool,
}

impl Harness {
    /// Attach a dropdown with the default markup contract.
    #[must_use]
    pub fn new(dom: FakeDom) -> Self {
        Self::with_markup(dom, &Markup::default())
    }

    /// Attach a dropdown with a custom markup contract.
    #[must_use]
    pub fn with_markup(dom: FakeDom, markup: &Markup) -> Self {
        Self {
            filter: DropdownFilter::attach_with(dom, markup),
            last_prevented: false,
        }
    }

    /// Shorthand for well-formed `(label, value)` options.
    #[must_use]
    pub fn with_options(options: &[(&str, &str)]) -> Self {
        Self::new(FakeDom::with_options(options))
    }

    // === Event Simulation ===

    /// Click the first element matching `selector`.
    ///
    /// A selector matching nothing in the dropdown counts as a click
    /// elsewhere on the page.
    pub fn click(&mut self, selector: &str) -> &mut Self {
        match self.dom().query_one(selector) {
            Some(part) => self.click_part(part),
            None => self.click_outside(),
        }
    }

    /// Click a part of the dropdown.
    pub fn click_part(&mut self, part: Part) -> &mut Self {
        let prevented = match part {
            Part::Trigger | Part::Label => {
                self.filter.view_mut().focus(Part::Trigger);
                self.filter.handle_event(&Event::TriggerClick)
            }
            Part::Option(slot) | Part::OptionLabel(slot) => {
                self.filter.handle_event(&Event::OptionClick { slot })
            }
            Part::Root | Part::Listbox | Part::HiddenInput => false,
        };
        self.filter
            .handle_event(&Event::DocumentClick { inside: true });
        self.last_prevented = prevented;
        self
    }

    /// Click the trigger.
    pub fn click_trigger(&mut self) -> &mut Self {
        self.click_part(Part::Trigger)
    }

    /// Click the option at a slot.
    pub fn click_option(&mut self, slot: usize) -> &mut Self {
        self.click_part(Part::Option(slot))
    }

    /// Click an unrelated element of the page.
    pub fn click_outside(&mut self) -> &mut Self {
        self.filter.view_mut().blur();
        self.last_prevented = self
            .filter
            .handle_event(&Event::DocumentClick { inside: false });
        self
    }

    /// Move focus directly, as Tab or a script would.
    pub fn focus(&mut self, part: Part) -> &mut Self {
        self.filter.view_mut().focus(part);
        self
    }

    /// Simulate a key press on whatever holds focus.
    pub fn press_key(&mut self, key: Key) -> &mut Self {
        let focused = self.dom().focused();
        let listening = matches!(
            focused,
            Some(Part::Trigger | Part::Label | Part::Listbox | Part::Option(_) | Part::OptionLabel(_))
        );
        let focused_slot = self.dom().focused_slot();
        self.last_prevented =
            listening && self.filter.handle_event(&Event::KeyDown { key, focused_slot });
        self
    }

    /// Simulate a key press by its DOM `key` value (`"ArrowDown"`, `" "`, ...).
    pub fn press(&mut self, dom_key: &str) -> &mut Self {
        self.press_key(Key::from_dom_key(dom_key))
    }

    // === Queries ===

    /// The dropdown under test.
    #[must_use]
    pub const fn filter(&self) -> &DropdownFilter<FakeDom> {
        &self.filter
    }

    /// Mutable access to the dropdown under test.
    pub fn filter_mut(&mut self) -> &mut DropdownFilter<FakeDom> {
        &mut self.filter
    }

    /// The fake document.
    #[must_use]
    pub const fn dom(&self) -> &FakeDom {
        self.filter.view()
    }

    /// Check if the list is shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.filter.is_open()
    }

    /// Index of the selected option.
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.filter.selected_index()
    }

    /// Text in the trigger label.
    #[must_use]
    pub fn label_text(&self) -> String {
        self.dom().label_text().unwrap_or_default().to_string()
    }

    /// Value of the hidden input.
    #[must_use]
    pub fn hidden_value(&self) -> String {
        self.dom().hidden_value().unwrap_or_default().to_string()
    }

    /// Part holding focus.
    #[must_use]
    pub const fn focused(&self) -> Option<Part> {
        self.dom().focused()
    }

    /// Whether the last simulated event had its default action suppressed.
    #[must_use]
    pub const fn last_prevented(&self) -> bool {
        self.last_prevented
    }

    // === Assertions ===

    /// Assert the list is shown.
    ///
    /// # Panics
    ///
    /// Panics if the dropdown is closed.
    pub fn assert_open(&self) -> &Self {
        assert!(self.is_open(), "expected dropdown to be open");
        self.assert_aria_synced()
    }

    /// Assert the list is hidden.
    ///
    /// # Panics
    ///
    /// Panics if the dropdown is open.
    pub fn assert_closed(&self) -> &Self {
        assert!(!self.is_open(), "expected dropdown to be closed");
        self.assert_aria_synced()
    }

    /// Assert the rendered attributes agree with the open state.
    ///
    /// # Panics
    ///
    /// Panics on any disagreement.
    pub fn assert_aria_synced(&self) -> &Self {
        let dom = self.dom();
        let open = self.is_open();
        let expanded = if open { "true" } else { "false" };
        let aria_hidden = if open { "false" } else { "true" };
        assert_eq!(
            dom.attr(Part::Trigger, ARIA_EXPANDED),
            Some(expanded),
            "trigger aria-expanded out of sync (open = {open})"
        );
        assert_eq!(
            dom.attr(Part::Listbox, ARIA_HIDDEN),
            Some(aria_hidden),
            "listbox aria-hidden out of sync (open = {open})"
        );
        assert_eq!(
            dom.attr(Part::Listbox, HIDDEN).is_some(),
            !open,
            "listbox hidden out of sync (open = {open})"
        );
        self
    }

    /// Assert which part holds focus.
    ///
    /// # Panics
    ///
    /// Panics if focus is elsewhere.
    pub fn assert_focused(&self, part: Part) -> &Self {
        assert_eq!(self.focused(), Some(part), "unexpected focus");
        self
    }

    /// Assert the selection shown to the user and submitted with the form.
    ///
    /// # Panics
    ///
    /// Panics if the label or hidden value differ.
    pub fn assert_selection(&self, label: &str, value: &str) -> &Self {
        assert_eq!(self.label_text(), label, "trigger label");
        assert_eq!(self.hidden_value(), value, "hidden input value");
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Harness {
        Harness::with_options(&[("All", "all"), ("Docs", "docs"), ("Blog", "blog")])
    }

    #[test]
    fn test_click_trigger_opens_and_focuses() {
        let mut h = categories();
        h.click(".custom-select__btn");
        h.assert_open().assert_focused(Part::Option(0));
        assert!(h.last_prevented());
    }

    #[test]
    fn test_click_label_bubbles_to_trigger() {
        let mut h = categories();
        h.click(".custom-select__text");
        h.assert_open();
    }

    #[test]
    fn test_click_option_selects() {
        let mut h = categories();
        h.click_trigger().click("[data-value='blog']");
        h.assert_closed()
            .assert_selection("Blog", "blog")
            .assert_focused(Part::Trigger);
        assert_eq!(h.selected_index(), 2);
    }

    #[test]
    fn test_click_unknown_selector_is_outside() {
        let mut h = categories();
        h.click_trigger().click("#newsletter-signup");
        h.assert_closed();
        assert_eq!(h.focused(), None);
    }

    #[test]
    fn test_click_listbox_padding_keeps_open() {
        let mut h = categories();
        h.click_trigger().click(".custom-select__listbox");
        h.assert_open();
    }

    #[test]
    fn test_keys_ignored_without_focus() {
        let mut h = categories();
        h.press("ArrowDown");
        h.assert_closed();
        assert!(!h.last_prevented());
    }

    #[test]
    fn test_press_by_dom_key() {
        let mut h = categories();
        h.focus(Part::Trigger).press("ArrowDown");
        h.assert_open().assert_focused(Part::Option(0));
        h.press("ArrowDown").press(" ");
        h.assert_closed().assert_selection("Docs", "docs");
    }

    #[test]
    #[should_panic(expected = "expected dropdown to be open")]
    fn test_assert_open_panics_when_closed() {
        categories().assert_open();
    }
}
