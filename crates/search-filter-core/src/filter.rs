//! The dropdown component: state machine plus the view it renders into.

use crate::error::FilterError;
use crate::event::{Event, Key};
use crate::markup::Markup;
use crate::option::{FilterOption, OptionSet};
use crate::state::{DropdownState, Effect, Effects, Message};
use crate::view::{Part, View, ARIA_EXPANDED, ARIA_HIDDEN, ARIA_SELECTED, HIDDEN};
use tracing::{debug, warn};

/// Accessible dropdown bound to a [`View`].
///
/// Every operation updates [`DropdownState`] first and then applies the
/// resulting effects, so the view's `aria-expanded`, `hidden` and
/// `aria-hidden` attributes agree with [`DropdownFilter::is_open`] after each
/// call.
#[derive(Debug)]
pub struct DropdownFilter<V: View> {
    view: V,
    options: OptionSet,
    state: DropdownState,
    skipped: Vec<FilterError>,
}

impl<V: View> DropdownFilter<V> {
    /// Attach using the default markup contract.
    pub fn attach(view: V) -> Self {
        Self::attach_with(view, &Markup::default())
    }

    /// Attach to a view, reading options with the configured value attribute.
    ///
    /// Malformed options are skipped and kept in [`DropdownFilter::skipped`].
    /// If the hidden input already holds one of the option values, that
    /// option starts selected and its label is written to the trigger. The
    /// closed configuration is rendered immediately.
    pub fn attach_with(view: V, markup: &Markup) -> Self {
        let (options, skipped) = OptionSet::read(&view, &markup.value_attribute);
        for err in &skipped {
            warn!(%err, "skipping option");
        }

        let restored = view
            .value(Part::HiddenInput)
            .and_then(|value| options.position_of_value(&value));
        let initial = restored.unwrap_or(0);
        let state = DropdownState::new(options.len()).with_selected(initial);
        debug!(options = options.len(), selected = initial, "dropdown attached");

        let mut filter = Self {
            view,
            options,
            state,
            skipped,
        };
        if restored.is_some() {
            filter.show_selection(initial);
        }
        filter.render();
        filter
    }

    // === Operations ===

    /// Open if closed, close if open.
    pub fn toggle(&mut self) {
        self.dispatch(Message::Toggle);
    }

    /// Show the list and focus the selected option.
    pub fn open(&mut self) {
        self.dispatch(Message::Open);
    }

    /// Hide the list. Focus stays where it is.
    pub fn close(&mut self) {
        self.dispatch(Message::Close);
    }

    /// Select an option, write it to the trigger label and hidden input,
    /// close the list and focus the trigger.
    pub fn select_option(&mut self, index: usize) -> Result<(), FilterError> {
        if let Err(err) = self.options.get(index) {
            warn!(%err, "rejecting selection");
            return Err(err);
        }
        self.dispatch(Message::Select(index));
        Ok(())
    }

    /// Handle a host interaction.
    ///
    /// Returns `true` when the host must suppress the event's default action.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match *event {
            Event::TriggerClick => {
                self.toggle();
                true
            }
            Event::OptionClick { slot } => {
                self.handle_option_click(slot);
                false
            }
            Event::DocumentClick { inside } => {
                self.handle_document_click(inside);
                false
            }
            Event::KeyDown { key, focused_slot } => self.handle_key(key, focused_slot),
        }
    }

    /// Select the option clicked at `slot`. Skipped slots are ignored.
    pub fn handle_option_click(&mut self, slot: usize) {
        if let Some(index) = self.options.index_of_slot(slot) {
            self.dispatch(Message::Select(index));
        }
    }

    /// Close on a click outside the root.
    pub fn handle_document_click(&mut self, inside: bool) {
        if !inside {
            self.dispatch(Message::OutsideClick);
        }
    }

    /// Apply the keyboard contract. `focused_slot` is the option element
    /// holding focus, if any.
    ///
    /// Returns `true` when the key's default action must be suppressed.
    pub fn handle_key(&mut self, key: Key, focused_slot: Option<usize>) -> bool {
        let focused = focused_slot.and_then(|slot| self.options.index_of_slot(slot));
        self.dispatch(Message::Key { key, focused }).prevents_default()
    }

    /// Run a message through the state machine and apply its effects.
    pub fn dispatch(&mut self, msg: Message) -> Effects {
        let effects = self.state.update(msg);
        self.apply(&effects);
        effects
    }

    // === Accessors ===

    /// Check if the list is shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Index of the selected option.
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.state.selected_index()
    }

    /// The selected option, if there are any options.
    #[must_use]
    pub fn selected_option(&self) -> Option<&FilterOption> {
        self.options.get(self.state.selected_index()).ok()
    }

    /// Current state snapshot.
    #[must_use]
    pub const fn state(&self) -> &DropdownState {
        &self.state
    }

    /// Options read at attach time.
    #[must_use]
    pub const fn options(&self) -> &OptionSet {
        &self.options
    }

    /// Options that were skipped as malformed.
    #[must_use]
    pub fn skipped(&self) -> &[FilterError] {
        &self.skipped
    }

    /// The underlying view.
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view.
    ///
    /// Writes made here bypass the state machine; use it for host-side
    /// changes such as focus moves, not for ARIA attributes.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Release the view.
    pub fn into_view(self) -> V {
        self.view
    }

    // === Rendering ===

    fn apply(&mut self, effects: &Effects) {
        for effect in effects {
            match *effect {
                Effect::Render => self.render(),
                Effect::ShowSelection(index) => self.show_selection(index),
                Effect::FocusOption(index) => {
                    if let Ok(option) = self.options.get(index) {
                        self.view.focus(Part::Option(option.slot));
                    }
                }
                Effect::FocusTrigger => self.view.focus(Part::Trigger),
                Effect::PreventDefault => {}
            }
        }
    }

    fn render(&mut self) {
        let open = self.state.is_open();
        self.view
            .set_attribute(Part::Trigger, ARIA_EXPANDED, bool_attr(open));
        if open {
            self.view.remove_attribute(Part::Listbox, HIDDEN);
        } else {
            self.view.set_attribute(Part::Listbox, HIDDEN, "");
        }
        self.view
            .set_attribute(Part::Listbox, ARIA_HIDDEN, bool_attr(!open));

        let selected = self.state.selected_index();
        for (index, option) in self.options.iter().enumerate() {
            self.view.set_attribute(
                Part::Option(option.slot),
                ARIA_SELECTED,
                bool_attr(index == selected),
            );
        }
    }

    fn show_selection(&mut self, index: usize) {
        let Ok(option) = self.options.get(index) else {
            return;
        };
        self.view.set_text(Part::Label, &option.label);
        self.view.set_value(Part::HiddenInput, &option.value);
    }
}

const fn bool_attr(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    /// Minimal in-memory view recording every write.
    #[derive(Debug, Default)]
    struct RecordingView {
        labels: Vec<Option<String>>,
        values: Vec<Option<String>>,
        attributes: BTreeMap<(Part, String), String>,
        texts: BTreeMap<Part, String>,
        hidden_value: String,
        focused: Option<Part>,
    }

    impl RecordingView {
        fn with_options(options: &[(&str, &str)]) -> Self {
            Self {
                labels: options.iter().map(|(l, _)| Some((*l).to_string())).collect(),
                values: options.iter().map(|(_, v)| Some((*v).to_string())).collect(),
                ..Self::default()
            }
        }

        fn attr(&self, part: Part, name: &str) -> Option<&str> {
            self.attributes
                .get(&(part, name.to_string()))
                .map(String::as_str)
        }
    }

    impl View for RecordingView {
        fn option_count(&self) -> usize {
            self.labels.len()
        }

        fn text(&self, part: Part) -> Option<String> {
            match part {
                Part::OptionLabel(slot) => self.labels.get(slot).cloned().flatten(),
                other => self.texts.get(&other).cloned(),
            }
        }

        fn set_text(&mut self, part: Part, text: &str) {
            self.texts.insert(part, text.to_string());
        }

        fn attribute(&self, part: Part, name: &str) -> Option<String> {
            match part {
                Part::Option(slot) if name == "data-value" => self.values.get(slot).cloned().flatten(),
                other => self.attr(other, name).map(str::to_string),
            }
        }

        fn set_attribute(&mut self, part: Part, name: &str, value: &str) {
            self.attributes
                .insert((part, name.to_string()), value.to_string());
        }

        fn remove_attribute(&mut self, part: Part, name: &str) {
            self.attributes.remove(&(part, name.to_string()));
        }

        fn value(&self, part: Part) -> Option<String> {
            (part == Part::HiddenInput).then(|| self.hidden_value.clone())
        }

        fn set_value(&mut self, part: Part, value: &str) {
            if part == Part::HiddenInput {
                self.hidden_value = value.to_string();
            }
        }

        fn focus(&mut self, part: Part) {
            self.focused = Some(part);
        }
    }

    fn three() -> DropdownFilter<RecordingView> {
        DropdownFilter::attach(RecordingView::with_options(&[
            ("All", "all"),
            ("Docs", "docs"),
            ("Blog", "blog"),
        ]))
    }

    fn assert_rendered(filter: &DropdownFilter<RecordingView>) {
        let view = filter.view();
        let open = filter.is_open();
        assert_eq!(view.attr(Part::Trigger, ARIA_EXPANDED), Some(bool_attr(open)));
        assert_eq!(view.attr(Part::Listbox, ARIA_HIDDEN), Some(bool_attr(!open)));
        assert_eq!(view.attr(Part::Listbox, HIDDEN).is_some(), !open);
    }

    #[test]
    fn test_attach_renders_closed() {
        let filter = three();
        assert!(!filter.is_open());
        assert_eq!(filter.selected_index(), 0);
        assert_rendered(&filter);
        assert_eq!(filter.view().attr(Part::Option(0), ARIA_SELECTED), Some("true"));
        assert_eq!(filter.view().attr(Part::Option(2), ARIA_SELECTED), Some("false"));
    }

    #[test]
    fn test_attach_picks_up_hidden_value() {
        let mut view = RecordingView::with_options(&[("All", "all"), ("Blog", "blog")]);
        view.hidden_value = "blog".to_string();
        let filter = DropdownFilter::attach(view);
        assert_eq!(filter.selected_index(), 1);
        assert_eq!(filter.selected_option().map(|o| o.label.as_str()), Some("Blog"));
    }

    #[test]
    fn test_attach_hidden_value_updates_label() {
        let mut view = RecordingView::with_options(&[("All", "all"), ("Docs", "docs")]);
        view.texts.insert(Part::Label, "All".to_string());
        view.hidden_value = "docs".to_string();
        let filter = DropdownFilter::attach(view);

        let view = filter.view();
        assert_eq!(view.texts.get(&Part::Label).map(String::as_str), Some("Docs"));
        assert_eq!(view.hidden_value, "docs");
        assert_eq!(view.attr(Part::Option(1), ARIA_SELECTED), Some("true"));
        assert_eq!(view.attr(Part::Option(0), ARIA_SELECTED), Some("false"));
    }

    #[test]
    fn test_attach_without_hidden_match_keeps_served_label() {
        let mut view = RecordingView::with_options(&[("All", "all"), ("Docs", "docs")]);
        view.texts.insert(Part::Label, "Everything".to_string());
        let filter = DropdownFilter::attach(view);
        assert_eq!(
            filter.view().texts.get(&Part::Label).map(String::as_str),
            Some("Everything")
        );
    }

    #[test]
    fn test_attach_unknown_hidden_value_defaults_to_first() {
        let mut view = RecordingView::with_options(&[("All", "all"), ("Blog", "blog")]);
        view.hidden_value = "news".to_string();
        assert_eq!(DropdownFilter::attach(view).selected_index(), 0);
    }

    #[test]
    fn test_open_close_render() {
        let mut filter = three();
        filter.open();
        assert!(filter.is_open());
        assert_rendered(&filter);
        assert_eq!(filter.view().focused, Some(Part::Option(0)));

        filter.close();
        assert!(!filter.is_open());
        assert_rendered(&filter);
        assert_eq!(filter.view().focused, Some(Part::Option(0)));
    }

    #[test]
    fn test_select_option_writes_label_and_value() {
        let mut filter = three();
        filter.open();
        filter.select_option(2).expect("valid index");
        let view = filter.view();
        assert_eq!(view.texts.get(&Part::Label).map(String::as_str), Some("Blog"));
        assert_eq!(view.hidden_value, "blog");
        assert_eq!(view.focused, Some(Part::Trigger));
        assert_eq!(view.attr(Part::Option(2), ARIA_SELECTED), Some("true"));
        assert_eq!(view.attr(Part::Option(0), ARIA_SELECTED), Some("false"));
        assert!(!filter.is_open());
    }

    #[test]
    fn test_select_option_out_of_range() {
        let mut filter = three();
        filter.open();
        let err = filter.select_option(3).unwrap_err();
        assert_eq!(err, FilterError::IndexOutOfRange { index: 3, len: 3 });
        assert!(filter.is_open());
        assert_eq!(filter.selected_index(), 0);
        assert!(filter.view().texts.is_empty());
    }

    #[test]
    fn test_skipped_option_maps_slots() {
        let mut view = RecordingView::with_options(&[("All", "all"), ("x", "x"), ("Blog", "blog")]);
        view.labels[1] = None;
        let mut filter = DropdownFilter::attach(view);
        assert_eq!(filter.options().len(), 2);
        assert_eq!(filter.skipped().len(), 1);

        filter.open();
        filter.handle_event(&Event::KeyDown {
            key: Key::Down,
            focused_slot: Some(0),
        });
        assert_eq!(filter.view().focused, Some(Part::Option(2)));

        filter.handle_event(&Event::OptionClick { slot: 1 });
        assert!(filter.is_open());
        filter.handle_event(&Event::OptionClick { slot: 2 });
        assert_eq!(filter.view().hidden_value, "blog");
    }

    #[test]
    fn test_trigger_click_prevents_default() {
        let mut filter = three();
        assert!(filter.handle_event(&Event::TriggerClick));
        assert!(filter.is_open());
        assert!(filter.handle_event(&Event::TriggerClick));
        assert!(!filter.is_open());
    }

    #[test]
    fn test_document_click_inside_keeps_open() {
        let mut filter = three();
        filter.open();
        assert!(!filter.handle_event(&Event::DocumentClick { inside: true }));
        assert!(filter.is_open());
        filter.handle_event(&Event::DocumentClick { inside: false });
        assert!(!filter.is_open());
        assert_rendered(&filter);
    }

    #[test]
    fn test_unhandled_key_not_prevented() {
        let mut filter = three();
        assert!(!filter.handle_event(&Event::KeyDown {
            key: Key::Other,
            focused_slot: None,
        }));
    }

    #[test]
    fn test_handle_key_from_trigger() {
        let mut filter = three();
        assert!(filter.handle_key(Key::End, None));
        assert!(!filter.is_open());

        assert!(filter.handle_key(Key::Down, None));
        assert!(filter.is_open());
        assert!(filter.handle_key(Key::Up, None));
        assert_eq!(filter.view().focused, Some(Part::Option(0)));
    }

    #[test]
    fn test_handle_key_escape_focuses_trigger() {
        let mut filter = three();
        filter.open();
        assert!(filter.handle_key(Key::Escape, Some(1)));
        assert!(!filter.is_open());
        assert_eq!(filter.view().focused, Some(Part::Trigger));
    }

    #[test]
    fn test_handle_option_click_unknown_slot() {
        let mut filter = three();
        filter.open();
        filter.handle_option_click(9);
        assert!(filter.is_open());
        filter.handle_option_click(1);
        assert!(!filter.is_open());
        assert_eq!(filter.selected_index(), 1);
    }

    #[test]
    fn test_handle_document_click_when_closed() {
        let mut filter = three();
        filter.handle_document_click(false);
        assert!(!filter.is_open());
        assert_rendered(&filter);
    }

    #[test]
    fn test_into_view() {
        let view = three().into_view();
        assert_eq!(view.option_count(), 3);
    }
}
