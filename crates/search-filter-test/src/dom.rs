//! In-memory stand-in for the dropdown markup.
//!
//! [`FakeDom`] implements [`View`] over a flat list of nodes in document
//! order and tracks focus the way a browser would, so the dropdown can be
//! driven without a rendering environment.
//!
//! # Example
//!
//! ```
//! use search_filter_test::FakeDom;
//! use search_filter_core::Part;
//!
//! let dom = FakeDom::builder()
//!     .option("All", "all")
//!     .option_without_value("Broken")
//!     .hidden_value("all")
//!     .build();
//!
//! assert_eq!(dom.query(".custom-select__option").unwrap().len(), 2);
//! assert_eq!(dom.query_one("#category-filter-input"), Some(Part::HiddenInput));
//! ```

use crate::selector::{Selector, SelectorError};
use search_filter_core::view::{ARIA_EXPANDED, ARIA_HIDDEN, HIDDEN};
use search_filter_core::{Markup, Part, View};
use std::collections::BTreeMap;

/// One element of the fake document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeNode {
    /// Tag name
    pub tag: String,
    /// `id` attribute
    pub id: Option<String>,
    /// `class` list
    pub classes: Vec<String>,
    /// Other attributes
    pub attributes: BTreeMap<String, String>,
    /// Text content
    pub text: String,
    /// Form value (inputs only)
    pub value: Option<String>,
}

impl FakeNode {
    /// Create an empty node with a tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    fn stamped(tag: &str, selector: &str) -> Self {
        let mut node = Self::new(tag);
        // Compound selectors are not supported; such parts stay tag-only.
        if let Ok(sel) = Selector::parse(selector) {
            sel.apply_to(&mut node);
        }
        node
    }
}

#[derive(Debug, Clone)]
enum OptionKind {
    WellFormed { label: String, value: String },
    NoLabel { value: String },
    NoValue { label: String },
}

/// Builder for [`FakeDom`].
#[derive(Debug, Clone, Default)]
pub struct FakeDomBuilder {
    markup: Markup,
    options: Vec<OptionKind>,
    label: Option<String>,
    hidden_value: String,
    omit: Vec<Part>,
}

impl FakeDomBuilder {
    /// Use a non-default markup contract.
    #[must_use]
    pub fn markup(mut self, markup: Markup) -> Self {
        self.markup = markup;
        self
    }

    /// Add a well-formed option.
    #[must_use]
    pub fn option(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push(OptionKind::WellFormed {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    /// Add several well-formed options as `(label, value)` pairs.
    #[must_use]
    pub fn options(self, options: &[(&str, &str)]) -> Self {
        options
            .iter()
            .fold(self, |builder, (label, value)| builder.option(*label, *value))
    }

    /// Add an option with no display text child.
    #[must_use]
    pub fn option_without_label(mut self, value: impl Into<String>) -> Self {
        self.options.push(OptionKind::NoLabel {
            value: value.into(),
        });
        self
    }

    /// Add an option with no value attribute.
    #[must_use]
    pub fn option_without_value(mut self, label: impl Into<String>) -> Self {
        self.options.push(OptionKind::NoValue {
            label: label.into(),
        });
        self
    }

    /// Initial trigger label. Defaults to the first option's label.
    #[must_use]
    pub fn label(mut self, text: impl Into<String>) -> Self {
        self.label = Some(text.into());
        self
    }

    /// Initial hidden input value. Defaults to empty.
    #[must_use]
    pub fn hidden_value(mut self, value: impl Into<String>) -> Self {
        self.hidden_value = value.into();
        self
    }

    /// Leave a part out of the document.
    #[must_use]
    pub fn without(mut self, part: Part) -> Self {
        self.omit.push(part);
        self
    }

    /// Build the document, closed as served by the page.
    #[must_use]
    pub fn build(self) -> FakeDom {
        let m = &self.markup;
        let first_label = self.options.iter().find_map(|o| match o {
            OptionKind::WellFormed { label, .. } | OptionKind::NoValue { label } => {
                Some(label.clone())
            }
            OptionKind::NoLabel { .. } => None,
        });

        let mut nodes = vec![
            (Part::Root, FakeNode::stamped("div", &m.root)),
            (Part::Trigger, FakeNode::stamped("button", &m.trigger)),
            (Part::Label, FakeNode::stamped("span", &m.label)),
            (Part::Listbox, FakeNode::stamped("ul", &m.listbox)),
        ];
        if let Some((_, trigger)) = nodes.get_mut(1) {
            trigger
                .attributes
                .insert(ARIA_EXPANDED.to_string(), "false".to_string());
        }
        if let Some((_, label)) = nodes.get_mut(2) {
            label.text = self.label.clone().or(first_label).unwrap_or_default();
        }
        if let Some((_, listbox)) = nodes.get_mut(3) {
            listbox.attributes.insert(HIDDEN.to_string(), String::new());
            listbox
                .attributes
                .insert(ARIA_HIDDEN.to_string(), "true".to_string());
        }

        for (slot, kind) in self.options.iter().enumerate() {
            let mut option = FakeNode::stamped("li", &m.option);
            let mut text = FakeNode::stamped("span", &m.option_text);
            let has_label = match kind {
                OptionKind::WellFormed { label, value } => {
                    option
                        .attributes
                        .insert(m.value_attribute.clone(), value.clone());
                    text.text.clone_from(label);
                    true
                }
                OptionKind::NoLabel { value } => {
                    option
                        .attributes
                        .insert(m.value_attribute.clone(), value.clone());
                    option.text.clone_from(value);
                    false
                }
                OptionKind::NoValue { label } => {
                    text.text.clone_from(label);
                    true
                }
            };
            if has_label {
                option.text.clone_from(&text.text);
            }
            nodes.push((Part::Option(slot), option));
            if has_label {
                nodes.push((Part::OptionLabel(slot), text));
            }
        }

        let mut input = FakeNode::stamped("input", &m.hidden_input);
        input.attributes.insert("type".to_string(), "hidden".to_string());
        input.value = Some(self.hidden_value.clone());
        nodes.push((Part::HiddenInput, input));

        nodes.retain(|(part, _)| !self.omit.contains(part));

        FakeDom {
            nodes,
            option_count: self.options.len(),
            focused: None,
            focus_history: Vec::new(),
        }
    }
}

/// Fake document holding one dropdown.
#[derive(Debug, Clone)]
pub struct FakeDom {
    nodes: Vec<(Part, FakeNode)>,
    option_count: usize,
    focused: Option<Part>,
    focus_history: Vec<Part>,
}

impl FakeDom {
    /// Start building a document.
    #[must_use]
    pub fn builder() -> FakeDomBuilder {
        FakeDomBuilder::default()
    }

    /// Document with well-formed `(label, value)` options and default markup.
    #[must_use]
    pub fn with_options(options: &[(&str, &str)]) -> Self {
        Self::builder().options(options).build()
    }

    /// Node for a part, if present.
    #[must_use]
    pub fn node(&self, part: Part) -> Option<&FakeNode> {
        self.nodes.iter().find(|(p, _)| *p == part).map(|(_, n)| n)
    }

    fn node_mut(&mut self, part: Part) -> Option<&mut FakeNode> {
        self.nodes
            .iter_mut()
            .find(|(p, _)| *p == part)
            .map(|(_, n)| n)
    }

    /// Check if a part is in the document.
    #[must_use]
    pub fn contains(&self, part: Part) -> bool {
        self.node(part).is_some()
    }

    /// All parts matching a selector, in document order.
    pub fn query(&self, selector: &str) -> Result<Vec<Part>, SelectorError> {
        let sel = Selector::parse(selector)?;
        Ok(self
            .nodes
            .iter()
            .filter(|(_, node)| sel.matches(node))
            .map(|(part, _)| *part)
            .collect())
    }

    /// First part matching a selector.
    #[must_use]
    pub fn query_one(&self, selector: &str) -> Option<Part> {
        self.query(selector).ok()?.into_iter().next()
    }

    /// Attribute of a part.
    #[must_use]
    pub fn attr(&self, part: Part, name: &str) -> Option<&str> {
        self.node(part)?.attributes.get(name).map(String::as_str)
    }

    /// Text shown in the trigger label.
    #[must_use]
    pub fn label_text(&self) -> Option<&str> {
        self.node(Part::Label).map(|n| n.text.as_str())
    }

    /// Current hidden input value.
    #[must_use]
    pub fn hidden_value(&self) -> Option<&str> {
        self.node(Part::HiddenInput)?.value.as_deref()
    }

    /// Part holding focus (`document.activeElement`).
    #[must_use]
    pub const fn focused(&self) -> Option<Part> {
        self.focused
    }

    /// Slot of the focused option, if focus is on one.
    #[must_use]
    pub const fn focused_slot(&self) -> Option<usize> {
        match self.focused {
            Some(Part::Option(slot)) => Some(slot),
            _ => None,
        }
    }

    /// Every focus move, oldest first.
    #[must_use]
    pub fn focus_history(&self) -> &[Part] {
        &self.focus_history
    }

    /// Drop focus back to the document body.
    pub fn blur(&mut self) {
        self.focused = None;
    }
}

impl View for FakeDom {
    fn option_count(&self) -> usize {
        self.option_count
    }

    fn text(&self, part: Part) -> Option<String> {
        self.node(part).map(|n| n.text.clone())
    }

    fn set_text(&mut self, part: Part, text: &str) {
        if let Some(node) = self.node_mut(part) {
            node.text = text.to_string();
        }
    }

    fn attribute(&self, part: Part, name: &str) -> Option<String> {
        self.attr(part, name).map(str::to_string)
    }

    fn set_attribute(&mut self, part: Part, name: &str, value: &str) {
        if let Some(node) = self.node_mut(part) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, part: Part, name: &str) {
        if let Some(node) = self.node_mut(part) {
            node.attributes.remove(name);
        }
    }

    fn value(&self, part: Part) -> Option<String> {
        self.node(part)?.value.clone()
    }

    fn set_value(&mut self, part: Part, value: &str) {
        if let Some(node) = self.node_mut(part) {
            node.value = Some(value.to_string());
        }
    }

    fn focus(&mut self, part: Part) {
        if self.contains(part) {
            self.focused = Some(part);
            self.focus_history.push(part);
        }
    }
}
