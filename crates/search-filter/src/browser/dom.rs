//! [`View`] over live DOM elements.

use search_filter_core::{FilterError, Markup, Part, View};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, EventTarget, HtmlElement, HtmlInputElement, Node};

/// The dropdown's elements, resolved once at mount time.
#[derive(Debug, Clone)]
pub struct DomView {
    root: Element,
    trigger: HtmlElement,
    label: Element,
    listbox: Element,
    hidden_input: HtmlInputElement,
    options: Vec<Element>,
    option_labels: Vec<Option<Element>>,
}

impl DomView {
    /// Resolve the markup contract against a document.
    ///
    /// Returns `Ok(None)` when the root is not on the page. Once the root is
    /// found, the trigger, label, listbox and hidden input are required.
    pub fn query(document: &Document, markup: &Markup) -> Result<Option<Self>, FilterError> {
        let Some(root) = select(document.query_selector(&markup.root), &markup.root)? else {
            return Ok(None);
        };

        let trigger = required(&root, &markup.trigger, Part::Trigger)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| {
                FilterError::InvalidMarkup(format!("`{}` is not an HTML element", markup.trigger))
            })?;
        let label = required(&root, &markup.label, Part::Label)?;
        let listbox = required(&root, &markup.listbox, Part::Listbox)?;
        let hidden_input = required(&root, &markup.hidden_input, Part::HiddenInput)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| {
                FilterError::InvalidMarkup(format!("`{}` is not an input element", markup.hidden_input))
            })?;

        let list = root
            .query_selector_all(&markup.option)
            .map_err(|_| invalid_selector(&markup.option))?;
        let options: Vec<Element> = (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect();
        let option_labels = options
            .iter()
            .map(|option| select(option.query_selector(&markup.option_text), &markup.option_text))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Self {
            root,
            trigger,
            label,
            listbox,
            hidden_input,
            options,
            option_labels,
        }))
    }

    /// The trigger button.
    #[must_use]
    pub fn trigger(&self) -> &HtmlElement {
        &self.trigger
    }

    /// The option list container.
    #[must_use]
    pub fn listbox(&self) -> &Element {
        &self.listbox
    }

    /// Option elements in document order, malformed ones included.
    #[must_use]
    pub fn options(&self) -> &[Element] {
        &self.options
    }

    /// Whether an event target lies inside the dropdown root.
    #[must_use]
    pub fn contains(&self, target: Option<&EventTarget>) -> bool {
        target
            .and_then(|t| t.dyn_ref::<Node>())
            .is_some_and(|node| self.root.contains(Some(node)))
    }

    /// Slot of the option element currently holding focus.
    #[must_use]
    pub fn focused_slot(&self) -> Option<usize> {
        let active: Node = self.root.owner_document()?.active_element()?.into();
        self.options
            .iter()
            .position(|option| option.is_same_node(Some(&active)))
    }

    fn element(&self, part: Part) -> Option<&Element> {
        match part {
            Part::Root => Some(&self.root),
            Part::Trigger => Some(AsRef::<Element>::as_ref(&self.trigger)),
            Part::Label => Some(&self.label),
            Part::Listbox => Some(&self.listbox),
            Part::HiddenInput => Some(AsRef::<Element>::as_ref(&self.hidden_input)),
            Part::Option(slot) => self.options.get(slot),
            Part::OptionLabel(slot) => self.option_labels.get(slot)?.as_ref(),
        }
    }
}

impl View for DomView {
    fn option_count(&self) -> usize {
        self.options.len()
    }

    fn text(&self, part: Part) -> Option<String> {
        self.element(part)?.text_content()
    }

    fn set_text(&mut self, part: Part, text: &str) {
        if let Some(element) = self.element(part) {
            element.set_text_content(Some(text));
        }
    }

    fn attribute(&self, part: Part, name: &str) -> Option<String> {
        self.element(part)?.get_attribute(name)
    }

    fn set_attribute(&mut self, part: Part, name: &str, value: &str) {
        if let Some(element) = self.element(part) {
            element.set_attribute(name, value).ok();
        }
    }

    fn remove_attribute(&mut self, part: Part, name: &str) {
        if let Some(element) = self.element(part) {
            element.remove_attribute(name).ok();
        }
    }

    fn value(&self, part: Part) -> Option<String> {
        (part == Part::HiddenInput).then(|| self.hidden_input.value())
    }

    fn set_value(&mut self, part: Part, value: &str) {
        if part == Part::HiddenInput {
            self.hidden_input.set_value(value);
        }
    }

    fn focus(&mut self, part: Part) {
        if let Some(element) = self.element(part).and_then(|e| e.dyn_ref::<HtmlElement>()) {
            element.focus().ok();
        }
    }
}

fn select(
    result: Result<Option<Element>, JsValue>,
    selector: &str,
) -> Result<Option<Element>, FilterError> {
    result.map_err(|_| invalid_selector(selector))
}

fn required(root: &Element, selector: &str, part: Part) -> Result<Element, FilterError> {
    select(root.query_selector(selector), selector)?.ok_or(FilterError::MissingElement(part))
}

fn invalid_selector(selector: &str) -> FilterError {
    FilterError::InvalidMarkup(format!("invalid selector `{selector}`"))
}
