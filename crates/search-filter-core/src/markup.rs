//! Markup contract: the selectors a host uses to find the dropdown parts.
//!
//! Defaults match the header search partial:
//!
//! ```html
//! <div class="custom-select">
//!   <button class="custom-select__btn" aria-expanded="false">
//!     <span class="custom-select__text">All</span>
//!   </button>
//!   <ul class="custom-select__listbox" hidden aria-hidden="true">
//!     <li class="custom-select__option" data-value="all"><span>All</span></li>
//!   </ul>
//!   <input type="hidden" id="category-filter-input" value="all">
//! </div>
//! ```
//!
//! A page with different class names passes its own configuration as JSON;
//! missing fields keep their defaults.

use crate::error::FilterError;
use serde::{Deserialize, Serialize};

/// Selector configuration for one dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markup {
    /// Root container, queried on the document
    pub root: String,
    /// Trigger button, inside the root
    pub trigger: String,
    /// Option list container, inside the root
    pub listbox: String,
    /// Option elements, inside the root
    pub option: String,
    /// Label element showing the selection, inside the root
    pub label: String,
    /// Hidden form input, inside the root
    pub hidden_input: String,
    /// Display text child, inside each option
    pub option_text: String,
    /// Attribute carrying an option's value
    pub value_attribute: String,
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            root: ".custom-select".to_string(),
            trigger: ".custom-select__btn".to_string(),
            listbox: ".custom-select__listbox".to_string(),
            option: ".custom-select__option".to_string(),
            label: ".custom-select__text".to_string(),
            hidden_input: "#category-filter-input".to_string(),
            option_text: "span".to_string(),
            value_attribute: "data-value".to_string(),
        }
    }
}

impl Markup {
    /// Parse a JSON configuration and validate it.
    pub fn from_json(json: &str) -> Result<Self, FilterError> {
        let markup: Self =
            serde_json::from_str(json).map_err(|e| FilterError::InvalidMarkup(e.to_string()))?;
        markup.validate()?;
        Ok(markup)
    }

    /// Reject blank selectors.
    pub fn validate(&self) -> Result<(), FilterError> {
        for (name, selector) in self.fields() {
            if selector.trim().is_empty() {
                return Err(FilterError::InvalidMarkup(format!("empty `{name}` selector")));
            }
        }
        Ok(())
    }

    /// Field names paired with their values.
    #[must_use]
    pub fn fields(&self) -> [(&'static str, &str); 8] {
        [
            ("root", self.root.as_str()),
            ("trigger", self.trigger.as_str()),
            ("listbox", self.listbox.as_str()),
            ("option", self.option.as_str()),
            ("label", self.label.as_str()),
            ("hidden_input", self.hidden_input.as_str()),
            ("option_text", self.option_text.as_str()),
            ("value_attribute", self.value_attribute.as_str()),
        ]
    }
}
