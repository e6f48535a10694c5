//! Options read from the markup.

use crate::error::{FilterError, OptionDefect};
use crate::view::{Part, View};
use serde::{Deserialize, Serialize};

/// A selectable option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Opaque value written to the hidden input
    pub value: String,
    /// Display label copied into the trigger
    pub label: String,
    /// Document position of the option element
    pub slot: usize,
}

impl FilterOption {
    /// Create a new option.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>, slot: usize) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            slot,
        }
    }

    /// Read the option at `slot` from a view.
    pub fn read<V: View + ?Sized>(
        view: &V,
        slot: usize,
        value_attribute: &str,
    ) -> Result<Self, FilterError> {
        let label = view
            .text(Part::OptionLabel(slot))
            .ok_or(FilterError::MalformedOption {
                slot,
                defect: OptionDefect::MissingLabel,
            })?;
        let value = view
            .attribute(Part::Option(slot), value_attribute)
            .ok_or_else(|| FilterError::MalformedOption {
                slot,
                defect: OptionDefect::MissingValue(value_attribute.to_string()),
            })?;
        Ok(Self { value, label, slot })
    }
}

/// The well-formed options of one dropdown, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    options: Vec<FilterOption>,
}

impl OptionSet {
    /// Build from already-read options.
    #[must_use]
    pub fn new(options: Vec<FilterOption>) -> Self {
        Self { options }
    }

    /// Read every option slot of a view.
    ///
    /// Malformed options are left out and returned alongside the set.
    pub fn read<V: View + ?Sized>(view: &V, value_attribute: &str) -> (Self, Vec<FilterError>) {
        let mut options = Vec::with_capacity(view.option_count());
        let mut skipped = Vec::new();
        for slot in 0..view.option_count() {
            match FilterOption::read(view, slot, value_attribute) {
                Ok(option) => options.push(option),
                Err(err) => skipped.push(err),
            }
        }
        (Self { options }, skipped)
    }

    /// Option at an index.
    pub fn get(&self, index: usize) -> Result<&FilterOption, FilterError> {
        self.options.get(index).ok_or(FilterError::IndexOutOfRange {
            index,
            len: self.options.len(),
        })
    }

    /// Index of the option read from `slot`.
    #[must_use]
    pub fn index_of_slot(&self, slot: usize) -> Option<usize> {
        self.options.iter().position(|o| o.slot == slot)
    }

    /// Index of the first option carrying `value`.
    #[must_use]
    pub fn position_of_value(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|o| o.value == value)
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Iterate in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, FilterOption> {
        self.options.iter()
    }
}

impl<'a> IntoIterator for &'a OptionSet {
    type Item = &'a FilterOption;
    type IntoIter = std::slice::Iter<'a, FilterOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Read-only view over a fixed list of (label, value) slots.
    struct Slots(Vec<(Option<&'static str>, Option<&'static str>)>);

    impl View for Slots {
        fn option_count(&self) -> usize {
            self.0.len()
        }

        fn text(&self, part: Part) -> Option<String> {
            match part {
                Part::OptionLabel(slot) => self.0.get(slot)?.0.map(str::to_string),
                _ => None,
            }
        }

        fn set_text(&mut self, _part: Part, _text: &str) {}

        fn attribute(&self, part: Part, name: &str) -> Option<String> {
            match part {
                Part::Option(slot) if name == "data-value" => self.0.get(slot)?.1.map(str::to_string),
                _ => None,
            }
        }

        fn set_attribute(&mut self, _part: Part, _name: &str, _value: &str) {}

        fn remove_attribute(&mut self, _part: Part, _name: &str) {}

        fn value(&self, _part: Part) -> Option<String> {
            None
        }

        fn set_value(&mut self, _part: Part, _value: &str) {}

        fn focus(&mut self, _part: Part) {}
    }

    #[test]
    fn test_filter_option_new() {
        let opt = FilterOption::new("docs", "Docs", 1);
        assert_eq!(opt.value, "docs");
        assert_eq!(opt.label, "Docs");
        assert_eq!(opt.slot, 1);
    }

    #[test]
    fn test_read_well_formed() {
        let view = Slots(vec![(Some("All"), Some("all")), (Some("Docs"), Some("docs"))]);
        let (set, skipped) = OptionSet::read(&view, "data-value");
        assert!(skipped.is_empty());
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1).map(|o| o.label.as_str()), Ok("Docs"));
    }

    #[test]
    fn test_read_skips_malformed() {
        let view = Slots(vec![
            (Some("All"), Some("all")),
            (None, Some("broken")),
            (Some("Blog"), None),
            (Some("News"), Some("news")),
        ]);
        let (set, skipped) = OptionSet::read(&view, "data-value");
        assert_eq!(set.len(), 2);
        assert_eq!(
            skipped,
            vec![
                FilterError::MalformedOption {
                    slot: 1,
                    defect: OptionDefect::MissingLabel
                },
                FilterError::MalformedOption {
                    slot: 2,
                    defect: OptionDefect::MissingValue("data-value".to_string())
                },
            ]
        );
        assert_eq!(set.index_of_slot(3), Some(1));
        assert_eq!(set.index_of_slot(1), None);
    }

    #[test]
    fn test_read_respects_value_attribute() {
        let view = Slots(vec![(Some("All"), Some("all"))]);
        let (set, skipped) = OptionSet::read(&view, "data-category");
        assert!(set.is_empty());
        assert_eq!(skipped.len(), 1);
    }

    #[test]
    fn test_empty_value_is_allowed() {
        let view = Slots(vec![(Some("Any"), Some(""))]);
        let (set, skipped) = OptionSet::read(&view, "data-value");
        assert!(skipped.is_empty());
        assert_eq!(set.position_of_value(""), Some(0));
    }

    #[test]
    fn test_get_out_of_range() {
        let set = OptionSet::new(vec![FilterOption::new("all", "All", 0)]);
        assert_eq!(
            set.get(4),
            Err(FilterError::IndexOutOfRange { index: 4, len: 1 })
        );
    }

    #[test]
    fn test_position_of_value() {
        let set = OptionSet::new(vec![
            FilterOption::new("all", "All", 0),
            FilterOption::new("blog", "Blog", 1),
        ]);
        assert_eq!(set.position_of_value("blog"), Some(1));
        assert_eq!(set.position_of_value("news"), None);
        assert_eq!(set.iter().count(), 2);
    }
}
