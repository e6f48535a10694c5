//! Error types for the search filter.

use crate::view::Part;
use thiserror::Error;

/// Errors produced while attaching to or driving the dropdown.
///
/// None of these reach the end user. Malformed options and rejected indices
/// are logged and skipped; a missing required element aborts the mount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// A required element was not found inside the root container.
    #[error("required element missing: {0}")]
    MissingElement(Part),

    /// An option element could not be read and was left out.
    #[error("option {slot} skipped: {defect}")]
    MalformedOption {
        /// Document position of the option element.
        slot: usize,
        /// What was wrong with it.
        defect: OptionDefect,
    },

    /// Selection requested for an index with no option.
    #[error("option index {index} out of range ({len} options)")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of options.
        len: usize,
    },

    /// Markup configuration could not be parsed or is incomplete.
    #[error("invalid markup configuration: {0}")]
    InvalidMarkup(String),
}

/// Reason an option element was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionDefect {
    /// No child element holding the display text.
    #[error("missing label element")]
    MissingLabel,
    /// The value attribute is absent.
    #[error("missing `{0}` attribute")]
    MissingValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_element_display() {
        let err = FilterError::MissingElement(Part::Listbox);
        assert_eq!(err.to_string(), "required element missing: listbox");
    }

    #[test]
    fn test_malformed_option_display() {
        let err = FilterError::MalformedOption {
            slot: 2,
            defect: OptionDefect::MissingValue("data-value".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("option 2"));
        assert!(msg.contains("`data-value`"));
    }

    #[test]
    fn test_index_out_of_range_display() {
        let err = FilterError::IndexOutOfRange { index: 7, len: 3 };
        assert_eq!(err.to_string(), "option index 7 out of range (3 options)");
    }

    #[test]
    fn test_invalid_markup_display() {
        let err = FilterError::InvalidMarkup("empty `root` selector".to_string());
        assert!(err.to_string().starts_with("invalid markup configuration"));
    }

    #[test]
    fn test_option_defect_label() {
        assert_eq!(OptionDefect::MissingLabel.to_string(), "missing label element");
    }
}
