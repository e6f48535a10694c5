//! CSS-like selector parsing for fake DOM queries.
//!
//! Supports the simple selectors the markup contract uses:
//! - `"span"` - by tag name
//! - `"#category-filter-input"` - by ID
//! - `".custom-select__btn"` - by class
//! - `"[data-value]"` / `"[data-value='docs']"` - by attribute

use crate::dom::FakeNode;
use thiserror::Error;

/// Parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Match by tag name
    Tag(String),
    /// Match by ID (e.g., `#my-id`)
    Id(String),
    /// Match by class (e.g., `.my-class`)
    Class(String),
    /// Match by attribute presence or value (e.g., `[data-value='docs']`)
    Attribute {
        /// Attribute name
        name: String,
        /// Required value, or `None` for presence only
        value: Option<String>,
    },
}

impl Selector {
    /// Parse a selector string.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector is invalid.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        SelectorParser::new(input.trim()).parse()
    }

    /// Check if this selector matches a node.
    #[must_use]
    pub fn matches(&self, node: &FakeNode) -> bool {
        match self {
            Self::Tag(tag) => node.tag == *tag,
            Self::Id(id) => node.id.as_deref() == Some(id.as_str()),
            Self::Class(class) => node.classes.iter().any(|c| c == class),
            Self::Attribute { name, value } => match (node.attributes.get(name), value) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == expected,
                (None, _) => false,
            },
        }
    }

    /// Stamp this selector onto a node so that it matches.
    pub fn apply_to(&self, node: &mut FakeNode) {
        match self {
            Self::Tag(tag) => node.tag.clone_from(tag),
            Self::Id(id) => node.id = Some(id.clone()),
            Self::Class(class) => {
                if !node.classes.contains(class) {
                    node.classes.push(class.clone());
                }
            }
            Self::Attribute { name, value } => {
                node.attributes
                    .insert(name.clone(), value.clone().unwrap_or_default());
            }
        }
    }
}

/// Selector parser.
pub struct SelectorParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    /// Create a new parser.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Parse the selector.
    pub fn parse(&mut self) -> Result<Selector, SelectorError> {
        let first = self.peek_char().ok_or(SelectorError::Empty)?;

        let selector = match first {
            '#' => self.parse_id(),
            '.' => self.parse_class(),
            '[' => self.parse_attribute(),
            _ if first.is_alphabetic() => self.parse_tag(),
            _ => Err(SelectorError::UnexpectedChar(first)),
        }?;

        match self.peek_char() {
            None => Ok(selector),
            Some(c) => Err(SelectorError::UnexpectedChar(c)),
        }
    }

    fn parse_id(&mut self) -> Result<Selector, SelectorError> {
        self.advance(); // '#'
        Ok(Selector::Id(self.read_identifier()?))
    }

    fn parse_class(&mut self) -> Result<Selector, SelectorError> {
        self.advance(); // '.'
        Ok(Selector::Class(self.read_identifier()?))
    }

    fn parse_tag(&mut self) -> Result<Selector, SelectorError> {
        Ok(Selector::Tag(self.read_identifier()?))
    }

    fn parse_attribute(&mut self) -> Result<Selector, SelectorError> {
        self.advance(); // '['

        let name = self.read_until_any(&['=', ']']);
        if name.is_empty() {
            return Err(SelectorError::InvalidAttribute);
        }

        let value = if self.peek_char() == Some('=') {
            self.advance();
            let quote = self.peek_char().filter(|c| *c == '\'' || *c == '"');
            if quote.is_some() {
                self.advance();
            }
            let value = self.read_until_any(&['\'', '"', ']']);
            if quote.is_some() {
                if self.peek_char() != quote {
                    return Err(SelectorError::InvalidAttribute);
                }
                self.advance();
            }
            Some(value)
        } else {
            None
        };

        if self.peek_char() != Some(']') {
            return Err(SelectorError::UnclosedAttribute);
        }
        self.advance();

        Ok(Selector::Attribute { name, value })
    }

    fn read_identifier(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        if self.pos == start {
            return Err(SelectorError::ExpectedIdentifier);
        }

        Ok(self.input[start..self.pos].to_string())
    }

    fn read_until_any(&mut self, stops: &[char]) -> String {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if stops.contains(&c) {
                break;
            }
            self.advance();
        }
        self.input[start..self.pos].to_string()
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }
}

/// Selector parsing error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// Empty selector
    #[error("empty selector")]
    Empty,
    /// Unexpected character
    #[error("unexpected character: '{0}'")]
    UnexpectedChar(char),
    /// Expected identifier
    #[error("expected identifier")]
    ExpectedIdentifier,
    /// Invalid attribute syntax
    #[error("invalid attribute syntax")]
    InvalidAttribute,
    /// Unclosed attribute bracket
    #[error("unclosed attribute bracket")]
    UnclosedAttribute,
}
