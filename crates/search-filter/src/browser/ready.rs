//! Document loading state.

/// Value of `document.readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    /// Still parsing; `DOMContentLoaded` has not fired
    Loading,
    /// Parsed; subresources may still be loading
    Interactive,
    /// Fully loaded
    Complete,
}

impl ReadyState {
    /// Parse a `document.readyState` string.
    ///
    /// Unknown values count as complete so a mount is never deferred
    /// forever.
    #[must_use]
    pub fn parse(state: &str) -> Self {
        match state {
            "loading" => Self::Loading,
            "interactive" => Self::Interactive,
            _ => Self::Complete,
        }
    }

    /// Whether the markup may still be incomplete.
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }
}
