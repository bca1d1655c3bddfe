//! Case-insensitive identifiers.
//!
//! Papyrus identifiers compare without regard to case. A [`Name`] keeps the
//! spelling the author wrote for display and a folded key for lookups.

use std::fmt;

/// Fold an identifier to its lookup key.
pub fn normalize(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// An identifier with its display spelling and normalized key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name {
    display: String,
    normalized: String,
}

impl Name {
    pub fn new(display: impl Into<String>) -> Self {
        let display = display.into();
        let normalized = normalize(&display);
        Self {
            display,
            normalized,
        }
    }

    /// The empty name, used by each script's implicit state.
    pub fn empty() -> Self {
        Self::new(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.display
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn is_empty(&self) -> bool {
        self.display.is_empty()
    }

    /// Case-insensitive comparison against a raw identifier.
    pub fn matches(&self, other: &str) -> bool {
        self.display.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
