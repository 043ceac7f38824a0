//! Whole street names that must not be decomposed.

use std::collections::BTreeSet;

/// A set of space-joined street names.
///
/// Used as a negative guard by the parser: when the tokens under
/// consideration form one of these names, the structural-looking token
/// stays part of the street name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtectedNameSet {
    names: BTreeSet<String>,
}

impl ProtectedNameSet {
    /// Builds a set, normalizing each name to uppercase with single spaces.
    #[must_use]
    pub fn new(names: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self {
            names: names
                .into_iter()
                .map(|name| {
                    name.as_ref()
                        .split_whitespace()
                        .collect::<Vec<_>>()
                        .join(" ")
                        .to_uppercase()
                })
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    /// Returns `true` if `name` is protected.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns `true` if the space-joined `tokens` form a protected name.
    #[must_use]
    pub fn contains_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> bool {
        if tokens.is_empty() || self.names.is_empty() {
            return false;
        }
        let joined = tokens
            .iter()
            .map(|token| token.as_ref())
            .collect::<Vec<&str>>()
            .join(" ");
        self.contains(&joined)
    }

    /// Iterates over the protected names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of protected names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if nothing is protected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
