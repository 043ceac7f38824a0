//! Alias-to-canonical lookup tables.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

/// A table definition as written in the reference TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableDef {
    /// Surface form (or alias) to canonical form.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    /// Additional recognized surface forms with no canonical mapping.
    /// These pass through standardization unchanged.
    #[serde(default)]
    pub forms: Vec<String>,
    /// When set, every canonical value is also a recognized surface form
    /// that standardizes to itself.
    #[serde(default)]
    pub canonical_recognized: bool,
}

/// A set of recognized surface forms plus their canonical mappings.
///
/// Forms are stored uppercased and trimmed so lookups against linted
/// tokens match without further normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceTable {
    forms: BTreeSet<String>,
    canonical: BTreeMap<String, String>,
}

impl ReferenceTable {
    /// Builds a table from explicit recognized forms and canonical mappings.
    ///
    /// Every alias in `canonical` is recognized, whether or not it also
    /// appears in `forms`.
    #[must_use]
    pub fn new<F, K, V>(forms: F, canonical: impl IntoIterator<Item = (K, V)>) -> Self
    where
        F: IntoIterator,
        F::Item: AsRef<str>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let canonical: BTreeMap<String, String> = canonical
            .into_iter()
            .map(|(k, v)| (clean(k.as_ref()), clean(v.as_ref())))
            .collect();
        let forms = forms
            .into_iter()
            .map(|f| clean(f.as_ref()))
            .chain(canonical.keys().cloned())
            .collect();

        Self { forms, canonical }
    }

    /// Builds a table from its TOML definition.
    #[must_use]
    pub fn from_def(def: &TableDef) -> Self {
        let mut table = Self::new(&def.forms, &def.aliases);
        if def.canonical_recognized {
            let values: Vec<String> = table.canonical.values().cloned().collect();
            for value in values {
                table.forms.insert(value.clone());
                table.canonical.entry(value.clone()).or_insert(value);
            }
        }
        table
    }

    /// Returns `true` if `token` is a recognized surface form.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.forms.contains(token)
    }

    /// Returns the canonical form of `token`, if it has one.
    #[must_use]
    pub fn canonical(&self, token: &str) -> Option<&str> {
        self.canonical.get(token).map(String::as_str)
    }

    /// Returns the canonical form of `token`, or `token` itself when the
    /// table has no mapping for it.
    #[must_use]
    pub fn standardize<'a>(&'a self, token: &'a str) -> &'a str {
        self.canonical(token).unwrap_or(token)
    }

    /// Iterates over the recognized surface forms in sorted order.
    pub fn forms(&self) -> impl Iterator<Item = &str> {
        self.forms.iter().map(String::as_str)
    }

    /// Recognized forms that have no canonical mapping.
    pub fn unmapped_forms(&self) -> impl Iterator<Item = &str> {
        self.forms()
            .filter(|form| !self.canonical.contains_key(*form))
    }

    /// Number of recognized surface forms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Returns `true` if the table recognizes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

fn clean(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(aliases: &[(&str, &str)], canonical_recognized: bool) -> TableDef {
        TableDef {
            aliases: aliases
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            forms: Vec::new(),
            canonical_recognized,
        }
    }

    #[test]
    fn standardizes_known_alias() {
        let table = ReferenceTable::from_def(&def(&[("ST", "STREET")], false));
        assert!(table.contains("ST"));
        assert_eq!(table.standardize("ST"), "STREET");
    }

    #[test]
    fn passes_through_unmapped_token() {
        let table = ReferenceTable::from_def(&def(&[("ST", "STREET")], false));
        assert_eq!(table.standardize("MAIN"), "MAIN");
        assert!(table.canonical("MAIN").is_none());
    }

    #[test]
    fn canonical_values_recognized_when_enabled() {
        let table = ReferenceTable::from_def(&def(&[("ST", "STREET")], true));
        assert!(table.contains("STREET"));
        assert_eq!(table.standardize("STREET"), "STREET");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn canonical_values_not_recognized_by_default() {
        let table = ReferenceTable::from_def(&def(&[("FIRST", "1ST")], false));
        assert!(table.contains("FIRST"));
        assert!(!table.contains("1ST"));
    }

    #[test]
    fn cleans_forms_on_construction() {
        let table = ReferenceTable::new(["  rear "], [("fl", "floor")]);
        assert!(table.contains("REAR"));
        assert_eq!(table.standardize("FL"), "FLOOR");
    }

    #[test]
    fn reports_forms_without_canonical_mapping() {
        let table = ReferenceTable::new(["REAR"], [("FL", "FLOOR")]);
        assert_eq!(table.unmapped_forms().collect::<Vec<_>>(), vec!["REAR"]);
        assert_eq!(table.standardize("REAR"), "REAR");
    }
}
