//! Standardization of street names and unit numbers against the
//! reference tables.

use addr_line_parser_models::ParseError;
use addr_line_reference::ReferenceData;

use crate::lexical::{
    is_all_digits, is_ordinal, ordinalize, short_ordinal_numeral, strip_leading_zeros,
};

/// Applies reference-table lookups to street name tokens and unit numbers.
#[derive(Debug, Clone, Copy)]
pub struct Standardizer<'a> {
    reference: &'a ReferenceData,
}

impl<'a> Standardizer<'a> {
    /// Creates a standardizer over `reference`.
    #[must_use]
    pub const fn new(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }

    /// Standardizes an ordinal street name: strips leading zeros and maps
    /// long-form ordinal words to short ordinals (`FIRST` → `1ST`).
    #[must_use]
    pub fn standardize_ordinal_street_name(&self, name: &str) -> String {
        let name = strip_leading_zeros(name);
        self.reference.long_ordinals.standardize(name).to_string()
    }

    /// Standardizes street name tokens and joins them with single spaces.
    ///
    /// A leading ordinal is normalized with
    /// [`Self::standardize_ordinal_street_name`] and a leading bare number
    /// is ordinalized (`41` → `41ST`). Every token with a known
    /// abbreviation is expanded (`MT` → `MOUNT`).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidAddress`] if `tokens` is empty.
    pub fn standardize_street_name<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> Result<String, ParseError> {
        let Some((first, rest)) = tokens.split_first() else {
            return Err(ParseError::InvalidAddress {
                reason: "missing street name",
            });
        };
        let first = first.as_ref();

        let first = if is_ordinal(first, &self.reference.long_ordinals) {
            self.standardize_ordinal_street_name(first)
        } else if is_all_digits(first) {
            ordinalize(first)?
        } else {
            first.to_string()
        };

        let abbreviations = &self.reference.abbreviations;
        let mut words = Vec::with_capacity(tokens.len());
        words.push(abbreviations.standardize(&first).to_string());
        words.extend(
            rest.iter()
                .map(|token| abbreviations.standardize(token.as_ref()).to_string()),
        );

        Ok(words.join(" "))
    }

    /// Standardizes a unit number: strips leading zeros and reduces
    /// ordinals to their numeral (`1ST` → `1`, `FIRST` → `1`).
    #[must_use]
    pub fn standardize_unit_num(&self, value: &str) -> String {
        let value = strip_leading_zeros(value);

        if let Some(numeral) = short_ordinal_numeral(value) {
            return numeral.to_string();
        }

        if let Some(short) = self.reference.long_ordinals.canonical(value) {
            return short_ordinal_numeral(short).unwrap_or(short).to_string();
        }

        value.to_string()
    }
}
