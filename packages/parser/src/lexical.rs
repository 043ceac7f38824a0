//! Token-level helpers: linting, ordinal detection, numeric classification.

use std::sync::LazyLock;

use addr_line_parser_models::ParseError;
use addr_line_reference::ReferenceTable;
use regex::Regex;

/// Punctuation dropped entirely during linting.
static PUNCTUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.,]+").expect("valid regex"));

const ORDINAL_SUFFIXES: [&str; 4] = ["TH", "ST", "ND", "RD"];

/// Normalizes raw address text for parsing.
///
/// Strips periods and commas, collapses whitespace runs to single spaces,
/// trims, and uppercases. Total over any input, including the empty string.
#[must_use]
pub fn lint(address: &str) -> String {
    let no_punct = PUNCTUATION_RE.replace_all(address, "");
    no_punct
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Returns `true` for a non-empty string of ASCII digits.
#[must_use]
pub fn is_all_digits(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Splits a short ordinal like `"41ST"` into its numeral (`"41"`).
///
/// Any digit string followed by `TH`, `ST`, `ND` or `RD` qualifies; the
/// suffix is not checked against the number.
#[must_use]
pub fn short_ordinal_numeral(token: &str) -> Option<&str> {
    let split = token.len().checked_sub(2)?;
    if !token.is_char_boundary(split) {
        return None;
    }
    let (numeral, suffix) = token.split_at(split);
    (is_all_digits(numeral) && ORDINAL_SUFFIXES.contains(&suffix)).then_some(numeral)
}

/// Returns `true` for a short ordinal (`"41ST"`) or a recognized long
/// ordinal word (`"FIRST"`).
#[must_use]
pub fn is_ordinal(token: &str, long_ordinals: &ReferenceTable) -> bool {
    short_ordinal_numeral(token).is_some() || long_ordinals.contains(token)
}

/// Returns `true` for an ordinal or an all-digit token.
#[must_use]
pub fn is_numeric(token: &str, long_ordinals: &ReferenceTable) -> bool {
    is_ordinal(token, long_ordinals) || is_all_digits(token)
}

/// Appends the English ordinal suffix to a digit string.
///
/// Numbers ending in 11, 12 or 13 take `TH`; otherwise the last digit
/// decides (`1` → `ST`, `2` → `ND`, `3` → `RD`, else `TH`).
///
/// # Errors
///
/// Returns [`ParseError::MalformedNumeral`] if `digits` is not all digits.
pub fn ordinalize(digits: &str) -> Result<String, ParseError> {
    if !is_all_digits(digits) {
        return Err(ParseError::MalformedNumeral {
            value: digits.to_string(),
        });
    }

    let bytes = digits.as_bytes();
    let last = bytes[bytes.len() - 1];
    let tens = bytes.len().checked_sub(2).map(|i| bytes[i]);

    let suffix = match (tens, last) {
        (Some(b'1'), _) => "TH",
        (_, b'1') => "ST",
        (_, b'2') => "ND",
        (_, b'3') => "RD",
        _ => "TH",
    };

    Ok(format!("{digits}{suffix}"))
}

/// Removes leading zeros from a token.
///
/// Every leading zero goes (`"0B"` → `"B"`) unless the token is all zeros,
/// in which case a single `"0"` is kept.
#[must_use]
pub fn strip_leading_zeros(token: &str) -> &str {
    let stripped = token.trim_start_matches('0');
    if stripped.is_empty() && !token.is_empty() {
        &token[token.len() - 1..]
    } else {
        stripped
    }
}
