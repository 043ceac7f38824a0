//! Segmentation of the tokens that follow the house number.
//!
//! Fields are taken in a fixed order from a token sequence that shrinks
//! from both ends: predirectional (front), unit (back), postdirectional
//! (back), suffix (back). Whatever remains is the street name. The only
//! corrective step is handing a predirectional back to the street name
//! when it turns out to be part of it.

use std::collections::VecDeque;

use addr_line_parser_models::{Directional, ParseError, Suffix, UnitType};
use addr_line_reference::ReferenceData;

use crate::lexical::is_numeric;

/// A unit as found in the input, before its number is standardized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUnit<'a> {
    /// Canonical unit type.
    pub unit_type: UnitType,
    /// Unit number exactly as it appeared.
    pub number: Option<&'a str>,
}

/// The fields of an address line after segmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segments<'a> {
    /// Predirectional, unless it was handed back to the street name.
    pub predir: Option<Directional>,
    /// Street name tokens in input order. Never empty.
    pub street_name: Vec<&'a str>,
    /// Street suffix.
    pub suffix: Option<Suffix>,
    /// Postdirectional.
    pub postdir: Option<Directional>,
    /// Unit.
    pub unit: Option<RawUnit<'a>>,
}

type Tokens<'a> = VecDeque<&'a str>;

const fn invalid(reason: &'static str) -> ParseError {
    ParseError::InvalidAddress { reason }
}

/// Segments the linted address text that follows the house number.
///
/// # Errors
///
/// Returns [`ParseError::InvalidAddress`] when a step needs a token and
/// none remain, e.g. `"100"`, `"100 N"`, or `"100 #18"`.
pub fn segment<'a>(
    reference: &ReferenceData,
    remainder: &'a str,
) -> Result<Segments<'a>, ParseError> {
    let mut tokens: Tokens<'a> = remainder.split_whitespace().collect();

    let predir = take_predir(reference, &mut tokens)?;
    let unit = take_unit(reference, &mut tokens)?;
    let postdir = take_postdir(reference, &mut tokens)?;
    let suffix = take_suffix(reference, &mut tokens)?;
    let predir = reconcile_predir(reference, predir, &mut tokens);

    if tokens.is_empty() {
        return Err(invalid("missing street name"));
    }

    Ok(Segments {
        predir,
        street_name: tokens.into(),
        suffix,
        postdir,
        unit,
    })
}

/// Takes a leading directional. The surface form is kept so it can be
/// handed back to the street name later.
fn take_predir<'a>(
    reference: &ReferenceData,
    tokens: &mut Tokens<'a>,
) -> Result<Option<(&'a str, Directional)>, ParseError> {
    let Some(&candidate) = tokens.front() else {
        return Err(invalid("nothing after house number"));
    };
    let Some(directional) = reference.directional(candidate) else {
        return Ok(None);
    };

    tokens.pop_front();
    log::debug!("predirectional candidate {candidate:?}");
    Ok(Some((candidate, directional)))
}

/// Takes a trailing unit, checking in order: `#18`, `FL 2`, `REAR` /
/// `2ND FL` / `SECOND FL`.
///
/// Only `#18` may consume the last remaining token. The other forms are
/// skipped when they would leave nothing for the street name, so
/// `FRONT ST` and `SIDE AVE` stay street names.
fn take_unit<'a>(
    reference: &ReferenceData,
    tokens: &mut Tokens<'a>,
) -> Result<Option<RawUnit<'a>>, ParseError> {
    let Some(&last) = tokens.back() else {
        return Err(invalid("nothing after predirectional"));
    };

    if let Some(number) = last.strip_prefix('#') {
        tokens.pop_back();
        log::debug!("unit from {last:?}");
        return Ok(Some(RawUnit {
            unit_type: UnitType::from_canonical(reference.unit_types.standardize("#")),
            number: (!number.is_empty()).then_some(number),
        }));
    }

    if tokens.len() > 2 {
        let second_to_last = tokens[tokens.len() - 2];
        if let Some(unit_type) = reference.unit_type(second_to_last) {
            tokens.truncate(tokens.len() - 2);
            log::debug!("unit {unit_type} {last:?}");
            return Ok(Some(RawUnit {
                unit_type,
                number: Some(last),
            }));
        }
    }

    if tokens.len() > 1
        && let Some(unit_type) = reference.unit_type(last)
    {
        tokens.pop_back();
        let leaves_name = tokens.len() > 1;
        let number = tokens
            .back()
            .copied()
            .filter(|prev| leaves_name && is_numeric(prev, &reference.long_ordinals));
        if number.is_some() {
            tokens.pop_back();
        }
        log::debug!("unit {unit_type} with preceding number {number:?}");
        return Ok(Some(RawUnit { unit_type, number }));
    }

    Ok(None)
}

fn take_postdir(
    reference: &ReferenceData,
    tokens: &mut Tokens<'_>,
) -> Result<Option<Directional>, ParseError> {
    let Some(&last) = tokens.back() else {
        return Err(invalid("nothing before unit"));
    };
    let postdir = reference.directional(last);
    if postdir.is_some() {
        tokens.pop_back();
    }
    Ok(postdir)
}

/// Takes a trailing suffix unless the remaining tokens form a protected
/// name such as `INDEPENDENCE MALL`.
fn take_suffix(
    reference: &ReferenceData,
    tokens: &mut Tokens<'_>,
) -> Result<Option<Suffix>, ParseError> {
    let Some(&last) = tokens.back() else {
        return Err(invalid("nothing before postdirectional"));
    };
    if reference
        .names_with_suffix
        .contains_tokens(tokens.make_contiguous())
    {
        log::debug!("protected name keeps suffix {last:?}");
        return Ok(None);
    }
    let suffix = reference.suffix(last);
    if suffix.is_some() {
        tokens.pop_back();
    }
    Ok(suffix)
}

/// Hands the predirectional back to the street name when nothing else is
/// left (`1 SOUTH ST`) or when together they form a protected name.
fn reconcile_predir<'a>(
    reference: &ReferenceData,
    predir: Option<(&'a str, Directional)>,
    tokens: &mut Tokens<'a>,
) -> Option<Directional> {
    let (candidate, directional) = predir?;

    tokens.push_front(candidate);
    if tokens.len() == 1
        || reference
            .names_with_directional
            .contains_tokens(tokens.make_contiguous())
    {
        log::debug!("predirectional {candidate:?} belongs to the street name");
        return None;
    }

    tokens.pop_front();
    Some(directional)
}
