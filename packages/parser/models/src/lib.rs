#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared types for the US street address line parser.
//!
//! This crate contains only value types and the parse error taxonomy. It
//! has no reference data and no parsing logic, so downstream consumers
//! (CSV reports, JSON output) can depend on it without pulling in the
//! parser itself.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The literal fractional token accepted after a house number.
pub const HALF: &str = "1/2";

/// A house number, either a single value or a hyphenated range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreetNumber {
    /// A single number or alphanumeric token (`"100"`, `"100A"`,
    /// `"100 1/2"`).
    Single {
        /// The number token.
        number: String,
        /// `"1/2"` when the number carries a fractional part.
        fractional: Option<String>,
    },
    /// A range such as `"100-102"`.
    Range {
        /// Low end of the range.
        low: String,
        /// `"1/2"` when the low end carries a fractional part.
        low_fractional: Option<String>,
        /// High end of the range.
        high: String,
        /// `"1/2"` when the high end carries a fractional part.
        high_fractional: Option<String>,
    },
}

impl StreetNumber {
    /// Returns `true` for a hyphenated range.
    #[must_use]
    pub const fn is_range(&self) -> bool {
        matches!(self, Self::Range { .. })
    }
}

impl fmt::Display for StreetNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn part(f: &mut fmt::Formatter<'_>, num: &str, frac: Option<&String>) -> fmt::Result {
            f.write_str(num)?;
            if let Some(frac) = frac {
                write!(f, " {frac}")?;
            }
            Ok(())
        }

        match self {
            Self::Single { number, fractional } => part(f, number, fractional.as_ref()),
            Self::Range {
                low,
                low_fractional,
                high,
                high_fractional,
            } => {
                part(f, low, low_fractional.as_ref())?;
                f.write_str("-")?;
                part(f, high, high_fractional.as_ref())
            }
        }
    }
}

macro_rules! canonical_value {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a canonical form taken from a reference table.
            #[must_use]
            pub fn from_canonical(canonical: impl Into<String>) -> Self {
                Self(canonical.into())
            }

            /// The canonical form.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

canonical_value!(
    /// A compass directional confirmed against the directionals table
    /// (e.g. `"N"`, `"SW"`).
    Directional
);

canonical_value!(
    /// A street type confirmed against the suffixes table (e.g.
    /// `"STREET"`, `"AVENUE"`).
    Suffix
);

canonical_value!(
    /// A sub-address designator confirmed against the unit types table
    /// (e.g. `"FLOOR"`, `"#"`).
    UnitType
);

/// A sub-address: a unit type plus an optional number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Canonical unit type.
    pub unit_type: UnitType,
    /// Standardized unit number, absent for bare designators like `REAR`.
    pub number: Option<String>,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.number {
            Some(number) => write!(f, "{} {number}", self.unit_type),
            None => write!(f, "{}", self.unit_type),
        }
    }
}

/// The componentized, standardized form of an address line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAddress {
    /// Canonical reassembled address line.
    pub full_addr: String,
    /// House number or range.
    pub street_num: StreetNumber,
    /// Directional before the street name.
    pub predir: Option<Directional>,
    /// Standardized street name.
    pub street_name: String,
    /// Street type.
    pub suffix: Option<Suffix>,
    /// Directional after the street name.
    pub postdir: Option<Directional>,
    /// Sub-address.
    pub unit: Option<Unit>,
}

impl ParsedAddress {
    /// Renders each component in reassembly order: street number,
    /// predirectional, street name, suffix, postdirectional, unit.
    #[must_use]
    pub fn components(&self) -> [Option<String>; 6] {
        [
            Some(self.street_num.to_string()),
            self.predir.as_ref().map(ToString::to_string),
            Some(self.street_name.clone()),
            self.suffix.as_ref().map(ToString::to_string),
            self.postdir.as_ref().map(ToString::to_string),
            self.unit.as_ref().map(ToString::to_string),
        ]
    }
}

/// Structural classification of an address line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AddressKind {
    /// A house-numbered street address.
    Street,
    /// Two streets joined by `&`, `AND`, `AT`, `/` and similar.
    Intersection,
    /// A post office box.
    PoBox,
}

/// Errors from parsing an address line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input cannot be segmented into a street address.
    #[error("Invalid address: {reason}")]
    InvalidAddress {
        /// Which part of the address was missing or malformed.
        reason: &'static str,
    },

    /// The input was recognized as a kind of address that is not parsed.
    #[error("Unsupported address kind: {kind}")]
    Unsupported {
        /// The detected kind.
        kind: AddressKind,
    },

    /// An ordinal was requested for a value that is not a digit string.
    #[error("Cannot ordinalize {value:?}: not a digit string")]
    MalformedNumeral {
        /// The offending value.
        value: String,
    },
}
