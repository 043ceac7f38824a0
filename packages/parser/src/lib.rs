#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Parser and standardizer for US street address lines.
//!
//! Turns a free-form "line 1" (`"100 n. main st., fl 2"`) into components
//! and a canonical string (`"100 N MAIN STREET FLOOR 2"`).
//!
//! # Pipeline
//!
//! 1. **Lint**: strip periods and commas, collapse whitespace, uppercase.
//! 2. **Classify**: intersections and PO boxes are rejected.
//! 3. **House number**: scanned off the front, including ranges and `1/2`.
//! 4. **Segment**: predirectional, unit, postdirectional, and suffix are
//!    taken in that order; what remains is the street name.
//! 5. **Standardize**: each field is mapped to its canonical form.
//! 6. **Assemble**: components are joined into `full_addr`.
//!
//! # Usage
//!
//! ```rust
//! use addr_line_parser::Parser;
//!
//! let parser = Parser::default();
//! let parsed = parser.parse("100 n. main st., fl 2")?;
//! assert_eq!(parsed.full_addr, "100 N MAIN STREET FLOOR 2");
//! # Ok::<(), addr_line_parser::ParseError>(())
//! ```

pub mod assemble;
pub mod kind;
pub mod lexical;
pub mod pipeline;
pub mod standardize;
pub mod street_num;

use std::sync::Arc;

pub use addr_line_parser_models::{
    AddressKind, Directional, ParseError, ParsedAddress, StreetNumber, Suffix, Unit, UnitType,
};
pub use addr_line_reference::ReferenceData;

use assemble::AddressParts;
use standardize::Standardizer;

/// Parses address lines against a fixed set of reference tables.
///
/// Cheap to clone and safe to share between threads: the tables sit
/// behind an [`Arc`] and are never mutated.
#[derive(Debug, Clone)]
pub struct Parser {
    reference: Arc<ReferenceData>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(ReferenceData::embedded())
    }
}

impl Parser {
    /// Creates a parser over `reference`.
    #[must_use]
    pub const fn new(reference: Arc<ReferenceData>) -> Self {
        Self { reference }
    }

    /// The reference tables this parser uses.
    #[must_use]
    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// A standardizer over this parser's reference tables.
    #[must_use]
    pub fn standardizer(&self) -> Standardizer<'_> {
        Standardizer::new(&self.reference)
    }

    /// Returns `true` for a short (`41ST`) or long (`FIRST`) ordinal.
    #[must_use]
    pub fn is_ordinal(&self, token: &str) -> bool {
        lexical::is_ordinal(token, &self.reference.long_ordinals)
    }

    /// Returns `true` for an ordinal or an all-digit token.
    #[must_use]
    pub fn is_numeric(&self, token: &str) -> bool {
        lexical::is_numeric(token, &self.reference.long_ordinals)
    }

    /// Parses an address line into standardized components.
    ///
    /// # Errors
    ///
    /// * [`ParseError::Unsupported`] for intersections and PO boxes.
    /// * [`ParseError::InvalidAddress`] for empty input, a missing house
    ///   number, or too few tokens to hold a street name.
    pub fn parse(&self, input: &str) -> Result<ParsedAddress, ParseError> {
        let linted = lexical::lint(input);
        if linted.is_empty() {
            return Err(ParseError::InvalidAddress {
                reason: "empty address",
            });
        }

        match kind::detect(&linted) {
            AddressKind::Street => {}
            kind => return Err(ParseError::Unsupported { kind }),
        }

        let (street_num, remainder) = street_num::scan(&linted)?;
        let segments = pipeline::segment(&self.reference, remainder)?;

        let standardizer = self.standardizer();
        let street_name = standardizer.standardize_street_name(&segments.street_name)?;
        let unit = segments.unit.map(|unit| Unit {
            unit_type: unit.unit_type,
            number: unit
                .number
                .map(|number| standardizer.standardize_unit_num(number)),
        });

        let parsed = AddressParts {
            street_num,
            predir: segments.predir,
            street_name,
            suffix: segments.suffix,
            postdir: segments.postdir,
            unit,
        }
        .assemble();

        log::debug!("parsed {input:?} as {:?}", parsed.full_addr);

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_with(parser: &Parser, input: &str) -> ParsedAddress {
        parser
            .parse(input)
            .unwrap_or_else(|e| panic!("{input:?}: {e}"))
    }

    fn parse(input: &str) -> ParsedAddress {
        parse_with(&Parser::default(), input)
    }

    #[test]
    fn parses_simple_address() {
        let parsed = parse("1234 Market St.");
        assert_eq!(parsed.full_addr, "1234 MARKET STREET");
        assert_eq!(parsed.street_name, "MARKET");
        assert_eq!(parsed.suffix.unwrap().as_str(), "STREET");
        assert!(parsed.predir.is_none());
        assert!(parsed.unit.is_none());
    }

    #[test]
    fn parses_directionals() {
        let parsed = parse("101 s independence mall e");
        assert_eq!(parsed.predir.as_ref().unwrap().as_str(), "S");
        assert_eq!(parsed.street_name, "INDEPENDENCE MALL");
        assert_eq!(parsed.suffix, None);
        assert_eq!(parsed.postdir.as_ref().unwrap().as_str(), "E");
        assert_eq!(parsed.full_addr, "101 S INDEPENDENCE MALL E");
    }

    #[test]
    fn parses_ordinal_street_with_suffix_name() {
        let parsed = parse("100 41ST ST DR");
        assert_eq!(parsed.street_name, "41ST ST");
        assert_eq!(parsed.suffix.unwrap().as_str(), "DRIVE");
    }

    #[test]
    fn parses_long_ordinal_street_name() {
        let parsed = parse("200 first ave");
        assert_eq!(parsed.street_name, "1ST");
        assert_eq!(parsed.full_addr, "200 1ST AVENUE");
    }

    #[test]
    fn parses_unit_with_long_ordinal_number() {
        let parsed = parse("1500 Market St Second Floor");
        assert_eq!(parsed.unit.unwrap().to_string(), "FLOOR 2");
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(
            Parser::default().parse("  ,. "),
            Err(ParseError::InvalidAddress {
                reason: "empty address"
            })
        );
    }

    #[test]
    fn rejects_intersections_and_po_boxes() {
        let parser = Parser::default();
        assert_eq!(
            parser.parse("Broad St & Market St"),
            Err(ParseError::Unsupported {
                kind: AddressKind::Intersection
            })
        );
        assert_eq!(
            parser.parse("P.O. Box 123"),
            Err(ParseError::Unsupported {
                kind: AddressKind::PoBox
            })
        );
    }

    #[test]
    fn exposes_numeric_helpers() {
        let parser = Parser::default();
        assert!(parser.is_ordinal("FIRST"));
        assert!(parser.is_numeric("12"));
        assert!(!parser.is_numeric("MAIN"));
    }

    const SAMPLES: &[&str] = &[
        "1234 Market St",
        "100 N Broad St Apt 2",
        "100-102 Main St",
        "1092 - 1100 Ridge Ave",
        "100 1/2 S 41st St",
        "100 1/2-102 1/2 Pine St Rear",
        "5 W 41 St #18",
        "1500 Market St Second Fl",
        "1500 Market St 2nd Floor",
        "2401 Pennsylvania Ave NW Ste 4",
        "300 Mt Vernon Pl",
        "123 Main St FL 2",
        "7 Spring Garden",
        "4000 Spruce St, Rear",
    ];

    #[test]
    fn every_directional_and_suffix_form_segments() {
        let parser = Parser::default();
        let reference = parser.reference();

        for directional in reference.directionals.forms() {
            for suffix in reference.suffixes.forms() {
                let input = format!("100 {directional} MAIN {suffix}");
                let parsed = parse_with(&parser, &input);

                assert_eq!(parsed.predir, reference.directional(directional), "{input}");
                assert_eq!(parsed.suffix, reference.suffix(suffix), "{input}");
                assert_eq!(parsed.street_name, "MAIN", "{input}");
                assert_eq!(parsed.street_num.to_string(), "100", "{input}");
                assert_eq!(parsed.postdir, None, "{input}");
                assert_eq!(parsed.unit, None, "{input}");
            }
        }
    }

    #[test]
    fn full_addr_reparses_to_same_components() {
        let parser = Parser::default();

        for input in SAMPLES {
            let first = parse_with(&parser, input);
            let second = parse_with(&parser, &first.full_addr);
            assert_eq!(first, second, "{input}");
        }
    }

    #[test]
    fn full_addr_joins_components_in_order() {
        let parser = Parser::default();

        for input in SAMPLES {
            let parsed = parse_with(&parser, input);
            let joined = parsed
                .components()
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
            assert_eq!(parsed.full_addr, joined, "{input}");
        }
    }

    #[test]
    fn ordinal_street_names() {
        let parser = Parser::default();

        let parsed = parse_with(&parser, "100 41ST ST");
        assert_eq!(parsed.street_name, "41ST");
        assert_eq!(parsed.suffix.unwrap().as_str(), "STREET");

        let parsed = parse_with(&parser, "100 41 ST");
        assert_eq!(parsed.street_name, "41ST");
        assert_eq!(parsed.suffix.unwrap().as_str(), "STREET");

        assert_eq!(parse_with(&parser, "100 12 ST").street_name, "12TH");
        assert_eq!(parse_with(&parser, "100 041ST ST").street_name, "41ST");
    }

    #[test]
    fn unit_forms() {
        let parser = Parser::default();

        assert_eq!(
            parse_with(&parser, "123 MAIN ST FL 2").unit.unwrap().to_string(),
            "FLOOR 2"
        );
        assert_eq!(
            parse_with(&parser, "123 MAIN ST REAR").unit.unwrap().to_string(),
            "REAR"
        );

        let parsed = parse_with(&parser, "123 MAIN ST #18");
        let unit = parsed.unit.as_ref().unwrap();
        assert_eq!(unit.unit_type.as_str(), "#");
        assert_eq!(unit.number.as_deref(), Some("18"));
        assert_eq!(parsed.full_addr, "123 MAIN STREET # 18");

        assert_eq!(
            parse_with(&parser, "123 MAIN ST 3RD FL").unit.unwrap().to_string(),
            "FLOOR 3"
        );
    }

    #[test]
    fn range_house_numbers() {
        let parser = Parser::default();

        assert_eq!(
            parse_with(&parser, "100-102 MAIN ST").street_num,
            StreetNumber::Range {
                low: "100".to_string(),
                low_fractional: None,
                high: "102".to_string(),
                high_fractional: None,
            }
        );
        assert_eq!(
            parse_with(&parser, "1092 - 1100 RIDGE AVE").full_addr,
            "1092-1100 RIDGE AVENUE"
        );
    }

    #[test]
    fn protected_suffix_name_is_not_decomposed() {
        let reference = ReferenceData::from_toml_str(
            r#"
            [directionals]
            canonical_recognized = true
            aliases = { EAST = "E", SOUTH = "S" }

            [suffixes]
            canonical_recognized = true
            aliases = { MALL = "MALL", ST = "STREET" }

            [protected]
            names_with_suffix = ["INDEPENDENCE MALL"]
            "#,
        )
        .unwrap();
        let parser = Parser::new(Arc::new(reference));

        let parsed = parse_with(&parser, "100 INDEPENDENCE MALL");
        assert_eq!(parsed.street_name, "INDEPENDENCE MALL");
        assert_eq!(parsed.suffix, None);

        let parsed = parse_with(&parser, "100 S INDEPENDENCE MALL E");
        assert_eq!(parsed.street_name, "INDEPENDENCE MALL");
        assert_eq!(parsed.suffix, None);
        assert_eq!(parsed.postdir.unwrap().as_str(), "E");

        let parsed = parse_with(&parser, "100 SHOPPING MALL");
        assert_eq!(parsed.street_name, "SHOPPING");
        assert_eq!(parsed.suffix.unwrap().as_str(), "MALL");
    }

    #[test]
    fn short_inputs_are_invalid_not_panics() {
        let parser = Parser::default();

        for input in ["", "100", "100 N", "100 #18", "100 ST", "MAIN ST"] {
            assert!(
                matches!(parser.parse(input), Err(ParseError::InvalidAddress { .. })),
                "{input:?}"
            );
        }
    }

    #[test]
    fn parses_concurrently_with_shared_parser() {
        let parser = Parser::default();
        let expected: Vec<ParsedAddress> = SAMPLES.iter().map(|s| parse_with(&parser, s)).collect();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for (input, expected) in SAMPLES.iter().zip(&expected) {
                        assert_eq!(&parse_with(&parser, input), expected);
                    }
                });
            }
        });
    }

    #[test]
    fn serializes_to_json() {
        let parsed = parse_with(&Parser::default(), "100-102 N Main St Apt 2");
        let json = serde_json::to_value(&parsed).unwrap();

        assert_eq!(json["full_addr"], "100-102 N MAIN STREET APARTMENT 2");
        assert_eq!(json["street_num"]["type"], "range");
        assert_eq!(json["predir"], "N");
        assert_eq!(json["unit"]["unit_type"], "APARTMENT");
    }

    #[test]
    fn unit_type_words_parse_as_street_names() {
        let parser = Parser::default();

        for input in ["100 FRONT ST", "100 N FRONT ST", "200 S SIDE AVE", "5 LOT ST"] {
            let parsed = parse_with(&parser, input);
            assert_eq!(parsed.unit, None, "{input}");
            assert!(parsed.suffix.is_some(), "{input}");
        }

        let parsed = parse_with(&parser, "100 N FRONT ST");
        assert_eq!(parsed.street_name, "FRONT");
        assert_eq!(parsed.predir.unwrap().as_str(), "N");
        assert_eq!(parsed.full_addr, "100 N FRONT STREET");

        let parsed = parse_with(&parser, "100 FRONT ST FL 2");
        assert_eq!(parsed.street_name, "FRONT");
        assert_eq!(parsed.full_addr, "100 FRONT STREET FLOOR 2");
    }

    #[test]
    fn every_unit_type_form_can_be_a_street_name() {
        let parser = Parser::default();

        for form in parser.reference().unit_types.forms() {
            let input = format!("100 {form} ST");
            let parsed = parse_with(&parser, &input);
            assert_eq!(parsed.street_name, form, "{input}");
            assert_eq!(parsed.suffix.unwrap().as_str(), "STREET", "{input}");
            assert_eq!(parsed.unit, None, "{input}");
        }
    }

    #[test]
    fn every_suffix_form_can_be_a_street_name() {
        let parser = Parser::default();
        let reference = parser.reference();

        for form in reference.suffixes.forms() {
            let input = format!("100 {form} ST");
            let parsed = parse_with(&parser, &input);
            assert_eq!(
                parsed.street_name,
                reference.abbreviations.standardize(form),
                "{input}"
            );
            assert_eq!(parsed.suffix.unwrap().as_str(), "STREET", "{input}");
        }
    }

    #[test]
    fn unit_type_followed_by_unit_type_word() {
        let parsed = parse("1132 BIG ST REAR OFFICE");
        assert_eq!(parsed.street_name, "BIG");
        assert_eq!(parsed.suffix.unwrap().as_str(), "STREET");
        let unit = parsed.unit.unwrap();
        assert_eq!(unit.unit_type.as_str(), "REAR");
        assert_eq!(unit.number.as_deref(), Some("OFFICE"));
    }

    #[test]
    fn directional_word_as_street_name() {
        let parsed = parse("1 SOUTH ST");
        assert_eq!(parsed.predir, None);
        assert_eq!(parsed.street_name, "SOUTH");

        let parsed = parse("1 EAST SOUTH ST");
        assert_eq!(parsed.predir.unwrap().as_str(), "E");
        assert_eq!(parsed.street_name, "SOUTH");
        assert_eq!(parsed.full_addr, "1 E SOUTH STREET");
    }

    #[test]
    fn unit_number_loses_every_leading_zero() {
        let parsed = parse("12 MAIN ST APT 0B");
        assert_eq!(parsed.full_addr, "12 MAIN STREET APARTMENT B");
    }

    #[test]
    fn postdirectional_is_standardized() {
        let parsed = parse("100 MAIN ST EAST");
        assert_eq!(parsed.postdir.unwrap().as_str(), "E");
        assert_eq!(parsed.full_addr, "100 MAIN STREET E");
    }
}
