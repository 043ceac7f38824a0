//! Reassembly of standardized components into a canonical address line.

use addr_line_parser_models::{Directional, ParsedAddress, StreetNumber, Suffix, Unit};

/// Standardized components awaiting reassembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressParts {
    /// House number or range.
    pub street_num: StreetNumber,
    /// Predirectional.
    pub predir: Option<Directional>,
    /// Standardized street name.
    pub street_name: String,
    /// Street suffix.
    pub suffix: Option<Suffix>,
    /// Postdirectional.
    pub postdir: Option<Directional>,
    /// Unit.
    pub unit: Option<Unit>,
}

impl AddressParts {
    /// Builds the final [`ParsedAddress`], filling in `full_addr`.
    #[must_use]
    pub fn assemble(self) -> ParsedAddress {
        let mut parsed = ParsedAddress {
            full_addr: String::new(),
            street_num: self.street_num,
            predir: self.predir,
            street_name: self.street_name,
            suffix: self.suffix,
            postdir: self.postdir,
            unit: self.unit,
        };
        parsed.full_addr = full_address(&parsed.components());
        parsed
    }
}

/// Joins the present, non-empty components with single spaces.
#[must_use]
pub fn full_address(components: &[Option<String>]) -> String {
    components
        .iter()
        .flatten()
        .map(String::as_str)
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use addr_line_parser_models::UnitType;

    #[test]
    fn joins_components_in_order() {
        let parsed = AddressParts {
            street_num: StreetNumber::Single {
                number: "100".to_string(),
                fractional: None,
            },
            predir: Some(Directional::from_canonical("N")),
            street_name: "MAIN".to_string(),
            suffix: Some(Suffix::from_canonical("STREET")),
            postdir: Some(Directional::from_canonical("W")),
            unit: Some(Unit {
                unit_type: UnitType::from_canonical("FLOOR"),
                number: Some("2".to_string()),
            }),
        }
        .assemble();

        assert_eq!(parsed.full_addr, "100 N MAIN STREET W FLOOR 2");
    }

    #[test]
    fn skips_absent_components() {
        assert_eq!(
            full_address(&[
                Some("100".to_string()),
                None,
                Some("BROADWAY".to_string()),
                None,
                Some(String::new()),
                None,
            ]),
            "100 BROADWAY"
        );
    }
}
