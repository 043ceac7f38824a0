//! Address kind detection.
//!
//! Address lines come in three shapes:
//! - Street addresses: `"100 N STATE ST"`
//! - Intersections: `"1ST ST / MAIN AVE"`, `"BROAD & MARKET"`
//! - PO boxes: `"PO BOX 123"`
//!
//! Only street addresses are segmented. The other two are recognized so
//! callers get a specific error instead of garbage components.

use std::sync::LazyLock;

use addr_line_parser_models::{AddressKind, HALF};
use regex::Regex;

/// PO box prefixes after linting (periods already stripped, so `P.O.`
/// arrives as `PO` and `P. O.` as `P O`).
static PO_BOX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:P ?O ?BOX|POB|POST OFFICE BOX)\b").expect("valid regex"));

/// Tokens that join two street names.
const INTERSECTION_TOKENS: &[&str] = &["&", "AND", "AT", "+", "@"];

/// Classifies a linted address line.
#[must_use]
pub fn detect(linted: &str) -> AddressKind {
    if PO_BOX_RE.is_match(linted) {
        return AddressKind::PoBox;
    }

    let joins_streets = linted.split(' ').any(|token| {
        INTERSECTION_TOKENS.contains(&token)
            || token.contains(['&', '+', '@'])
            || token.replace(HALF, "").contains('/')
    });
    if joins_streets {
        return AddressKind::Intersection;
    }

    AddressKind::Street
}
