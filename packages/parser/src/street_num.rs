//! House number scanning.
//!
//! Recognizes `<alnum>[ 1/2][-<alnum>[ 1/2]]` at the start of a linted
//! address. Spaces are allowed around the range hyphen when the high end
//! starts with a digit (`"1092 - 1100 RIDGE AVE"`).

use addr_line_parser_models::{HALF, ParseError, StreetNumber};

/// Scans the house number off the front of a linted address.
///
/// Returns the number and the remainder of the address with leading
/// whitespace removed.
///
/// # Errors
///
/// Returns [`ParseError::InvalidAddress`] if the address does not start
/// with a token containing a digit, or the number runs into punctuation.
pub fn scan(linted: &str) -> Result<(StreetNumber, &str), ParseError> {
    let mut scanner = Scanner::new(linted);

    let low = scanner.word().ok_or(ParseError::InvalidAddress {
        reason: "missing house number",
    })?;
    if !low.bytes().any(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidAddress {
            reason: "missing house number",
        });
    }
    let low_fractional = scanner.fraction();
    let high = scanner.range_high();

    if !scanner.at_boundary() {
        return Err(ParseError::InvalidAddress {
            reason: "malformed house number",
        });
    }

    let number = match high {
        Some((high, high_fractional)) => StreetNumber::Range {
            low: low.to_string(),
            low_fractional,
            high: high.to_string(),
            high_fractional,
        },
        None => StreetNumber::Single {
            number: low.to_string(),
            fractional: low_fractional,
        },
    };

    log::trace!("scanned house number {number} from {linted:?}");

    Ok((number, scanner.rest().trim_start()))
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    const fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_boundary(&self) -> bool {
        let rest = self.rest();
        rest.is_empty() || rest.starts_with(' ')
    }

    fn eat(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    fn eat_spaces(&mut self) -> usize {
        let rest = self.rest();
        let len = rest.len() - rest.trim_start_matches(' ').len();
        self.pos += len;
        len
    }

    fn word(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !c.is_alphanumeric())
            .unwrap_or(rest.len());
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }

    /// Consumes `" 1/2"` when it stands alone before a space, hyphen, or
    /// the end of input.
    fn fraction(&mut self) -> Option<String> {
        let start = self.pos;
        if self.eat(" ") && self.eat(HALF) && (self.at_boundary() || self.rest().starts_with('-')) {
            return Some(HALF.to_string());
        }
        self.pos = start;
        None
    }

    /// Consumes `-<alnum>[ 1/2]` and returns the high end of a range.
    fn range_high(&mut self) -> Option<(&'a str, Option<String>)> {
        let start = self.pos;
        let spaced_before = self.eat_spaces() > 0;
        if self.eat("-") {
            let spaced = self.eat_spaces() > 0 || spaced_before;
            if let Some(high) = self.word() {
                if !spaced || high.starts_with(|c: char| c.is_ascii_digit()) {
                    return Some((high, self.fraction()));
                }
            }
        }
        self.pos = start;
        None
    }
}
