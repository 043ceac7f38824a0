//! Interactive prompt loop: parse addresses as they are typed.

use addr_line_parser::{ParsedAddress, Parser};
use dialoguer::Input;

/// Prompts for address lines until an empty line is entered, printing
/// each parse result.
///
/// # Errors
///
/// Returns an error if the terminal prompt fails.
pub fn run(parser: &Parser) -> Result<(), Box<dyn std::error::Error>> {
    println!("Address line parser (empty line to quit)");
    println!();

    loop {
        let line = Input::<String>::new()
            .with_prompt("Address")
            .allow_empty(true)
            .interact_text()?;

        if line.trim().is_empty() {
            return Ok(());
        }

        match parser.parse(&line) {
            Ok(parsed) => print_parsed(&parsed),
            Err(e) => println!("  error: {e}"),
        }
        println!();
    }
}

fn print_parsed(parsed: &ParsedAddress) {
    const LABELS: [&str; 6] = [
        "street_num",
        "predir",
        "street_name",
        "suffix",
        "postdir",
        "unit",
    ];

    println!("  {}", parsed.full_addr);
    for (label, value) in LABELS.iter().zip(parsed.components()) {
        if let Some(value) = value {
            println!("    {label:<12} {value}");
        }
    }
}
