//! Batch parsing of a CSV file of address lines into a CSV report.
//!
//! Each input row produces exactly one output row: the parsed components
//! on success, or the error message on failure.

use std::io::{Read, Write};
use std::path::Path;

use addr_line_cli_utils::ProgressCallback;
use addr_line_parser::{ParsedAddress, Parser};
use serde::Serialize;

/// Errors from batch parsing.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// CSV read or write error.
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// File being read or written.
        path: String,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// I/O error flushing the output.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File being written.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The requested column is not in the header row.
    #[error("column {column:?} not found in {path}")]
    ColumnNotFound {
        /// Requested column name.
        column: String,
        /// Input file.
        path: String,
    },
}

/// Where to read addresses from and write results to.
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions<'a> {
    /// Input CSV file.
    pub input: &'a Path,
    /// Output CSV file. Standard output when `None`.
    pub output: Option<&'a Path>,
    /// Column holding the address. The first column when `None`.
    pub column: Option<&'a str>,
    /// Whether the input starts with a header row.
    pub has_headers: bool,
}

/// Counts from a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Rows that parsed.
    pub parsed: u64,
    /// Rows that failed to parse.
    pub failed: u64,
}

impl BatchSummary {
    /// Total rows processed.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.parsed + self.failed
    }
}

/// One row of the output report.
#[derive(Debug, Default, Serialize)]
struct BatchRow {
    input: String,
    full_addr: Option<String>,
    street_num: Option<String>,
    predir: Option<String>,
    street_name: Option<String>,
    suffix: Option<String>,
    postdir: Option<String>,
    unit: Option<String>,
    error: Option<String>,
}

impl BatchRow {
    fn parsed(input: String, parsed: ParsedAddress) -> Self {
        let [street_num, predir, street_name, suffix, postdir, unit] = parsed.components();
        Self {
            input,
            full_addr: Some(parsed.full_addr),
            street_num,
            predir,
            street_name,
            suffix,
            postdir,
            unit,
            error: None,
        }
    }

    fn failed(input: String, error: String) -> Self {
        Self {
            input,
            error: Some(error),
            ..Self::default()
        }
    }
}

/// Parses every row of `options.input` and writes the report.
///
/// # Errors
///
/// * [`BatchError::Csv`] if the input cannot be read or the output written.
/// * [`BatchError::ColumnNotFound`] if `options.column` is not a header.
pub fn run(
    parser: &Parser,
    options: BatchOptions<'_>,
    progress: &dyn ProgressCallback,
) -> Result<BatchSummary, BatchError> {
    let input_path = options.input.display().to_string();
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(options.has_headers)
        .from_path(options.input)
        .map_err(|e| BatchError::Csv {
            path: input_path.clone(),
            source: e,
        })?;

    match options.output {
        Some(path) => {
            let output_path = path.display().to_string();
            let writer = csv::Writer::from_path(path).map_err(|e| BatchError::Csv {
                path: output_path.clone(),
                source: e,
            })?;
            parse_rows(
                parser,
                reader,
                writer,
                options.column,
                (&input_path, &output_path),
                progress,
            )
        }
        None => parse_rows(
            parser,
            reader,
            csv::Writer::from_writer(std::io::stdout().lock()),
            options.column,
            (&input_path, "<stdout>"),
            progress,
        ),
    }
}

/// Parses the address column of every record in `reader` into `writer`.
fn parse_rows<R: Read, W: Write>(
    parser: &Parser,
    mut reader: csv::Reader<R>,
    mut writer: csv::Writer<W>,
    column: Option<&str>,
    (input_path, output_path): (&str, &str),
    progress: &dyn ProgressCallback,
) -> Result<BatchSummary, BatchError> {
    let read_error = |e: csv::Error| BatchError::Csv {
        path: input_path.to_string(),
        source: e,
    };
    let write_error = |e: csv::Error| BatchError::Csv {
        path: output_path.to_string(),
        source: e,
    };

    let index = match column {
        Some(name) => reader
            .headers()
            .map_err(read_error)?
            .iter()
            .position(|header| header.trim() == name)
            .ok_or_else(|| BatchError::ColumnNotFound {
                column: name.to_string(),
                path: input_path.to_string(),
            })?,
        None => 0,
    };

    let mut summary = BatchSummary::default();
    for record in reader.records() {
        let record = record.map_err(read_error)?;
        let input = record.get(index).unwrap_or_default().to_string();
        let row = match parser.parse(&input) {
            Ok(parsed) => {
                summary.parsed += 1;
                BatchRow::parsed(input, parsed)
            }
            Err(e) => {
                log::trace!("failed to parse {input:?}: {e}");
                summary.failed += 1;
                BatchRow::failed(input, e.to_string())
            }
        };
        writer.serialize(row).map_err(write_error)?;
        progress.inc(1);
    }

    writer.flush().map_err(|e| BatchError::Io {
        path: output_path.to_string(),
        source: e,
    })?;

    Ok(summary)
}
