#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reference tables for the address line parser.
//!
//! The parser consults five lookup tables (directionals, street suffixes,
//! unit types, long-form ordinals, common abbreviations) and two protected
//! whole-name sets. They are defined in TOML: the default set is embedded
//! at compile time from `data/reference.toml`, and an alternative file can
//! be loaded at runtime with [`ReferenceData::from_path`].
//!
//! Tables are loaded once and never mutated afterwards. Share them between
//! parsers and threads behind an [`Arc`].

pub mod protected;
pub mod table;

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use addr_line_parser_models::{Directional, Suffix, UnitType};
use serde::Deserialize;

pub use protected::ProtectedNameSet;
pub use table::{ReferenceTable, TableDef};

/// Environment variable naming an alternative reference TOML file.
pub const REFERENCE_PATH_ENV: &str = "ADDR_LINE_REFERENCE";

const EMBEDDED_TOML: &str = include_str!("../data/reference.toml");

static EMBEDDED: LazyLock<Arc<ReferenceData>> = LazyLock::new(|| {
    Arc::new(
        ReferenceData::from_toml_str(EMBEDDED_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse embedded reference.toml: {e}")),
    )
});

/// Errors from loading reference data.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    /// Reading a reference file failed.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// The file being read.
        path: String,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The TOML could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The tables parsed but are not internally consistent.
    #[error("{} reference data issue(s): {}", .issues.len(), join_issues(.issues))]
    Inconsistent {
        /// Every problem found.
        issues: Vec<ReferenceIssue>,
    },
}

fn join_issues(issues: &[ReferenceIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Which table a form belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TableKind {
    /// Compass directionals.
    Directionals,
    /// Street suffixes.
    Suffixes,
    /// Unit types.
    UnitTypes,
    /// Long-form ordinal words.
    LongOrdinals,
    /// Street name abbreviations.
    Abbreviations,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Directionals => "directionals",
            Self::Suffixes => "suffixes",
            Self::UnitTypes => "unit_types",
            Self::LongOrdinals => "long_ordinals",
            Self::Abbreviations => "abbreviations",
        })
    }
}

/// A consistency problem in a set of reference tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceIssue {
    /// A recognized form has no canonical mapping. Parsing passes it
    /// through unchanged.
    #[error("{table}: {form:?} is recognized but has no canonical form")]
    MissingCanonical {
        /// The table.
        table: TableKind,
        /// The unmapped form.
        form: String,
    },

    /// A form is recognized by two structural tables, so the parser would
    /// classify it by whichever step runs first.
    #[error("{form:?} is recognized by both {first} and {second}")]
    Overlap {
        /// The earlier table.
        first: TableKind,
        /// The later table.
        second: TableKind,
        /// The shared form.
        form: String,
    },
}

#[derive(Debug, Default, Deserialize)]
struct ReferenceFile {
    #[serde(default)]
    directionals: TableDef,
    #[serde(default)]
    suffixes: TableDef,
    #[serde(default)]
    unit_types: TableDef,
    #[serde(default)]
    long_ordinals: TableDef,
    #[serde(default)]
    abbreviations: TableDef,
    #[serde(default)]
    protected: ProtectedDef,
}

#[derive(Debug, Default, Deserialize)]
struct ProtectedDef {
    #[serde(default)]
    names_with_suffix: Vec<String>,
    #[serde(default)]
    names_with_directional: Vec<String>,
}

/// The complete, immutable set of reference tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceData {
    /// Compass directionals (`N`, `NORTH`, ...).
    pub directionals: ReferenceTable,
    /// Street suffixes (`ST`, `AVE`, ...).
    pub suffixes: ReferenceTable,
    /// Unit types (`FL`, `APT`, `#`, ...).
    pub unit_types: ReferenceTable,
    /// Long-form ordinal words mapped to short ordinals (`FIRST` → `1ST`).
    pub long_ordinals: ReferenceTable,
    /// Street name word abbreviations (`MT` → `MOUNT`).
    pub abbreviations: ReferenceTable,
    /// Names ending in a suffix-looking token that belongs to the name.
    pub names_with_suffix: ProtectedNameSet,
    /// Names starting with a directional-looking token that belongs to the
    /// name.
    pub names_with_directional: ProtectedNameSet,
}

impl ReferenceData {
    /// Returns the tables embedded at compile time.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed (this is a compile-time
    /// guarantee since the file is embedded).
    #[must_use]
    pub fn embedded() -> Arc<Self> {
        Arc::clone(&EMBEDDED)
    }

    /// Parses tables from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::Toml`] if the TOML is malformed.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ReferenceError> {
        let file: ReferenceFile = toml::de::from_str(toml_str)?;

        let data = Self {
            directionals: ReferenceTable::from_def(&file.directionals),
            suffixes: ReferenceTable::from_def(&file.suffixes),
            unit_types: ReferenceTable::from_def(&file.unit_types),
            long_ordinals: ReferenceTable::from_def(&file.long_ordinals),
            abbreviations: ReferenceTable::from_def(&file.abbreviations),
            names_with_suffix: ProtectedNameSet::new(&file.protected.names_with_suffix),
            names_with_directional: ProtectedNameSet::new(
                &file.protected.names_with_directional,
            ),
        };

        log::debug!(
            "Loaded reference data: {} directionals, {} suffixes, {} unit types, \
             {} long ordinals, {} abbreviations, {} + {} protected names",
            data.directionals.len(),
            data.suffixes.len(),
            data.unit_types.len(),
            data.long_ordinals.len(),
            data.abbreviations.len(),
            data.names_with_suffix.len(),
            data.names_with_directional.len(),
        );

        Ok(data)
    }

    /// Reads and parses tables from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::Io`] if the file cannot be read, or
    /// [`ReferenceError::Toml`] if it is malformed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReferenceError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ReferenceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Loading reference data from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Loads tables from `path` if given, else from the file named by
    /// [`REFERENCE_PATH_ENV`], else the embedded tables.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be loaded.
    pub fn load(path: Option<&Path>) -> Result<Arc<Self>, ReferenceError> {
        if let Some(path) = path {
            return Self::from_path(path).map(Arc::new);
        }
        match std::env::var(REFERENCE_PATH_ENV) {
            Ok(env_path) if !env_path.is_empty() => Self::from_path(env_path).map(Arc::new),
            _ => Ok(Self::embedded()),
        }
    }

    /// Looks up `token` as a directional.
    #[must_use]
    pub fn directional(&self, token: &str) -> Option<Directional> {
        self.directionals
            .contains(token)
            .then(|| Directional::from_canonical(self.directionals.standardize(token)))
    }

    /// Looks up `token` as a street suffix.
    #[must_use]
    pub fn suffix(&self, token: &str) -> Option<Suffix> {
        self.suffixes
            .contains(token)
            .then(|| Suffix::from_canonical(self.suffixes.standardize(token)))
    }

    /// Looks up `token` as a unit type.
    #[must_use]
    pub fn unit_type(&self, token: &str) -> Option<UnitType> {
        self.unit_types
            .contains(token)
            .then(|| UnitType::from_canonical(self.unit_types.standardize(token)))
    }

    fn tables(&self) -> [(TableKind, &ReferenceTable); 5] {
        [
            (TableKind::Directionals, &self.directionals),
            (TableKind::Suffixes, &self.suffixes),
            (TableKind::UnitTypes, &self.unit_types),
            (TableKind::LongOrdinals, &self.long_ordinals),
            (TableKind::Abbreviations, &self.abbreviations),
        ]
    }

    /// Collects every consistency problem in the tables.
    ///
    /// The three structural tables (directionals, suffixes, unit types) must
    /// not share forms, and every recognized form should have a canonical
    /// mapping.
    #[must_use]
    pub fn issues(&self) -> Vec<ReferenceIssue> {
        let mut issues = Vec::new();

        for (table, forms) in self.tables() {
            issues.extend(
                forms
                    .unmapped_forms()
                    .map(|form| ReferenceIssue::MissingCanonical {
                        table,
                        form: form.to_string(),
                    }),
            );
        }

        let mut owners: BTreeMap<&str, TableKind> = BTreeMap::new();
        for (table, forms) in &self.tables()[..3] {
            for form in forms.forms() {
                if let Some(first) = owners.insert(form, *table) {
                    issues.push(ReferenceIssue::Overlap {
                        first,
                        second: *table,
                        form: form.to_string(),
                    });
                }
            }
        }

        issues
    }

    /// Checks the tables for consistency problems.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::Inconsistent`] listing every problem found.
    pub fn validate(&self) -> Result<(), ReferenceError> {
        let issues = self.issues();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ReferenceError::Inconsistent { issues })
        }
    }
}
