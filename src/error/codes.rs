//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Taxonomy errors
//! - 2xx: Index errors
//! - 3xx: Config errors
//! - 4xx: Match/query errors
//! - 5xx: External ranker errors
//! - 9xx: Internal errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for robot mode output.
///
/// Each variant maps to a numeric code (e.g., `TaxonomyInvalidEntry` -> E102).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Taxonomy errors (1xx)
    // ========================================
    /// E101: Taxonomy file was not found
    TaxonomyNotFound,
    /// E102: An entry is missing its code or title
    TaxonomyInvalidEntry,
    /// E103: Taxonomy file is not valid JSON in a supported shape
    TaxonomyParseError,

    // ========================================
    // Index errors (2xx)
    // ========================================
    /// E201: Taxonomy produced no entries to index
    IndexEmpty,

    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E301: Config file has invalid syntax or values
    ConfigInvalid,
    /// E302: Required config value is missing
    ConfigMissingRequired,

    // ========================================
    // Match errors (4xx)
    // ========================================
    /// E401: Program file could not be read or parsed
    ProgramParseError,

    // ========================================
    // External ranker errors (5xx)
    // ========================================
    /// E501: External ranker could not be started or exited with failure
    RankerUnavailable,
    /// E502: External ranker output could not be parsed
    RankerResponseInvalid,
    /// E503: External ranker did not answer in time
    RankerTimeout,

    // ========================================
    // Internal errors (9xx)
    // ========================================
    /// E901: Serialization/deserialization failed
    SerializationError,
    /// E902: IO operation failed
    IoError,
}

impl ErrorCode {
    /// Get the numeric error code (e.g., `TaxonomyNotFound` -> 101).
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::TaxonomyNotFound => 101,
            Self::TaxonomyInvalidEntry => 102,
            Self::TaxonomyParseError => 103,

            Self::IndexEmpty => 201,

            Self::ConfigInvalid => 301,
            Self::ConfigMissingRequired => 302,

            Self::ProgramParseError => 401,

            Self::RankerUnavailable => 501,
            Self::RankerResponseInvalid => 502,
            Self::RankerTimeout => 503,

            Self::SerializationError => 901,
            Self::IoError => 902,
        }
    }

    /// Get the error code as a formatted string (e.g., "E101").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    /// Get the default suggestion for this error code.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::TaxonomyNotFound => "Pass --taxonomy <path> or set taxonomy.path in occmatch.toml",
            Self::TaxonomyInvalidEntry => "Every occupation entry needs a non-empty `code` and a `title`",
            Self::TaxonomyParseError => "The taxonomy must be a JSON array of entries or an object with an `occupations` array",
            Self::IndexEmpty => "The taxonomy file contains no entries. Check that the right file is configured",
            Self::ConfigInvalid => "Check TOML syntax in the config file and the OCCMATCH_* environment variables",
            Self::ConfigMissingRequired => "Set the missing value in occmatch.toml or via the matching OCCMATCH_* variable",
            Self::ProgramParseError => "The program file must be a JSON array of programs or an object with a `programs` array",
            Self::RankerUnavailable => "Check ranker.command in config. Local matches are still returned without it",
            Self::RankerResponseInvalid => "The ranker must print a JSON array of {code, title, reason} objects",
            Self::RankerTimeout => "Raise ranker.timeout_ms or disable the ranker with ranker.enabled = false",
            Self::SerializationError => "The data format may be corrupted. Check input data for validity",
            Self::IoError => "File operation failed. Check path exists and permissions are correct",
        }
    }

    /// Check if this error is potentially recoverable by the user.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::SerializationError)
    }

    /// Get the error category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.numeric() / 100 {
            1 => "taxonomy",
            2 => "index",
            3 => "config",
            4 => "match",
            5 => "ranker",
            9 => "internal",
            _ => "unknown",
        }
    }

    /// Iterate over all error codes.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::TaxonomyNotFound,
            Self::TaxonomyInvalidEntry,
            Self::TaxonomyParseError,
            Self::IndexEmpty,
            Self::ConfigInvalid,
            Self::ConfigMissingRequired,
            Self::ProgramParseError,
            Self::RankerUnavailable,
            Self::RankerResponseInvalid,
            Self::RankerTimeout,
            Self::SerializationError,
            Self::IoError,
        ]
        .into_iter()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code_string())
    }
}
