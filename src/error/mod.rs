//! Error handling for occmatch.
//!
//! This module provides:
//! - [`OmError`]: The main error enum for all occmatch operations
//! - [`ErrorCode`]: Standardized error codes for machine parsing
//! - [`StructuredError`]: Serializable error for robot mode output

mod codes;

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use codes::ErrorCode;

/// Main error type for occmatch operations.
#[derive(Error, Debug)]
pub enum OmError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Taxonomy file not found: {0}")]
    TaxonomyNotFound(String),

    #[error("Invalid taxonomy entry at index {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    #[error("Taxonomy parse error: {0}")]
    TaxonomyParse(String),

    #[error("Taxonomy contains no entries")]
    EmptyTaxonomy,

    #[error("Program file error: {0}")]
    ProgramParse(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing required config: {0}")]
    MissingConfig(String),

    #[error("External ranker unavailable: {0}")]
    RankerUnavailable(String),

    #[error("External ranker returned an invalid response: {0}")]
    RankerResponse(String),

    #[error("Timeout: {0}")]
    Timeout(String),
}

impl OmError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::SerializationError,
            Self::TaxonomyNotFound(_) => ErrorCode::TaxonomyNotFound,
            Self::InvalidEntry { .. } => ErrorCode::TaxonomyInvalidEntry,
            Self::TaxonomyParse(_) => ErrorCode::TaxonomyParseError,
            Self::EmptyTaxonomy => ErrorCode::IndexEmpty,
            Self::ProgramParse(_) => ErrorCode::ProgramParseError,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::MissingConfig(_) => ErrorCode::ConfigMissingRequired,
            Self::RankerUnavailable(_) => ErrorCode::RankerUnavailable,
            Self::RankerResponse(_) => ErrorCode::RankerResponseInvalid,
            Self::Timeout(_) => ErrorCode::RankerTimeout,
        }
    }

    /// Get context information for this error as JSON.
    #[must_use]
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::TaxonomyNotFound(path) => Some(serde_json::json!({ "path": path })),
            Self::InvalidEntry { index, reason } => {
                Some(serde_json::json!({ "index": index, "reason": reason }))
            }
            Self::MissingConfig(key) => Some(serde_json::json!({ "config_key": key })),
            _ => None,
        }
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_om_error(self)
    }
}

/// A structured error with machine-readable code, suggestion, and context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "TAXONOMY_NOT_FOUND")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 101)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    pub recoverable: bool,

    /// Error category (e.g., "taxonomy", "config", "ranker")
    pub category: String,
}

impl StructuredError {
    /// Create a new structured error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            numeric_code: code.numeric(),
            suggestion: code.suggestion().to_string(),
            context: None,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
            code,
            message: message.into(),
        }
    }

    /// Create a structured error from an `OmError`.
    #[must_use]
    pub fn from_om_error(err: &OmError) -> Self {
        let mut structured = Self::new(err.code(), err.to_string());
        structured.context = err.context();
        structured
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl From<&OmError> for StructuredError {
    fn from(err: &OmError) -> Self {
        Self::from_om_error(err)
    }
}

/// Result type alias using `OmError`.
pub type Result<T> = std::result::Result<T, OmError>;
