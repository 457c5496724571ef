//! Custom error types for Moneybags
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// What was wrong with a spreadsheet amount cell
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormulaErrorKind {
    /// A spreadsheet function such as IF or SUM was used
    #[error("Complex formula not supported ({0})")]
    ComplexFormula(&'static str),

    /// An operator other than `+` was used
    #[error("Only addition (+) supported")]
    OnlyAddition,

    /// An addend evaluated to a negative number
    #[error("Negative value not allowed ({0})")]
    NegativeValue(i64),

    /// An addend is not a number
    #[error("Invalid number format: {0}")]
    InvalidNumber(String),
}

/// A malformed or disallowed amount cell, with its sheet position
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Row {row}, Column {column}: {kind}")]
pub struct FormulaError {
    pub row: u32,
    pub column: String,
    pub kind: FormulaErrorKind,
}

impl FormulaError {
    pub fn new(row: u32, column: impl Into<String>, kind: FormulaErrorKind) -> Self {
        Self {
            row,
            column: column.into(),
            kind,
        }
    }
}

/// The main error type for Moneybags operations
#[derive(Error, Debug)]
pub enum MoneybagsError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models and inputs
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// A bad amount cell inside a category block
    #[error("Category '{category}': {source}")]
    CategoryFormula {
        category: String,
        #[source]
        source: FormulaError,
    },

    /// The workbook does not have the expected layout
    #[error("Import structure error in {source_name}: {message}")]
    ImportStructure {
        source_name: String,
        message: String,
    },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl MoneybagsError {
    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a structure error for a workbook
    pub fn structure(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ImportStructure {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for MoneybagsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MoneybagsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Moneybags operations
pub type MoneybagsResult<T> = Result<T, MoneybagsError>;
