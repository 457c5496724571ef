//! Payee model
//!
//! Payees are the counterparties of transactions. A payee is either generic
//! ("Hairdresser") or an actual business ("Bad Hairday Ltd").

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::PayeeId;

/// Kind of payee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PayeeType {
    Generic,
    #[default]
    Actual,
}

impl fmt::Display for PayeeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => write!(f, "Generic"),
            Self::Actual => write!(f, "Actual"),
        }
    }
}

/// A transaction counterparty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payee {
    /// Unique identifier
    pub id: PayeeId,

    /// Payee name (unique, case-insensitive)
    pub name: String,

    /// Generic or actual payee
    #[serde(rename = "type", default)]
    pub payee_type: PayeeType,

    /// When the payee was created
    pub created_at: DateTime<Utc>,
}

impl Payee {
    /// Create a new payee with an explicit type
    pub fn with_type(name: impl Into<String>, payee_type: PayeeType) -> Self {
        Self {
            id: PayeeId::new(),
            name: name.into(),
            payee_type,
            created_at: Utc::now(),
        }
    }

    /// Normalize a payee name for matching
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Validate the payee
    pub fn validate(&self) -> Result<(), PayeeValidationError> {
        if self.name.trim().is_empty() {
            return Err(PayeeValidationError::EmptyName);
        }

        if self.name.chars().count() > 255 {
            return Err(PayeeValidationError::NameTooLong(self.name.chars().count()));
        }

        Ok(())
    }
}

impl fmt::Display for Payee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for payees
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayeeValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for PayeeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Payee name cannot be empty"),
            Self::NameTooLong(len) => write!(f, "Payee name too long ({} chars, max 255)", len),
        }
    }
}

impl std::error::Error for PayeeValidationError {}
