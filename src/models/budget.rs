//! Budget entry model
//!
//! A budget entry is the planned amount for one category in one month of one
//! year. There is at most one entry per (category, year, month).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetEntryId, CategoryId};

/// Key identifying the single budget entry slot for a category and month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BudgetKey {
    pub category_id: CategoryId,
    pub year: i32,
    pub month: u32,
}

impl BudgetKey {
    pub fn new(category_id: CategoryId, year: i32, month: u32) -> Self {
        Self {
            category_id,
            year,
            month,
        }
    }
}

/// A planned monthly amount for one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetEntry {
    /// Unique identifier
    pub id: BudgetEntryId,

    /// The category this entry is for
    pub category_id: CategoryId,

    /// Calendar year
    pub year: i32,

    /// Month, 1-12
    pub month: u32,

    /// Budgeted amount
    pub amount: i64,

    /// Optional comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// When this entry was created
    pub created_at: DateTime<Utc>,

    /// When this entry was last modified
    pub updated_at: DateTime<Utc>,
}

impl BudgetEntry {
    /// Create a new budget entry
    pub fn new(category_id: CategoryId, year: i32, month: u32, amount: i64) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetEntryId::new(),
            category_id,
            year,
            month,
            amount,
            comment: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The (category, year, month) slot this entry occupies
    pub fn key(&self) -> BudgetKey {
        BudgetKey::new(self.category_id, self.year, self.month)
    }

    /// Replace the amount and comment
    pub fn set_amount(&mut self, amount: i64, comment: Option<String>) {
        self.amount = amount;
        self.comment = comment;
        self.updated_at = Utc::now();
    }

    /// Validate the entry
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !(1..=12).contains(&self.month) {
            return Err(BudgetValidationError::InvalidMonth(self.month));
        }
        Ok(())
    }
}

impl fmt::Display for BudgetEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02} budgeted: {}", self.year, self.month, self.amount)
    }
}

/// Validation errors for budget entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    InvalidMonth(u32),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMonth(m) => write!(f, "Invalid month: {} (expected 1-12)", m),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
