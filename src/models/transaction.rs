//! Transaction model
//!
//! Represents an actual income or expense movement against a category.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, PayeeId, TransactionId};

/// An actual dated transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The category this transaction is booked against
    pub category_id: CategoryId,

    /// Payee ID (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee_id: Option<PayeeId>,

    /// Transaction date
    pub date: NaiveDate,

    /// Amount (always stored as a non-negative integer; the category type
    /// decides the direction)
    pub amount: i64,

    /// Optional comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(category_id: CategoryId, date: NaiveDate, amount: i64) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            category_id,
            payee_id: None,
            date,
            amount,
            comment: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a transaction attributed to a payee
    pub fn with_payee(
        category_id: CategoryId,
        payee_id: PayeeId,
        date: NaiveDate,
        amount: i64,
    ) -> Self {
        let mut txn = Self::new(category_id, date, amount);
        txn.payee_id = Some(payee_id);
        txn
    }
}
