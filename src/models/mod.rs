//! Core data models for Moneybags
//!
//! This module contains the data structures of the budgeting domain:
//! categories, payees, budget entries, template memberships and transactions.

pub mod budget;
pub mod category;
pub mod ids;
pub mod payee;
pub mod template;
pub mod transaction;

pub use budget::{BudgetEntry, BudgetKey};
pub use category::{Category, CategoryType};
pub use ids::{BudgetEntryId, CategoryId, IdParseError, PayeeId, TemplateId, TransactionId};
pub use payee::{Payee, PayeeType};
pub use template::BudgetTemplate;
pub use transaction::Transaction;
