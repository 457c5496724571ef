//! Budget template model
//!
//! A template membership declares a category active for one year's budget.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, TemplateId};

/// (year, category) membership record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetTemplate {
    /// Unique identifier
    pub id: TemplateId,

    /// Calendar year
    pub year: i32,

    /// The active category
    pub category_id: CategoryId,

    /// When the membership was created
    pub created_at: DateTime<Utc>,
}

impl BudgetTemplate {
    /// Create a new template membership
    pub fn new(year: i32, category_id: CategoryId) -> Self {
        Self {
            id: TemplateId::new(),
            year,
            category_id,
            created_at: Utc::now(),
        }
    }
}
