//! Transient parse results
//!
//! A parsed workbook is plain data: it can be written to JSON after parsing
//! and read back later for validation and execution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::CategoryType;

use super::scanner::SheetLayout;

/// One category block read from the sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCategory {
    /// Category label as written in the sheet
    pub name: String,

    #[serde(rename = "type")]
    pub category_type: CategoryType,

    /// Month (1-12) to budgeted total
    #[serde(default)]
    pub budget: BTreeMap<u32, i64>,

    /// Month (1-12) to the individual actual amounts
    #[serde(default)]
    pub actuals: BTreeMap<u32, Vec<i64>>,
}

impl ParsedCategory {
    pub fn new(name: impl Into<String>, category_type: CategoryType) -> Self {
        Self {
            name: name.into(),
            category_type,
            budget: BTreeMap::new(),
            actuals: BTreeMap::new(),
        }
    }

    /// Whether the block carried no budget and no actual figures
    pub fn is_empty(&self) -> bool {
        self.budget.is_empty() && self.actuals.is_empty()
    }

    /// Number of transactions this category will produce
    pub fn transaction_count(&self) -> usize {
        self.actuals.values().map(Vec::len).sum()
    }
}

/// Everything extracted from one workbook for one year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedWorkbook {
    pub year: i32,

    pub layout: SheetLayout,

    #[serde(rename = "sheet_categories")]
    pub categories: Vec<ParsedCategory>,
}

impl ParsedWorkbook {
    /// Look up a category by its sheet label
    pub fn category(&self, name: &str) -> Option<&ParsedCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Total budget cells across all categories
    pub fn budget_count(&self) -> usize {
        self.categories.iter().map(|c| c.budget.len()).sum()
    }

    /// Total transactions across all categories
    pub fn transaction_count(&self) -> usize {
        self.categories
            .iter()
            .map(ParsedCategory::transaction_count)
            .sum()
    }
}
