//! Category model
//!
//! Categories are global across years. Each one is either an income or an
//! expenses category; budget entries, transactions and template memberships
//! all refer to a category by id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::CategoryId;

/// Whether a category tracks money coming in or going out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Income,
    Expenses,
}

impl CategoryType {
    /// The stored string form ("income" / "expenses")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expenses => "expenses",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryType {
    type Err = CategoryValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expenses" | "expense" => Ok(Self::Expenses),
            other => Err(CategoryValidationError::InvalidType(other.to_string())),
        }
    }
}

/// An income or expense category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name (unique, case-insensitive)
    pub name: String,

    /// Income or expenses
    #[serde(rename = "type")]
    pub category_type: CategoryType,

    /// When the category was created
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>, category_type: CategoryType) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            category_type,
            created_at: Utc::now(),
        }
    }

    /// Normalize a name for case-insensitive lookups
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.chars().count() > 255 {
            return Err(CategoryValidationError::NameTooLong(self.name.chars().count()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidType(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 255)", len)
            }
            Self::InvalidType(t) => {
                write!(f, "Invalid category type '{}' (expected income or expenses)", t)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("Lønn", CategoryType::Income);
        assert_eq!(category.name, "Lønn");
        assert_eq!(category.category_type, CategoryType::Income);
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_type_parse() {
        assert_eq!("income".parse::<CategoryType>().unwrap(), CategoryType::Income);
        assert_eq!("Expenses".parse::<CategoryType>().unwrap(), CategoryType::Expenses);
        assert!("savings".parse::<CategoryType>().is_err());
    }

    #[test]
    fn test_type_serializes_lowercase() {
        let category = Category::new("Mat", CategoryType::Expenses);
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["type"], "expenses");
    }

    #[test]
    fn test_validation() {
        let mut category = Category::new("Mat", CategoryType::Expenses);
        category.name = "   ".into();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "x".repeat(256);
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::NameTooLong(256))
        );
    }
}
