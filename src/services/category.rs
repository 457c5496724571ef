//! Category service
//!
//! Provides category creation and lookup, including turning a user-supplied
//! import mapping (sheet label → category name or ID) into category IDs.

use std::collections::HashMap;

use crate::audit::AuditBatch;
use crate::error::{MoneybagsError, MoneybagsResult};
use crate::models::{Category, CategoryId, CategoryType, Transaction};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn create_category(
        &self,
        name: &str,
        category_type: CategoryType,
    ) -> MoneybagsResult<Category> {
        let name = name.trim();

        if self.storage.categories.get_by_name(name)?.is_some() {
            return Err(MoneybagsError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let category = Category::new(name, category_type);
        category
            .validate()
            .map_err(|e| MoneybagsError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        let mut audit = AuditBatch::new();
        audit.created(&category);
        self.storage.record(&audit)?;

        Ok(category)
    }

    /// Find a category by name, full ID or displayed short ID
    pub fn find_category(&self, identifier: &str) -> MoneybagsResult<Option<Category>> {
        let identifier = identifier.trim();

        // Try by name first
        if let Some(category) = self.storage.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }

        // Try parsing as ID
        if let Ok(id) = identifier.parse::<CategoryId>() {
            return self.storage.categories.get(id);
        }

        // Short form as printed by `category list`
        Ok(self
            .storage
            .categories
            .get_all()?
            .into_iter()
            .find(|c| c.id.matches_short(identifier)))
    }

    /// List all categories, income first
    pub fn list_categories(&self) -> MoneybagsResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    /// A category's actual transactions, oldest first
    pub fn transactions(&self, category_id: CategoryId) -> MoneybagsResult<Vec<Transaction>> {
        self.storage.transactions.get_by_category(category_id)
    }

    /// Turn mapping values that name a category into that category's ID
    ///
    /// Values that match no category are passed through unchanged so that
    /// validation can report them against the sheet label.
    pub fn resolve_mapping(
        &self,
        mapping: &HashMap<String, String>,
    ) -> MoneybagsResult<HashMap<String, String>> {
        let mut resolved = HashMap::with_capacity(mapping.len());

        for (sheet_name, value) in mapping {
            let id = match self.find_category(value)? {
                Some(category) => category.id.as_uuid().to_string(),
                None => value.clone(),
            };
            resolved.insert(sheet_name.clone(), id);
        }

        Ok(resolved)
    }
}
