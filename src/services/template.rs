//! Budget template service
//!
//! A year's template is the set of categories active in that year's budget.

use crate::audit::AuditBatch;
use crate::error::{MoneybagsError, MoneybagsResult};
use crate::models::{BudgetTemplate, Category, CategoryId};
use crate::storage::Storage;

/// Service for budget template management
pub struct TemplateService<'a> {
    storage: &'a Storage,
}

impl<'a> TemplateService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a category to a year's template
    ///
    /// Returns false if it was already a member.
    pub fn add_category(&self, year: i32, category_id: CategoryId) -> MoneybagsResult<bool> {
        validate_year(year)?;

        if self.storage.categories.get(category_id)?.is_none() {
            return Err(MoneybagsError::category_not_found(category_id.to_string()));
        }

        let template = BudgetTemplate::new(year, category_id);
        let created = self.storage.templates.insert(template.clone())?;
        if created {
            self.storage.templates.save()?;
            let mut audit = AuditBatch::new();
            audit.created(&template);
            self.storage.record(&audit)?;
        }

        Ok(created)
    }

    /// Categories in a year's template, income first then by name
    pub fn list_categories(&self, year: i32) -> MoneybagsResult<Vec<Category>> {
        let mut categories = Vec::new();
        for template in self.storage.templates.get_for_year(year)? {
            if let Some(category) = self.storage.categories.get(template.category_id)? {
                categories.push(category);
            }
        }

        categories.sort_by(|a, b| {
            a.category_type
                .as_str()
                .cmp(b.category_type.as_str())
                .reverse()
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(categories)
    }

    /// Years that have a template
    pub fn years(&self) -> MoneybagsResult<Vec<i32>> {
        self.storage.templates.years()
    }

    /// Copy one year's template into another
    ///
    /// Existing memberships in the target year are kept. Returns the number
    /// of memberships added.
    pub fn copy_year(&self, from: i32, to: i32) -> MoneybagsResult<usize> {
        validate_year(from)?;
        validate_year(to)?;
        if from == to {
            return Err(MoneybagsError::Validation(
                "Source and target year must differ".into(),
            ));
        }

        let source = self.storage.templates.get_for_year(from)?;
        if source.is_empty() {
            return Err(MoneybagsError::NotFound {
                entity_type: "Budget template",
                identifier: from.to_string(),
            });
        }

        let mut audit = AuditBatch::new();
        for membership in source {
            let template = BudgetTemplate::new(to, membership.category_id);
            if self.storage.templates.insert(template.clone())? {
                audit.created(&template);
            }
        }

        if !audit.is_empty() {
            self.storage.templates.save()?;
            self.storage.record(&audit)?;
        }

        Ok(audit.len())
    }
}

fn validate_year(year: i32) -> MoneybagsResult<()> {
    if (1900..=2100).contains(&year) {
        Ok(())
    } else {
        Err(MoneybagsError::Validation(format!("Invalid year: {}", year)))
    }
}
