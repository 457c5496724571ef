//! Dry-run validation of a parsed workbook against stored categories
//!
//! Nothing here writes to storage. Problems are collected into a report
//! rather than raised, so the caller can show every issue at once.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MoneybagsResult;
use crate::models::{Category, CategoryId};
use crate::storage::Storage;

use super::parsed::ParsedWorkbook;

/// What an import would write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub budget_count: usize,
    pub transaction_count: usize,
}

/// Outcome of a dry run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub summary: ImportSummary,
}

/// Checks a parse result and a name → category-id mapping
pub struct ImportValidator<'a> {
    storage: &'a Storage,
}

impl<'a> ImportValidator<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate without touching storage
    ///
    /// Each sheet category must be mapped to an existing category of the same
    /// type. Budget months that already have an entry produce a warning.
    pub fn validate(
        &self,
        parsed: &ParsedWorkbook,
        mapping: &HashMap<String, String>,
    ) -> MoneybagsResult<ValidationReport> {
        let mut report = ValidationReport::default();

        for sheet_category in &parsed.categories {
            let name = &sheet_category.name;

            let Some(mapped_id) = mapping.get(name) else {
                report.errors.push(format!("Category '{}' not mapped", name));
                continue;
            };

            let Some(category) = self.resolve(mapped_id)? else {
                report.errors.push(format!(
                    "Category '{}' mapped to '{}' which does not exist",
                    name, mapped_id
                ));
                continue;
            };

            if category.category_type != sheet_category.category_type {
                report.errors.push(format!(
                    "Category '{}' type mismatch: sheet has '{}' but Moneybags has '{}'",
                    name, sheet_category.category_type, category.category_type
                ));
                continue;
            }

            for month in sheet_category.budget.keys() {
                if self
                    .storage
                    .budget
                    .get(category.id, parsed.year, *month)?
                    .is_some()
                {
                    report.warnings.push(format!(
                        "Budget entry for '{}' {}-{:02} already exists - will overwrite",
                        category.name, parsed.year, month
                    ));
                }
                report.summary.budget_count += 1;
            }

            report.summary.transaction_count += sheet_category.transaction_count();
        }

        report.valid = report.errors.is_empty();

        debug!(
            valid = report.valid,
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "Validated import"
        );

        Ok(report)
    }

    fn resolve(&self, mapped_id: &str) -> MoneybagsResult<Option<Category>> {
        match mapped_id.trim().parse::<CategoryId>() {
            Ok(id) => self.storage.categories.get(id),
            Err(_) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::MoneybagsPaths;
    use crate::import::parsed::ParsedCategory;
    use crate::import::scanner::SheetLayout;
    use crate::models::{BudgetEntry, CategoryType};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneybagsPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn parsed() -> ParsedWorkbook {
        let mut salary = ParsedCategory::new("Lønn", CategoryType::Income);
        salary.budget.insert(1, 52000);
        salary.budget.insert(2, 52000);
        salary.actuals.insert(1, vec![55615]);

        let mut food = ParsedCategory::new("Mat", CategoryType::Expenses);
        food.budget.insert(1, 6200);
        food.actuals.insert(1, vec![575, 2182]);
        food.actuals.insert(2, vec![427, 275, 7292, 200]);

        ParsedWorkbook {
            year: 2024,
            layout: SheetLayout::Hovedark,
            categories: vec![salary, food],
        }
    }

    /// Store matching categories and return a consistent mapping
    fn seed(storage: &Storage) -> (Category, Category, HashMap<String, String>) {
        let salary = Category::new("Salary", CategoryType::Income);
        let food = Category::new("Groceries", CategoryType::Expenses);
        storage.categories.upsert(salary.clone()).unwrap();
        storage.categories.upsert(food.clone()).unwrap();

        let mapping = HashMap::from([
            ("Lønn".to_string(), salary.id.as_uuid().to_string()),
            ("Mat".to_string(), food.id.as_uuid().to_string()),
        ]);
        (salary, food, mapping)
    }

    #[test]
    fn test_consistent_mapping_is_valid() {
        let (_temp_dir, storage) = create_test_storage();
        let (_, _, mapping) = seed(&storage);

        let report = ImportValidator::new(&storage)
            .validate(&parsed(), &mapping)
            .unwrap();

        assert_eq!(
            report,
            ValidationReport {
                valid: true,
                errors: vec![],
                warnings: vec![],
                summary: ImportSummary {
                    budget_count: 3,
                    transaction_count: 7,
                },
            }
        );
    }

    #[test]
    fn test_prefixed_ids_accepted() {
        let (_temp_dir, storage) = create_test_storage();
        let (salary, food, _) = seed(&storage);
        let mapping = HashMap::from([
            ("Lønn".to_string(), format!("cat-{}", salary.id.as_uuid())),
            ("Mat".to_string(), format!("cat-{}", food.id.as_uuid())),
        ]);

        let report = ImportValidator::new(&storage)
            .validate(&parsed(), &mapping)
            .unwrap();
        assert!(report.valid);
    }

    #[test]
    fn test_unmapped_category() {
        let (_temp_dir, storage) = create_test_storage();
        let (_, _, mut mapping) = seed(&storage);
        mapping.remove("Mat");

        let report = ImportValidator::new(&storage)
            .validate(&parsed(), &mapping)
            .unwrap();

        assert!(!report.valid);
        assert_eq!(report.errors, vec!["Category 'Mat' not mapped"]);
        // The mapped category still counts
        assert_eq!(report.summary.budget_count, 2);
        assert_eq!(report.summary.transaction_count, 1);
    }

    #[test]
    fn test_nonexistent_category() {
        let (_temp_dir, storage) = create_test_storage();
        let (_, _, mut mapping) = seed(&storage);
        let missing = CategoryId::new().as_uuid().to_string();
        mapping.insert("Mat".into(), missing.clone());

        let report = ImportValidator::new(&storage)
            .validate(&parsed(), &mapping)
            .unwrap();

        assert!(!report.valid);
        assert_eq!(
            report.errors,
            vec![format!(
                "Category 'Mat' mapped to '{}' which does not exist",
                missing
            )]
        );
    }

    #[test]
    fn test_unparsable_id_does_not_exist() {
        let (_temp_dir, storage) = create_test_storage();
        let (_, _, mut mapping) = seed(&storage);
        mapping.insert("Lønn".into(), "not-an-id".into());

        let report = ImportValidator::new(&storage)
            .validate(&parsed(), &mapping)
            .unwrap();
        assert_eq!(
            report.errors,
            vec!["Category 'Lønn' mapped to 'not-an-id' which does not exist"]
        );
    }

    #[test]
    fn test_type_mismatch() {
        let (_temp_dir, storage) = create_test_storage();
        let (salary, _, mut mapping) = seed(&storage);
        mapping.insert("Mat".into(), salary.id.as_uuid().to_string());

        let report = ImportValidator::new(&storage)
            .validate(&parsed(), &mapping)
            .unwrap();
        assert_eq!(
            report.errors,
            vec!["Category 'Mat' type mismatch: sheet has 'expenses' but Moneybags has 'income'"]
        );
    }

    #[test]
    fn test_existing_budget_entry_warns() {
        let (_temp_dir, storage) = create_test_storage();
        let (salary, _, mapping) = seed(&storage);
        storage
            .budget
            .upsert(BudgetEntry::new(salary.id, 2024, 2, 50000))
            .unwrap();

        let report = ImportValidator::new(&storage)
            .validate(&parsed(), &mapping)
            .unwrap();

        assert!(report.valid);
        assert_eq!(
            report.warnings,
            vec!["Budget entry for 'Salary' 2024-02 already exists - will overwrite"]
        );
        assert_eq!(report.summary.budget_count, 3);
    }

    #[test]
    fn test_validation_does_not_write() {
        let (_temp_dir, storage) = create_test_storage();
        let (_, _, mapping) = seed(&storage);

        ImportValidator::new(&storage)
            .validate(&parsed(), &mapping)
            .unwrap();

        assert_eq!(storage.budget.count().unwrap(), 0);
        assert_eq!(storage.transactions.count().unwrap(), 0);
        assert_eq!(storage.payees.count().unwrap(), 0);
    }
}
