//! Budget template repository for JSON storage
//!
//! Manages loading and saving (year, category) memberships to
//! budget_templates.json

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::MoneybagsError;
use crate::models::{BudgetTemplate, CategoryId};

use super::file_io::{read_json, WriteBatch};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TemplateData {
    #[serde(default)]
    templates: Vec<BudgetTemplate>,
}

/// Repository for budget template persistence
pub struct TemplateRepository {
    path: PathBuf,
    data: RwLock<HashMap<(i32, CategoryId), BudgetTemplate>>,
}

impl TemplateRepository {
    /// Create a new template repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load memberships from disk
    pub fn load(&self) -> Result<(), MoneybagsError> {
        let file_data: TemplateData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for template in file_data.templates {
            data.insert((template.year, template.category_id), template);
        }

        Ok(())
    }

    /// Save memberships to disk
    pub fn save(&self) -> Result<(), MoneybagsError> {
        let mut batch = WriteBatch::new();
        self.stage(&mut batch)?;
        batch.commit()
    }

    /// Write budget_templates.json into `batch` without committing it
    pub fn stage(&self, batch: &mut WriteBatch) -> Result<(), MoneybagsError> {
        let data = self
            .data
            .read()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut templates: Vec<_> = data.values().cloned().collect();
        templates.sort_by(|a, b| (a.year, a.created_at).cmp(&(b.year, b.created_at)));

        batch.stage(&self.path, &TemplateData { templates })
    }

    /// Whether a category is in a year's template
    pub fn exists(&self, year: i32, category_id: CategoryId) -> Result<bool, MoneybagsError> {
        let data = self
            .data
            .read()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.contains_key(&(year, category_id)))
    }

    /// Insert a membership unless one already exists
    ///
    /// Returns true if a new membership was created.
    pub fn insert(&self, template: BudgetTemplate) -> Result<bool, MoneybagsError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let key = (template.year, template.category_id);
        if data.contains_key(&key) {
            return Ok(false);
        }
        data.insert(key, template);
        Ok(true)
    }

    /// Get all memberships for a year, oldest first
    pub fn get_for_year(&self, year: i32) -> Result<Vec<BudgetTemplate>, MoneybagsError> {
        let data = self
            .data
            .read()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = data.values().filter(|t| t.year == year).cloned().collect();
        list.sort_by_key(|t| t.created_at);
        Ok(list)
    }

    /// All years that have at least one membership, ascending
    pub fn years(&self) -> Result<Vec<i32>, MoneybagsError> {
        let data = self
            .data
            .read()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let years: BTreeSet<i32> = data.keys().map(|(year, _)| *year).collect();
        Ok(years.into_iter().collect())
    }

    /// Count memberships
    pub fn count(&self) -> Result<usize, MoneybagsError> {
        let data = self
            .data
            .read()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}
