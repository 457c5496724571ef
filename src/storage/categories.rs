//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::MoneybagsError;
use crate::models::{Category, CategoryId};

use super::file_io::{read_json, WriteBatch};

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CategoryData {
    categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    data: RwLock<HashMap<CategoryId, Category>>,
    /// Index: normalized name -> category_id
    by_name: RwLock<HashMap<String, CategoryId>>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_name: RwLock::new(HashMap::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), MoneybagsError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_name = self
            .by_name
            .write()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_name.clear();

        for category in file_data.categories {
            by_name.insert(Category::normalize_name(&category.name), category.id);
            data.insert(category.id, category);
        }

        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), MoneybagsError> {
        let mut batch = WriteBatch::new();
        self.stage(&mut batch)?;
        batch.commit()
    }

    /// Write categories.json into `batch` without committing it
    pub fn stage(&self, batch: &mut WriteBatch) -> Result<(), MoneybagsError> {
        let data = self
            .data
            .read()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut categories: Vec<_> = data.values().cloned().collect();
        categories.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        batch.stage(&self.path, &CategoryData { categories })
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, MoneybagsError> {
        let data = self
            .data
            .read()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all categories, income first, then by name
    pub fn get_all(&self) -> Result<Vec<Category>, MoneybagsError> {
        let data = self
            .data
            .read()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut categories: Vec<_> = data.values().cloned().collect();
        categories.sort_by(|a, b| {
            a.category_type
                .as_str()
                .cmp(b.category_type.as_str())
                .reverse()
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(categories)
    }

    /// Get a category by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, MoneybagsError> {
        let data = self
            .data
            .read()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_name = self
            .by_name
            .read()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(by_name
            .get(&Category::normalize_name(name))
            .and_then(|id| data.get(id).cloned()))
    }

    /// Insert or update a category
    pub fn upsert(&self, category: Category) -> Result<(), MoneybagsError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_name = self
            .by_name
            .write()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(old) = data.get(&category.id) {
            by_name.remove(&Category::normalize_name(&old.name));
        }
        by_name.insert(Category::normalize_name(&category.name), category.id);

        data.insert(category.id, category);
        Ok(())
    }

    /// Count categories
    pub fn count(&self) -> Result<usize, MoneybagsError> {
        let data = self
            .data
            .read()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}
