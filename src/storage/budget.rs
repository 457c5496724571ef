//! Budget entry repository for JSON storage
//!
//! Manages loading and saving budget entries to budget_entries.json. Entries
//! are keyed by (category, year, month), so an upsert replaces the single
//! entry in that slot.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::MoneybagsError;
use crate::models::{BudgetEntry, BudgetKey, CategoryId};

use super::file_io::{read_json, WriteBatch};

/// Serializable budget data
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    entries: Vec<BudgetEntry>,
}

fn sort_entries(entries: &mut [BudgetEntry]) {
    entries.sort_by(|a, b| {
        (a.year, a.month, a.category_id.as_uuid()).cmp(&(b.year, b.month, b.category_id.as_uuid()))
    });
}

/// Repository for budget entry persistence
pub struct BudgetRepository {
    path: PathBuf,
    entries: RwLock<HashMap<BudgetKey, BudgetEntry>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Load entries from disk
    pub fn load(&self) -> Result<(), MoneybagsError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut entries = self
            .entries
            .write()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        entries.clear();
        for entry in file_data.entries {
            entries.insert(entry.key(), entry);
        }

        Ok(())
    }

    /// Write budget_entries.json into `batch` without committing it
    pub fn stage(&self, batch: &mut WriteBatch) -> Result<(), MoneybagsError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = entries.values().cloned().collect();
        sort_entries(&mut list);

        batch.stage(&self.path, &BudgetData { entries: list })
    }

    /// Get the entry for a category and month
    pub fn get(
        &self,
        category_id: CategoryId,
        year: i32,
        month: u32,
    ) -> Result<Option<BudgetEntry>, MoneybagsError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entries.get(&BudgetKey::new(category_id, year, month)).cloned())
    }

    /// Insert or replace the entry in its (category, year, month) slot
    pub fn upsert(&self, entry: BudgetEntry) -> Result<(), MoneybagsError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        entries.insert(entry.key(), entry);
        Ok(())
    }

    /// Count entries
    pub fn count(&self) -> Result<usize, MoneybagsError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, BudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget_entries.json");
        let repo = BudgetRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let category_id = CategoryId::new();
        repo.upsert(BudgetEntry::new(category_id, 2024, 1, 52000))
            .unwrap();

        let retrieved = repo.get(category_id, 2024, 1).unwrap().unwrap();
        assert_eq!(retrieved.amount, 52000);
        assert!(repo.get(category_id, 2024, 2).unwrap().is_none());
    }

    #[test]
    fn test_upsert_replaces_slot() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let category_id = CategoryId::new();
        repo.upsert(BudgetEntry::new(category_id, 2024, 1, 100))
            .unwrap();
        repo.upsert(BudgetEntry::new(category_id, 2024, 1, 200))
            .unwrap();

        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(repo.get(category_id, 2024, 1).unwrap().unwrap().amount, 200);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let category_id = CategoryId::new();
        repo.upsert(BudgetEntry::new(category_id, 2024, 6, 7500))
            .unwrap();
        let mut batch = WriteBatch::new();
        repo.stage(&mut batch).unwrap();
        batch.commit().unwrap();

        let repo2 = BudgetRepository::new(temp_dir.path().join("budget_entries.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.get(category_id, 2024, 6).unwrap().unwrap().amount, 7500);
    }
}
