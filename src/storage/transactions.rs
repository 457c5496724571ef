//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::MoneybagsError;
use crate::models::{CategoryId, Transaction, TransactionId};

use super::file_io::{read_json, WriteBatch};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence with a category index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: category_id -> transaction_ids
    by_category: RwLock<HashMap<CategoryId, Vec<TransactionId>>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build the index
    pub fn load(&self) -> Result<(), MoneybagsError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            MoneybagsError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_category = self.by_category.write().map_err(|e| {
            MoneybagsError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        by_category.clear();

        for txn in file_data.transactions {
            by_category.entry(txn.category_id).or_default().push(txn.id);
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Write transactions.json into `batch` without committing it
    pub fn stage(&self, batch: &mut WriteBatch) -> Result<(), MoneybagsError> {
        let data = self.data.read().map_err(|e| {
            MoneybagsError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| (a.date, a.created_at).cmp(&(b.date, b.created_at)));

        batch.stage(&self.path, &TransactionData { transactions })
    }

    /// Get all transactions for a category, ordered by date
    pub fn get_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Transaction>, MoneybagsError> {
        let data = self.data.read().map_err(|e| {
            MoneybagsError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_category = self.by_category.read().map_err(|e| {
            MoneybagsError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut txns: Vec<_> = by_category
            .get(&category_id)
            .map(|ids| ids.iter().filter_map(|id| data.get(id).cloned()).collect())
            .unwrap_or_default();
        txns.sort_by_key(|t| t.date);
        Ok(txns)
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), MoneybagsError> {
        let mut data = self.data.write().map_err(|e| {
            MoneybagsError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_category = self.by_category.write().map_err(|e| {
            MoneybagsError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if let Some(old) = data.get(&txn.id) {
            if let Some(ids) = by_category.get_mut(&old.category_id) {
                ids.retain(|id| *id != txn.id);
            }
        }

        by_category.entry(txn.category_id).or_default().push(txn.id);
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, MoneybagsError> {
        let data = self.data.read().map_err(|e| {
            MoneybagsError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        let repo = TransactionRepository::new(path);
        (temp_dir, repo)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_get_by_category_in_date_order() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let food = CategoryId::new();
        let rent = CategoryId::new();
        repo.upsert(Transaction::new(food, date(2024, 2, 1), 10)).unwrap();
        repo.upsert(Transaction::new(food, date(2024, 1, 1), 575)).unwrap();
        repo.upsert(Transaction::new(rent, date(2024, 1, 1), 9000)).unwrap();

        let amounts: Vec<_> = repo
            .get_by_category(food)
            .unwrap()
            .into_iter()
            .map(|t| t.amount)
            .collect();
        assert_eq!(amounts, vec![575, 10]);
        assert!(repo.get_by_category(CategoryId::new()).unwrap().is_empty());
    }

    #[test]
    fn test_recategorize_updates_index() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let food = CategoryId::new();
        let fun = CategoryId::new();
        let mut txn = Transaction::new(food, date(2024, 3, 1), 100);
        repo.upsert(txn.clone()).unwrap();

        txn.category_id = fun;
        repo.upsert(txn).unwrap();

        assert!(repo.get_by_category(food).unwrap().is_empty());
        assert_eq!(repo.get_by_category(fun).unwrap().len(), 1);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let category_id = CategoryId::new();
        repo.upsert(Transaction::new(category_id, date(2024, 4, 1), 427))
            .unwrap();
        let mut batch = WriteBatch::new();
        repo.stage(&mut batch).unwrap();
        batch.commit().unwrap();

        let repo2 = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        repo2.load().unwrap();

        let reloaded = repo2.get_by_category(category_id).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].amount, 427);
    }
}
