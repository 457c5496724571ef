//! Payee repository for JSON storage
//!
//! Payees are only ever looked up by name (the shared import payee and the
//! seeded defaults), so the map is keyed by normalized name.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::MoneybagsError;
use crate::models::{Payee, PayeeType};

use super::file_io::{read_json, WriteBatch};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PayeeData {
    payees: Vec<Payee>,
}

/// Repository for payee persistence
pub struct PayeeRepository {
    path: PathBuf,
    by_name: RwLock<HashMap<String, Payee>>,
}

impl PayeeRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            by_name: RwLock::new(HashMap::new()),
        }
    }

    /// Load payees from disk
    pub fn load(&self) -> Result<(), MoneybagsError> {
        let file_data: PayeeData = read_json(&self.path)?;

        let mut by_name = self
            .by_name
            .write()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *by_name = file_data
            .payees
            .into_iter()
            .map(|payee| (Payee::normalize_name(&payee.name), payee))
            .collect();

        Ok(())
    }

    /// Write payees.json into `batch` without committing it
    pub fn stage(&self, batch: &mut WriteBatch) -> Result<(), MoneybagsError> {
        let by_name = self
            .by_name
            .read()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut entries: Vec<_> = by_name.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        let payees = entries.into_iter().map(|(_, payee)| payee.clone()).collect();

        batch.stage(&self.path, &PayeeData { payees })
    }

    /// Look up a payee by name, ignoring case and surrounding whitespace
    pub fn get_by_name(&self, name: &str) -> Result<Option<Payee>, MoneybagsError> {
        let by_name = self
            .by_name
            .read()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(by_name.get(&Payee::normalize_name(name)).cloned())
    }

    /// Get a payee by name, creating it with the given type if missing
    ///
    /// Returns the payee and whether it was newly created.
    pub fn get_or_create(
        &self,
        name: &str,
        payee_type: PayeeType,
    ) -> Result<(Payee, bool), MoneybagsError> {
        if let Some(payee) = self.get_by_name(name)? {
            return Ok((payee, false));
        }

        let payee = Payee::with_type(name.trim(), payee_type);
        payee
            .validate()
            .map_err(|e| MoneybagsError::Validation(e.to_string()))?;
        self.upsert(payee.clone())?;
        Ok((payee, true))
    }

    /// Insert a payee, or replace the one with the same id (even if renamed)
    pub fn upsert(&self, payee: Payee) -> Result<(), MoneybagsError> {
        let mut by_name = self
            .by_name
            .write()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        by_name.retain(|_, existing| existing.id != payee.id);
        by_name.insert(Payee::normalize_name(&payee.name), payee);
        Ok(())
    }

    pub fn count(&self) -> Result<usize, MoneybagsError> {
        let by_name = self
            .by_name
            .read()
            .map_err(|e| MoneybagsError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(by_name.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, PayeeRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = PayeeRepository::new(temp_dir.path().join("payees.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    fn save(repo: &PayeeRepository) {
        let mut batch = WriteBatch::new();
        repo.stage(&mut batch).unwrap();
        batch.commit().unwrap();
    }

    #[test]
    fn test_get_or_create_reuses_existing() {
        let (_temp_dir, repo) = create_test_repo();

        let (first, created) = repo
            .get_or_create("Import - Google Sheets", PayeeType::Generic)
            .unwrap();
        assert!(created);
        assert_eq!(first.payee_type, PayeeType::Generic);

        let (second, created) = repo
            .get_or_create("  import - google sheets ", PayeeType::Actual)
            .unwrap();
        assert!(!created);
        assert_eq!(first.id, second.id);
        assert_eq!(second.payee_type, PayeeType::Generic);
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_get_or_create_rejects_empty_name() {
        let (_temp_dir, repo) = create_test_repo();

        let err = repo.get_or_create("  ", PayeeType::Actual).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_renamed_payee_is_found_by_new_name_only() {
        let (_temp_dir, repo) = create_test_repo();

        let mut payee = Payee::with_type("Frisør", PayeeType::Generic);
        repo.upsert(payee.clone()).unwrap();
        payee.name = "Bad Hairday".into();
        repo.upsert(payee).unwrap();

        assert!(repo.get_by_name("Frisør").unwrap().is_none());
        assert!(repo.get_by_name("bad hairday").unwrap().is_some());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let (payee, _) = repo
            .get_or_create("Import - Google Sheets", PayeeType::Generic)
            .unwrap();
        repo.upsert(Payee::with_type("Rema 1000", PayeeType::Actual))
            .unwrap();
        save(&repo);

        let reloaded = PayeeRepository::new(temp_dir.path().join("payees.json"));
        reloaded.load().unwrap();

        assert_eq!(reloaded.count().unwrap(), 2);
        let found = reloaded
            .get_by_name("IMPORT - GOOGLE SHEETS")
            .unwrap()
            .unwrap();
        assert_eq!(found.id, payee.id);
    }
}
