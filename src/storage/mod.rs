//! Storage layer for Moneybags
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation, plus the audit hook services call after a successful save.

pub mod budget;
pub mod categories;
pub mod file_io;
pub mod init;
pub mod payees;
pub mod templates;
pub mod transactions;

pub use budget::BudgetRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic, WriteBatch};
pub use init::initialize_storage;
pub use payees::PayeeRepository;
pub use templates::TemplateRepository;
pub use transactions::TransactionRepository;

use crate::audit::{AuditBatch, AuditLogger};
use crate::config::paths::MoneybagsPaths;
use crate::error::MoneybagsError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: MoneybagsPaths,
    audit: AuditLogger,
    pub categories: CategoryRepository,
    pub payees: PayeeRepository,
    pub budget: BudgetRepository,
    pub templates: TemplateRepository,
    pub transactions: TransactionRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: MoneybagsPaths) -> Result<Self, MoneybagsError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            categories: CategoryRepository::new(paths.categories_file()),
            payees: PayeeRepository::new(paths.payees_file()),
            budget: BudgetRepository::new(paths.budget_entries_file()),
            templates: TemplateRepository::new(paths.templates_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &MoneybagsPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    ///
    /// Also used to discard unsaved in-memory changes after a failed batch.
    pub fn load_all(&self) -> Result<(), MoneybagsError> {
        self.categories.load()?;
        self.payees.load()?;
        self.budget.load()?;
        self.templates.load()?;
        self.transactions.load()?;
        Ok(())
    }

    /// Save all data to disk
    ///
    /// Every file is staged before any is replaced, so a failure leaves the
    /// files on disk as they were.
    pub fn save_all(&self) -> Result<(), MoneybagsError> {
        let mut batch = WriteBatch::new();
        self.categories.stage(&mut batch)?;
        self.payees.stage(&mut batch)?;
        self.budget.stage(&mut batch)?;
        self.templates.stage(&mut batch)?;
        self.transactions.stage(&mut batch)?;
        batch.commit()
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Append a batch of changes that have already been saved
    pub fn record(&self, batch: &AuditBatch) -> Result<(), MoneybagsError> {
        self.audit.append(batch)
    }
}
