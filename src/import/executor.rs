//! Import execution
//!
//! Replays a parsed workbook as budget-entry upserts and transaction
//! inserts. All writes go to the in-memory repositories first and are saved
//! together in one write batch at the end. On failure the repositories are
//! reloaded from disk so no partial import is kept.
//!
//! The audit batch is appended after the save. Once the save has committed
//! the import stands, so an audit failure is logged rather than returned.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::audit::AuditBatch;
use crate::config::settings::DEFAULT_IMPORT_PAYEE;
use crate::error::{MoneybagsError, MoneybagsResult};
use crate::models::{BudgetEntry, BudgetTemplate, Category, CategoryId, PayeeType, Transaction};
use crate::storage::Storage;

use super::parsed::ParsedWorkbook;

/// What an import run wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    pub budget_count: usize,
    pub transaction_count: usize,
    pub template_count: usize,
}

/// Writes a parsed workbook into storage
pub struct ImportExecutor<'a> {
    storage: &'a Storage,
    payee_name: String,
}

impl<'a> ImportExecutor<'a> {
    /// Create an executor that books transactions to the default import payee
    pub fn new(storage: &'a Storage) -> Self {
        Self::with_payee_name(storage, DEFAULT_IMPORT_PAYEE)
    }

    /// Create an executor with a custom import payee name
    pub fn with_payee_name(storage: &'a Storage, payee_name: impl Into<String>) -> Self {
        Self {
            storage,
            payee_name: payee_name.into(),
        }
    }

    /// Import budget entries, transactions and template memberships
    ///
    /// Does not validate category types; run [`super::ImportValidator`] first.
    /// Budget entries are upserted, but every run adds its transactions again.
    pub fn execute(
        &self,
        parsed: &ParsedWorkbook,
        mapping: &HashMap<String, String>,
    ) -> MoneybagsResult<ExecutionSummary> {
        let outcome = self.apply(parsed, mapping).and_then(|outcome| {
            self.storage.save_all()?;
            Ok(outcome)
        });

        let (summary, audit) = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Import failed, discarding unsaved changes");
                if let Err(reload) = self.storage.load_all() {
                    error!(error = %reload, "Failed to reload storage after failed import");
                }
                return Err(e);
            }
        };

        if let Err(e) = self.storage.record(&audit) {
            warn!(error = %e, records = audit.len(), "Import saved but audit log not written");
        }

        info!(
            year = parsed.year,
            budget_count = summary.budget_count,
            transaction_count = summary.transaction_count,
            template_count = summary.template_count,
            "Imported workbook"
        );

        Ok(summary)
    }

    fn apply(
        &self,
        parsed: &ParsedWorkbook,
        mapping: &HashMap<String, String>,
    ) -> MoneybagsResult<(ExecutionSummary, AuditBatch)> {
        let year = parsed.year;
        let mut summary = ExecutionSummary::default();
        let mut audit = AuditBatch::new();

        let (payee, created) = self
            .storage
            .payees
            .get_or_create(&self.payee_name, PayeeType::Generic)?;
        if created {
            audit.created(&payee);
        }

        let mut touched: Vec<CategoryId> = Vec::new();
        let mut seen = HashSet::new();

        for sheet_category in &parsed.categories {
            let category = self.resolve(&sheet_category.name, mapping)?;

            for (&month, &amount) in &sheet_category.budget {
                let label = format!("{} {}-{:02}", category.name, year, month);

                match self.storage.budget.get(category.id, year, month)? {
                    Some(before) => {
                        let mut entry = before.clone();
                        entry.set_amount(amount, None);
                        audit
                            .updated(&before, &entry)
                            .label(label)
                            .note(format!("amount: {} -> {}", before.amount, amount));
                        self.storage.budget.upsert(entry)?;
                    }
                    None => {
                        let entry = BudgetEntry::new(category.id, year, month, amount);
                        entry
                            .validate()
                            .map_err(|e| MoneybagsError::Validation(e.to_string()))?;
                        audit.created(&entry).label(label);
                        self.storage.budget.upsert(entry)?;
                    }
                }
                summary.budget_count += 1;
            }

            for (&month, amounts) in &sheet_category.actuals {
                let date = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
                    MoneybagsError::Validation(format!("Invalid month: {} (expected 1-12)", month))
                })?;

                for &amount in amounts {
                    let txn = Transaction::with_payee(category.id, payee.id, date, amount);
                    audit.created(&txn).label(category.name.as_str());
                    self.storage.transactions.upsert(txn)?;
                    summary.transaction_count += 1;
                }
            }

            if seen.insert(category.id) {
                touched.push(category.id);
            }
        }

        for category_id in touched {
            let template = BudgetTemplate::new(year, category_id);
            if self.storage.templates.insert(template.clone())? {
                audit.created(&template);
                summary.template_count += 1;
            }
        }

        Ok((summary, audit))
    }

    fn resolve(
        &self,
        sheet_name: &str,
        mapping: &HashMap<String, String>,
    ) -> MoneybagsResult<Category> {
        let mapped_id = mapping.get(sheet_name).ok_or_else(|| {
            MoneybagsError::Import(format!("Category '{}' not mapped", sheet_name))
        })?;

        let id: CategoryId = mapped_id.trim().parse().map_err(|_| {
            MoneybagsError::Import(format!(
                "Category '{}' mapped to invalid id '{}'",
                sheet_name, mapped_id
            ))
        })?;

        self.storage
            .categories
            .get(id)?
            .ok_or_else(|| MoneybagsError::category_not_found(mapped_id.as_str()))
    }
}
