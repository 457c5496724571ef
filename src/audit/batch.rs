//! Audit records and the batches they are written in
//!
//! A service call or an import run collects one [`AuditBatch`] while it
//! changes the repositories. The batch is appended to the log only after
//! the change has been saved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{BudgetEntry, BudgetTemplate, Category, Payee, Transaction};

/// Kind of record a log line refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Category,
    Payee,
    BudgetEntry,
    BudgetTemplate,
    Transaction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Change {
    Created,
    Updated,
}

/// A stored record that can appear in the audit log
pub trait Audited: Serialize {
    const ENTITY: EntityType;

    /// Short id shown in the log
    fn audit_id(&self) -> String;

    /// Default label; callers can replace it with something more specific
    fn audit_label(&self) -> Option<String> {
        None
    }
}

impl Audited for Category {
    const ENTITY: EntityType = EntityType::Category;

    fn audit_id(&self) -> String {
        self.id.to_string()
    }

    fn audit_label(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

impl Audited for Payee {
    const ENTITY: EntityType = EntityType::Payee;

    fn audit_id(&self) -> String {
        self.id.to_string()
    }

    fn audit_label(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

impl Audited for BudgetEntry {
    const ENTITY: EntityType = EntityType::BudgetEntry;

    fn audit_id(&self) -> String {
        self.id.to_string()
    }
}

impl Audited for BudgetTemplate {
    const ENTITY: EntityType = EntityType::BudgetTemplate;

    fn audit_id(&self) -> String {
        self.id.to_string()
    }

    fn audit_label(&self) -> Option<String> {
        Some(self.year.to_string())
    }
}

impl Audited for Transaction {
    const ENTITY: EntityType = EntityType::Transaction;

    fn audit_id(&self) -> String {
        self.id.to_string()
    }
}

/// One line of the audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub timestamp: DateTime<Utc>,
    pub change: Change,
    pub entity_type: EntityType,
    pub entity_id: String,

    /// "Mat", "Mat 2024-01", "2024", ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// e.g. "amount: 5000 -> 5200"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AuditRecord {
    fn new<T: Audited>(change: Change, before: Option<&T>, after: &T) -> Self {
        Self {
            timestamp: Utc::now(),
            change,
            entity_type: T::ENTITY,
            entity_id: after.audit_id(),
            label: after.audit_label(),
            before: before.and_then(|b| serde_json::to_value(b).ok()),
            after: serde_json::to_value(after).ok(),
            note: None,
        }
    }

    pub fn label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Some(label.into());
        self
    }

    pub fn note(&mut self, note: impl Into<String>) -> &mut Self {
        self.note = Some(note.into());
        self
    }
}

/// Records collected during one operation, in the order they happened
#[derive(Debug, Default)]
pub struct AuditBatch {
    records: Vec<AuditRecord>,
}

impl AuditBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created<T: Audited>(&mut self, value: &T) -> &mut AuditRecord {
        self.push(AuditRecord::new(Change::Created, None, value))
    }

    pub fn updated<T: Audited>(&mut self, before: &T, after: &T) -> &mut AuditRecord {
        self.push(AuditRecord::new(Change::Updated, Some(before), after))
    }

    fn push(&mut self, record: AuditRecord) -> &mut AuditRecord {
        self.records.push(record);
        let last = self.records.len() - 1;
        &mut self.records[last]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[AuditRecord] {
        &self.records
    }
}
