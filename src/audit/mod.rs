//! Audit logging for Moneybags
//!
//! Records every entity created or updated by a service call or an import
//! run in an append-only, line-delimited JSON log.
//!
//! # Example
//!
//! ```rust,ignore
//! use moneybags::audit::{AuditBatch, AuditLogger};
//!
//! let mut batch = AuditBatch::new();
//! batch.created(&category);
//! batch.updated(&before, &entry).label("Mat 2024-01");
//! AuditLogger::new(audit_log_path).append(&batch)?;
//! ```

mod batch;
mod logger;

pub use batch::{AuditBatch, AuditRecord, Audited, Change, EntityType};
pub use logger::AuditLogger;
