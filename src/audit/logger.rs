//! Append-only audit log writer
//!
//! Each record is written as a single JSON line.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use crate::error::{MoneybagsError, MoneybagsResult};

use super::batch::{AuditBatch, AuditRecord};

/// Appends audit batches to the log file
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append every record in `batch`, flushing once at the end
    ///
    /// An empty batch does not touch the file.
    pub fn append(&self, batch: &AuditBatch) -> MoneybagsResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| MoneybagsError::Io(format!("Failed to open audit log: {}", e)))?;
        let mut writer = BufWriter::new(file);

        for record in batch.records() {
            serde_json::to_writer(&mut writer, record).map_err(|e| {
                MoneybagsError::Json(format!("Failed to serialize audit record: {}", e))
            })?;
            writer
                .write_all(b"\n")
                .map_err(|e| MoneybagsError::Io(format!("Failed to write audit record: {}", e)))?;
        }

        writer
            .flush()
            .map_err(|e| MoneybagsError::Io(format!("Failed to flush audit log: {}", e)))
    }

    /// Read every record, oldest first
    pub fn read_all(&self) -> MoneybagsResult<Vec<AuditRecord>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| MoneybagsError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut records = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                MoneybagsError::Io(format!("Failed to read audit log line {}: {}", index + 1, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }

            records.push(serde_json::from_str(&line).map_err(|e| {
                MoneybagsError::Json(format!(
                    "Failed to parse audit record at line {}: {}",
                    index + 1,
                    e
                ))
            })?);
        }

        Ok(records)
    }
}
