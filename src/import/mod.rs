//! Spreadsheet import pipeline
//!
//! An import run has three steps, each usable on its own:
//!
//! 1. [`parse_file`] / [`parse_bytes`] read an `.xlsx` workbook into a
//!    [`ParsedWorkbook`] (no storage access).
//! 2. [`validate`] checks the result against stored categories and reports
//!    what would be written.
//! 3. [`execute`] writes budget entries, transactions and template
//!    memberships.
//!
//! ```rust,ignore
//! let parsed = moneybags::import::parse_file("budsjett.xlsx", 2024)?;
//! let report = moneybags::import::validate(&storage, &parsed, &mapping)?;
//! if report.valid {
//!     moneybags::import::execute(&storage, &parsed, &mapping)?;
//! }
//! ```

mod executor;
mod formula;
mod parsed;
mod scanner;
mod validator;
mod workbook;

pub use executor::{ExecutionSummary, ImportExecutor};
pub use formula::extract_amounts;
pub use parsed::{ParsedCategory, ParsedWorkbook};
pub use scanner::{detect_layout, parse_workbook, SheetLayout, HOVEDARK_SHEET};
pub use validator::{ImportSummary, ImportValidator, ValidationReport};
pub use workbook::{column_letter, CellValue, Sheet, Workbook, MEMORY_SOURCE};

use std::collections::HashMap;
use std::path::Path;

use crate::error::MoneybagsResult;
use crate::storage::Storage;

/// Parse an `.xlsx` file
pub fn parse_file(path: impl AsRef<Path>, year: i32) -> MoneybagsResult<ParsedWorkbook> {
    let workbook = Workbook::open(path)?;
    parse_workbook(&workbook, year)
}

/// Parse an `.xlsx` document held in memory (an upload, for instance)
pub fn parse_bytes(bytes: &[u8], year: i32) -> MoneybagsResult<ParsedWorkbook> {
    let workbook = Workbook::from_bytes(bytes)?;
    parse_workbook(&workbook, year)
}

/// Dry-run an import; see [`ImportValidator`]
pub fn validate(
    storage: &Storage,
    parsed: &ParsedWorkbook,
    mapping: &HashMap<String, String>,
) -> MoneybagsResult<ValidationReport> {
    ImportValidator::new(storage).validate(parsed, mapping)
}

/// Run an import with the default payee; see [`ImportExecutor`]
pub fn execute(
    storage: &Storage,
    parsed: &ParsedWorkbook,
    mapping: &HashMap<String, String>,
) -> MoneybagsResult<ExecutionSummary> {
    ImportExecutor::new(storage).execute(parsed, mapping)
}
