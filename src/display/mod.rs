//! Display formatting for terminal output
//!
//! Renders categories, templates and import results as text tables.

pub mod category;
pub mod import;

pub use category::{format_category_details, format_category_list};
pub use import::{format_execution_summary, format_parsed_workbook, format_validation_report};
