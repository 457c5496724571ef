//! Moneybags - household budgeting with spreadsheet import
//!
//! This library keeps a yearly budget of income and expense categories,
//! monthly budget entries and actual transactions, and imports both from the
//! household's Excel workbook.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration, path management and the settings cache
//! - `error`: Custom error types
//! - `models`: Core data models (categories, budget entries, transactions, etc.)
//! - `storage`: JSON file storage layer
//! - `import`: Workbook parsing, validation and execution
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `cli` / `display`: Command handlers and terminal output
//!
//! # Example
//!
//! ```rust,ignore
//! use moneybags::config::paths::MoneybagsPaths;
//! use moneybags::storage::Storage;
//!
//! let storage = Storage::new(MoneybagsPaths::new()?)?;
//! storage.load_all()?;
//! let parsed = moneybags::import::parse_file("budsjett.xlsx", 2024)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod import;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{MoneybagsError, MoneybagsResult};
