//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod config;
pub mod import;
pub mod template;

pub use category::{handle_category_command, CategoryCommands};
pub use config::{handle_config_command, ConfigArgs};
pub use import::{handle_import_command, ImportCommands};
pub use template::{handle_template_command, TemplateCommands};
