//! Service layer for Moneybags
//!
//! The service layer provides business logic on top of the storage layer:
//! validation, duplicate checks and audit logging.

pub mod category;
pub mod template;

pub use category::CategoryService;
pub use template::TemplateService;
