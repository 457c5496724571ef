//! Configuration module for Moneybags
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - A TTL-bounded settings cache

pub mod cache;
pub mod paths;
pub mod settings;

pub use cache::SettingsCache;
pub use paths::MoneybagsPaths;
pub use settings::Settings;
