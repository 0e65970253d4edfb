//! IASME Core - Foundation crate for the directory research pipeline.
//!
//! This crate provides the shared data model, record validation, URL
//! normalisation helpers and run configuration that every other crate in
//! the workspace depends on.
//!
//! # Modules
//!
//! - [`error`] - Configuration and validation errors using thiserror
//! - [`config`] - TOML-based run configuration with environment overrides
//! - [`types`] - Directory entries, contacts and enriched company records
//! - [`schema`] - Output schema validation for company records
//! - [`normalise`] - URL normalisation, domain derivation and order-preserving dedup
//!
//! # Example
//!
//! ```rust
//! use iasme_core::{AppConfig, DirectoryEntry};
//!
//! let config = AppConfig::default();
//! assert_eq!(config.scanning.concurrency, 4);
//!
//! let entry = DirectoryEntry::new("Acme Ltd");
//! assert_eq!(entry.key(), "acme ltd");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod normalise;
pub mod schema;
pub mod types;

// Re-export commonly used types
pub use config::{
    load_rename_map, AppConfig, BrowserConfig, DirectoryConfig, OutputConfig, OutputFormat,
    RenameMap, ScanningConfig,
};
pub use error::{ConfigError, ConfigResult, ValidationError};
pub use normalise::{extract_domain, normalise_url, resolve_url, unique, DirectoryHost};
pub use types::{CompanyRecord, Contact, DirectoryEntry};
