//! impara-store — file-backed implementations of the engine's seams.
//!
//! Provides the JSON progress store, dataset loading and validation for
//! JSON and JSON-Lines files, the themes catalog repository, and TOML
//! configuration.

pub mod config;
pub mod dataset;
pub mod json_store;
pub mod repository;

pub use config::{load_config_from, ImparaConfig};
pub use dataset::{lint, load_records, DatasetRecord, ValidationWarning};
pub use json_store::JsonProgressStore;
pub use repository::DataRepository;
