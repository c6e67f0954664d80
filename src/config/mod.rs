//! Configuration loading and management for the Absence Engine.
//!
//! This module loads the statutory rule set from YAML files: the SSP day
//! model and weekly rates, the bereavement leave window, and the overlap
//! checking policy.
//!
//! # Example
//!
//! ```no_run
//! use absence_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/uk_statutory").unwrap();
//! println!("Loaded rules: {}", config.config().jurisdiction().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BereavementPolicy, JurisdictionMetadata, OverlapCheckFailurePolicy, OverlapPolicy, PolicyFile,
    RateConfig, SspPolicy, StatutoryConfig, StoreConflictSignatures,
};
