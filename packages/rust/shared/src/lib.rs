//! Shared types, error model, and configuration for the campaign workspace.
//!
//! This crate is the foundation depended on by all other campaign crates.
//! It provides:
//! - [`CampaignError`]: the unified error type
//! - Domain types ([`DocumentFormat`], [`SourceRef`])
//! - Configuration ([`AppConfig`], [`IngestConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AgentsConfig, AppConfig, IngestConfig, IngestSettings, PORT_ENV, ServerConfig,
    StorageConfig, config_dir, config_file_path, init_config, load_config, load_config_from,
};
pub use error::{CampaignError, Result};
pub use types::{DocumentFormat, SourceRef, display_filename};
