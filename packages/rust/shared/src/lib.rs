//! Shared types, error model, and configuration for the roster scraper.
//!
//! This crate is the foundation depended on by all other `rosters-*` crates.
//! It provides:
//! - [`RosterError`] — the unified error type
//! - Domain types ([`Player`], [`Team`], [`Season`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BROWSER_USER_AGENT, BrowserConfig, DefaultsConfig, HttpConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{Result, RosterError};
pub use types::{CSV_COLUMNS, Player, Season, Team};
