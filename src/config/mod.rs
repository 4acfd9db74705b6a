//! Configuration loading and management for the diária engine.
//!
//! This module provides functionality to load the rate tables from YAML
//! files, plus the built-in defaults used when no directory is given.
//!
//! # Example
//!
//! ```no_run
//! use diaria_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/cbmmg").unwrap();
//! println!("Loaded tables: {}", config.config().metadata().name);
//! ```

mod defaults;
mod loader;
mod types;

pub use defaults::{
    DEFAULT_CAPITAL_FLOOR, DEFAULT_INCIDENTAL_ALLOWANCE, DEFAULT_OTHER_MUNICIPALITY_FLOOR,
    DEFAULT_SPECIAL_MUNICIPALITY_FLOOR, STATE_CAPITALS,
};
pub use loader::{ConfigLoader, parse_special_municipalities};
pub use types::{
    DiariaConfig, LocationFloors, RankRate, RanksFile, TableMetadata, TablesFile,
    normalize_rank_code,
};
