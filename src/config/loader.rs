//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the diária
//! tables from a configuration directory.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::normalize_name;

use super::types::{DiariaConfig, RanksFile, TablesFile};

/// Loads and provides access to the diária configuration.
///
/// # Directory Structure
///
/// ```text
/// config/cbmmg/
/// ├── diaria.yaml                 # Metadata, location floors, allowance
/// ├── ranks.yaml                  # Base daily rate per rank
/// └── special_municipalities.txt  # One municipality per line
/// ```
///
/// # Example
///
/// ```no_run
/// use diaria_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/cbmmg")?;
/// let (code, rate) = loader.config().daily_rate("CAP")?;
/// println!("{}: R$ {}", code, rate);
/// # Ok::<(), diaria_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: DiariaConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any YAML file is invalid or missing fields (`ConfigParseError`)
    /// - Two ranks share a display name (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let tables = Self::load_yaml::<TablesFile>(&path.join("diaria.yaml"))?;
        let ranks = Self::load_ranks(&path.join("ranks.yaml"))?;
        let special = Self::load_special_municipalities(&path.join("special_municipalities.txt"))?;

        info!(
            path = %path.display(),
            version = %tables.metadata.version,
            ranks = ranks.ranks.len(),
            special_municipalities = special.len(),
            "Loaded diária tables"
        );

        let config = DiariaConfig::new(
            tables.metadata,
            tables.location_floors,
            tables.incidental_allowance,
            special,
            ranks.ranks,
        );

        Ok(Self { config })
    }

    /// Wraps an already built configuration.
    pub fn from_config(config: DiariaConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads the rank table, rejecting display names used by more than one code.
    fn load_ranks(path: &Path) -> EngineResult<RanksFile> {
        let ranks = Self::load_yaml::<RanksFile>(path)?;
        if let Some(name) = ranks.duplicate_name() {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: format!("rank name '{}' is used by more than one rank", name),
            });
        }
        Ok(ranks)
    }

    /// Reads the special municipality list.
    fn load_special_municipalities(path: &Path) -> EngineResult<HashSet<String>> {
        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path.display().to_string(),
        })?;
        Ok(parse_special_municipalities(&content))
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &DiariaConfig {
        &self.config
    }
}

/// Parses a special municipality list, one name per line.
///
/// Blank lines, `#` comments and numbering lines such as `12.` are skipped;
/// names are normalized.
///
/// # Example
///
/// ```
/// use diaria_engine::config::parse_special_municipalities;
///
/// let set = parse_special_municipalities("1.\nBetim\n\n2.\nJuiz de Fora\n");
/// assert_eq!(set.len(), 2);
/// assert!(set.contains("juiz de fora"));
/// ```
pub fn parse_special_municipalities(text: &str) -> HashSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| !line.chars().all(|c| c.is_ascii_digit() || c == '.'))
        .map(normalize_name)
        .collect()
}
