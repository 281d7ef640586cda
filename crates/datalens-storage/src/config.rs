use datalens_config::{ConfigError, DatalensPaths, config_backend};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const SECTION: &str = "storage";

/// `[storage]` section of `datalens.toml`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
  /// Relative paths are resolved against the data directory.
  pub db_path: PathBuf,
  pub journal_mode: Option<String>,
  pub pool_size: u32,
}

impl Default for StorageConfig {
  fn default() -> Self {
    StorageConfig { db_path: PathBuf::from("datalens.db"), journal_mode: Some("WAL".to_string()), pool_size: 8 }
  }
}

impl StorageConfig {
  pub fn load() -> Result<Self, ConfigError> {
    config_backend()?.load_or_init_section(SECTION)
  }

  pub fn database_path(&self, paths: &DatalensPaths) -> PathBuf {
    paths.data_path(&self.db_path)
  }
}
