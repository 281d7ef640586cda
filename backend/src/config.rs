use datalens_config::{ConfigError, config_backend};
use serde::{Deserialize, Serialize};

const SECTION: &str = "server";

/// `[server]` section of `datalens.toml`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub bind_addr: String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    ServerConfig { bind_addr: "127.0.0.1:5000".to_string() }
  }
}

impl ServerConfig {
  pub fn load() -> Result<Self, ConfigError> {
    config_backend()?.load_or_init_section(SECTION)
  }
}
