use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that relocates every directory under one root.
pub const BASE_DIR_ENV: &str = "DATALENS_BASE_DIR";

const CONFIG_FILE: &str = "datalens.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("toml error: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("directories error: could not determine home directory")]
  Directories,
  #[error("other: {0}")]
  Other(String),
}

#[derive(Debug, Clone)]
pub struct DatalensPaths {
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
}

impl DatalensPaths {
  /// Resolves the platform directories, or the `DATALENS_BASE_DIR` layout
  /// when that variable is set, and creates them.
  pub fn new() -> Result<Self, ConfigError> {
    if let Ok(base) = std::env::var(BASE_DIR_ENV)
      && !base.trim().is_empty()
    {
      return Self::at(base);
    }

    let proj_dirs = ProjectDirs::from("com", "datalens", "datalens").ok_or(ConfigError::Directories)?;
    let paths =
      Self { config_dir: proj_dirs.config_dir().to_path_buf(), data_dir: proj_dirs.data_dir().to_path_buf() };

    paths.ensure()?;
    Ok(paths)
  }

  /// Portable layout rooted at `base`. Directories are created.
  pub fn at(base: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let base = base.as_ref();
    let paths = Self { config_dir: base.join("config"), data_dir: base.join("data") };
    paths.ensure()?;
    Ok(paths)
  }

  fn ensure(&self) -> Result<(), ConfigError> {
    std::fs::create_dir_all(&self.config_dir)?;
    std::fs::create_dir_all(&self.data_dir)?;
    Ok(())
  }

  pub fn config_file(&self) -> PathBuf {
    self.config_dir.join(CONFIG_FILE)
  }

  /// Resolves a configured path: absolute paths are kept, relative ones
  /// are taken from the data directory.
  pub fn data_path(&self, configured: impl AsRef<Path>) -> PathBuf {
    let configured = configured.as_ref();
    if configured.is_absolute() { configured.to_path_buf() } else { self.data_dir.join(configured) }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  struct EnvVarGuard {
    key: String,
    original: Option<String>,
  }

  impl EnvVarGuard {
    fn new(key: &str, value: &str) -> Self {
      let original = std::env::var(key).ok();
      unsafe { std::env::set_var(key, value) };
      EnvVarGuard { key: key.to_owned(), original }
    }
  }

  impl Drop for EnvVarGuard {
    fn drop(&mut self) {
      match &self.original {
        Some(val) => unsafe { std::env::set_var(&self.key, val) },
        None => unsafe { std::env::remove_var(&self.key) },
      }
    }
  }

  #[test]
  fn base_dir_env_override() {
    let tmp = tempdir().unwrap();
    let _env = EnvVarGuard::new(BASE_DIR_ENV, tmp.path().to_str().unwrap());

    let paths = DatalensPaths::new().unwrap();

    assert_eq!(paths.config_dir, tmp.path().join("config"));
    assert_eq!(paths.data_dir, tmp.path().join("data"));
    assert_eq!(paths.config_file(), tmp.path().join("config").join("datalens.toml"));

    assert!(paths.config_dir.exists());
    assert!(paths.data_dir.exists());
    assert!(!tmp.path().join("cache").exists());
  }

  #[test]
  fn data_path_keeps_absolute_paths() {
    let tmp = tempdir().unwrap();
    let paths = DatalensPaths::at(tmp.path()).unwrap();

    assert_eq!(paths.data_path("datalens.db"), tmp.path().join("data").join("datalens.db"));
    assert_eq!(paths.data_path(tmp.path().join("x.db")), tmp.path().join("x.db"));
  }
}
