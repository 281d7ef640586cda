mod backend;
mod io;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use paths::{BASE_DIR_ENV, ConfigError, DatalensPaths};

use once_cell::sync::OnceCell;

static PATHS: OnceCell<DatalensPaths> = OnceCell::new();
static CONFIG_BACKEND: OnceCell<TomlConfigBackend> = OnceCell::new();

/// Process-wide directories, resolved on first use.
pub fn paths() -> Result<&'static DatalensPaths, ConfigError> {
  PATHS.get_or_try_init(DatalensPaths::new)
}

/// Process-wide config file backend over [`paths`].
pub fn config_backend() -> Result<&'static TomlConfigBackend, ConfigError> {
  CONFIG_BACKEND.get_or_try_init(|| Ok(TomlConfigBackend::new(paths()?.clone())))
}
