use crate::io::atomic_write_str;
use crate::paths::{ConfigError, DatalensPaths};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;

use toml_edit::{DocumentMut, Item};

/// Section-level access to the configuration file. Each consumer crate owns
/// one `[section]` and its serde type.
pub trait ConfigBackend {
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;
}

pub struct TomlConfigBackend {
  paths: DatalensPaths,
}

impl TomlConfigBackend {
  pub fn new(paths: DatalensPaths) -> Self {
    Self { paths }
  }

  fn read_table(&self, section: &str) -> Result<Option<toml::Value>, ConfigError> {
    let path = self.paths.config_file();
    let content = match fs::read_to_string(&path) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(e.into()),
    };

    let mut root: toml::Table = toml::from_str(&content)?;
    Ok(root.remove(section))
  }

  fn decode<T: DeserializeOwned>(section: &str, table: toml::Value) -> Result<T, ConfigError> {
    table.try_into().map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
  }

  /// Reads `[section]`. Fields missing from the file take their defaults, and
  /// a missing section is written back with its defaults so the file
  /// documents every setting.
  pub fn load_or_init_section<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Serialize + Default,
  {
    if let Some(table) = self.read_table(section)? {
      return Self::decode(section, table);
    }

    let value = T::default();
    self.save_section(section, &value)?;
    tracing::info!(section, file = %self.paths.config_file().display(), "wrote default config section");

    Ok(value)
  }
}

impl ConfigBackend for TomlConfigBackend {
  /// Replaces `[section]` and leaves the rest of the document, comments
  /// included, untouched.
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    let path = self.paths.config_file();

    let mut doc: DocumentMut = match fs::read_to_string(&path) {
      Ok(content) => {
        content.parse::<DocumentMut>().map_err(|e| ConfigError::Other(format!("parse toml_edit doc: {e}")))?
      }
      Err(e) if e.kind() == ErrorKind::NotFound => DocumentMut::new(),
      Err(e) => return Err(e.into()),
    };

    let section_str =
      toml::to_string(value).map_err(|e| ConfigError::Other(format!("encode section [{section}]: {e}")))?;

    // A serialized struct has no header, so it parses as the root table.
    let section_item: Item = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section as doc: {e}")))?
      .into_item();

    doc[section] = section_item;

    atomic_write_str(&path, &doc.to_string())?;
    Ok(())
  }
}
