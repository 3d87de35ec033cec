//! User settings and where they live.
//!
//! ```toml
//! # <config dir>/recase/settings.toml
//! sync-case-across-multiple-cursors = false
//! ```
//!
//! Keys left out of the file keep their defaults; unknown keys are an error.

use std::{
  io,
  path::{
    Path,
    PathBuf,
  },
};

use etcetera::base_strategy::{
  BaseStrategy,
  choose_base_strategy,
};
use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Error)]
pub enum SettingsError {
  #[error("failed to access settings file {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("invalid settings: {0}")]
  Parse(#[from] toml::de::Error),
  #[error("failed to serialize settings: {0}")]
  Serialize(#[from] toml::ser::Error),
  #[error("unable to find the config directory")]
  NoConfigDir,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
  /// Classify every selection by the first one when cycling case.
  pub sync_case_across_multiple_cursors: bool,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      sync_case_across_multiple_cursors: true,
    }
  }
}

impl Settings {
  pub fn from_toml(source: &str) -> Result<Self> {
    Ok(toml::from_str(source)?)
  }

  pub fn to_toml(&self) -> Result<String> {
    Ok(toml::to_string(self)?)
  }
}

/// Somewhere settings can be loaded from and saved to.
pub trait SettingsStore {
  fn load(&self) -> Result<Settings>;
  fn save(&self, settings: &Settings) -> Result<()>;
}

/// The config directory, `RECASE_CONFIG_DIR` taking precedence.
pub fn config_dir() -> Result<PathBuf> {
  if let Ok(dir) = std::env::var("RECASE_CONFIG_DIR") {
    return Ok(PathBuf::from(dir));
  }
  let strategy = choose_base_strategy().map_err(|_| SettingsError::NoConfigDir)?;
  let mut path = strategy.config_dir();
  path.push("recase");
  Ok(path)
}

/// Settings kept in a TOML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TomlSettingsStore {
  path: PathBuf,
}

impl TomlSettingsStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// `settings.toml` in [`config_dir`].
  pub fn default_location() -> Result<Self> {
    Ok(Self::new(config_dir()?.join("settings.toml")))
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn io_error(&self, source: io::Error) -> SettingsError {
    SettingsError::Io {
      path: self.path.clone(),
      source,
    }
  }
}

impl SettingsStore for TomlSettingsStore {
  fn load(&self) -> Result<Settings> {
    match std::fs::read_to_string(&self.path) {
      Ok(source) => Settings::from_toml(&source),
      Err(err) if err.kind() == io::ErrorKind::NotFound => {
        tracing::debug!(path = %self.path.display(), "no settings file, using defaults");
        Ok(Settings::default())
      },
      Err(err) => Err(self.io_error(err)),
    }
  }

  fn save(&self, settings: &Settings) -> Result<()> {
    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
    }
    std::fs::write(&self.path, settings.to_toml()?).map_err(|err| self.io_error(err))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults() {
    assert!(Settings::default().sync_case_across_multiple_cursors);
    assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
  }

  #[test]
  fn parse_kebab_case_key() {
    let settings = Settings::from_toml("sync-case-across-multiple-cursors = false").unwrap();
    assert!(!settings.sync_case_across_multiple_cursors);
  }

  #[test]
  fn unknown_keys_are_rejected() {
    assert!(matches!(
      Settings::from_toml("sync_case = true"),
      Err(SettingsError::Parse(_))
    ));
    assert!(Settings::from_toml("sync-case-across-multiple-cursors = 1").is_err());
  }

  #[test]
  fn missing_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = TomlSettingsStore::new(dir.path().join("nope").join("settings.toml"));
    assert_eq!(store.load().unwrap(), Settings::default());
  }

  #[test]
  fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = TomlSettingsStore::new(dir.path().join("recase").join("settings.toml"));
    let settings = Settings {
      sync_case_across_multiple_cursors: false,
    };

    store.save(&settings).unwrap();
    assert_eq!(store.load().unwrap(), settings);

    let written = std::fs::read_to_string(store.path()).unwrap();
    assert!(written.contains("sync-case-across-multiple-cursors = false"));
  }

  #[test]
  fn bad_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "sync-case-across-multiple-cursors = [").unwrap();

    let err = TomlSettingsStore::new(path).load().unwrap_err();
    assert!(matches!(err, SettingsError::Parse(_)));
  }
}
