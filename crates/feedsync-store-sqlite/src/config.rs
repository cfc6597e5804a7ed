//! Connection settings and strategy selection.

use std::path::PathBuf;

use serde::Deserialize;

use crate::{Error, Result};

fn default_busy_timeout_ms() -> u64 { 5_000 }

/// The `[database]` section of the server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  /// Path of the SQLite file. Takes precedence over `in_memory`.
  #[serde(default)]
  pub path:            Option<PathBuf>,
  /// Use a private in-memory database (tests and throwaway runs).
  #[serde(default)]
  pub in_memory:       bool,
  /// How long a statement waits on a locked database before failing.
  #[serde(default = "default_busy_timeout_ms")]
  pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
  fn default() -> Self {
    Self {
      path:            None,
      in_memory:       false,
      busy_timeout_ms: default_busy_timeout_ms(),
    }
  }
}

/// How the store obtains its connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
  File(PathBuf),
  Memory,
}

impl DatabaseConfig {
  /// Pick a strategy: a file path first, then in-memory.
  pub fn strategy(&self) -> Result<Strategy> {
    if let Some(path) = &self.path
      && !path.as_os_str().is_empty()
    {
      return Ok(Strategy::File(path.clone()));
    }
    if self.in_memory {
      return Ok(Strategy::Memory);
    }
    Err(Error::Connection(
      "missing database connection type; set database.path or database.in_memory".into(),
    ))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn path_wins_over_in_memory() {
    let cfg = DatabaseConfig {
      path: Some("/tmp/feed.db".into()),
      in_memory: true,
      ..Default::default()
    };
    assert_eq!(cfg.strategy().unwrap(), Strategy::File("/tmp/feed.db".into()));
  }

  #[test]
  fn in_memory_when_no_path() {
    let cfg = DatabaseConfig { in_memory: true, ..Default::default() };
    assert_eq!(cfg.strategy().unwrap(), Strategy::Memory);
  }

  #[test]
  fn nothing_configured_is_a_connection_error() {
    let err = DatabaseConfig::default().strategy().unwrap_err();
    assert!(matches!(err, Error::Connection(_)));

    let cfg = DatabaseConfig { path: Some(PathBuf::new()), ..Default::default() };
    assert!(matches!(cfg.strategy(), Err(Error::Connection(_))));
  }
}
