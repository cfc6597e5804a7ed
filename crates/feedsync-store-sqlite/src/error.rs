//! Error type for `feedsync-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] feedsync_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// No usable connection strategy; fatal at start-up.
  #[error("connection error: {0}")]
  Connection(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
