//! Error types for `feedsync-core`.
//!
//! Everything in here is a client-side problem with the submitted data; the
//! HTTP layer maps these to `400 Bad Request`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("missing natural key `{0}`")]
  MissingKey(&'static str),

  #[error("natural key `{column}` must be a non-empty string or a number")]
  InvalidKey { column: &'static str },

  #[error("field `{column}` expects {expected}, got {got}")]
  FieldType {
    column:   &'static str,
    expected: &'static str,
    got:      &'static str,
  },

  #[error("invalid table identifier: {0:?}")]
  InvalidIdentifier(String),

  #[error("sink table {0:?} is not configured")]
  UnknownSink(String),

  #[error("unknown record kind: {0:?}")]
  UnknownKind(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
