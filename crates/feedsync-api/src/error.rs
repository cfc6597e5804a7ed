//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// A storage failure. Only `message` reaches the client; the source is
  /// logged when the error is built.
  #[error("{message}: {source}")]
  Store {
    message: String,
    #[source]
    source:  Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  pub fn store<E>(message: impl Into<String>, err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    let message = message.into();
    tracing::error!(error = %err, "{message}");
    ApiError::Store { message, source: Box::new(err) }
  }
}

impl From<feedsync_core::Error> for ApiError {
  fn from(e: feedsync_core::Error) -> Self { ApiError::BadRequest(e.to_string()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
      ApiError::Store { message, .. } => (StatusCode::INTERNAL_SERVER_ERROR, message),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
