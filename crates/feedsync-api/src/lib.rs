//! JSON HTTP API for feedsync.
//!
//! Exposes an axum [`Router`] backed by any [`SyncStore`]. TLS and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = feedsync_api::api_router(ApiState::new(store, sinks));
//! ```

pub mod error;
pub mod records;
pub mod unposted;
pub mod update;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use feedsync_core::{SinkRegistry, store::SyncStore};

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store: Arc<S>,
  pub sinks: Arc<SinkRegistry>,
}

impl<S> ApiState<S> {
  pub fn new(store: Arc<S>, sinks: SinkRegistry) -> Self {
    Self { store, sinks: Arc::new(sinks) }
  }
}

// Manual impl: `S` itself need not be `Clone`.
impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), sinks: Arc::clone(&self.sinks) }
  }
}

/// Build the API router for `state`.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: SyncStore + 'static,
{
  Router::new()
    .route("/update/{kind}", post(update::reconcile::<S>))
    .route("/unposted/{sink}", get(unposted::handler::<S>))
    .route("/records/{kind}/{key}", get(records::get_one::<S>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
