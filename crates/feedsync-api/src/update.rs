//! Handlers for `/update/{kind}`.
//!
//! | Method | Path | Success |
//! |--------|------|---------|
//! | `POST` | `/update/builds` | 201 created, 200 updated / unchanged |
//! | `POST` | `/update/feed` | 201 created, 200 updated / unchanged |
//! | `POST` | `/update/toots` | 201 upserted |
//!
//! The body is the record as a flat JSON object.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use feedsync_core::{Outcome, Record, RecordKind, store::SyncStore};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{ApiState, error::ApiError};

#[derive(Debug, Serialize)]
pub struct ReconcileResponse {
  pub outcome: Outcome,
  pub message: String,
}

fn label(kind: RecordKind) -> &'static str {
  match kind {
    RecordKind::Channel => "build",
    RecordKind::FeedItem => "feed",
    RecordKind::Toot => "toot",
  }
}

fn message(kind: RecordKind, outcome: Outcome) -> String {
  let label = label(kind);
  match outcome {
    Outcome::Created => format!("{label} record added"),
    Outcome::Updated => format!("{label} record updated"),
    Outcome::Unchanged => format!("no update needed for the {label} record"),
    Outcome::Upserted => format!("{label} record saved"),
  }
}

/// `POST /update/{kind}`
pub async fn reconcile<S>(
  State(state): State<ApiState<S>>,
  Path(kind): Path<String>,
  Json(fields): Json<Map<String, Value>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SyncStore,
{
  let kind: RecordKind = kind.parse()?;
  let record = Record::from_fields(kind, fields)?;

  let outcome = state
    .store
    .reconcile(record)
    .await
    .map_err(|e| ApiError::store(format!("error updating {kind} table"), e))?;

  let status = if outcome.is_creation() { StatusCode::CREATED } else { StatusCode::OK };
  Ok((status, Json(ReconcileResponse { outcome, message: message(kind, outcome) })))
}
