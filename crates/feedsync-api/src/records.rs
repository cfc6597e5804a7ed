//! `GET /records/{kind}/{key}`: read back one stored record.

use axum::{
  Json,
  extract::{Path, State},
};
use feedsync_core::{RecordKind, Row, store::SyncStore};

use crate::{ApiState, error::ApiError};

pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path((kind, key)): Path<(String, String)>,
) -> Result<Json<Row>, ApiError>
where
  S: SyncStore,
{
  let kind: RecordKind = kind.parse()?;
  state
    .store
    .fetch(kind, key.clone())
    .await
    .map_err(|e| ApiError::store(format!("error reading {kind} table"), e))?
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("{kind} record {key:?} not found")))
}
