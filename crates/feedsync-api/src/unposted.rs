//! `GET /unposted/{sink}`: one feed item not yet cross-posted to `sink`.

use axum::{
  Json,
  extract::{Path, State},
};
use feedsync_core::{Row, store::SyncStore};

use crate::{ApiState, error::ApiError};

/// 200 with the item as a JSON object, 404 when everything has been posted.
/// `sink` must be one of the configured sink tables (400 otherwise).
pub async fn handler<S>(
  State(state): State<ApiState<S>>,
  Path(sink): Path<String>,
) -> Result<Json<Row>, ApiError>
where
  S: SyncStore,
{
  let sink = state.sinks.resolve(&sink)?;

  state
    .store
    .select_unposted(&sink)
    .await
    .map_err(|e| ApiError::store("error reading feed table", e))?
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("no unposted feed items for {sink}")))
}
