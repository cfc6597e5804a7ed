//! Start-up wiring for the feedsync server: configuration, store and router.

use std::{path::Path, sync::Arc};

use anyhow::Context as _;
use axum::Router;
use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use feedsync_api::{ApiState, api_router};
use feedsync_core::SinkRegistry;
use feedsync_store_sqlite::{DatabaseConfig, SqliteStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

fn default_host() -> String { "127.0.0.1".into() }

fn default_port() -> u16 { 8080 }

/// Runtime server configuration, deserialised from `config.toml` and
/// `FEEDSYNC__*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:     String,
  #[serde(default = "default_port")]
  pub port:     u16,
  #[serde(default)]
  pub database: DatabaseConfig,
  /// Allow-listed sink tables for `/unposted/{sink}`.
  #[serde(default)]
  pub sinks:    Vec<String>,
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Load configuration from `path` (optional) layered under the environment.
///
/// `FEEDSYNC__DATABASE__PATH=/var/lib/feedsync.db` sets `database.path`;
/// `FEEDSYNC__SINKS=posted_mastodon,posted_bluesky` sets `sinks`.
pub fn load_config(path: &Path) -> anyhow::Result<ServerConfig> {
  let builder = Config::builder()
    .add_source(File::from(path).required(false))
    .add_source(
      Environment::with_prefix("FEEDSYNC")
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("sinks")
        .try_parsing(true),
    );
  build_config(builder)
}

fn build_config(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<ServerConfig> {
  builder
    .build()
    .context("failed to read configuration")?
    .try_deserialize()
    .context("failed to deserialise ServerConfig")
}

// ─── Start-up ────────────────────────────────────────────────────────────────

/// Connect the store, create configured sink tables and build the router.
///
/// This is the only place a database connection is established; a missing or
/// broken connection strategy fails here, before any request is served.
pub async fn build_app(config: &ServerConfig) -> anyhow::Result<Router> {
  let sinks = SinkRegistry::new(&config.sinks).context("invalid sink table in configuration")?;

  let store = SqliteStore::connect(&config.database)
    .await
    .context("failed to open database")?;

  for sink in sinks.iter() {
    store
      .ensure_sink(sink)
      .await
      .with_context(|| format!("failed to create sink table {sink}"))?;
  }
  if sinks.is_empty() {
    tracing::warn!("no sink tables configured; /unposted will reject every request");
  }

  let state = ApiState::new(Arc::new(store), sinks);
  Ok(api_router(state).layer(TraceLayer::new_for_http()))
}
