//! [`SqliteStore`]: the SQLite implementation of [`SyncStore`].

use std::{path::Path, time::Duration};

use feedsync_core::{
  Outcome, Record, RecordKind, Row, SinkTable,
  codec::Cell,
  store::SyncStore,
};
use rusqlite::{OptionalExtension as _, TransactionBehavior, params_from_iter};
use tracing::{debug, info};

use crate::{
  Result,
  config::{DatabaseConfig, Strategy},
  encode::{
    cell_from_sql, cell_to_sql, decode_row, insert_sql, param_index, quote, read_cells,
    select_by_key_sql, select_freshness_sql, update_sql, upsert_sql,
  },
  schema::{SCHEMA, sink_ddl},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The record tables, backed by a single SQLite database.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open the database selected by `config` and run schema initialisation.
  ///
  /// Fails with [`Error::Connection`](crate::Error::Connection) when no
  /// strategy is configured.
  pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
    let timeout = Duration::from_millis(config.busy_timeout_ms);
    let conn = match config.strategy()? {
      Strategy::File(path) => tokio_rusqlite::Connection::open(path).await?,
      Strategy::Memory => tokio_rusqlite::Connection::open_in_memory().await?,
    };
    Self::init(conn, Some(timeout)).await
  }

  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn, None).await
  }

  /// Open an in-memory store for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn, None).await
  }

  /// The busy timeout, when given, is in place before any schema statement
  /// runs.
  async fn init(conn: tokio_rusqlite::Connection, busy_timeout: Option<Duration>) -> Result<Self> {
    let store = Self { conn };
    if let Some(timeout) = busy_timeout {
      store.set_busy_timeout(timeout).await?;
    }
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn set_busy_timeout(&self, timeout: Duration) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.busy_timeout(timeout)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Create the sink table if it does not exist yet.
  pub async fn ensure_sink(&self, sink: &SinkTable) -> Result<()> {
    let ddl = sink_ddl(&sink.quoted());
    self
      .conn
      .call(move |conn| {
        conn.execute(&ddl, [])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Record that the feed item identified by `site_url` was posted to `sink`.
  ///
  /// Repeating the call for the same `site_url` is a no-op.
  pub async fn mark_posted(&self, sink: &SinkTable, site_url: Option<String>) -> Result<()> {
    let sql = format!("INSERT OR IGNORE INTO {} (site_url) VALUES (?1)", sink.quoted());
    self
      .conn
      .call(move |conn| {
        conn.execute(&sql, [site_url])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Compare-then-write inside one `BEGIN IMMEDIATE` transaction. The write
  /// lock is held from the lookup onward, so a concurrent writer on the same
  /// key cannot interleave between the read and the write.
  async fn reconcile_gated(&self, record: Record, freshness: &'static str) -> Result<Outcome> {
    let desc = record.descriptor();
    let select = select_freshness_sql(desc, freshness);
    let insert = insert_sql(desc);
    let update = update_sql(desc);
    let key_idx = param_index(desc, desc.key) - 1;

    let incoming = record.freshness().and_then(Cell::comparable);
    let params: Vec<_> = record.into_columns().map(|(_, c)| cell_to_sql(c)).collect();

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let stored: Option<rusqlite::types::Value> = tx
          .query_row(&select, [&params[key_idx]], |r| r.get(0))
          .optional()?;
        let same = stored.map(|v| cell_from_sql(v).comparable() == incoming);

        let outcome = match same {
          None => {
            tx.execute(&insert, params_from_iter(params.iter()))?;
            Outcome::Created
          }
          Some(true) => Outcome::Unchanged,
          Some(false) => {
            tx.execute(&update, params_from_iter(params.iter()))?;
            Outcome::Updated
          }
        };

        tx.commit()?;
        Ok(outcome)
      })
      .await?;

    Ok(outcome)
  }

  /// Single-statement insert-or-overwrite.
  async fn reconcile_upsert(&self, record: Record) -> Result<Outcome> {
    let upsert = upsert_sql(record.descriptor());
    let params: Vec<_> = record.into_columns().map(|(_, c)| cell_to_sql(c)).collect();

    self
      .conn
      .call(move |conn| {
        conn.execute(&upsert, params_from_iter(params.iter()))?;
        Ok(())
      })
      .await?;

    Ok(Outcome::Upserted)
  }
}

// ─── SyncStore impl ──────────────────────────────────────────────────────────

impl SyncStore for SqliteStore {
  type Error = crate::Error;

  async fn reconcile(&self, record: Record) -> Result<Outcome> {
    let kind = record.kind();
    let key = record.key().to_owned();

    if !record.ignored().is_empty() {
      debug!(%kind, %key, ignored = ?record.ignored(), "ignoring undeclared fields");
    }

    let outcome = match record.descriptor().freshness {
      Some(freshness) => self.reconcile_gated(record, freshness).await?,
      None => self.reconcile_upsert(record).await?,
    };

    if outcome.wrote() {
      info!(%kind, %key, ?outcome, "record reconciled");
    } else {
      debug!(%kind, %key, "record unchanged");
    }
    Ok(outcome)
  }

  async fn select_unposted(&self, sink: &SinkTable) -> Result<Option<Row>> {
    let desc = RecordKind::FeedItem.descriptor();
    // NOT IN yields no rows at all once the sink holds a NULL site_url.
    let sql = format!(
      "SELECT * FROM {} WHERE {} NOT IN (SELECT site_url FROM {}) LIMIT 1",
      quote(desc.table),
      quote(desc.key),
      sink.quoted(),
    );

    let raw = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let names: Vec<String> = stmt.column_names().into_iter().map(str::to_owned).collect();
        let n = names.len();
        let cells = stmt.query_row([], |r| read_cells(r, n)).optional()?;
        Ok(cells.map(|cells| (names, cells)))
      })
      .await?;

    match raw {
      Some((names, cells)) => {
        let row = decode_row(desc, names, cells)?;
        debug!(%sink, guid = ?row.get(desc.key), "selected unposted item");
        Ok(Some(row))
      }
      None => {
        debug!(%sink, "no unposted items");
        Ok(None)
      }
    }
  }

  async fn fetch(&self, kind: RecordKind, key: String) -> Result<Option<Row>> {
    let desc = kind.descriptor();
    let sql = select_by_key_sql(desc);
    let n = desc.columns.len();

    let cells = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, [key], |r| read_cells(r, n))
            .optional()?,
        )
      })
      .await?;

    let names = desc.columns.iter().map(|c| c.name.to_owned()).collect();
    cells.map(|cells| decode_row(desc, names, cells)).transpose()
  }
}
