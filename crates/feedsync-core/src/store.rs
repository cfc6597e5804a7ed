//! The `SyncStore` trait.
//!
//! Implemented by storage backends (e.g. `feedsync-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{kind::RecordKind, outcome::Outcome, record::Record, row::Row, sink::SinkTable};

/// Abstraction over the persisted record tables.
///
/// Every call is one self-contained unit of work. Implementations must make
/// each call atomic: a failed call leaves no partial writes behind.
pub trait SyncStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Reconcile one record against its table.
  ///
  /// Kinds with a freshness column insert (`Created`), rewrite the row when
  /// the stored freshness differs (`Updated`) or do nothing (`Unchanged`).
  /// Kinds without one always insert-or-overwrite (`Upserted`).
  fn reconcile(
    &self,
    record: Record,
  ) -> impl Future<Output = Result<Outcome, Self::Error>> + Send + '_;

  /// Return one feed item whose `guid` does not appear in the sink table's
  /// `site_url` column, or `None` if every item has been posted.
  fn select_unposted<'a>(
    &'a self,
    sink: &'a SinkTable,
  ) -> impl Future<Output = Result<Option<Row>, Self::Error>> + Send + 'a;

  /// Read back one persisted record by natural key.
  fn fetch(
    &self,
    kind: RecordKind,
    key: String,
  ) -> impl Future<Output = Result<Option<Row>, Self::Error>> + Send + '_;
}
