//! Reconcile outcomes.

use serde::{Deserialize, Serialize};

/// What a reconcile call did to the persisted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
  /// No row with the key existed; one was inserted.
  Created,
  /// The stored freshness value differed; the row was rewritten.
  Updated,
  /// The stored freshness value matched; nothing was written.
  Unchanged,
  /// Unconditional insert-or-overwrite (kinds without a freshness column).
  Upserted,
}

impl Outcome {
  /// `true` for outcomes reported to HTTP callers as `201 Created`.
  pub fn is_creation(self) -> bool { matches!(self, Self::Created | Self::Upserted) }

  pub fn wrote(self) -> bool { !matches!(self, Self::Unchanged) }
}
