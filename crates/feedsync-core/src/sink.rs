//! Sink tables: the per-destination "already posted" tables consulted by the
//! unposted-item selector.
//!
//! A sink name ends up inside SQL text, so it is only ever accepted through
//! [`SinkRegistry::resolve`], which checks identifier syntax and the
//! configured allow-list.

use std::{collections::BTreeSet, fmt};

use crate::{Error, Result, kind::RecordKind};

const MAX_IDENT_LEN: usize = 63;

/// A validated sink table identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SinkTable(String);

impl SinkTable {
  /// Validate identifier syntax: `[A-Za-z_][A-Za-z0-9_]*`, at most 63 bytes,
  /// and not one of the record tables.
  pub fn new(name: &str) -> Result<Self> {
    let mut chars = name.chars();
    let head_ok = chars
      .next()
      .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let tail_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !head_ok || !tail_ok || name.len() > MAX_IDENT_LEN {
      return Err(Error::InvalidIdentifier(name.to_owned()));
    }
    if RecordKind::ALL
      .iter()
      .any(|k| k.as_str().eq_ignore_ascii_case(name))
    {
      return Err(Error::InvalidIdentifier(name.to_owned()));
    }
    Ok(Self(name.to_owned()))
  }

  pub fn as_str(&self) -> &str { &self.0 }

  /// The identifier wrapped in double quotes for SQL.
  pub fn quoted(&self) -> String { format!("\"{}\"", self.0) }
}

impl fmt::Display for SinkTable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// The allow-list of sink tables known at start-up.
#[derive(Debug, Clone, Default)]
pub struct SinkRegistry {
  tables: BTreeSet<SinkTable>,
}

impl SinkRegistry {
  pub fn new<I, S>(names: I) -> Result<Self>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let tables = names
      .into_iter()
      .map(|n| SinkTable::new(n.as_ref()))
      .collect::<Result<_>>()?;
    Ok(Self { tables })
  }

  /// Resolve a caller-supplied name to an allow-listed sink table.
  pub fn resolve(&self, name: &str) -> Result<SinkTable> {
    let table = SinkTable::new(name)?;
    if self.tables.contains(&table) {
      Ok(table)
    } else {
      Err(Error::UnknownSink(name.to_owned()))
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = &SinkTable> { self.tables.iter() }

  pub fn is_empty(&self) -> bool { self.tables.is_empty() }
}
