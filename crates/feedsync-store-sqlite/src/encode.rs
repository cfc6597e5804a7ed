//! Conversions between [`Cell`]s and SQLite values, and the SQL text built
//! from kind descriptors.
//!
//! Every identifier is double-quoted; every value is a numbered parameter
//! whose index is the column's position in the descriptor plus one, so the
//! same parameter vector binds all statements for a kind.

use feedsync_core::{
  Row,
  codec::{self, Cell},
  kind::KindDescriptor,
};
use rusqlite::types::Value as SqlValue;

use crate::Result;

// ─── Values ──────────────────────────────────────────────────────────────────

pub fn cell_to_sql(cell: Cell) -> SqlValue {
  match cell {
    Cell::Null => SqlValue::Null,
    Cell::Integer(i) => SqlValue::Integer(i),
    Cell::Real(f) => SqlValue::Real(f),
    Cell::Text(s) => SqlValue::Text(s),
  }
}

pub fn cell_from_sql(value: SqlValue) -> Cell {
  match value {
    SqlValue::Null => Cell::Null,
    SqlValue::Integer(i) => Cell::Integer(i),
    SqlValue::Real(f) => Cell::Real(f),
    SqlValue::Text(s) => Cell::Text(s),
    SqlValue::Blob(b) => Cell::Text(String::from_utf8_lossy(&b).into_owned()),
  }
}

/// Read every column of a result row as a [`Cell`].
pub fn read_cells(row: &rusqlite::Row<'_>, n: usize) -> rusqlite::Result<Vec<Cell>> {
  (0..n)
    .map(|i| row.get::<_, SqlValue>(i).map(cell_from_sql))
    .collect()
}

/// Decode raw cells into a [`Row`], using the descriptor's column types where
/// the column is known.
pub fn decode_row(
  desc: &KindDescriptor,
  names: Vec<String>,
  cells: Vec<Cell>,
) -> Result<Row> {
  names
    .into_iter()
    .zip(cells)
    .map(|(name, cell)| {
      let value = match desc.column(&name) {
        Some(col) => codec::decode(col.ty, cell)?,
        None => codec::decode_plain(cell),
      };
      Ok::<_, crate::Error>((name, value))
    })
    .collect()
}

// ─── SQL text ────────────────────────────────────────────────────────────────

pub fn quote(ident: &str) -> String { format!("\"{}\"", ident.replace('"', "\"\"")) }

fn column_list(desc: &KindDescriptor) -> String {
  desc
    .columns
    .iter()
    .map(|c| quote(c.name))
    .collect::<Vec<_>>()
    .join(", ")
}

/// 1-based parameter index of `column`.
pub fn param_index(desc: &KindDescriptor, column: &str) -> usize {
  desc
    .columns
    .iter()
    .position(|c| c.name == column)
    .map_or(0, |i| i + 1)
}

pub fn select_freshness_sql(desc: &KindDescriptor, freshness: &str) -> String {
  format!(
    "SELECT {} FROM {} WHERE {} = ?1",
    quote(freshness),
    quote(desc.table),
    quote(desc.key),
  )
}

pub fn select_by_key_sql(desc: &KindDescriptor) -> String {
  format!(
    "SELECT {} FROM {} WHERE {} = ?1",
    column_list(desc),
    quote(desc.table),
    quote(desc.key),
  )
}

pub fn insert_sql(desc: &KindDescriptor) -> String {
  let params = (1..=desc.columns.len())
    .map(|i| format!("?{i}"))
    .collect::<Vec<_>>()
    .join(", ");
  format!(
    "INSERT INTO {} ({}) VALUES ({params})",
    quote(desc.table),
    column_list(desc),
  )
}

pub fn update_sql(desc: &KindDescriptor) -> String {
  let sets = desc
    .value_columns()
    .map(|c| format!("{} = ?{}", quote(c.name), param_index(desc, c.name)))
    .collect::<Vec<_>>()
    .join(", ");
  format!(
    "UPDATE {} SET {sets} WHERE {} = ?{}",
    quote(desc.table),
    quote(desc.key),
    param_index(desc, desc.key),
  )
}

/// Single-statement insert-or-overwrite of every non-key column.
pub fn upsert_sql(desc: &KindDescriptor) -> String {
  let sets = desc
    .value_columns()
    .map(|c| format!("{0} = excluded.{0}", quote(c.name)))
    .collect::<Vec<_>>()
    .join(", ");
  format!(
    "{} ON CONFLICT ({}) DO UPDATE SET {sets}",
    insert_sql(desc),
    quote(desc.key),
  )
}
