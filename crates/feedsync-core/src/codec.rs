//! The field codec: JSON values in, storage-neutral [`Cell`]s out, and back.
//!
//! Structured (`Json`) columns are stored as compact JSON text. serde_json's
//! default map is a `BTreeMap`, so object keys are always written sorted and
//! the same value always encodes to the same text.

use serde_json::{Number, Value};

use crate::{
  Error, Result,
  kind::{Column, ColumnType},
};

/// Bumped if the at-rest encoding of any [`ColumnType`] ever changes.
pub const CODEC_VERSION: u32 = 1;

/// A storage-neutral SQL value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
  Null,
  Integer(i64),
  Real(f64),
  Text(String),
}

impl Cell {
  /// Text rendering used for freshness comparison; `None` for NULL.
  pub fn comparable(&self) -> Option<String> {
    match self {
      Cell::Null => None,
      Cell::Integer(i) => Some(i.to_string()),
      Cell::Real(f) => Some(f.to_string()),
      Cell::Text(s) => Some(s.clone()),
    }
  }
}

fn type_name(v: &Value) -> &'static str {
  match v {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

fn mismatch(column: &Column, expected: &'static str, got: &Value) -> Error {
  Error::FieldType { column: column.name, expected, got: type_name(got) }
}

// ─── Encode ──────────────────────────────────────────────────────────────────

/// Encode one incoming field for `column`.
pub fn encode(column: &Column, value: &Value) -> Result<Cell> {
  if value.is_null() {
    return Ok(Cell::Null);
  }

  match column.ty {
    ColumnType::Text => match value {
      Value::String(s) => Ok(Cell::Text(s.clone())),
      Value::Number(n) => Ok(Cell::Text(n.to_string())),
      Value::Bool(b) => Ok(Cell::Text(b.to_string())),
      other => Err(mismatch(column, "a scalar", other)),
    },

    ColumnType::Integer => match value {
      Value::Number(n) => Ok(
        n.as_i64()
          .map(Cell::Integer)
          .or_else(|| n.as_f64().map(Cell::Real))
          .unwrap_or(Cell::Null),
      ),
      Value::String(s) => s
        .trim()
        .parse::<i64>()
        .map(Cell::Integer)
        .map_err(|_| mismatch(column, "an integer", value)),
      Value::Bool(b) => Ok(Cell::Integer(i64::from(*b))),
      other => Err(mismatch(column, "an integer", other)),
    },

    ColumnType::Boolean => match value {
      Value::Bool(b) => Ok(Cell::Integer(i64::from(*b))),
      Value::Number(n) => match n.as_i64() {
        Some(i @ (0 | 1)) => Ok(Cell::Integer(i)),
        _ => Err(mismatch(column, "a boolean", value)),
      },
      other => Err(mismatch(column, "a boolean", other)),
    },

    ColumnType::Json => Ok(Cell::Text(serde_json::to_string(value)?)),
  }
}

// ─── Decode ──────────────────────────────────────────────────────────────────

/// Decode a stored cell of type `ty` back into JSON.
pub fn decode(ty: ColumnType, cell: Cell) -> Result<Value> {
  Ok(match (ty, cell) {
    (_, Cell::Null) => Value::Null,
    (ColumnType::Boolean, Cell::Integer(i)) => Value::Bool(i != 0),
    (ColumnType::Json, Cell::Text(s)) => serde_json::from_str(&s)?,
    (_, cell) => decode_plain(cell),
  })
}

/// Decode a cell with no column type information.
pub fn decode_plain(cell: Cell) -> Value {
  match cell {
    Cell::Null => Value::Null,
    Cell::Integer(i) => Value::from(i),
    Cell::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
    Cell::Text(s) => Value::String(s),
  }
}
