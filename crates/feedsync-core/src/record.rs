//! [`Record`]: one validated, encoded incoming record.

use serde_json::{Map, Value};

use crate::{
  Error, Result,
  codec::{self, Cell},
  kind::{KindDescriptor, RecordKind},
};

/// An incoming record after validation and encoding.
///
/// Holds exactly one cell per declared column, in descriptor order. Fields the
/// kind does not declare are dropped and listed in [`Record::ignored`].
#[derive(Debug, Clone)]
pub struct Record {
  kind:    RecordKind,
  key:     String,
  cells:   Vec<Cell>,
  ignored: Vec<String>,
}

impl Record {
  /// Validate `fields` against the column set of `kind` and encode them.
  ///
  /// Missing fields become NULL. The natural key must be present and be a
  /// non-empty string or a number.
  pub fn from_fields(kind: RecordKind, fields: Map<String, Value>) -> Result<Self> {
    let desc = kind.descriptor();

    let key = match fields.get(desc.key) {
      None | Some(Value::Null) => return Err(Error::MissingKey(desc.key)),
      Some(Value::String(s)) if !s.is_empty() => s.clone(),
      Some(Value::Number(n)) => n.to_string(),
      Some(_) => return Err(Error::InvalidKey { column: desc.key }),
    };

    let cells = desc
      .columns
      .iter()
      .map(|col| {
        if col.name == desc.key {
          Ok(Cell::Text(key.clone()))
        } else {
          codec::encode(col, fields.get(col.name).unwrap_or(&Value::Null))
        }
      })
      .collect::<Result<Vec<_>>>()?;

    let ignored = fields
      .keys()
      .filter(|name| desc.column(name).is_none())
      .cloned()
      .collect();

    Ok(Self { kind, key, cells, ignored })
  }

  pub fn kind(&self) -> RecordKind { self.kind }

  pub fn descriptor(&self) -> &'static KindDescriptor { self.kind.descriptor() }

  /// The natural key, rendered as text.
  pub fn key(&self) -> &str { &self.key }

  /// Cells in descriptor column order.
  pub fn cells(&self) -> &[Cell] { &self.cells }

  pub fn cell(&self, column: &str) -> Option<&Cell> {
    let idx = self.descriptor().columns.iter().position(|c| c.name == column)?;
    self.cells.get(idx)
  }

  /// The incoming freshness value, if this kind has one.
  pub fn freshness(&self) -> Option<&Cell> {
    self.descriptor().freshness.and_then(|f| self.cell(f))
  }

  /// Names of submitted fields outside the declared column set.
  pub fn ignored(&self) -> &[String] { &self.ignored }

  /// Consume the record, yielding `(column, cell)` pairs in column order.
  pub fn into_columns(self) -> impl Iterator<Item = (&'static str, Cell)> {
    let desc = self.kind.descriptor();
    desc.columns.iter().map(|c| c.name).zip(self.cells)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn fields(v: Value) -> Map<String, Value> {
    match v {
      Value::Object(m) => m,
      _ => panic!("test fixture must be an object"),
    }
  }

  #[test]
  fn channel_record_fills_missing_columns_with_null() {
    let r = Record::from_fields(
      RecordKind::Channel,
      fields(json!({"link": "http://x", "lastBuildDate": "2024-01-01"})),
    )
    .unwrap();

    assert_eq!(r.key(), "http://x");
    assert_eq!(r.cells().len(), RecordKind::Channel.descriptor().columns.len());
    assert_eq!(r.freshness(), Some(&Cell::Text("2024-01-01".into())));
    assert_eq!(r.cell("title"), Some(&Cell::Null));
  }

  #[test]
  fn missing_key_is_rejected() {
    let err = Record::from_fields(RecordKind::FeedItem, fields(json!({"title": "t"})))
      .unwrap_err();
    assert!(matches!(err, Error::MissingKey("guid")));

    let err = Record::from_fields(RecordKind::FeedItem, fields(json!({"guid": null})))
      .unwrap_err();
    assert!(matches!(err, Error::MissingKey("guid")));
  }

  #[test]
  fn empty_or_structured_key_is_rejected() {
    for bad in [json!(""), json!({"a": 1}), json!([1]), json!(true)] {
      let err = Record::from_fields(RecordKind::Toot, fields(json!({"id": bad})))
        .unwrap_err();
      assert!(matches!(err, Error::InvalidKey { column: "id" }));
    }
  }

  #[test]
  fn numeric_key_is_rendered_as_text() {
    let r = Record::from_fields(RecordKind::Toot, fields(json!({"id": 109876}))).unwrap();
    assert_eq!(r.key(), "109876");
    assert_eq!(r.cell("id"), Some(&Cell::Text("109876".into())));
  }

  #[test]
  fn unknown_fields_are_ignored_not_stored() {
    let r = Record::from_fields(
      RecordKind::FeedItem,
      fields(json!({"guid": "g1", "author": "someone", "category": "x"})),
    )
    .unwrap();
    assert_eq!(r.ignored(), ["author", "category"]);
    assert!(r.cell("author").is_none());
  }

  #[test]
  fn toot_without_freshness_column() {
    let r = Record::from_fields(
      RecordKind::Toot,
      fields(json!({"id": "1", "account": {"acct": "a"}, "tags": []})),
    )
    .unwrap();
    assert_eq!(r.freshness(), None);
    assert_eq!(r.cell("account"), Some(&Cell::Text(r#"{"acct":"a"}"#.into())));
    assert_eq!(r.cell("tags"), Some(&Cell::Text("[]".into())));
    assert_eq!(r.cell("poll"), Some(&Cell::Null));
  }

  #[test]
  fn scalar_column_rejects_structured_value() {
    let err = Record::from_fields(
      RecordKind::Channel,
      fields(json!({"link": "l", "title": ["a", "b"]})),
    )
    .unwrap_err();
    assert!(matches!(err, Error::FieldType { column: "title", .. }));
  }
}
