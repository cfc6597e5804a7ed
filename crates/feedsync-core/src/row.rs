//! [`Row`]: an ordered field map read back from the store.

use serde::{Serialize, Serializer, ser::SerializeMap as _};
use serde_json::Value;

/// Column/value pairs in table column order. Serializes as a JSON object
/// whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row(Vec<(String, Value)>);

impl Row {
  pub fn get(&self, column: &str) -> Option<&Value> {
    self.0.iter().find(|(c, _)| c == column).map(|(_, v)| v)
  }

  pub fn columns(&self) -> impl Iterator<Item = &str> { self.0.iter().map(|(c, _)| c.as_str()) }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl FromIterator<(String, Value)> for Row {
  fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
    Self(iter.into_iter().collect())
  }
}

impl Serialize for Row {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.0.len()))?;
    for (k, v) in &self.0 {
      map.serialize_entry(k, v)?;
    }
    map.end()
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn serializes_in_column_order() {
    let row: Row = [("guid".to_string(), json!("g")), ("title".to_string(), json!("t"))]
      .into_iter()
      .collect();
    let s = serde_json::to_string(&row).unwrap();
    assert_eq!(s, r#"{"guid":"g","title":"t"}"#);
    assert_eq!(row.get("title"), Some(&json!("t")));
  }
}
