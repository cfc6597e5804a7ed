//! Record kinds and their table descriptors.
//!
//! Each kind declares its table, natural key, optional freshness column and
//! the full column set once. The reconciler is driven entirely by these
//! descriptors; nothing outside this module names a column.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Columns ─────────────────────────────────────────────────────────────────

/// How a column's value is encoded at rest. See [`crate::codec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
  Text,
  Integer,
  /// Stored as `0` / `1`, read back as a JSON boolean.
  Boolean,
  /// A structured value stored as canonical JSON text.
  Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
  pub name: &'static str,
  pub ty:   ColumnType,
}

const fn text(name: &'static str) -> Column { Column { name, ty: ColumnType::Text } }
const fn int(name: &'static str) -> Column { Column { name, ty: ColumnType::Integer } }
const fn boolean(name: &'static str) -> Column { Column { name, ty: ColumnType::Boolean } }
const fn json(name: &'static str) -> Column { Column { name, ty: ColumnType::Json } }

// ─── Descriptor ──────────────────────────────────────────────────────────────

/// Static description of one persisted record table.
#[derive(Debug)]
pub struct KindDescriptor {
  pub table:     &'static str,
  /// Natural key column; unique in the table.
  pub key:       &'static str,
  /// Change-detection column. `None` means every reconcile overwrites.
  pub freshness: Option<&'static str>,
  /// Every column of the table, key included, in schema order.
  pub columns:   &'static [Column],
}

impl KindDescriptor {
  pub fn column(&self, name: &str) -> Option<&'static Column> {
    self.columns.iter().find(|c| c.name == name)
  }

  /// Columns other than the natural key.
  pub fn value_columns(&self) -> impl Iterator<Item = &'static Column> + '_ {
    self.columns.iter().filter(move |c| c.name != self.key)
  }
}

static CHANNEL: KindDescriptor = KindDescriptor {
  table:     "builds",
  key:       "link",
  freshness: Some("lastBuildDate"),
  columns:   &[
    text("link"),
    text("title"),
    text("description"),
    text("generator"),
    text("language"),
    text("copyright"),
    text("lastBuildDate"),
    text("atom_link_href"),
    text("atom_link_rel"),
    text("atom_link_type"),
  ],
};

static FEED_ITEM: KindDescriptor = KindDescriptor {
  table:     "feed",
  key:       "guid",
  freshness: Some("pubDate"),
  columns:   &[
    text("guid"),
    text("title"),
    text("link"),
    text("pubDate"),
    text("description"),
  ],
};

static TOOT: KindDescriptor = KindDescriptor {
  table:     "toots",
  key:       "id",
  freshness: None,
  columns:   &[
    text("id"),
    text("created_at"),
    text("in_reply_to_id"),
    text("in_reply_to_account_id"),
    boolean("sensitive"),
    text("spoiler_text"),
    text("visibility"),
    text("language"),
    text("uri"),
    text("url"),
    text("site_url"),
    int("replies_count"),
    int("reblogs_count"),
    int("favourites_count"),
    boolean("favourited"),
    boolean("reblogged"),
    boolean("muted"),
    boolean("bookmarked"),
    boolean("pinned"),
    text("content"),
    json("filtered"),
    json("reblog"),
    json("application"),
    json("account"),
    json("media_attachments"),
    json("mentions"),
    json("tags"),
    json("emojis"),
    json("card"),
    json("poll"),
  ],
};

// ─── Kind ────────────────────────────────────────────────────────────────────

/// The three record shapes the service reconciles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
  /// RSS channel metadata.
  #[serde(rename = "builds")]
  Channel,
  /// One RSS item.
  #[serde(rename = "feed")]
  FeedItem,
  #[serde(rename = "toots")]
  Toot,
}

impl RecordKind {
  pub const ALL: [RecordKind; 3] = [Self::Channel, Self::FeedItem, Self::Toot];

  pub fn descriptor(self) -> &'static KindDescriptor {
    match self {
      Self::Channel => &CHANNEL,
      Self::FeedItem => &FEED_ITEM,
      Self::Toot => &TOOT,
    }
  }

  /// Table name; doubles as the URL segment.
  pub fn as_str(self) -> &'static str { self.descriptor().table }
}

impl fmt::Display for RecordKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for RecordKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|k| k.as_str() == s)
      .ok_or_else(|| Error::UnknownKind(s.to_owned()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_descriptor_declares_its_key_and_freshness() {
    for kind in RecordKind::ALL {
      let d = kind.descriptor();
      assert!(d.column(d.key).is_some(), "{kind}: key not in column set");
      if let Some(f) = d.freshness {
        assert!(d.column(f).is_some(), "{kind}: freshness not in column set");
      }
    }
  }

  #[test]
  fn toot_has_ten_structured_columns() {
    let n = RecordKind::Toot
      .descriptor()
      .columns
      .iter()
      .filter(|c| c.ty == ColumnType::Json)
      .count();
    assert_eq!(n, 10);
  }

  #[test]
  fn kind_parses_from_table_name() {
    assert_eq!("builds".parse::<RecordKind>().unwrap(), RecordKind::Channel);
    assert_eq!("feed".parse::<RecordKind>().unwrap(), RecordKind::FeedItem);
    assert_eq!("toots".parse::<RecordKind>().unwrap(), RecordKind::Toot);
    assert!("users".parse::<RecordKind>().is_err());
  }

  #[test]
  fn value_columns_exclude_key() {
    let d = RecordKind::FeedItem.descriptor();
    let names: Vec<_> = d.value_columns().map(|c| c.name).collect();
    assert_eq!(names, ["title", "link", "pubDate", "description"]);
  }
}
