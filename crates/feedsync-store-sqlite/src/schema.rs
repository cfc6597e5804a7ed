//! SQL schema for the feedsync SQLite store.
//!
//! Executed once at connection startup. Column names and order match the
//! kind descriptors in `feedsync_core::kind`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- RSS channel metadata, one row per channel link.
CREATE TABLE IF NOT EXISTS builds (
    link            TEXT PRIMARY KEY,
    title           TEXT,
    description     TEXT,
    generator       TEXT,
    language        TEXT,
    copyright       TEXT,
    lastBuildDate   TEXT,
    atom_link_href  TEXT,
    atom_link_rel   TEXT,
    atom_link_type  TEXT
);

CREATE TABLE IF NOT EXISTS feed (
    guid         TEXT PRIMARY KEY,
    title        TEXT,
    link         TEXT,
    pubDate      TEXT,
    description  TEXT
);

-- The last ten columns hold canonical JSON text.
CREATE TABLE IF NOT EXISTS toots (
    id                      TEXT PRIMARY KEY,
    created_at              TEXT,
    in_reply_to_id          TEXT,
    in_reply_to_account_id  TEXT,
    sensitive               INTEGER,   -- 0 | 1
    spoiler_text            TEXT,
    visibility              TEXT,
    language                TEXT,
    uri                     TEXT,
    url                     TEXT,
    site_url                TEXT,
    replies_count           INTEGER,
    reblogs_count           INTEGER,
    favourites_count        INTEGER,
    favourited              INTEGER,
    reblogged               INTEGER,
    muted                   INTEGER,
    bookmarked              INTEGER,
    pinned                  INTEGER,
    content                 TEXT,
    filtered                TEXT,
    reblog                  TEXT,
    application             TEXT,
    account                 TEXT,
    media_attachments       TEXT,
    mentions                TEXT,
    tags                    TEXT,
    emojis                  TEXT,
    card                    TEXT,
    poll                    TEXT
);
";

/// DDL for one sink table. `quoted` must be an already-quoted identifier.
pub fn sink_ddl(quoted: &str) -> String {
  format!("CREATE TABLE IF NOT EXISTS {quoted} (site_url TEXT PRIMARY KEY)")
}
