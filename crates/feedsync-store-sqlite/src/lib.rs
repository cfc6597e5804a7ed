//! SQLite backend for the feedsync record tables.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod config;
pub mod error;

pub use config::{DatabaseConfig, Strategy};
pub use error::{Error, Result};
pub use store::SqliteStore;
