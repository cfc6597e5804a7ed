//! Core types and trait definitions for the feedsync reconciliation service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::SyncStore`]; the HTTP layer depends on
//! that abstraction only.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod codec;
pub mod error;
pub mod kind;
pub mod outcome;
pub mod record;
pub mod row;
pub mod sink;
pub mod store;

pub use error::{Error, Result};
pub use kind::RecordKind;
pub use outcome::Outcome;
pub use record::Record;
pub use row::Row;
pub use sink::{SinkRegistry, SinkTable};
