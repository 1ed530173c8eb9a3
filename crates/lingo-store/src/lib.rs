#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod kind;
mod record;
mod store;

pub use error::{Error, Result};
pub use kind::RecordKind;
pub use record::Record;
pub use store::RecordStore;

/// Tracing target for record store operations.
pub const TRACING_TARGET: &str = "lingo_store";

/// File extension of persisted records.
pub const RECORD_EXTENSION: &str = "json";
