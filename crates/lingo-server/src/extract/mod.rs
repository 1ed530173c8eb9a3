//! Enhanced HTTP request extractors with improved error handling and validation.
//!
//! Drop-in replacements for their axum counterparts whose rejections are
//! rendered as the server's error document instead of plain text.
//!
//! - [`Json`] - JSON deserialization with descriptive 400 responses
//! - [`ValidateJson`] - JSON extraction followed by `validator` rules
//! - [`Multipart`] - multipart form parsing with descriptive 400 responses

pub mod reject;

pub use crate::extract::reject::{Json, Multipart, ValidateJson};
