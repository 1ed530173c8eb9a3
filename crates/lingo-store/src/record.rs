use std::path::PathBuf;

use serde_json::Value;

/// A record read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// File name the record is addressed by, including the extension.
    pub filename: String,
    /// Full path of the record file.
    pub path: PathBuf,
    /// Parsed record contents.
    pub value: Value,
}

impl Record {
    /// Consumes the record and returns its contents.
    pub fn into_value(self) -> Value {
        self.value
    }
}
