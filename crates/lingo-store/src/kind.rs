use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoStaticStr};

/// Kind of persisted record; each kind lives in its own directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecordKind {
    /// Structured extraction of an uploaded document.
    Extraction,
    /// Submitted task.
    Task,
}

impl RecordKind {
    /// Returns the directory name, relative to the data root.
    pub const fn directory(self) -> &'static str {
        match self {
            Self::Extraction => "output",
            Self::Task => "tasks",
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn directories_are_distinct() {
        let dirs: Vec<_> = RecordKind::iter().map(RecordKind::directory).collect();
        assert_eq!(dirs, ["output", "tasks"]);
    }
}
