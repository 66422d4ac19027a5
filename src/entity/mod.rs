mod color;
mod note;

pub use color::{pastel, random_pastel};
pub use note::Note;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Note identity: creation time in milliseconds since the Unix epoch.
///
/// Two notes created within the same millisecond share an id. That collision
/// is accepted and never deduplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub i64);

impl NoteId {
    pub fn from_datetime(created: DateTime<Utc>) -> Self {
        Self(created.timestamp_millis())
    }

    /// Creation time encoded in the id, if it is a valid timestamp.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for NoteId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(NoteId)
    }
}
