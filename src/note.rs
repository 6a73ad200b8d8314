//! The note record

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A single note, keyed by `filename`.
///
/// `timestamp` is a local, zone-less ISO-8601 datetime with microsecond
/// precision (`2024-05-01T09:30:12.123456`), or without a fraction on a
/// whole second (`2024-05-01T09:30:12`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub filename: String,
    pub subject: String,
    pub other_info: String,
    pub content: String,
    #[serde(with = "iso_timestamp")]
    pub timestamp: NaiveDateTime,
}

impl Note {
    /// Build a note stamped with the current local time
    pub fn new(
        filename: impl Into<String>,
        subject: impl Into<String>,
        other_info: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Note {
            filename: filename.into(),
            subject: subject.into(),
            other_info: other_info.into(),
            content: content.into(),
            timestamp: now(),
        }
    }

    /// Replace the content and refresh the timestamp.
    ///
    /// The timestamp never moves backwards, even if the wall clock does.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.timestamp = self.timestamp.max(now());
    }
}

/// Current local time, truncated to microseconds
pub fn now() -> NaiveDateTime {
    let now = chrono::Local::now().naive_local();
    now.with_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}

mod iso_timestamp {
    use chrono::{NaiveDateTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";
    /// Whole seconds carry no fraction, as in Python's `isoformat()`
    const FORMAT_WHOLE: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        let format = if ts.nanosecond() == 0 { FORMAT_WHOLE } else { FORMAT };
        serializer.serialize_str(&ts.format(format).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<NaiveDateTime>()
            .map_err(serde::de::Error::custom)
    }
}
