//! Domain records persisted by the dashboard.
//!
//! # Responsibility
//! - Define the stored shapes of users, tasks, notes and quick notes.
//! - Define creation inputs and partial-update patches.
//!
//! # Invariants
//! - Persisted field names are camelCase.
//! - Timestamps are RFC 3339 with millisecond precision in UTC.
//! - Patches never touch `id`, `userId` or `createdAt`.

pub mod note;
pub mod quick_note;
pub mod task;
pub mod user;

/// Serde adapter: `DateTime<Utc>` as `2025-01-01T09:00:00.000Z`.
pub(crate) mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Serde adapter: optional calendar date stored as `YYYY-MM-DD`, or `""` when unset.
///
/// Reads also accept `null` and full RFC 3339 timestamps (date part kept).
pub(crate) mod due_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const DATE_FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.serialize_str(&date.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => parse(text).map(Some).map_err(serde::de::Error::custom),
        }
    }

    pub fn parse(text: &str) -> Result<NaiveDate, String> {
        let date_part = text.get(..10).unwrap_or(text);
        NaiveDate::parse_from_str(date_part, DATE_FORMAT)
            .map_err(|err| format!("invalid due date `{text}`: {err}"))
    }
}

pub use due_date::parse as parse_due_date;

/// Splits comma-separated tag input, trimming and dropping empty entries.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
