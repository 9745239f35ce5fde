//! Domain DTOs for the todo API.
//!
//! # Design
//! Field names follow the hosted API's camelCase JSON. Records are decoded
//! leniently: absent or null `title`, `priority` and `isCompleted` fall back
//! to their defaults, and fields this crate does not model are kept in
//! `extra` so a record survives a decode/encode cycle byte-for-byte in
//! meaning.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Server-assigned record identifier.
pub type TodoId = i64;

/// Raw JSON fields of a record, as returned by the server.
pub type RecordFields = Map<String, Value>;

/// Priority as transmitted on the wire: `0`, `1`, `2`.
///
/// Values outside that range are kept in `Other` rather than rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
    Other(i64),
}

impl Priority {
    pub fn value(&self) -> i64 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
            Priority::Other(v) => *v,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Other(_) => "Unknown",
        }
    }
}

impl From<i64> for Priority {
    fn from(value: i64) -> Self {
        match value {
            0 => Priority::Low,
            1 => Priority::Medium,
            2 => Priority::High,
            other => Priority::Other(other),
        }
    }
}

impl From<Priority> for i64 {
    fn from(p: Priority) -> Self {
        p.value()
    }
}

/// A single todo record returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_completed: bool,
    #[serde(default, with = "instant_format")]
    pub due_at: Option<DateTime<Utc>>,
    /// Server fields not modelled above, preserved verbatim.
    #[serde(flatten)]
    pub extra: RecordFields,
}

impl Todo {
    /// Shallow-merge server-returned fields into this record. Only keys
    /// present in `fields` overwrite; everything else is left as is.
    pub fn merge_fields(&mut self, fields: RecordFields) -> Result<(), serde_json::Error> {
        let mut merged = serde_json::to_value(&*self)?;
        if let Value::Object(map) = &mut merged {
            map.extend(fields);
        }
        *self = serde_json::from_value(merged)?;
        Ok(())
    }
}

/// Request payload for `POST /todos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    #[serde(default, with = "instant_format")]
    pub due_at: Option<DateTime<Utc>>,
}

/// Request payload for `PUT /todos/{id}`. The API replaces the whole record,
/// so every field is always sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub priority: Priority,
    #[serde(default, with = "instant_format")]
    pub due_at: Option<DateTime<Utc>>,
}

/// Caller-side partial update. `None` means "keep the cached value".
///
/// `due_at` is doubly optional: `Some(None)` clears the due date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_completed: Option<bool>,
    pub priority: Option<Priority>,
    pub due_at: Option<Option<DateTime<Utc>>>,
}

impl UpdateFields {
    /// Fill every absent field from `current`, producing the full payload.
    pub fn resolve(self, current: &Todo) -> UpdateTodo {
        UpdateTodo {
            title: self
                .title
                .map(|t| t.trim().to_string())
                .unwrap_or_else(|| current.title.clone()),
            description: self
                .description
                .unwrap_or_else(|| current.description.clone().unwrap_or_default()),
            is_completed: self.is_completed.unwrap_or(current.is_completed),
            priority: self.priority.unwrap_or(current.priority),
            due_at: self.due_at.unwrap_or(current.due_at),
        }
    }
}

/// Parse a timestamp as sent by the API: RFC 3339, or an offset-less
/// ISO date-time taken as UTC.
pub fn parse_instant(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            text.parse::<NaiveDateTime>()
                .map(|naive| Utc.from_utc_datetime(&naive))
        })
}

/// Format an instant the way `Date.prototype.toISOString` does.
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

mod instant_format {
    use chrono::{DateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(instant) => serializer.serialize_str(&super::format_instant(instant)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(text) if text.is_empty() => Ok(None),
            Some(text) => super::parse_instant(&text).map(Some).map_err(D::Error::custom),
        }
    }
}
