//! Record data model.
//!
//! A [`Record`] is one unit of work history. Records are created once by the
//! loader and are never mutated afterwards; the query pipeline only selects,
//! reorders and copies them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InvalidQueryError;

/// The loaded record collection, in source order.
pub type RecordCollection = Vec<Record>;

/// Final state of a unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Work finished successfully.
    Completed,
    /// Work was canceled before finishing.
    Canceled,
    /// Work failed.
    Error,
}

impl Status {
    /// All statuses, in declaration order.
    pub const ALL: [Status; 3] = [Status::Completed, Status::Canceled, Status::Error];

    /// Parse a status name, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Result<Self, InvalidQueryError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "COMPLETED" => Ok(Status::Completed),
            "CANCELED" => Ok(Status::Canceled),
            "ERROR" => Ok(Status::Error),
            _ => Err(InvalidQueryError::InvalidStatus(value.to_string())),
        }
    }

    /// Canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Completed => "COMPLETED",
            Status::Canceled => "CANCELED",
            Status::Error => "ERROR",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of work history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Record identifier. Expected unique, not enforced.
    pub id: i64,
    /// Free-text name.
    pub name: String,
    /// Creation time. Epoch zero when the source had none.
    #[serde(with = "created_on_format")]
    pub created_on: DateTime<Utc>,
    /// Final status.
    pub status: Status,
    /// Free-text description.
    pub description: String,
    /// Delta value.
    pub delta: i64,
}

impl Record {
    /// Create a record with an epoch-zero timestamp, empty description and zero delta.
    pub fn new(id: i64, name: impl Into<String>, status: Status) -> Self {
        Self {
            id,
            name: name.into(),
            created_on: DateTime::<Utc>::UNIX_EPOCH,
            status,
            description: String::new(),
            delta: 0,
        }
    }

    /// Set the creation time.
    pub fn with_created_on(mut self, created_on: DateTime<Utc>) -> Self {
        self.created_on = created_on;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the delta.
    pub fn with_delta(mut self, delta: i64) -> Self {
        self.delta = delta;
        self
    }
}

/// `createdOn` as rendered to clients: UTC, `yyyy-MM-dd HH:mm:ss`.
pub mod created_on_format {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Output pattern for `createdOn`.
    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}
