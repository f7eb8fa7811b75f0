//! Decoding of the stored record document.
//!
//! The document is a JSON object whose `output` member holds the records.
//! Decoding is lenient: unknown members are ignored, `output` may be a single
//! object, and `createdOn` may be epoch milliseconds or an RFC 3339 string.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::error::LoadError;
use crate::model::{Record, RecordCollection, Status};

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    output: Option<OneOrMany<RawRecord>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    id: i64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    created_on: Option<RawTimestamp>,
    status: Status,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    delta: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(String),
}

impl RawTimestamp {
    /// Resolve to a UTC instant. `Ok(None)` means the timestamp is absent.
    fn resolve(&self, id: i64) -> Result<Option<DateTime<Utc>>, LoadError> {
        match self {
            RawTimestamp::Millis(millis) => Utc
                .timestamp_millis_opt(*millis)
                .single()
                .map(Some)
                .ok_or_else(|| LoadError::InvalidTimestamp {
                    id,
                    value: millis.to_string(),
                }),
            RawTimestamp::Text(text) if text.trim().is_empty() => Ok(None),
            RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(text.trim())
                .map(|ts| Some(ts.with_timezone(&Utc)))
                .map_err(|_| LoadError::InvalidTimestamp {
                    id,
                    value: text.clone(),
                }),
        }
    }
}

impl RawRecord {
    fn into_record(self) -> Result<Record, LoadError> {
        let created_on = match &self.created_on {
            Some(raw) => raw.resolve(self.id)?,
            None => None,
        };

        Ok(Record {
            id: self.id,
            name: self.name.unwrap_or_default(),
            // Missing timestamps sort as the oldest records.
            created_on: created_on.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            status: self.status,
            description: self.description.unwrap_or_default(),
            delta: self.delta.unwrap_or_default(),
        })
    }
}

/// Decode a record document into a collection, preserving source order.
pub fn decode_records(bytes: &[u8]) -> Result<RecordCollection, LoadError> {
    let envelope: Envelope = serde_json::from_slice(bytes)?;

    let raw = match envelope.output {
        Some(OneOrMany::Many(records)) => records,
        Some(OneOrMany::One(record)) => vec![record],
        None => Vec::new(),
    };

    raw.into_iter().map(RawRecord::into_record).collect()
}
