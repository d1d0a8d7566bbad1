//! Log entry types.
//!
//! The remote console speaks its own field names (`log_id`,
//! `color_text`, `clientRemark`); serde renames map them onto domain
//! names. `RawLogEntry` is what arrives on the wire — its timestamp is
//! optional because remotes older than the supported version omit it.
//! `LogEntry` is the validated form stored in the canonical log, where
//! the timestamp is guaranteed present.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error produced when a wire entry cannot be promoted to a canonical one.
#[derive(Debug, Error)]
pub enum EntryError {
    /// The remote sent an entry without a timestamp. This only happens
    /// with remote builds older than the supported console version.
    #[error("log entry {id} has no timestamp (remote console too old)")]
    MissingTimestamp {
        /// Remote-assigned id of the offending entry.
        id: i64,
    },
}

/// A log entry as returned by the remote console, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLogEntry {
    /// Remote-assigned id. Used only as a fetch cursor, never for ordering.
    #[serde(rename = "log_id")]
    pub id: i64,
    /// Timestamp of the entry. Absent on incompatible remote versions.
    pub time: Option<f64>,
    /// Plain log text.
    pub text: String,
    /// Log text with the remote's decoration (color codes) applied.
    #[serde(rename = "color_text")]
    pub decorated_text: String,
    /// Free-form note attached by a client, if any.
    #[serde(rename = "clientRemark", skip_serializing_if = "Option::is_none")]
    pub client_note: Option<String>,
}

/// A validated log entry held in the canonical log.
///
/// Identical to [`RawLogEntry`] except the timestamp is guaranteed.
/// Entries are immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Remote-assigned id. Used only as a fetch cursor, never for ordering.
    #[serde(rename = "log_id")]
    pub id: i64,
    /// Timestamp of the entry. Canonical ordering key.
    pub time: f64,
    /// Plain log text.
    pub text: String,
    /// Log text with the remote's decoration applied.
    #[serde(rename = "color_text")]
    pub decorated_text: String,
    /// Free-form note attached by a client, if any.
    #[serde(rename = "clientRemark", skip_serializing_if = "Option::is_none")]
    pub client_note: Option<String>,
}

impl TryFrom<RawLogEntry> for LogEntry {
    type Error = EntryError;

    fn try_from(raw: RawLogEntry) -> Result<Self, Self::Error> {
        let time = raw.time.ok_or(EntryError::MissingTimestamp { id: raw.id })?;
        Ok(Self {
            id: raw.id,
            time,
            text: raw.text,
            decorated_text: raw.decorated_text,
            client_note: raw.client_note,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_entry_decodes_wire_field_names() {
        let json = r#"{
            "log_id": 42,
            "time": 1700000000.5,
            "text": "server started",
            "color_text": "§aserver started",
            "clientRemark": "boot"
        }"#;
        let entry: RawLogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, 42);
        assert_eq!(entry.time, Some(1700000000.5));
        assert_eq!(entry.text, "server started");
        assert_eq!(entry.client_note.as_deref(), Some("boot"));
    }

    #[test]
    fn raw_entry_tolerates_missing_optional_fields() {
        let json = r#"{"log_id": 1, "text": "hi", "color_text": "hi"}"#;
        let entry: RawLogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.time, None);
        assert_eq!(entry.client_note, None);
    }

    #[test]
    fn validation_promotes_timestamped_entries() {
        let raw = RawLogEntry {
            id: 7,
            time: Some(3.0),
            text: "a".into(),
            decorated_text: "a".into(),
            client_note: None,
        };
        let entry = LogEntry::try_from(raw).unwrap();
        assert_eq!(entry.time, 3.0);
        assert_eq!(entry.id, 7);
    }

    #[test]
    fn validation_rejects_missing_timestamp() {
        let raw = RawLogEntry {
            id: 9,
            time: None,
            text: "a".into(),
            decorated_text: "a".into(),
            client_note: None,
        };
        let err = LogEntry::try_from(raw).unwrap_err();
        assert!(matches!(err, EntryError::MissingTimestamp { id: 9 }));
        assert!(format!("{err}").contains("remote console too old"));
    }

    #[test]
    fn canonical_entry_serializes_wire_field_names() {
        let entry = LogEntry {
            id: 3,
            time: 5.0,
            text: "done".into(),
            decorated_text: "done".into(),
            client_note: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["log_id"], 3);
        assert_eq!(json["color_text"], "done");
        assert!(json.get("clientRemark").is_none());
    }
}
