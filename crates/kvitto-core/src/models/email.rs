//! Email record model produced by the input normalizer.

use serde::{Deserialize, Serialize};

/// A single email from a ride-hailing export.
///
/// Only `body` is actually parsed; the other fields are carried through for
/// diagnostics. Exports are inconsistent about which metadata they include,
/// so everything except the body is optional and unknown keys are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailRecord {
    /// Provider-assigned message id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Subject line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Date header as the export recorded it (not parsed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Receipt body text.
    #[serde(default)]
    pub body: String,
}

impl EmailRecord {
    /// Create a record from bare body text.
    pub fn from_body(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    /// Label used in diagnostics: the id when present, otherwise the
    /// record's position in the batch.
    pub fn label(&self, index: usize) -> String {
        match &self.id {
            Some(id) => format!("email {} (#{})", id, index + 1),
            None => format!("email #{}", index + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{"id": "abc", "subject": "Ditt kvitto", "date": "2025-07-05", "body": "Totalt 150,50 kr"}"#;
        let record: EmailRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_deref(), Some("abc"));
        assert_eq!(record.body, "Totalt 150,50 kr");
    }

    #[test]
    fn test_deserialize_body_only() {
        let record: EmailRecord = serde_json::from_str(r#"{"body": "hi"}"#).unwrap();
        assert!(record.id.is_none());
        assert_eq!(record.body, "hi");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let record: EmailRecord =
            serde_json::from_str(r#"{"body": "hi", "thread_id": 42}"#).unwrap();
        assert_eq!(record.body, "hi");
    }

    #[test]
    fn test_label() {
        let record = EmailRecord::from_body("x");
        assert_eq!(record.label(0), "email #1");

        let record = EmailRecord {
            id: Some("m-9".into()),
            ..EmailRecord::default()
        };
        assert_eq!(record.label(2), "email m-9 (#3)");
    }
}
