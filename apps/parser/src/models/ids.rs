use std::fmt;

use serde::{Deserialize, Serialize};

/// A job or candidate identifier as sent by the backend.
///
/// Integer and UUID primary keys both arrive here. The incoming JSON type is echoed back
/// in responses, and the database compares against `id::text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// Textual form used for `WHERE id::text = $1`.
    pub fn as_text(&self) -> String {
        match self {
            RecordId::Int(n) => n.to_string(),
            RecordId::Text(s) => s.clone(),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, RecordId::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserializes_numbers_and_strings() {
        let n: RecordId = serde_json::from_value(json!(17)).unwrap();
        let s: RecordId = serde_json::from_value(json!("a1b2")).unwrap();
        assert_eq!(n, RecordId::Int(17));
        assert_eq!(s, RecordId::Text("a1b2".into()));
        assert_eq!(n.as_text(), "17");
        assert_eq!(s.to_string(), "a1b2");
    }

    #[test]
    fn test_serializes_as_received_json_type() {
        assert_eq!(serde_json::to_value(RecordId::Int(5)).unwrap(), json!(5));
        assert_eq!(
            serde_json::to_value(RecordId::Text("5".into())).unwrap(),
            json!("5")
        );
    }

    #[test]
    fn test_blank() {
        assert!(RecordId::Text("  ".into()).is_blank());
        assert!(!RecordId::Int(0).is_blank());
        assert!(serde_json::from_value::<RecordId>(json!(true)).is_err());
    }
}
