use serde_json::Value;
use sqlx::FromRow;
use tracing::warn;

use crate::scoring::weights::Criteria;

/// Row shape of `SELECT description, criteria::text FROM jobs`.
///
/// Criteria is read as text so json, jsonb and JSON-encoded text columns all decode the same way.
#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub description: Option<String>,
    pub criteria: Option<String>,
}

/// A job as the scorer sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub description: String,
    pub criteria: Criteria,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            description: row.description.unwrap_or_default(),
            criteria: decode_criteria(row.criteria.as_deref()),
        }
    }
}

/// Decodes stored criteria, unwrapping JSON that was itself stored as a JSON string.
/// Anything that does not end up as an object is treated as no criteria.
pub fn decode_criteria(raw: Option<&str>) -> Criteria {
    let Some(raw) = raw else {
        return Criteria::new();
    };

    let mut value = serde_json::from_str::<Value>(raw).unwrap_or(Value::Null);
    while let Value::String(inner) = &value {
        let next = serde_json::from_str::<Value>(inner).unwrap_or(Value::Null);
        value = next;
    }

    match value {
        Value::Object(map) => map,
        Value::Null => {
            warn!("Job criteria is not valid JSON; scoring with no criteria");
            Criteria::new()
        }
        other => {
            warn!("Job criteria is not an object ({other}); scoring with no criteria");
            Criteria::new()
        }
    }
}
