use serde_json::{json, Value};

use crate::extraction::truncate_chars;
use crate::identity::IdentityResult;
use crate::scoring::models::ScoreResult;

/// Stored raw-text prefix, in characters.
pub const RAW_TEXT_CHAR_LIMIT: usize = 10_000;

/// Column values written to `candidates` once a resume has been processed.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub raw_text: String,
    pub parsed_data: Value,
    pub subscores: Value,
    pub score: f64,
    pub justification: Value,
}

impl CandidateUpdate {
    pub fn new(identity: &IdentityResult, text: &str, score: &ScoreResult) -> Self {
        Self {
            name: identity.name.clone(),
            email: identity.email.clone(),
            raw_text: truncate_chars(text, RAW_TEXT_CHAR_LIMIT).to_string(),
            parsed_data: json!({ "name": identity.name, "email": identity.email }),
            subscores: json!(score.subscores),
            score: score.total,
            justification: json!({
                "overall": score.justification,
                "contributions": score.contributions,
            }),
        }
    }
}
