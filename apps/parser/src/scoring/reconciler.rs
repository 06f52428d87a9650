//! Score reconciliation: asks the model for per-criterion scores and rebuilds every
//! derived number locally.
//!
//! Only the per-criterion `score` values are taken from the model. Contributions and the
//! total are recomputed from the normalized weights, and the criterion set comes from the
//! job, never from the reply.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::extraction::truncate_chars;
use crate::llm_client::{ChatModel, LlmError};
use crate::scoring::models::{round2, ScoreOrigin, ScoreResult, Subscore};
use crate::scoring::prompts::{build_scoring_prompt, SCORING_SYSTEM};
use crate::scoring::weights::{normalize_weights, Criteria, NormalizedWeights};

/// Resume prefix sent to the model, in characters.
pub const RESUME_CHAR_LIMIT: usize = 7000;

pub const FALLBACK_SCORE: f64 = 0.5;
pub const FALLBACK_REASON: &str = "Fallback neutral score";
pub const FALLBACK_JUSTIFICATION: &str =
    "Fallback justification: OpenAI failed or invalid response.";

#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("no JSON object found in response")]
    NoJsonObject,

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("'subscores' is not an object")]
    MalformedSubscores,

    #[error("malformed subscore entry for criterion '{0}'")]
    MalformedEntry(String),
}

#[derive(Debug, Error)]
enum ScoringError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("invalid model reply: {0}")]
    Reply(#[from] ReplyError),
}

/// Produces a [`ScoreResult`] for a resume against a job. Infallible: any model or
/// parsing failure yields the neutral fallback.
#[derive(Clone)]
pub struct ScoreReconciler {
    model: Arc<dyn ChatModel>,
}

impl ScoreReconciler {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    pub async fn score(
        &self,
        job_description: &str,
        resume_text: &str,
        criteria: &Criteria,
    ) -> ScoreResult {
        let weights = normalize_weights(criteria);

        match self.ask_model(job_description, resume_text, &weights).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Scoring fell back to neutral scores: {e}");
                fallback(&weights)
            }
        }
    }

    async fn ask_model(
        &self,
        job_description: &str,
        resume_text: &str,
        weights: &NormalizedWeights,
    ) -> Result<ScoreResult, ScoringError> {
        let weights_json = serde_json::to_string_pretty(weights).map_err(ReplyError::Json)?;
        let prompt = build_scoring_prompt(
            job_description,
            truncate_chars(resume_text, RESUME_CHAR_LIMIT),
            &weights_json,
        );

        let reply = self.model.complete(SCORING_SYSTEM, &prompt).await?;
        Ok(reconcile(weights, &reply)?)
    }
}

/// The substring from the first `{` to the last `}`, ignoring any surrounding prose.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let first = text.find('{')?;
    let last = text.rfind('}')?;
    (last > first).then(|| &text[first..=last])
}

/// Rebuilds a result from a raw model reply, trusting only the per-criterion scores.
pub fn reconcile(weights: &NormalizedWeights, reply: &str) -> Result<ScoreResult, ReplyError> {
    let body = extract_json_object(reply).ok_or(ReplyError::NoJsonObject)?;
    let root: serde_json::Map<String, Value> = serde_json::from_str(body)?;

    let empty = serde_json::Map::new();
    let model_subscores = match root.get("subscores") {
        None => &empty,
        Some(Value::Object(map)) => map,
        Some(_) => return Err(ReplyError::MalformedSubscores),
    };

    let mut subscores = IndexMap::new();
    let mut contributions = IndexMap::new();

    for (criterion, weight) in weights {
        let (score, reason) = read_entry(criterion, model_subscores.get(criterion))?;
        let score = round2(score).clamp(0.0, 1.0);
        contributions.insert(criterion.clone(), round2(score * weight * 10.0));
        subscores.insert(criterion.clone(), Subscore { score, reason });
    }

    Ok(ScoreResult {
        total: round2(contributions.values().sum()),
        subscores,
        contributions,
        justification: text_field(root.get("overall_justification")),
        origin: ScoreOrigin::Model,
    })
}

/// A missing or empty entry scores zero; an entry that is present but unreadable is an error.
fn read_entry(criterion: &str, entry: Option<&Value>) -> Result<(f64, String), ReplyError> {
    let entry = match entry {
        None | Some(Value::Null) => return Ok((0.0, String::new())),
        Some(Value::Object(map)) => map,
        Some(_) => return Err(ReplyError::MalformedEntry(criterion.to_string())),
    };

    let score = match entry.get("score") {
        None => 0.0,
        Some(value) => numeric(value)
            .ok_or_else(|| ReplyError::MalformedEntry(criterion.to_string()))?,
    };

    Ok((score, text_field(entry.get("reason"))))
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

fn text_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Neutral 0.50 for every criterion, with contributions computed the usual way.
pub fn fallback(weights: &NormalizedWeights) -> ScoreResult {
    let subscores = weights
        .keys()
        .map(|criterion| {
            (
                criterion.clone(),
                Subscore {
                    score: FALLBACK_SCORE,
                    reason: FALLBACK_REASON.to_string(),
                },
            )
        })
        .collect();
    let contributions: IndexMap<String, f64> = weights
        .iter()
        .map(|(criterion, weight)| (criterion.clone(), round2(FALLBACK_SCORE * weight * 10.0)))
        .collect();

    ScoreResult {
        total: round2(contributions.values().sum()),
        subscores,
        contributions,
        justification: FALLBACK_JUSTIFICATION.to_string(),
        origin: ScoreOrigin::Fallback,
    }
}
