use indexmap::IndexMap;

use serde::{Deserialize, Serialize};

/// One criterion's score as judged by the model, after local clamping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscore {
    pub score: f64, // 0.00 to 1.00, two decimals
    pub reason: String,
}

/// Where a [`ScoreResult`] came from. Only used for logging; the wire and
/// persisted shapes are identical for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOrigin {
    Model,
    Fallback,
}

/// Full scoring outcome. Contributions and total are always recomputed locally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub subscores: IndexMap<String, Subscore>,
    pub contributions: IndexMap<String, f64>,
    pub total: f64, // 0 to 10
    pub justification: String,
    #[serde(skip)]
    pub origin: ScoreOrigin,
}

/// Correctly rounded to two decimal places, ties to even.
///
/// Float formatting rounds the exact binary value, so `0.125` becomes `0.12` while
/// `0.1251` becomes `0.13`. `(v * 100).round()` would round the tie up.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
