use indexmap::IndexMap;
use serde_json::Value;

/// Criterion name → raw weight, exactly as stored on the job row.
pub type Criteria = serde_json::Map<String, Value>;

/// Criterion name → fraction of the total. Sums to 1 whenever criteria is non-empty.
pub type NormalizedWeights = IndexMap<String, f64>;

/// Coerces an untyped raw weight. Anything that is not a finite, non-negative number
/// (or numeric string) counts as zero.
pub fn coerce_weight(value: &Value) -> f64 {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    };
    raw.filter(|w| w.is_finite() && *w >= 0.0).unwrap_or(0.0)
}

/// Proportional weights `raw / sum`, or uniform `1 / N` when the raw weights sum to zero.
pub fn normalize_weights(criteria: &Criteria) -> NormalizedWeights {
    let raw: Vec<(&String, f64)> = criteria
        .iter()
        .map(|(name, value)| (name, coerce_weight(value)))
        .collect();
    let total: f64 = raw.iter().map(|(_, w)| w).sum();

    if total <= 0.0 {
        let uniform = 1.0 / raw.len().max(1) as f64;
        return raw
            .into_iter()
            .map(|(name, _)| (name.clone(), uniform))
            .collect();
    }

    raw.into_iter()
        .map(|(name, w)| (name.clone(), w / total))
        .collect()
}
