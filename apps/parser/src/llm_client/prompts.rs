// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Closing rule appended to every prompt that expects machine-readable output.
pub const JSON_ONLY_RULE: &str = "Return valid JSON only.";
