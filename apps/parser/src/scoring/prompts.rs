// LLM prompt text for candidate scoring.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_RULE;

/// System prompt for scoring: enforces JSON-only output.
pub const SCORING_SYSTEM: &str =
    "You are a concise, objective HR scoring assistant that outputs only valid JSON.";

/// Builds the user prompt. `weights_json` is the pretty-printed normalized weight map.
pub fn build_scoring_prompt(job_description: &str, resume_text: &str, weights_json: &str) -> String {
    format!(
        r#"You are an objective HR scoring assistant. Given the job description and candidate resume, produce ONLY valid JSON matching this format:

{{
  "subscores": {{
    "<criterion>": {{ "score": 0.00, "reason": "short justification" }}
  }},
  "contributions": {{
    "<criterion>": 0.00
  }},
  "total_score_out_of_10": 0.00,
  "overall_justification": "1-3 sentences summarizing final score reasoning."
}}

Rules:
- Use each provided criterion name exactly.
- Score: 0.00-1.00 (two decimals)
- contribution = score * normalized_weight * 10
- total_score_out_of_10 = sum(contributions)
- {JSON_ONLY_RULE}

Job description:
"""{job_description}"""

Resume (truncated):
"""{resume_text}"""

Normalized weights:
{weights_json}
"#
    )
}
