// Candidate scoring against a job's weighted criteria.
// All LLM calls go through llm_client; every number the model returns except the
// per-criterion scores is discarded and recomputed here.

pub mod models;
pub mod prompts;
pub mod reconciler;
pub mod weights;
