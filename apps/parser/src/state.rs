use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::identity::ner::EntityRecognizer;
use crate::scoring::reconciler::ScoreReconciler;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub scorer: ScoreReconciler,
    /// Entity tagger used by the name cascade. Default: HeuristicRecognizer.
    pub recognizer: Arc<dyn EntityRecognizer>,
    pub config: Config,
}
