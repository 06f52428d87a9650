use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::identity::extract_identity;
use crate::models::candidate::CandidateUpdate;
use crate::models::ids::RecordId;
use crate::processing::payload::{resolve_text, ProcessRequest};
use crate::processing::persistence::{fetch_job, update_candidate};
use crate::scoring::models::Subscore;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub ok: bool,
    pub candidate_id: RecordId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub score: f64,
    pub subscores: IndexMap<String, Subscore>,
    pub justification: String,
    pub contributions: IndexMap<String, f64>,
}

/// POST /process
pub async fn handle_process(
    State(state): State<AppState>,
    body: Result<Json<ProcessRequest>, JsonRejection>,
) -> Result<Json<ProcessResponse>, AppError> {
    let Json(req) = body.map_err(|e| AppError::MissingParameters(Some(e.body_text())))?;
    let req = req.validate()?;

    let text = resolve_text(req.source, &req.filename, &state.config.upload_dir).await?;

    let identity = extract_identity(&text, Some(&req.filename), state.recognizer.as_ref());

    let job = fetch_job(&state.db, &req.job_id)
        .await?
        .ok_or_else(|| AppError::JobNotFound(req.job_id.to_string()))?;

    let result = state
        .scorer
        .score(&job.description, &text, &job.criteria)
        .await;

    let update = CandidateUpdate::new(&identity, &text, &result);
    update_candidate(&state.db, &req.candidate_id, &update)
        .await
        .map_err(|e| AppError::DbUpdateFailed(e.to_string()))?;

    info!(
        "Processed candidate {} for job {}: score {} ({:?})",
        req.candidate_id, req.job_id, result.total, result.origin
    );

    Ok(Json(ProcessResponse {
        ok: true,
        candidate_id: req.candidate_id,
        name: identity.name,
        email: identity.email,
        score: result.total,
        subscores: result.subscores,
        justification: result.justification,
        contributions: result.contributions,
    }))
}
