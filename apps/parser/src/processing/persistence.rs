use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::models::candidate::CandidateUpdate;
use crate::models::ids::RecordId;
use crate::models::job::{Job, JobRow};

/// Fetches a job's description and criteria. `None` when no row matches.
pub async fn fetch_job(pool: &PgPool, job_id: &RecordId) -> Result<Option<Job>, sqlx::Error> {
    let row: Option<JobRow> = sqlx::query_as(
        "SELECT description, criteria::text AS criteria FROM jobs WHERE id::text = $1",
    )
    .bind(job_id.as_text())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Job::from))
}

/// Writes the processing outcome to the candidate row inside a transaction.
/// On failure the transaction is rolled back before the connection goes back to the pool.
pub async fn update_candidate(
    pool: &PgPool,
    candidate_id: &RecordId,
    update: &CandidateUpdate,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE candidates
        SET name = $1,
            email = $2,
            raw_text = $3,
            parsed_data = $4,
            subscores = $5,
            score = $6,
            justification = $7,
            processed_at = NOW()
        WHERE id::text = $8
        "#,
    )
    .bind(&update.name)
    .bind(&update.email)
    .bind(&update.raw_text)
    .bind(Json(&update.parsed_data))
    .bind(Json(&update.subscores))
    .bind(update.score)
    .bind(Json(&update.justification))
    .bind(candidate_id.as_text())
    .execute(&mut *tx)
    .await;

    match result {
        Ok(done) => {
            tx.commit().await?;
            if done.rows_affected() == 0 {
                warn!("Candidate {candidate_id} not found; nothing updated");
            } else {
                info!("Updated candidate {candidate_id} (score {})", update.score);
            }
            Ok(())
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!("Rollback after failed update of candidate {candidate_id} failed: {rollback_err}");
            }
            Err(e)
        }
    }
}
