//! Persistence of named rankings: a parent summary row plus one detail row per
//! candidate, keyed by a generated job identifier.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::ranking::{RankingDetailRow, RankingRow};
use crate::ranking::aggregate::{algorithm_universe, rank};
use crate::ranking::models::{CandidateResult, ResultSet};

/// Persists one ranking. The result set is ranked on the way in so every
/// detail row carries a definite rank; the parent row records the rank-1
/// candidate for list views.
pub async fn save_ranking(
    pool: &PgPool,
    position: &str,
    set: &ResultSet,
) -> Result<Uuid, AppError> {
    let ranked = rank(set);
    let algorithms = algorithm_universe(set);
    let top_candidate = ranked.first().map(|c| c.filename.clone());
    let ranking_id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO rankings (id, position, file_count, algorithms, top_candidate)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(ranking_id)
    .bind(position)
    .bind(ranked.len() as i32)
    .bind(&algorithms)
    .bind(&top_candidate)
    .execute(pool)
    .await?;

    for candidate in &ranked {
        sqlx::query(
            r#"
            INSERT INTO ranking_details
                (id, ranking_id, filename, rank, scores, final_score,
                 extracted_skills, file_info, error)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(ranking_id)
        .bind(&candidate.filename)
        .bind(candidate.rank.unwrap_or(0) as i32)
        .bind(serde_json::to_value(&candidate.scores).unwrap_or_default())
        .bind(candidate.final_score)
        .bind(&candidate.extracted_skills)
        .bind(
            candidate
                .file_info
                .as_ref()
                .and_then(|f| serde_json::to_value(f).ok()),
        )
        .bind(&candidate.error)
        .execute(pool)
        .await?;
    }

    info!(
        "Saved ranking {ranking_id}: {} candidates, position '{position}'",
        ranked.len()
    );
    Ok(ranking_id)
}

/// Returns all persisted ranking summaries, newest first.
pub async fn list_rankings(pool: &PgPool) -> Result<Vec<RankingRow>, AppError> {
    Ok(sqlx::query_as::<_, RankingRow>(
        "SELECT * FROM rankings ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?)
}

pub async fn get_ranking(pool: &PgPool, id: Uuid) -> Result<Option<RankingRow>, AppError> {
    Ok(
        sqlx::query_as::<_, RankingRow>("SELECT * FROM rankings WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn get_ranking_details(
    pool: &PgPool,
    ranking_id: Uuid,
) -> Result<Vec<RankingDetailRow>, AppError> {
    Ok(sqlx::query_as::<_, RankingDetailRow>(
        "SELECT * FROM ranking_details WHERE ranking_id = $1 ORDER BY rank ASC",
    )
    .bind(ranking_id)
    .fetch_all(pool)
    .await?)
}

/// Rebuilds a `ResultSet` from persisted detail rows, for re-export. Malformed
/// JSONB cells degrade to empty maps rather than failing the export.
pub fn result_set_from_details(details: &[RankingDetailRow]) -> ResultSet {
    let results = details
        .iter()
        .map(|row| {
            let mut candidate = CandidateResult::new(row.filename.clone());
            candidate.rank = u32::try_from(row.rank).ok().filter(|r| *r > 0);
            candidate.scores = serde_json::from_value(row.scores.clone()).unwrap_or_default();
            candidate.final_score = row.final_score;
            candidate.extracted_skills = row.extracted_skills.clone();
            candidate.file_info = row
                .file_info
                .clone()
                .and_then(|v| serde_json::from_value(v).ok());
            candidate.error = row.error.clone();
            candidate
        })
        .collect();

    ResultSet {
        results,
        summary: None,
    }
}
