use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::history::store;
use crate::models::ranking::{RankingDetailRow, RankingRow};
use crate::ranking::export::{export_filename, to_csv};
use crate::ranking::models::ResultSet;
use crate::routes::catalog;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveRankingRequest {
    pub position: String,
    pub result_set: ResultSet,
}

#[derive(Debug, Serialize)]
pub struct SaveRankingResponse {
    pub ranking_id: Uuid,
}

/// POST /api/v1/rankings
pub async fn handle_save_ranking(
    State(state): State<AppState>,
    Json(req): Json<SaveRankingRequest>,
) -> Result<Json<SaveRankingResponse>, AppError> {
    if !catalog::is_known_position(&req.position) {
        return Err(AppError::Validation(format!(
            "Unknown position '{}'",
            req.position
        )));
    }

    let ranking_id = store::save_ranking(&state.db, &req.position, &req.result_set).await?;
    Ok(Json(SaveRankingResponse { ranking_id }))
}

/// GET /api/v1/rankings
pub async fn handle_list_rankings(
    State(state): State<AppState>,
) -> Result<Json<Vec<RankingRow>>, AppError> {
    Ok(Json(store::list_rankings(&state.db).await?))
}

#[derive(Debug, Serialize)]
pub struct RankingDetailsResponse {
    pub summary: RankingRow,
    pub results: Vec<RankingDetailRow>,
}

/// GET /api/v1/rankings/:id
pub async fn handle_get_ranking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RankingDetailsResponse>, AppError> {
    let summary = store::get_ranking(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Ranking {id} not found")))?;
    let results = store::get_ranking_details(&state.db, id).await?;

    Ok(Json(RankingDetailsResponse { summary, results }))
}

/// GET /api/v1/rankings/:id/export
///
/// CSV download of a persisted ranking, named `<position>_<ISO-date>.csv`.
pub async fn handle_export_ranking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let summary = store::get_ranking(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Ranking {id} not found")))?;
    let details = store::get_ranking_details(&state.db, id).await?;

    let set = store::result_set_from_details(&details);
    let csv = to_csv(&set);
    let filename = export_filename(&summary.position, Utc::now().date_naive());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response())
}
