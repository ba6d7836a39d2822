use std::collections::BTreeMap;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::jobs::validate::validate_job;
use crate::ranking::aggregate::{
    algorithm_summary, algorithm_universe, rank, summarize, AlgorithmStats, SummaryStats,
};
use crate::ranking::combine::{confidence, derive_final_scores, CombineStrategy, Confidence};
use crate::ranking::explain::{explanation, score_band, ScoreBand};
use crate::ranking::models::CandidateResult;
use crate::scoring::{ResumeUpload, ScoringJob};
use crate::state::AppState;

/// Aggregated view of one completed job, ready for the results screen.
#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub position: String,
    pub algorithm_universe: Vec<String>,
    pub summary: SummaryStats,
    pub algorithm_summary: BTreeMap<String, AlgorithmStats>,
    pub results: Vec<RankedCandidate>,
}

#[derive(Debug, Serialize)]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub candidate: CandidateResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<ScoreBand>,
    pub confidence: Confidence,
}

/// POST /api/v1/jobs
///
/// Multipart submission: repeated `resumes` file parts plus `job_description`,
/// `position`, and repeated `methods` text fields. Validates locally, forwards
/// the job to the scoring backend as a single long-timeout request, and returns
/// the aggregated ranking.
pub async fn handle_submit_job(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ProcessResponse>, AppError> {
    let job = read_job(multipart).await?;
    validate_job(&job, &state.config)?;

    let position = job.position.clone();
    let result_set = state.scoring.process_resumes(job).await?;

    // Backend-supplied final scores are authoritative; fill gaps so the
    // ranking always has something to sort by.
    let result_set = derive_final_scores(&result_set, CombineStrategy::WeightedAverage);

    let universe = algorithm_universe(&result_set);
    let summary = summarize(&result_set);
    let per_algorithm = algorithm_summary(&result_set);

    let results = rank(&result_set)
        .into_iter()
        .map(|mut candidate| {
            if candidate.explanation.is_none() {
                candidate.explanation = explanation(&candidate, &position);
            }
            let band = candidate.final_score.map(score_band);
            let conf = confidence(&candidate.scores);
            RankedCandidate {
                candidate,
                band,
                confidence: conf,
            }
        })
        .collect();

    Ok(Json(ProcessResponse {
        position,
        algorithm_universe: universe,
        summary,
        algorithm_summary: per_algorithm,
        results,
    }))
}

/// Collects the multipart fields into a `ScoringJob`. Unknown fields are
/// ignored so frontend additions do not break older deployments.
async fn read_job(mut multipart: Multipart) -> Result<ScoringJob, AppError> {
    let mut files = Vec::new();
    let mut job_description = String::new();
    let mut position = "general".to_string();
    let mut methods = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resumes" => {
                let filename = field
                    .file_name()
                    .map(str::to_owned)
                    .ok_or_else(|| AppError::Validation("Resume part has no filename".into()))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                files.push(ResumeUpload { filename, bytes });
            }
            "job_description" | "jobDescription" => {
                job_description = read_text(field).await?;
            }
            "position" => {
                position = read_text(field).await?;
            }
            "methods" => {
                methods.push(read_text(field).await?);
            }
            _ => {}
        }
    }

    Ok(ScoringJob {
        files,
        job_description,
        position,
        methods,
    })
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed field: {e}")))
}
