use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Parent record of a persisted ranking: one row per saved job outcome.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RankingRow {
    pub id: Uuid,
    pub position: String,
    pub file_count: i32,
    pub algorithms: Vec<String>,
    /// Filename of the rank-1 candidate; absent for an empty job.
    pub top_candidate: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Child record: one row per candidate in a persisted ranking.
/// `scores` and `file_info` are stored as JSONB so the open algorithm key set
/// survives without schema changes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RankingDetailRow {
    pub id: Uuid,
    pub ranking_id: Uuid,
    pub filename: String,
    pub rank: i32,
    pub scores: Value,
    pub final_score: Option<f64>,
    pub extracted_skills: Vec<String>,
    pub file_info: Option<Value>,
    pub error: Option<String>,
}
