use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// One scored resume as returned by the scoring backend.
///
/// Every field except `filename` and `scores` is optional: which algorithms
/// produced a usable score varies per file, and a candidate that failed text
/// extraction still appears here with an `error` set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateResult {
    pub filename: String,

    /// Algorithm identifier -> score in [0, 1]. The key set is open; a missing
    /// key means that algorithm produced no usable score for this file, which
    /// is distinct from a score of 0.
    #[serde(default)]
    pub scores: BTreeMap<String, f64>,

    /// Backend-combined score in [0, 1]. Absent when the backend did not
    /// combine; see `combine::derive_final_scores` for the client-side fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_score: Option<f64>,

    /// 1-based position in the ranking. Derived by `aggregate::rank` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,

    #[serde(default)]
    pub extracted_skills: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_info: Option<FileInfo>,

    /// Backend-supplied human-readable summary, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    /// Set when processing this file failed. The record still appears in
    /// output; its scores are treated as unreliable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CandidateResult {
    /// Minimal record with just a filename; used by handlers and tests.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            scores: BTreeMap::new(),
            final_score: None,
            rank: None,
            extracted_skills: Vec::new(),
            file_info: None,
            explanation: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_count: Option<u64>,
}

/// Job-level counters reported by the scoring backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JobSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_resumes_uploaded: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successfully_processed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_to_process: Option<u32>,
    #[serde(default)]
    pub algorithms_used: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_position: Option<String>,
}

/// One complete job outcome. Immutable after receipt; `results` keeps the
/// backend's insertion order and is not assumed pre-sorted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultSet {
    pub results: Vec<CandidateResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<JobSummary>,
}

impl ResultSet {
    /// Parses a backend payload, rejecting anything that is not ResultSet-shaped.
    ///
    /// Missing optional fields are fine; a missing or non-array `results` is a
    /// contract violation and fails here rather than producing a partial ranking.
    pub fn from_json(value: serde_json::Value) -> Result<Self, AppError> {
        serde_json::from_value(value)
            .map_err(|e| AppError::UpstreamContract(format!("unexpected result payload: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_minimal_payload() {
        let set = ResultSet::from_json(json!({ "results": [] })).unwrap();
        assert!(set.results.is_empty());
        assert!(set.summary.is_none());
    }

    #[test]
    fn test_parses_full_candidate() {
        let set = ResultSet::from_json(json!({
            "results": [{
                "filename": "alice.pdf",
                "rank": 1,
                "final_score": 0.85,
                "scores": { "bert": 0.9, "cosine": 0.8 },
                "extracted_skills": ["Rust", "Postgres"],
                "file_info": { "size": 10240, "word_count": 512, "char_count": 3300 },
                "explanation": "Excellent match"
            }],
            "summary": {
                "total_resumes_uploaded": 1,
                "successfully_processed": 1,
                "algorithms_used": ["bert", "cosine"]
            }
        }))
        .unwrap();

        let candidate = &set.results[0];
        assert_eq!(candidate.filename, "alice.pdf");
        assert_eq!(candidate.rank, Some(1));
        assert_eq!(candidate.final_score, Some(0.85));
        assert_eq!(candidate.scores.get("bert"), Some(&0.9));
        assert_eq!(candidate.extracted_skills.len(), 2);
        assert_eq!(
            candidate.file_info.as_ref().and_then(|f| f.word_count),
            Some(512)
        );
        let summary = set.summary.unwrap();
        assert_eq!(summary.total_resumes_uploaded, Some(1));
        assert_eq!(summary.algorithms_used, vec!["bert", "cosine"]);
    }

    #[test]
    fn test_candidate_with_error_and_no_scores_parses() {
        let set = ResultSet::from_json(json!({
            "results": [{ "filename": "broken.pdf", "error": "parse failed" }]
        }))
        .unwrap();

        let candidate = &set.results[0];
        assert_eq!(candidate.error.as_deref(), Some("parse failed"));
        assert!(candidate.scores.is_empty());
        assert!(candidate.final_score.is_none());
    }

    #[test]
    fn test_missing_results_is_rejected() {
        let err = ResultSet::from_json(json!({ "summary": {} })).unwrap_err();
        assert!(matches!(err, AppError::UpstreamContract(_)));
    }

    #[test]
    fn test_non_array_results_is_rejected() {
        let err = ResultSet::from_json(json!({ "results": "not a list" })).unwrap_err();
        assert!(matches!(err, AppError::UpstreamContract(_)));
    }
}
