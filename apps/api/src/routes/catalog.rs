//! Static catalog data: available algorithms, positions, and upload limits.
//! The frontend populates its selection controls from these endpoints.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::jobs::validate::ALLOWED_EXTENSIONS;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct AlgorithmInfo {
    pub id: &'static str,
    pub category: &'static str,
    pub description: &'static str,
}

/// Algorithms the scoring backend can run. Keep in sync with the backend's
/// catalog; `validate` rejects anything not listed here before submission.
pub const ALGORITHMS: &[AlgorithmInfo] = &[
    AlgorithmInfo {
        id: "bert",
        category: "deep_learning",
        description: "Transformer semantic matching",
    },
    AlgorithmInfo {
        id: "distilbert",
        category: "deep_learning",
        description: "Distilled transformer, faster semantic matching",
    },
    AlgorithmInfo {
        id: "sbert",
        category: "deep_learning",
        description: "Sentence-level embedding similarity",
    },
    AlgorithmInfo {
        id: "xlm",
        category: "deep_learning",
        description: "Multilingual transformer matching",
    },
    AlgorithmInfo {
        id: "xgboost",
        category: "traditional_ml",
        description: "Gradient-boosted feature scoring",
    },
    AlgorithmInfo {
        id: "random_forest",
        category: "traditional_ml",
        description: "Ensemble feature scoring",
    },
    AlgorithmInfo {
        id: "svm",
        category: "traditional_ml",
        description: "Support-vector classification",
    },
    AlgorithmInfo {
        id: "neural_network",
        category: "traditional_ml",
        description: "Feed-forward classifier",
    },
    AlgorithmInfo {
        id: "cosine",
        category: "similarity",
        description: "TF-IDF cosine similarity",
    },
    AlgorithmInfo {
        id: "jaccard",
        category: "similarity",
        description: "Token-set overlap",
    },
    AlgorithmInfo {
        id: "ner",
        category: "similarity",
        description: "Named-entity skill extraction",
    },
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PositionInfo {
    pub value: &'static str,
    pub label: &'static str,
    pub category: &'static str,
}

pub const POSITIONS: &[PositionInfo] = &[
    PositionInfo {
        value: "sde",
        label: "Software Development Engineer",
        category: "engineering",
    },
    PositionInfo {
        value: "swe",
        label: "Software Engineer",
        category: "engineering",
    },
    PositionInfo {
        value: "ml_engineer",
        label: "ML Engineer",
        category: "ai_ml",
    },
    PositionInfo {
        value: "data_scientist",
        label: "Data Scientist",
        category: "ai_ml",
    },
    PositionInfo {
        value: "devops",
        label: "DevOps Engineer",
        category: "operations",
    },
    PositionInfo {
        value: "frontend",
        label: "Frontend Developer",
        category: "development",
    },
    PositionInfo {
        value: "backend",
        label: "Backend Developer",
        category: "development",
    },
    PositionInfo {
        value: "fullstack",
        label: "Full Stack Developer",
        category: "development",
    },
    PositionInfo {
        value: "product_manager",
        label: "Product Manager",
        category: "management",
    },
    PositionInfo {
        value: "designer",
        label: "UI/UX Designer",
        category: "design",
    },
    PositionInfo {
        value: "qa_engineer",
        label: "QA Engineer",
        category: "quality",
    },
    PositionInfo {
        value: "security_engineer",
        label: "Security Engineer",
        category: "security",
    },
    PositionInfo {
        value: "general",
        label: "General",
        category: "other",
    },
];

pub fn is_known_algorithm(id: &str) -> bool {
    ALGORITHMS.iter().any(|a| a.id == id)
}

pub fn is_known_position(value: &str) -> bool {
    POSITIONS.iter().any(|p| p.value == value)
}

/// GET /api/v1/algorithms
pub async fn list_algorithms() -> Json<Value> {
    Json(json!({ "algorithms": ALGORITHMS }))
}

/// GET /api/v1/positions
pub async fn list_positions() -> Json<Value> {
    Json(json!({ "positions": POSITIONS }))
}

/// GET /api/v1/formats
pub async fn supported_formats(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "extensions": ALLOWED_EXTENSIONS,
        "max_files": state.config.max_files_per_request,
        "max_file_size_mb": state.config.max_file_size_mb,
    }))
}
