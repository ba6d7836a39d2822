//! Scoring backend client: the single point of entry for all calls to the
//! external resume-scoring service.
//!
//! ARCHITECTURAL RULE: no other module may call the scoring backend directly.
//! Handlers depend on `Arc<dyn ScoringBackend>` so tests can substitute a stub.
//!
//! One job is one outstanding request. The request runs to completion or
//! timeout; there is no mid-flight cancellation protocol with the backend, so
//! the timeout is the only local bound on a slow job. Failed jobs are not
//! retried automatically.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::ranking::models::ResultSet;

const PROCESS_RESUMES_PATH: &str = "/api/process-resumes";

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("upload rejected as too large")]
    PayloadTooLarge,

    #[error("upload rejected as unprocessable")]
    Unprocessable,

    #[error("backend error (status {status}): {message}")]
    Backend { status: u16, message: String },

    #[error("malformed backend response: {0}")]
    Contract(String),
}

impl From<reqwest::Error> for ScoringError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ScoringError::Timeout
        } else {
            ScoringError::Http(e)
        }
    }
}

impl From<ScoringError> for AppError {
    fn from(e: ScoringError) -> Self {
        match e {
            ScoringError::Timeout => AppError::UpstreamTimeout,
            ScoringError::PayloadTooLarge => {
                AppError::PayloadTooLarge("the scoring service rejected the upload".to_string())
            }
            ScoringError::Unprocessable => {
                AppError::UnsupportedFormat("the scoring service rejected the upload".to_string())
            }
            ScoringError::Backend { status, message } => AppError::Upstream {
                status,
                detail: message,
            },
            ScoringError::Contract(detail) => AppError::UpstreamContract(detail),
            ScoringError::Http(e) => AppError::UpstreamUnavailable(e.to_string()),
        }
    }
}

/// One resume file ready to forward upstream.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub filename: String,
    pub bytes: Bytes,
}

/// Everything the scoring backend needs for one job.
#[derive(Debug, Clone)]
pub struct ScoringJob {
    pub files: Vec<ResumeUpload>,
    pub job_description: String,
    pub position: String,
    pub methods: Vec<String>,
}

#[async_trait]
pub trait ScoringBackend: Send + Sync {
    /// Submits one job and returns the parsed result set.
    async fn process_resumes(&self, job: ScoringJob) -> Result<ResultSet, ScoringError>;
}

/// HTTP client for the real scoring backend.
#[derive(Clone)]
pub struct HttpScoringClient {
    client: Client,
    base_url: String,
}

impl HttpScoringClient {
    pub fn new(base_url: String, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ScoringBackend for HttpScoringClient {
    async fn process_resumes(&self, job: ScoringJob) -> Result<ResultSet, ScoringError> {
        let url = format!("{}{}", self.base_url, PROCESS_RESUMES_PATH);
        info!(
            "Submitting scoring job: {} files, {} algorithms, position '{}'",
            job.files.len(),
            job.methods.len(),
            job.position
        );

        let mut form = Form::new()
            .text("jobDescription", job.job_description)
            .text("position", job.position);
        for method in job.methods {
            form = form.text("methods", method);
        }
        for file in job.files {
            form = form.part(
                "resumes",
                Part::bytes(file.bytes.to_vec()).file_name(file.filename),
            );
        }

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();
        debug!("Scoring backend responded with {status}");

        if status == StatusCode::PAYLOAD_TOO_LARGE {
            return Err(ScoringError::PayloadTooLarge);
        }
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            return Err(ScoringError::Unprocessable);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ScoringError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        // Reject anything that is not ResultSet-shaped rather than producing a
        // partially-wrong ranking from it.
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ScoringError::Contract(format!("response is not JSON: {e}")))?;
        ResultSet::from_json(body).map_err(|e| ScoringError::Contract(e.to_string()))
    }
}
