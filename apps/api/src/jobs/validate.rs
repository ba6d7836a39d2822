//! Upload validation for job submissions.
//!
//! The checks mirror the scoring backend's own limits so a bad upload is
//! rejected here with the same message the UI would show for an upstream
//! rejection, without paying for the round trip.

use crate::config::Config;
use crate::errors::AppError;
use crate::routes::catalog;
use crate::scoring::ScoringJob;

pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx", "doc"];

const MIN_FILE_SIZE_BYTES: u64 = 100;
const JOB_DESCRIPTION_MIN_LEN: usize = 20;
const JOB_DESCRIPTION_MAX_LEN: usize = 10_000;
const MAX_METHODS: usize = 10;

pub fn validate_job(job: &ScoringJob, config: &Config) -> Result<(), AppError> {
    if job.files.is_empty() {
        return Err(AppError::Validation("No resume files provided".to_string()));
    }
    if job.files.len() > config.max_files_per_request {
        return Err(AppError::Validation(format!(
            "Too many files: {} (maximum {})",
            job.files.len(),
            config.max_files_per_request
        )));
    }

    for file in &job.files {
        let size = file.bytes.len() as u64;
        if size < MIN_FILE_SIZE_BYTES {
            return Err(AppError::UnsupportedFormat(format!(
                "'{}' is empty or truncated",
                file.filename
            )));
        }
        if size > config.max_file_size_bytes() {
            return Err(AppError::PayloadTooLarge(format!(
                "'{}' exceeds {} MB",
                file.filename, config.max_file_size_mb
            )));
        }
        if !has_allowed_extension(&file.filename) {
            return Err(AppError::UnsupportedFormat(format!(
                "'{}' is not a PDF or Word document",
                file.filename
            )));
        }
    }

    let description_len = job.job_description.trim().chars().count();
    if description_len < JOB_DESCRIPTION_MIN_LEN {
        return Err(AppError::Validation(format!(
            "Job description too short (minimum {JOB_DESCRIPTION_MIN_LEN} characters)"
        )));
    }
    if description_len > JOB_DESCRIPTION_MAX_LEN {
        return Err(AppError::Validation(format!(
            "Job description too long (maximum {JOB_DESCRIPTION_MAX_LEN} characters)"
        )));
    }

    if job.methods.is_empty() {
        return Err(AppError::Validation(
            "Select at least one scoring algorithm".to_string(),
        ));
    }
    if job.methods.len() > MAX_METHODS {
        return Err(AppError::Validation(format!(
            "Too many algorithms selected (maximum {MAX_METHODS})"
        )));
    }
    for method in &job.methods {
        if !catalog::is_known_algorithm(method) {
            return Err(AppError::Validation(format!(
                "Unknown algorithm '{method}'"
            )));
        }
    }

    if !catalog::is_known_position(&job.position) {
        return Err(AppError::Validation(format!(
            "Unknown position '{}'",
            job.position
        )));
    }

    Ok(())
}

fn has_allowed_extension(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
