use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Base URL of the external scoring backend, e.g. `http://scoring:5000`.
    pub scoring_api_url: String,
    /// Per-job upper bound on the scoring request. Backend processing runs for
    /// minutes on large batches, so this is deliberately long.
    pub process_timeout_secs: u64,
    pub max_files_per_request: usize,
    pub max_file_size_mb: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            scoring_api_url: require_env("SCORING_API_URL")?,
            process_timeout_secs: env_or("PROCESS_TIMEOUT_SECS", "300")
                .parse()
                .context("PROCESS_TIMEOUT_SECS must be a number of seconds")?,
            max_files_per_request: env_or("MAX_FILES_PER_REQUEST", "50")
                .parse()
                .context("MAX_FILES_PER_REQUEST must be a positive integer")?,
            max_file_size_mb: env_or("MAX_FILE_SIZE_MB", "10")
                .parse()
                .context("MAX_FILE_SIZE_MB must be a positive integer")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
