use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Clientele";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is not set
pub fn default_log_filter() -> String {
    "info,clientele_core=debug".to_string()
}

/// Get the application data directory
/// ~/Clientele/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Clientele")
}

/// Default location of the SQLite store
pub fn default_database_path() -> PathBuf {
    app_data_dir().join("clientele.db")
}

/// Runtime configuration, read once from `CLIENTELE_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the SQLite database file.
    pub database_path: PathBuf,
    /// Base URL of the speech-to-text proxy.
    pub speech_api_url: String,
    /// Base URL of the chat-completion endpoint used for classification.
    pub llm_api_url: String,
    /// Model requested from the classification endpoint.
    pub llm_model: String,
    /// Bearer token for the external APIs, if any.
    pub api_key: Option<String>,
    /// Maximum number of transcripts fetched per cleaning batch.
    pub batch_limit: usize,
}

const DEFAULT_BATCH_LIMIT: usize = 100;

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_path: std::env::var("CLIENTELE_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_database_path()),
            speech_api_url: env_or("CLIENTELE_SPEECH_URL", "http://localhost:8000"),
            llm_api_url: env_or("CLIENTELE_LLM_URL", "https://api.openai.com/v1"),
            llm_model: env_or("CLIENTELE_LLM_MODEL", "gpt-4o-mini"),
            api_key: std::env::var("CLIENTELE_API_KEY").ok(),
            batch_limit: std::env::var("CLIENTELE_BATCH_LIMIT")
                .ok()
                .and_then(|v| parse_batch_limit(&v))
                .unwrap_or(DEFAULT_BATCH_LIMIT),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// A batch limit of zero would make every run a no-op; treat it as unset.
fn parse_batch_limit(raw: &str) -> Option<usize> {
    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n),
    }
}
