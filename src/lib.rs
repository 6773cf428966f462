pub mod config;
pub mod db;
pub mod models;
pub mod pipeline;
pub mod services;

pub use pipeline::cleaning::{clean, CleaningResult, PiiCategory};
pub use pipeline::processor::{process_pending, BatchReport};

use tracing_subscriber::EnvFilter;

/// Initialize structured logging. Call once at startup from the embedding
/// application; tests and library consumers that bring their own
/// subscriber simply skip it.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
