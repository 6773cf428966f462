//! Cleaning batch orchestrator.
//!
//! Drives pending transcripts through the cleaning pipeline and persists
//! the results: fetch unprocessed → clean → store → mark processed. The
//! cleaner itself is total, so batch-level error handling is only about
//! storage — one row's failure never aborts the rest.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::db::repository;
use crate::db::DatabaseError;
use crate::models::CleanedTranscription;
use crate::pipeline::cleaning::clean;

/// Errors that can occur while driving a cleaning batch.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

/// Summary of one batch run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchReport {
    /// Rows cleaned, stored and marked processed.
    pub processed: usize,
    /// Rows whose result could not be stored.
    pub skipped: usize,
    /// Among the processed rows, how many carried at least one violation.
    pub non_compliant: usize,
}

/// Clean up to `limit` pending transcripts.
///
/// Fetching the batch is the only step allowed to fail the run; from there
/// each row stands alone, mirroring how the ingestion side treats its rows.
pub fn process_pending(conn: &Connection, limit: usize) -> Result<BatchReport, BatchError> {
    let pending = repository::fetch_unprocessed(conn, limit)?;
    tracing::info!(count = pending.len(), "Starting cleaning batch");

    let mut report = BatchReport {
        processed: 0,
        skipped: 0,
        non_compliant: 0,
    };

    for transcription in &pending {
        let result = clean(&transcription.raw_text);
        let cleaned = CleanedTranscription::from_result(transcription.id, &result);

        if let Err(e) = repository::insert_cleaned(conn, &cleaned) {
            tracing::warn!(id = %transcription.id, error = %e, "Failed to store cleaning result");
            report.skipped += 1;
            continue;
        }
        if let Err(e) = repository::mark_processed(conn, &transcription.id) {
            tracing::warn!(id = %transcription.id, error = %e, "Failed to mark transcript processed");
            report.skipped += 1;
            continue;
        }

        report.processed += 1;
        if !result.is_compliant {
            report.non_compliant += 1;
        }
    }

    tracing::info!(
        processed = report.processed,
        skipped = report.skipped,
        non_compliant = report.non_compliant,
        "Cleaning batch finished"
    );
    Ok(report)
}
