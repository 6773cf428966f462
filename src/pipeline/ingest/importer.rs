use std::path::Path;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use super::source::{parse_source, ParsedSource};
use super::IngestError;
use crate::db::repository;
use crate::models::{Transcription, TranscriptSource};

/// Outcome of one source ingestion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngestReport {
    /// Rows stored as pending transcriptions.
    pub imported: usize,
    /// Rows dropped — empty text cell, malformed line, or storage failure.
    pub skipped: usize,
}

/// Ingest a delimited export file: every usable row becomes a pending
/// `Transcription` waiting for the cleaning batch.
pub fn ingest_file(path: &Path, conn: &Connection) -> Result<IngestReport, IngestError> {
    tracing::info!(file = %path.display(), "Starting transcript ingestion");
    let content = std::fs::read_to_string(path)?;
    ingest_content(&content, conn)
}

/// Ingest already-loaded delimited content.
///
/// Rows are independent: a row that fails to store is logged and counted,
/// never allowed to abort the rest of the batch.
pub fn ingest_content(content: &str, conn: &Connection) -> Result<IngestReport, IngestError> {
    let ParsedSource { rows, skipped } = parse_source(content)?;

    let mut imported = 0;
    let mut failed = 0;

    for row in rows {
        let transcription =
            Transcription::new(row.text, TranscriptSource::CsvImport).with_client_ref(&row.row_ref);
        match repository::insert_transcription(conn, &transcription) {
            Ok(()) => imported += 1,
            Err(e) => {
                tracing::warn!(row_ref = %row.row_ref, error = %e, "Failed to store imported row");
                failed += 1;
            }
        }
    }

    let report = IngestReport {
        imported,
        skipped: skipped + failed,
    };
    tracing::info!(
        imported = report.imported,
        skipped = report.skipped,
        "Transcript ingestion finished"
    );
    Ok(report)
}
