use std::str::FromStr;

use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{format_datetime, parse_datetime, parse_uuid};
use crate::db::DatabaseError;
use crate::models::{CleanedTranscription, ProcessingStatus};
use crate::pipeline::cleaning::PiiCategory;

/// Persist a cleaning result against its source transcript.
pub fn insert_cleaned(conn: &Connection, c: &CleanedTranscription) -> Result<(), DatabaseError> {
    let violations = serde_json::to_string(&c.violations).unwrap_or_else(|_| "[]".to_string());
    conn.execute(
        "INSERT INTO cleaned_transcriptions
         (id, transcription_id, raw_text, cleaned_text, is_compliant, violations, processing_status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            c.id.to_string(),
            c.transcription_id.to_string(),
            c.raw_text,
            c.cleaned_text,
            c.is_compliant,
            violations,
            c.processing_status.as_str(),
            format_datetime(&c.created_at),
        ],
    )?;
    Ok(())
}

/// Fetch the cleaning result stored for a transcript, if any.
pub fn get_cleaned_for(
    conn: &Connection,
    transcription_id: &Uuid,
) -> Result<Option<CleanedTranscription>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, transcription_id, raw_text, cleaned_text, is_compliant, violations, processing_status, created_at
         FROM cleaned_transcriptions WHERE transcription_id = ?1
         LIMIT 1",
    )?;
    let mut rows = stmt.query_map(params![transcription_id.to_string()], row_to_cleaned)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// List stored results filtered by their compliance flag — the dashboard
/// reads the non-compliant side to review what was redacted.
pub fn list_by_compliance(
    conn: &Connection,
    compliant: bool,
) -> Result<Vec<CleanedTranscription>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, transcription_id, raw_text, cleaned_text, is_compliant, violations, processing_status, created_at
         FROM cleaned_transcriptions WHERE is_compliant = ?1
         ORDER BY created_at DESC, id ASC",
    )?;
    let rows = stmt.query_map(params![compliant], row_to_cleaned)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

fn row_to_cleaned(row: &rusqlite::Row) -> Result<CleanedTranscription, rusqlite::Error> {
    let id_str: String = row.get(0)?;
    let transcription_str: String = row.get(1)?;
    let violations_str: String = row.get(5)?;
    let status_str: String = row.get(6)?;
    let created_str: String = row.get(7)?;

    let violations: Vec<PiiCategory> = serde_json::from_str(&violations_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(CleanedTranscription {
        id: parse_uuid(0, &id_str)?,
        transcription_id: parse_uuid(1, &transcription_str)?,
        raw_text: row.get(2)?,
        cleaned_text: row.get(3)?,
        is_compliant: row.get(4)?,
        violations,
        processing_status: ProcessingStatus::from_str(&status_str)
            .unwrap_or(ProcessingStatus::Completed),
        created_at: parse_datetime(&created_str),
    })
}
