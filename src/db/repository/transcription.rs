use std::str::FromStr;

use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{format_datetime, parse_datetime, parse_uuid};
use crate::db::DatabaseError;
use crate::models::{ProcessingStatus, Transcription, TranscriptSource};

/// Insert a raw transcript into the queue.
pub fn insert_transcription(conn: &Connection, t: &Transcription) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO transcriptions (id, raw_text, source, language, client_ref, is_processed, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            t.id.to_string(),
            t.raw_text,
            t.source.as_str(),
            t.language,
            t.client_ref,
            t.is_processed,
            t.status.as_str(),
            format_datetime(&t.created_at),
        ],
    )?;
    Ok(())
}

/// Fetch one transcript by id.
pub fn get_transcription(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<Transcription>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, raw_text, source, language, client_ref, is_processed, status, created_at
         FROM transcriptions WHERE id = ?1",
    )?;
    let mut rows = stmt.query_map(params![id.to_string()], row_to_transcription)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// Fetch transcripts the cleaner has not touched yet, oldest first.
pub fn fetch_unprocessed(
    conn: &Connection,
    limit: usize,
) -> Result<Vec<Transcription>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, raw_text, source, language, client_ref, is_processed, status, created_at
         FROM transcriptions WHERE is_processed = 0
         ORDER BY created_at ASC, id ASC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit as i64], row_to_transcription)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Flag a transcript as processed once its cleaning result is stored.
pub fn mark_processed(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    let affected = conn.execute(
        "UPDATE transcriptions SET is_processed = 1, status = ?2 WHERE id = ?1",
        params![id.to_string(), ProcessingStatus::Completed.as_str()],
    )?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "transcription".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

/// Number of transcripts still waiting for cleaning.
pub fn count_unprocessed(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM transcriptions WHERE is_processed = 0",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

fn row_to_transcription(row: &rusqlite::Row) -> Result<Transcription, rusqlite::Error> {
    let id_str: String = row.get(0)?;
    let source_str: String = row.get(2)?;
    let status_str: String = row.get(6)?;
    let created_str: String = row.get(7)?;

    Ok(Transcription {
        id: parse_uuid(0, &id_str)?,
        raw_text: row.get(1)?,
        source: TranscriptSource::from_str(&source_str).unwrap_or(TranscriptSource::Manual),
        language: row.get(3)?,
        client_ref: row.get(4)?,
        is_processed: row.get(5)?,
        status: ProcessingStatus::from_str(&status_str).unwrap_or(ProcessingStatus::Pending),
        created_at: parse_datetime(&created_str),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn test_db() -> Connection {
        open_memory_database().unwrap()
    }

    #[test]
    fn insert_and_retrieve() {
        let conn = test_db();
        let t = Transcription::new("Bonjour, je cherche un sac.", TranscriptSource::Recording);
        insert_transcription(&conn, &t).unwrap();

        let fetched = get_transcription(&conn, &t.id).unwrap().unwrap();
        assert_eq!(fetched.raw_text, "Bonjour, je cherche un sac.");
        assert_eq!(fetched.source, TranscriptSource::Recording);
        assert!(!fetched.is_processed);
    }

    #[test]
    fn missing_returns_none() {
        let conn = test_db();
        assert!(get_transcription(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn fetch_unprocessed_respects_limit() {
        let conn = test_db();
        for i in 0..5 {
            let t = Transcription::new(format!("texte {i}"), TranscriptSource::CsvImport);
            insert_transcription(&conn, &t).unwrap();
        }

        let batch = fetch_unprocessed(&conn, 3).unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(count_unprocessed(&conn).unwrap(), 5);
    }

    #[test]
    fn mark_processed_hides_from_fetch() {
        let conn = test_db();
        let t = Transcription::new("à traiter", TranscriptSource::Manual);
        insert_transcription(&conn, &t).unwrap();

        mark_processed(&conn, &t.id).unwrap();

        assert!(fetch_unprocessed(&conn, 10).unwrap().is_empty());
        let fetched = get_transcription(&conn, &t.id).unwrap().unwrap();
        assert!(fetched.is_processed);
        assert_eq!(fetched.status, ProcessingStatus::Completed);
    }

    #[test]
    fn mark_processed_unknown_id_errors() {
        let conn = test_db();
        let err = mark_processed(&conn, &Uuid::new_v4());
        assert!(matches!(err, Err(DatabaseError::NotFound { .. })));
    }

    #[test]
    fn client_ref_roundtrip() {
        let conn = test_db();
        let t = Transcription::new("texte", TranscriptSource::CsvImport).with_client_ref("row_7");
        insert_transcription(&conn, &t).unwrap();

        let fetched = get_transcription(&conn, &t.id).unwrap().unwrap();
        assert_eq!(fetched.client_ref.as_deref(), Some("row_7"));
    }
}
