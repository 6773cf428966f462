use rusqlite::{params, Connection};

use super::{format_datetime, parse_datetime};
use crate::db::DatabaseError;
use crate::models::AnalysisCacheEntry;

/// Insert or refresh a cached classification for a cleaned transcript.
pub fn upsert_analysis(conn: &Connection, entry: &AnalysisCacheEntry) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO analysis_cache (cache_key, analysis_json, model_version, created_at, invalidated_at)
         VALUES (?1, ?2, ?3, ?4, NULL)
         ON CONFLICT(cache_key) DO UPDATE SET
           analysis_json = excluded.analysis_json,
           model_version = excluded.model_version,
           created_at = excluded.created_at,
           invalidated_at = NULL",
        params![
            entry.cache_key,
            entry.analysis_json,
            entry.model_version,
            format_datetime(&entry.created_at),
        ],
    )?;
    Ok(())
}

/// Look up a valid (non-invalidated) cached classification.
pub fn get_analysis(
    conn: &Connection,
    cache_key: &str,
) -> Result<Option<AnalysisCacheEntry>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT cache_key, analysis_json, model_version, created_at, invalidated_at
         FROM analysis_cache
         WHERE cache_key = ?1 AND invalidated_at IS NULL
         LIMIT 1",
    )?;
    let mut rows = stmt.query_map(params![cache_key], row_to_entry)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// Invalidate every cached entry (e.g. after a model or taxonomy change).
pub fn invalidate_all_analyses(conn: &Connection) -> Result<u64, DatabaseError> {
    let affected = conn.execute(
        "UPDATE analysis_cache SET invalidated_at = datetime('now')
         WHERE invalidated_at IS NULL",
        [],
    )?;
    Ok(affected as u64)
}

fn row_to_entry(row: &rusqlite::Row) -> Result<AnalysisCacheEntry, rusqlite::Error> {
    let created_str: String = row.get(3)?;
    let invalidated_str: Option<String> = row.get(4)?;

    Ok(AnalysisCacheEntry {
        cache_key: row.get(0)?,
        analysis_json: row.get(1)?,
        model_version: row.get(2)?,
        created_at: parse_datetime(&created_str),
        invalidated_at: invalidated_str.map(|s| parse_datetime(&s)),
    })
}
