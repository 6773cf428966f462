pub mod analysis_cache;
pub mod cleaned_transcription;
pub mod transcription;

pub use analysis_cache::*;
pub use cleaned_transcription::*;
pub use transcription::*;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn parse_uuid(column: usize, raw: &str) -> Result<uuid::Uuid, rusqlite::Error> {
    uuid::Uuid::parse_str(raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn format_datetime(dt: &chrono::NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

fn parse_datetime(raw: &str) -> chrono::NaiveDateTime {
    chrono::NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT).unwrap_or_default()
}
