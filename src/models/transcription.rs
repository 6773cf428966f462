use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{ProcessingStatus, TranscriptSource};
use crate::pipeline::cleaning::{CleaningResult, PiiCategory};

/// A raw transcript as it entered the system — from the recording flow,
/// a CSV import or manual entry. The text is kept verbatim; cleaning never
/// rewrites this row, it produces a `CleanedTranscription` next to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    pub id: Uuid,
    pub raw_text: String,
    pub source: TranscriptSource,
    pub language: String,
    /// Client or row reference carried from the source, when one exists.
    pub client_ref: Option<String>,
    pub is_processed: bool,
    pub status: ProcessingStatus,
    pub created_at: NaiveDateTime,
}

impl Transcription {
    pub fn new(raw_text: impl Into<String>, source: TranscriptSource) -> Self {
        Self {
            id: Uuid::new_v4(),
            raw_text: raw_text.into(),
            source,
            language: "fr".to_string(),
            client_ref: None,
            is_processed: false,
            status: ProcessingStatus::Pending,
            created_at: chrono::Local::now().naive_local(),
        }
    }

    pub fn with_client_ref(mut self, client_ref: impl Into<String>) -> Self {
        self.client_ref = Some(client_ref.into());
        self
    }
}

/// Output of one cleaning run over a transcription, as persisted.
/// `is_compliant` holds exactly when `violations` is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanedTranscription {
    pub id: Uuid,
    pub transcription_id: Uuid,
    pub raw_text: String,
    pub cleaned_text: String,
    pub is_compliant: bool,
    pub violations: Vec<PiiCategory>,
    pub processing_status: ProcessingStatus,
    pub created_at: NaiveDateTime,
}

impl CleanedTranscription {
    /// Package a pipeline result for storage against its source row.
    pub fn from_result(transcription_id: Uuid, result: &CleaningResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            transcription_id,
            raw_text: result.original_text.clone(),
            cleaned_text: result.cleaned_text.clone(),
            is_compliant: result.is_compliant,
            violations: result.violations.clone(),
            processing_status: ProcessingStatus::Completed,
            created_at: chrono::Local::now().naive_local(),
        }
    }
}
