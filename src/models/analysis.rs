use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A cached classification result, keyed by the cleaned text it was computed
/// from. Identical transcripts reuse the entry instead of re-calling the
/// model; entries are invalidated rather than deleted so a key never flips
/// silently between model versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisCacheEntry {
    /// The cleaned transcript text the analysis was computed from.
    pub cache_key: String,
    /// Raw JSON payload returned by the classification service.
    pub analysis_json: String,
    pub model_version: Option<String>,
    pub created_at: NaiveDateTime,
    pub invalidated_at: Option<NaiveDateTime>,
}

impl AnalysisCacheEntry {
    pub fn new(cache_key: impl Into<String>, analysis_json: impl Into<String>) -> Self {
        Self {
            cache_key: cache_key.into(),
            analysis_json: analysis_json.into(),
            model_version: None,
            created_at: chrono::Local::now().naive_local(),
            invalidated_at: None,
        }
    }

    pub fn with_model_version(mut self, version: impl Into<String>) -> Self {
        self.model_version = Some(version.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_is_valid() {
        let entry = AnalysisCacheEntry::new("je cherche un sac.", r#"{"intention":"Exploration"}"#);
        assert!(entry.invalidated_at.is_none());
        assert!(entry.model_version.is_none());
    }

    #[test]
    fn model_version_builder() {
        let entry = AnalysisCacheEntry::new("texte", "{}").with_model_version("gpt-4o-mini");
        assert_eq!(entry.model_version.as_deref(), Some("gpt-4o-mini"));
    }
}
