use serde::{Deserialize, Serialize};

/// A category of personally identifiable information the masking stage can
/// detect. The variant order is the detection order of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiCategory {
    Email,
    Phone,
    CardNumber,
    NationalId,
    ProperName,
}

impl PiiCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::CardNumber => "card_number",
            Self::NationalId => "national_id",
            Self::ProperName => "proper_name",
        }
    }

    /// The marker substituted for every occurrence of this category.
    /// Markers are distinct per category so a reviewer can still tell what
    /// kind of data was redacted.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Email => "[EMAIL]",
            Self::Phone => "[TELEPHONE]",
            Self::CardNumber => "[CARTE_BANCAIRE]",
            Self::NationalId => "[SECU]",
            Self::ProperName => "[NOM]",
        }
    }
}

impl std::fmt::Display for PiiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one pipeline invocation. Immutable once built; persisting it
/// (or feeding `cleaned_text` to the classification service) is the
/// caller's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningResult {
    /// The input, untouched.
    pub original_text: String,
    /// Case-folded text after filler removal, before masking. Kept for
    /// auditing which stage changed what.
    pub defillered_text: String,
    /// Final masked and normalized text — the only field that may leave
    /// the application boundary.
    pub cleaned_text: String,
    /// True exactly when `violations` is empty.
    pub is_compliant: bool,
    /// Detected categories in detection order, one entry per category
    /// regardless of occurrence count.
    pub violations: Vec<PiiCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_distinct() {
        let all = [
            PiiCategory::Email,
            PiiCategory::Phone,
            PiiCategory::CardNumber,
            PiiCategory::NationalId,
            PiiCategory::ProperName,
        ];
        for a in &all {
            for b in &all {
                if a != b {
                    assert_ne!(a.placeholder(), b.placeholder());
                }
            }
        }
    }

    #[test]
    fn category_serializes_snake_case() {
        let json = serde_json::to_string(&PiiCategory::CardNumber).unwrap();
        assert_eq!(json, r#""card_number""#);
        let back: PiiCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PiiCategory::CardNumber);
    }

    #[test]
    fn result_serializes_roundtrip() {
        let result = CleaningResult {
            original_text: "Mon email est x@y.fr".into(),
            defillered_text: "mon email est x@y.fr".into(),
            cleaned_text: "Mon email est [EMAIL].".into(),
            is_compliant: false,
            violations: vec![PiiCategory::Email],
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: CleaningResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
