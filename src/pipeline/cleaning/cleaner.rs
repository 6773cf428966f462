use super::fillers::strip_fillers;
use super::grammar::normalize_grammar;
use super::pii::mask_pii;
use super::types::CleaningResult;

/// Run the full cleaning pipeline over one raw transcript.
///
/// The three stages run in a fixed order — fillers out first so that noise
/// tokens cannot sit inside a phone number or an email when the masking
/// patterns look for them, masking second, grammar repair last on the
/// masked text. The function is total and deterministic: any string in,
/// including the empty one, and the same input always yields the same
/// result.
pub fn clean(raw: &str) -> CleaningResult {
    let defillered = strip_fillers(raw);
    let (masked, violations) = mask_pii(&defillered, raw);
    let cleaned = normalize_grammar(&masked);
    let is_compliant = violations.is_empty();

    // Transcript content stays out of the logs; counts are enough.
    tracing::debug!(
        input_chars = raw.chars().count(),
        output_chars = cleaned.chars().count(),
        compliant = is_compliant,
        violation_count = violations.len(),
        "Transcript cleaned"
    );

    CleaningResult {
        original_text: raw.to_string(),
        defillered_text: defillered,
        cleaned_text: cleaned,
        is_compliant,
        violations,
    }
}
