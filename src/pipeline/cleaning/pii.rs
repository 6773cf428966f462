use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::types::PiiCategory;

// Stage 1 has already case-folded the text, so every pattern here is written
// against lower-case input. The one rule that needs the original casing
// (proper names) checks it against the raw text instead.

static EMAIL: LazyLock<Regex> = LazyLock::new(|| compile(r"[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}"));

/// French national formats, with or without separators, with or without the
/// +33 / 0033 country prefix.
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?:(?:\+|00)33|0)\s*[1-9](?:[\s.\-]*\d{2}){4}"));

/// 13–16 digit runs with optional single grouping separators. A run shaped
/// like a social-insurance number is left for the next rule to claim.
static CARD: LazyLock<Regex> = LazyLock::new(|| compile(r"\b\d(?:[ \-]?\d){12,15}\b"));

/// French social-insurance shape: leading 1 or 2, then 2/2/2/3/3 groups and
/// an optional 2-digit key.
static NATIONAL_ID: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b[12]\s?\d{2}\s?\d{2}\s?\d{2}\s?\d{3}\s?\d{3}(?:\s?\d{2})?\b"));

/// Self-introduction phrases followed by up to two candidate name words.
/// Whether the candidate really is a name is decided against the raw text
/// (see `mask_proper_names`), never by the folded text alone.
static INTRODUCTION: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(?:je m['’]\s*appelle|je suis)\s+(\p{L}+(?:\s+\p{L}+)?)"));

static NAME_WORD: LazyLock<Regex> = LazyLock::new(|| compile(r"\p{L}+"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid PII pattern")
}

/// Stage 2: detect and mask personally identifiable information.
///
/// `defillered` is the stage-1 output (lower-case, fillers stripped); `raw`
/// is the untouched input, consulted only for capitalization evidence.
/// Categories are applied in a fixed order and each one that fires is
/// reported once, regardless of how many spans it masked.
pub fn mask_pii(defillered: &str, raw: &str) -> (String, Vec<PiiCategory>) {
    let mut violations = Vec::new();

    let (text, fired) = mask_with(&EMAIL, PiiCategory::Email.placeholder(), defillered);
    if fired {
        violations.push(PiiCategory::Email);
    }

    let (text, fired) = mask_with(&PHONE, PiiCategory::Phone.placeholder(), &text);
    if fired {
        violations.push(PiiCategory::Phone);
    }

    let (text, fired) = mask_cards(&text);
    if fired {
        violations.push(PiiCategory::CardNumber);
    }

    let (text, fired) = mask_with(&NATIONAL_ID, PiiCategory::NationalId.placeholder(), &text);
    if fired {
        violations.push(PiiCategory::NationalId);
    }

    let (text, fired) = mask_proper_names(&text, raw);
    if fired {
        violations.push(PiiCategory::ProperName);
    }

    (text, violations)
}

/// Replace every match of `re` with `placeholder`, reporting whether
/// anything matched.
fn mask_with(re: &Regex, placeholder: &str, text: &str) -> (String, bool) {
    if re.is_match(text) {
        (re.replace_all(text, placeholder).into_owned(), true)
    } else {
        (text.to_string(), false)
    }
}

/// Card masking skips digit runs that look like a social-insurance number,
/// so the national-id rule can tag them under their own category.
fn mask_cards(text: &str) -> (String, bool) {
    let mut fired = false;
    let result = CARD.replace_all(text, |caps: &regex::Captures| {
        let span = caps.get(0).unwrap().as_str();
        if looks_like_national_id(span) {
            span.to_string()
        } else {
            fired = true;
            PiiCategory::CardNumber.placeholder().to_string()
        }
    });
    (result.into_owned(), fired)
}

fn looks_like_national_id(span: &str) -> bool {
    let digits: Vec<char> = span.chars().filter(|c| c.is_ascii_digit()).collect();
    matches!(digits.len(), 13 | 15) && matches!(digits.first(), Some('1') | Some('2'))
}

/// Mask names after self-introduction phrases.
///
/// The folded text no longer carries case, so "je suis content" and
/// "je suis Martin" read identically here. A candidate word is only treated
/// as a name if the raw input spells it with a leading capital — that is
/// what keeps common nouns out of the redaction.
fn mask_proper_names(text: &str, raw: &str) -> (String, bool) {
    let mut candidates: Option<HashSet<String>> = None;

    let mut fired = false;
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in INTRODUCTION.captures_iter(text) {
        let name = caps.get(1).unwrap();
        let capitalized =
            candidates.get_or_insert_with(|| capitalized_words(raw));

        // Mask the leading run of words the raw text capitalizes; stop at
        // the first that it does not ("je suis Marie et ..." masks only
        // "marie").
        let mut mask_end = name.start();
        for word in NAME_WORD.find_iter(name.as_str()) {
            if capitalized.contains(word.as_str()) {
                mask_end = name.start() + word.end();
            } else {
                break;
            }
        }

        if mask_end > name.start() {
            fired = true;
            out.push_str(&text[last..name.start()]);
            out.push_str(PiiCategory::ProperName.placeholder());
            last = mask_end;
        }
    }

    if !fired {
        return (text.to_string(), false);
    }
    out.push_str(&text[last..]);
    (out, true)
}

/// Lower-cased forms of every word the raw text spells with a leading
/// capital letter.
fn capitalized_words(raw: &str) -> HashSet<String> {
    NAME_WORD
        .find_iter(raw)
        .filter(|m| {
            m.as_str()
                .chars()
                .next()
                .map(char::is_uppercase)
                .unwrap_or(false)
        })
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(folded: &str) -> (String, Vec<PiiCategory>) {
        // Most tests don't exercise the capitalization gate; reuse the
        // folded text as "raw" for those.
        mask_pii(folded, folded)
    }

    // =================================================================
    // EMAIL
    // =================================================================

    #[test]
    fn email_masked() {
        let (text, violations) = mask("contactez-moi à jean.dupont@example.com pour la commande");
        assert!(!text.contains("jean.dupont@example.com"));
        assert!(text.contains("[EMAIL]"));
        assert_eq!(violations, vec![PiiCategory::Email]);
    }

    #[test]
    fn multiple_emails_single_violation() {
        let (text, violations) = mask("écrire à a@b.fr ou c@d.com");
        assert_eq!(text.matches("[EMAIL]").count(), 2);
        assert_eq!(violations, vec![PiiCategory::Email]);
    }

    // =================================================================
    // PHONE
    // =================================================================

    #[test]
    fn phone_with_spaces_masked() {
        let (text, violations) = mask("mon numéro est 06 12 34 56 78");
        assert!(!text.contains("06 12 34 56 78"));
        assert!(text.contains("[TELEPHONE]"));
        assert_eq!(violations, vec![PiiCategory::Phone]);
    }

    #[test]
    fn phone_formats_all_masked() {
        for number in ["0612345678", "06.12.34.56.78", "+33 6 12 34 56 78", "0033612345678"] {
            let (text, violations) = mask(&format!("rappelez-moi au {number} merci"));
            assert!(text.contains("[TELEPHONE]"), "format {number:?} gave {text:?}");
            assert!(violations.contains(&PiiCategory::Phone));
        }
    }

    // =================================================================
    // CARD NUMBER
    // =================================================================

    #[test]
    fn card_sixteen_digits_masked() {
        let (text, violations) = mask("je paie avec la carte 4532 1234 5678 9010 demain");
        assert!(text.contains("[CARTE_BANCAIRE]"));
        assert!(!text.contains("4532"));
        assert!(violations.contains(&PiiCategory::CardNumber));
    }

    #[test]
    fn card_thirteen_digits_masked() {
        let (text, violations) = mask("numéro 4111111111111 sur la carte");
        assert!(text.contains("[CARTE_BANCAIRE]"));
        assert!(violations.contains(&PiiCategory::CardNumber));
    }

    // =================================================================
    // NATIONAL ID
    // =================================================================

    #[test]
    fn national_id_masked_not_as_card() {
        let (text, violations) = mask("mon numéro de sécu est 1 85 05 78 006 048 22 voilà");
        assert!(text.contains("[SECU]"), "got {text:?}");
        assert!(violations.contains(&PiiCategory::NationalId));
        assert!(!violations.contains(&PiiCategory::CardNumber));
    }

    #[test]
    fn national_id_without_key_masked() {
        // 13 digits, no trailing key
        let (text, violations) = mask("numéro 2 93 07 75 123 456 enregistré");
        assert!(text.contains("[SECU]"), "got {text:?}");
        assert!(violations.contains(&PiiCategory::NationalId));
    }

    // =================================================================
    // PROPER NAMES
    // =================================================================

    #[test]
    fn name_after_je_mappelle_masked() {
        let raw = "Bonjour, je m'appelle Marie Dubois et je cherche un sac";
        let folded = raw.to_lowercase();
        let (text, violations) = mask_pii(&folded, raw);
        assert!(text.contains("je m'appelle [NOM]"), "got {text:?}");
        assert!(!text.contains("marie"));
        assert!(!text.contains("dubois"));
        assert_eq!(violations, vec![PiiCategory::ProperName]);
    }

    #[test]
    fn name_after_je_suis_masked() {
        let raw = "je suis Martin, enchanté";
        let (text, violations) = mask_pii(&raw.to_lowercase(), raw);
        assert!(text.contains("[NOM]"));
        assert!(!text.contains("martin"));
        assert_eq!(violations, vec![PiiCategory::ProperName]);
    }

    #[test]
    fn common_noun_after_je_suis_not_masked() {
        let raw = "Je suis content de cette collection";
        let (text, violations) = mask_pii(&raw.to_lowercase(), raw);
        assert!(text.contains("content"));
        assert!(text.contains("cette"));
        assert!(!text.contains("[NOM]"));
        assert!(violations.is_empty());
    }

    #[test]
    fn mask_stops_at_first_uncapitalized_word() {
        let raw = "je suis Marie et j'aimerais un foulard";
        let (text, _) = mask_pii(&raw.to_lowercase(), raw);
        assert!(text.contains("[NOM] et"), "got {text:?}");
    }

    #[test]
    fn curly_apostrophe_introduction() {
        let raw = "je m’appelle Jean";
        let (text, violations) = mask_pii(&raw.to_lowercase(), raw);
        assert!(text.contains("[NOM]"));
        assert_eq!(violations, vec![PiiCategory::ProperName]);
    }

    // =================================================================
    // ORDERING + COMBINATIONS
    // =================================================================

    #[test]
    fn violations_follow_detection_order() {
        let raw = "je m'appelle Paul, mon email est p@x.fr et mon numéro 06 11 22 33 44";
        let (_, violations) = mask_pii(&raw.to_lowercase(), raw);
        assert_eq!(
            violations,
            vec![PiiCategory::Email, PiiCategory::Phone, PiiCategory::ProperName]
        );
    }

    #[test]
    fn clean_text_reports_nothing() {
        let (text, violations) = mask("je voudrais voir la nouvelle collection de sacs");
        assert_eq!(text, "je voudrais voir la nouvelle collection de sacs");
        assert!(violations.is_empty());
    }

    #[test]
    fn empty_text_reports_nothing() {
        let (text, violations) = mask("");
        assert!(text.is_empty());
        assert!(violations.is_empty());
    }
}
