use std::sync::LazyLock;

use regex::Regex;

/// Multi-word filler expressions. Applied before any single-word rule so a
/// longer idiom is removed as a unit — "du coup" must go before a word rule
/// could strip "coup" alone.
static FILLER_EXPRESSIONS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\ben quelque (?:sorte|manière)\b",
        r"\bpour ainsi dire\b",
        r"\bplus ou moins\b",
        r"\bsi je puis dire\b",
        r"\bcomme qui dirait\b",
        r"\bje veux dire\b",
        r"\bje dirais?\b",
        r"\bcomment dire\b",
        r"\bc['’]?est[- ]à[- ]dire\b",
        r"\bde toute (?:façon|manière)\b",
        r"\bpour le coup\b",
        r"\bdu coup\b",
        r"\bau coup\b",
        r"\bon va dire\b",
        r"\bsi vous voulez\b",
        r"\bsi tu veux\b",
        r"\btu (?:sais|vois)\b",
        r"\bvous (?:savez|voyez)\b",
        r"\ben (?:gros|fait|effet|réalité|tout cas|fin de compte)\b",
        r"\bpar (?:exemple|contre|hasard|ailleurs|conséquent)\b",
        r"\bdisons que\b",
        r"\bje pense que\b",
        r"\bje crois que\b",
        r"\beh bien\b",
        r"\bet ben\b",
        r"\bet euh\b",
        r"\bet donc\b",
        r"\bet alors\b",
        r"\bet puis\b",
    ]
    .iter()
    .map(|p| compile(p))
    .collect()
});

/// Single filler words, tolerant of letter repetition ("euh", "euuh",
/// "euuuh"). Whole-word boundaries only: "voilà" ends in "là" but the word
/// rule for "là" must never fire inside it.
static FILLER_WORDS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Hesitation sounds
        r"\be+u+h+\b",
        r"\bh+u+m+\b",
        r"\bh+m+\b",
        r"\ba+h+\b",
        r"\bo+h+\b",
        r"\bb+a+h+\b",
        r"\bb+e+n+\b",
        r"\bh+e+i+n+\b",
        // Empty connectives
        r"\bvoilà+\b",
        r"\bquoi+\b",
        r"\balors+\b",
        r"\bdonc+\b",
        r"\benfin+\b",
        r"\bbref+\b",
        r"\bpuis+\b",
        r"\bpis+\b",
        r"\blà+\b",
        r"\bgenre+\b",
    ]
    .iter()
    .map(|p| compile(p))
    .collect()
});

static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| compile(r"\s+"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid filler pattern")
}

/// Stage 1: case-fold and strip disfluencies.
///
/// Matches are replaced with a single space — adjoining punctuation is
/// never deleted, the grammar stage deals with any commas left dangling.
pub fn strip_fillers(raw: &str) -> String {
    let mut text = raw.to_lowercase();

    for expr in FILLER_EXPRESSIONS.iter() {
        text = expr.replace_all(&text, " ").into_owned();
    }
    for word in FILLER_WORDS.iter() {
        text = word.replace_all(&text, " ").into_owned();
    }

    MULTI_SPACE.replace_all(&text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // =================================================================
    // EXPRESSIONS
    // =================================================================

    #[test]
    fn removes_du_coup_as_a_unit() {
        let out = strip_fillers("Je voudrais le sac, du coup, en cuir.");
        assert!(!out.contains("du coup"));
        assert!(!out.contains("coup"), "no stranded half of the idiom: {out}");
        assert!(out.contains("le sac"));
    }

    #[test]
    fn removes_cest_a_dire_with_either_apostrophe() {
        for input in ["c'est-à-dire", "c’est-à-dire", "c'est à dire"] {
            let out = strip_fillers(&format!("le modèle, {input}, la version cuir"));
            assert!(!out.contains("dire"), "input {input:?} gave {out:?}");
        }
    }

    #[test]
    fn removes_expressions_before_words() {
        // "et euh" is one expression; the word rule must not get there
        // first and leave a stranded "et".
        let out = strip_fillers("je reviens et euh je paie");
        assert_eq!(out, "je reviens je paie");
    }

    // =================================================================
    // WORDS
    // =================================================================

    #[test]
    fn hesitations_tolerate_repeated_letters() {
        for hesitation in ["euh", "euuh", "euuuuh", "hum", "humm", "hmm", "baah"] {
            let out = strip_fillers(&format!("je {hesitation} voudrais"));
            assert_eq!(out, "je voudrais", "failed for {hesitation:?}");
        }
    }

    #[test]
    fn case_insensitive_matching() {
        let out = strip_fillers("Euh, VOILÀ, Donc je cherche");
        assert!(!out.contains("euh"));
        assert!(!out.contains("voilà"));
        assert!(!out.contains("donc"));
    }

    #[test]
    fn whole_word_boundaries_respected() {
        // "voilà" ends in "là", "meuh" contains "euh", "depuis" contains
        // "puis" — none of these may be torn apart.
        let out = strip_fillers("la vache fait meuh depuis hier");
        assert!(out.contains("meuh"));
        assert!(out.contains("depuis"));
    }

    #[test]
    fn la_removed_only_standalone() {
        let out = strip_fillers("elle est là mais la collection reste");
        assert!(!out.contains(" là"));
        assert!(out.contains("la collection"));
    }

    // =================================================================
    // WHITESPACE + EDGES
    // =================================================================

    #[test]
    fn punctuation_survives_removal() {
        let out = strip_fillers("Alors, euh, je voudrais le sac.");
        // Commas stay (the grammar stage cleans them up later).
        assert!(out.contains(','));
        assert!(out.ends_with('.'));
    }

    #[test]
    fn whitespace_collapsed_and_trimmed() {
        let out = strip_fillers("  euh   je   voudrais   euh  ");
        assert_eq!(out, "je voudrais");
    }

    #[test]
    fn empty_input_yields_empty() {
        assert_eq!(strip_fillers(""), "");
        assert_eq!(strip_fillers("   "), "");
    }

    #[test]
    fn output_is_lowercase() {
        let out = strip_fillers("Bonjour Madame");
        assert_eq!(out, "bonjour madame");
    }
}
