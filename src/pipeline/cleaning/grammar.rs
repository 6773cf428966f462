use std::sync::LazyLock;

use regex::Regex;

static LEADING_PUNCT: LazyLock<Regex> = LazyLock::new(|| compile(r"^[\s,;.!?]+"));
static SPACE_BEFORE_PUNCT: LazyLock<Regex> = LazyLock::new(|| compile(r"\s+([,.;!?])"));
static DOT_RUN: LazyLock<Regex> = LazyLock::new(|| compile(r"\.{2,}"));
static COMMA_RUN: LazyLock<Regex> = LazyLock::new(|| compile(r",{2,}"));
static DOT_THEN_COMMA: LazyLock<Regex> = LazyLock::new(|| compile(r"\.\s*,"));
static COMMA_THEN_DOT: LazyLock<Regex> = LazyLock::new(|| compile(r"[,;]+\s*\."));
static PUNCT_NO_SPACE: LazyLock<Regex> = LazyLock::new(|| compile(r"([,.;!?])([^\s,.;!?])"));
static STRAY_DASH: LazyLock<Regex> = LazyLock::new(|| compile(r"\s-\s"));
static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| compile(r"\s+"));
static TRAILING_CLAUSE: LazyLock<Regex> = LazyLock::new(|| compile(r"[\s,;]+$"));
static SENTENCE_START: LazyLock<Regex> = LazyLock::new(|| compile(r"([.!?]\s+)(\p{Ll})"));

/// Colloquial-to-standard corrections, matched on whole-word boundaries.
/// Patterns are written so that their own output no longer matches —
/// re-running the stage must not pile up negations.
static CORRECTIONS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (compile(r"\b(?:ne\s+)?sais\s+pas\b"), "ne sais pas"),
        (compile(r"\bj['’]ai\s+pas\b"), "je n'ai pas"),
        (compile(r"\bc['’]est\s+pas\b"), "ce n'est pas"),
        (compile(r"\by['’]?a\b"), "il y a"),
        (compile(r"\bparceque\b"), "parce que"),
    ]
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid grammar pattern")
}

/// Stage 3: punctuation repair, colloquial corrections, capitalization.
///
/// Filler removal leaves orphaned commas and double punctuation behind;
/// this stage tidies those up, then restores the sentence shape the
/// case-folding of stage 1 destroyed.
pub fn normalize_grammar(masked: &str) -> String {
    let mut text = LEADING_PUNCT.replace(masked, "").into_owned();
    text = SPACE_BEFORE_PUNCT.replace_all(&text, "$1").into_owned();
    text = DOT_RUN.replace_all(&text, ".").into_owned();
    text = COMMA_RUN.replace_all(&text, ",").into_owned();
    text = DOT_THEN_COMMA.replace_all(&text, ",").into_owned();
    text = COMMA_THEN_DOT.replace_all(&text, ".").into_owned();
    text = PUNCT_NO_SPACE.replace_all(&text, "$1 $2").into_owned();
    text = STRAY_DASH.replace_all(&text, " ").into_owned();
    text = MULTI_SPACE.replace_all(&text, " ").into_owned();
    text = text.trim().to_string();
    text = TRAILING_CLAUSE.replace(&text, "").into_owned();

    for (pattern, replacement) in CORRECTIONS.iter() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }

    text = capitalize_sentences(&text);

    if !text.is_empty() && !text.ends_with(['.', '!', '?']) {
        text.push('.');
    }

    text
}

/// Upper-case the first letter of the text and the first letter after every
/// sentence-ending punctuation mark.
fn capitalize_sentences(text: &str) -> String {
    let mut chars = text.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => return String::new(),
    };

    SENTENCE_START
        .replace_all(&capitalized, |caps: &regex::Captures| {
            format!("{}{}", &caps[1], caps[2].to_uppercase())
        })
        .into_owned()
}
