use std::path::Path;

use serde::{Deserialize, Serialize};

use super::IngestError;

/// One usable row extracted from a delimited source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptRow {
    /// Row reference: the source's id/ref cell when one exists, else a
    /// positional "row_N".
    pub row_ref: String,
    /// The transcript cell, unquoted and trimmed.
    pub text: String,
}

/// Result of parsing a delimited source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedSource {
    pub rows: Vec<TranscriptRow>,
    /// Lines that had no usable text cell.
    pub skipped: usize,
}

/// Header names accepted for the transcript column, by substring.
const TEXT_HEADERS: &[&str] = &["transcription", "text", "content"];
const REF_HEADERS: &[&str] = &["id", "ref"];

/// Parse CSV-like content: sniff the header for a transcript column
/// (falling back to column 0 with no header row), then collect one
/// `TranscriptRow` per data line. A malformed line never aborts the parse —
/// it is counted and skipped, each row stands alone.
pub fn parse_source(content: &str) -> Result<ParsedSource, IngestError> {
    let lines: Vec<&str> = content
        .split(['\r', '\n'])
        .filter(|l| !l.trim().is_empty())
        .collect();
    if lines.is_empty() {
        return Err(IngestError::EmptySource);
    }

    let headers: Vec<String> = split_line(lines[0])
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    let text_col = headers
        .iter()
        .position(|h| TEXT_HEADERS.iter().any(|n| h.contains(n)));
    let ref_col = headers
        .iter()
        .position(|h| REF_HEADERS.iter().any(|n| h.contains(n)));

    // Only a recognized header row is consumed; otherwise every line is
    // data and the text lives in the first column.
    let (start, text_col) = match text_col {
        Some(col) => (1, col),
        None => (0, 0),
    };

    let mut rows = Vec::new();
    let mut skipped = 0;

    for (offset, line) in lines[start..].iter().enumerate() {
        let line_number = start + offset;
        let cells = split_line(line);

        let text = cells.get(text_col).map(|c| c.trim()).unwrap_or_default();
        if text.is_empty() {
            skipped += 1;
            continue;
        }

        let row_ref = ref_col
            .and_then(|col| cells.get(col))
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("row_{line_number}"));

        rows.push(TranscriptRow {
            row_ref,
            text: text.to_string(),
        });
    }

    Ok(ParsedSource { rows, skipped })
}

/// Read and parse a delimited file from disk.
pub fn read_source(path: &Path) -> Result<ParsedSource, IngestError> {
    let content = std::fs::read_to_string(path)?;
    parse_source(&content)
}

/// Split one line on commas, honoring double-quoted cells. A doubled quote
/// inside a quoted cell is an escaped quote.
fn split_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => cells.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    cells.push(current);
    cells
}
