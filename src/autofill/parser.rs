//! Row extraction from raw model output
//!
//! The provider is told to reply with a JSON array of strings, but model
//! output drifts: fenced code blocks, prose around the array, or a plain
//! list. Extraction is layered accordingly: locate and parse the JSON
//! array first, fall back to line-by-line scanning when that fails.
//! Total failure yields an empty vec, which callers treat as "no usable
//! suggestions", never a crash.

use crate::suggest::Row;

/// Parse up to `count` non-empty rows out of raw model output.
pub fn parse_rows(raw: &str, count: usize) -> Vec<Row> {
    let mut rows = match extract_json_array(raw) {
        Some(json) => {
            serde_json::from_str::<Vec<String>>(&json).unwrap_or_else(|_| parse_lines(raw))
        }
        None => parse_lines(raw),
    };
    rows.retain(|row| !row.is_empty());
    rows.truncate(count);
    rows
}

/// Extract the JSON array substring from raw output.
fn extract_json_array(raw: &str) -> Option<String> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    if end <= start {
        return None;
    }
    Some(raw[start..=end].to_string())
}

/// Salvage individual values from a malformed array or a plain list,
/// one per line.
fn parse_lines(raw: &str) -> Vec<Row> {
    raw.lines().filter_map(clean_line).map(String::from).collect()
}

/// Strip list markers, trailing commas, and surrounding quotes from one
/// line. Returns `None` for lines with no content of their own (blanks,
/// fence markers, array brackets).
fn clean_line(line: &str) -> Option<&str> {
    let mut line = line.trim();
    if line.is_empty() || matches!(line, "[" | "]" | "```" | "```json") {
        return None;
    }
    line = strip_list_marker(line);
    line = line.trim_end_matches(',').trim();
    if let Some(inner) = line.strip_prefix('"').and_then(|l| l.strip_suffix('"')) {
        line = inner;
    }
    if line.is_empty() { None } else { Some(line) }
}

/// Remove a leading "- ", "* ", or "3. " style marker.
fn strip_list_marker(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return rest.trim_start();
    }
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return rest.trim_start();
        }
    }
    line
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod parser_tests;
