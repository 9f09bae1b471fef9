use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // `;` starts a comment running to the end of the line
    static ref LINE_COMMENT: Regex = Regex::new(r"\s*;.*$").unwrap();
}

/// Splits raw PGN text into trimmed, non-empty lines with `;` comments removed.
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| LINE_COMMENT.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
