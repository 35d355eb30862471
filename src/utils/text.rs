/// Strip a surrounding triple-backtick fence (with optional language tag)
/// from an oracle reply. Text without a leading fence is only trimmed.
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }
    // Drop the opening fence line, which may carry a language tag
    let body = match trimmed.find('\n') {
        Some(idx) => &trimmed[idx + 1..],
        None => return String::new(),
    };
    // The body ends at the next fence; prose after the closing fence is
    // commentary, never part of the program
    let body = match body.find("```") {
        Some(idx) => &body[..idx],
        None => body,
    };
    body.trim().to_string()
}

/// Truncate to at most `max` characters, never splitting a code point.
/// No word-boundary adjustment.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
