//! Normalisation and limits for player-entered text.

pub const MAX_ANSWER_CHARS: usize = 200;
pub const MAX_DISPLAY_NAME_CHARS: usize = 64;

/// Trim, collapse inner whitespace and lowercase.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whether a submitted fake would reveal (or duplicate) the real answer.
pub fn matches_truth(submitted: &str, truth: &str) -> bool {
    normalize(submitted) == normalize(truth)
}

/// Trimmed text if it is non-empty and within `max_chars`.
pub fn clean(text: &str, max_chars: usize) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.chars().count() > max_chars {
        None
    } else {
        Some(trimmed.to_string())
    }
}
