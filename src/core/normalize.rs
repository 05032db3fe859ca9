use regex::Regex;
use std::sync::OnceLock;

fn non_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s]").unwrap())
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

// Trailing parenthetical holding a series position like "(Red Rising Saga, #3)"
fn series_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*\([^)]*#\d+[^)]*\)\s*$").unwrap())
}

// Trailing parenthetical naming a series without a position marker
fn series_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\s*\([^)]*(?:series|saga|trilogy|book|volume|#)[^)]*\)\s*$").unwrap()
    })
}

/// Canonicalize free text for comparison: lowercase, drop everything that
/// is not a letter/digit/whitespace, collapse whitespace runs, trim.
/// Total function: empty in, empty out.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = non_word_re().replace_all(&lowered, "");
    whitespace_re()
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

/// Canonicalize a book title: drop a subtitle after the first colon, drop
/// a trailing series annotation, then `normalize_text`.
///
/// "Morning Star (Red Rising Saga, #3)" -> "morning star"
/// "Co-Intelligence: Living and Working with AI" -> "cointelligence"
pub fn normalize_title(title: &str) -> String {
    let head = match title.split_once(':') {
        Some((before, _)) => before,
        None => title,
    };
    let head = series_number_re().replace(head, "");
    let head = series_word_re().replace(&head, "");
    normalize_text(&head)
}

/// Canonicalize an author name. Book Tracker exports "Lastname,Firstname";
/// that shape (comma present, no space before the comma, exactly two
/// parts) is rewritten to "Firstname Lastname". Anything else passes
/// straight to `normalize_text`.
pub fn normalize_author(author: &str) -> String {
    if let Some((before, _)) = author.split_once(',') {
        if !before.contains(' ') {
            let parts: Vec<&str> = author.split(',').collect();
            if parts.len() == 2 {
                return normalize_text(&format!("{} {}", parts[1].trim(), parts[0].trim()));
            }
        }
    }
    normalize_text(author)
}
