use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::normalize::{normalize_author, normalize_title};

/// One recorded instance of having read a book, as logged by a platform.
///
/// Built once per input row at load time and never mutated afterwards.
/// `raw` carries the original source columns untouched so a writer can
/// re-export bookkeeping fields the matcher never looks at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadEvent {
    pub title: String,
    /// Author exactly as the source formatted it ("George Orwell" or
    /// "Orwell,George" depending on platform).
    pub author: String,
    /// Bare digit string; empty means unknown, never a matching value.
    pub isbn10: String,
    pub isbn13: String,
    /// End date, or the single date for platforms that track only one.
    pub read_date: Option<NaiveDate>,
    /// Start date, only for platforms that track reading start.
    pub start_date: Option<NaiveDate>,
    /// Opaque passthrough of the original row, keyed by source column name.
    pub raw: HashMap<String, String>,
}

impl ReadEvent {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn10: String::new(),
            isbn13: String::new(),
            read_date: None,
            start_date: None,
            raw: HashMap::new(),
        }
    }
}

/// Derived identifiers used to test whether two read events denote the
/// same book: `(isbn13, isbn10, "title|author", title)` in normalized
/// form, plus the normalized author for the prefix rule. Recomputed on
/// demand, never cached on the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchKey {
    pub isbn13: String,
    pub isbn10: String,
    pub title_author: String,
    pub title: String,
    pub author: String,
}

impl MatchKey {
    pub fn of(event: &ReadEvent) -> Self {
        let title = normalize_title(&event.title);
        let author = normalize_author(&event.author);
        let title_author = if title.is_empty() && author.is_empty() {
            String::new()
        } else {
            format!("{}|{}", title, author)
        };
        Self {
            isbn13: event.isbn13.clone(),
            isbn10: event.isbn10.clone(),
            title_author,
            title,
            author,
        }
    }
}

/// Result of the compare step: each direction's missing subset, in the
/// source list's original order. The two lists are independent
/// computations, not complements of one another.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// In Book Tracker, absent from Goodreads.
    pub missing_from_goodreads: Vec<ReadEvent>,
    /// In Goodreads, absent from Book Tracker.
    pub missing_from_booktracker: Vec<ReadEvent>,
}
