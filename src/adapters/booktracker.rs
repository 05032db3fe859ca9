use std::collections::HashMap;

use crate::adapters::parse_date;
use crate::config::profile::PlatformConfig;
use crate::domain::model::ReadEvent;
use crate::utils::error::{Result, SyncError};

const IMPORT_FIELDS: [&str; 9] = [
    "title",
    "authors",
    "isbn10",
    "isbn13",
    "readingStatus",
    "startReading",
    "endReading",
    "userRating",
    "pages",
];

// The export flattens all contributors into "Lastname,Firstname,Lastname2,
// Firstname2"; only the first surname/forename pair identifies the book.
fn first_author(authors: &str) -> String {
    let parts: Vec<&str> = authors.split(',').collect();
    if parts.len() >= 2 {
        format!("{},{}", parts[0], parts[1])
    } else {
        authors.to_string()
    }
}

/// Parse a Book Tracker export (semicolon-delimited). Keeps only rows in
/// read status; the platform tracks both a start and an end date.
pub fn read_events(data: &[u8], config: &PlatformConfig) -> Result<Vec<ReadEvent>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter as u8)
        .from_reader(data);
    let headers = reader.headers()?.clone();

    let mut events = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let row = index + 2; // header occupies line 1
        let raw: HashMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();

        let status = raw.get(&config.status_column).map(String::as_str).unwrap_or("");
        if !status.trim().eq_ignore_ascii_case(&config.status_value) {
            tracing::debug!(
                title = raw.get("title").map(String::as_str).unwrap_or(""),
                status,
                "skipping row, not in read status"
            );
            continue;
        }

        let title = raw
            .get("title")
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        if title.is_empty() {
            return Err(SyncError::ProcessingError {
                message: format!(
                    "Book Tracker export row {}: required title column is empty",
                    row
                ),
            });
        }

        let start_date = parse_date(
            raw.get("startReading").map(String::as_str).unwrap_or(""),
            &config.date_formats,
        );
        let read_date = parse_date(
            raw.get("endReading").map(String::as_str).unwrap_or(""),
            &config.date_formats,
        );

        events.push(ReadEvent {
            title,
            author: first_author(raw.get("authors").map(String::as_str).unwrap_or(""))
                .trim()
                .to_string(),
            isbn10: raw.get("isbn10").map(|s| s.trim().to_string()).unwrap_or_default(),
            isbn13: raw.get("isbn13").map(|s| s.trim().to_string()).unwrap_or_default(),
            read_date,
            start_date,
            raw,
        });
    }
    Ok(events)
}

/// Serialize events into the Book Tracker import schema.
pub fn write_import(events: &[ReadEvent]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());
    writer.write_record(IMPORT_FIELDS)?;

    for event in events {
        let end_reading = event
            .read_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        // Book Tracker wants "Lastname,Firstname"; rewrite a plain
        // "Firstname Lastname" on the way out
        let author = match (event.author.contains(' '), event.author.contains(',')) {
            (true, false) => match event.author.rsplit_once(' ') {
                Some((first, last)) => format!("{},{}", last, first),
                None => event.author.clone(),
            },
            _ => event.author.clone(),
        };

        writer.write_record([
            event.title.as_str(),
            author.as_str(),
            event.isbn10.as_str(),
            event.isbn13.as_str(),
            "read",
            "",
            end_reading.as_str(),
            "",
            "",
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| SyncError::ProcessingError {
            message: format!("Failed to finalize Book Tracker import CSV: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::profile::SyncProfile;
    use chrono::NaiveDate;

    const EXPORT: &str = "\
title;authors;isbn10;isbn13;readingStatus;startReading;endReading
1984;Orwell,George;0451524934;9780451524935;read;2025-03-01;2025-03-15
Dune;Herbert,Frank;;;reading;2025-04-01;
Good Omens;Pratchett,Terry,Gaiman,Neil;;9780060853983;read;;2025-05-20
";

    #[test]
    fn test_read_events_filters_and_parses() {
        let profile = SyncProfile::default();
        let events = read_events(EXPORT.as_bytes(), &profile.booktracker).unwrap();
        assert_eq!(events.len(), 2);

        assert_eq!(events[0].title, "1984");
        assert_eq!(events[0].author, "Orwell,George");
        assert_eq!(events[0].start_date, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(events[0].read_date, NaiveDate::from_ymd_opt(2025, 3, 15));
    }

    #[test]
    fn test_first_author_pair_kept() {
        let profile = SyncProfile::default();
        let events = read_events(EXPORT.as_bytes(), &profile.booktracker).unwrap();
        assert_eq!(events[1].title, "Good Omens");
        assert_eq!(events[1].author, "Pratchett,Terry");
        assert_eq!(events[1].start_date, None);
        assert_eq!(events[1].read_date, NaiveDate::from_ymd_opt(2025, 5, 20));
    }

    #[test]
    fn test_empty_title_row_is_an_error() {
        let export = "\
title;authors;isbn10;isbn13;readingStatus;startReading;endReading
;Orwell,George;;;read;;2025-03-15
";
        let profile = SyncProfile::default();
        let err = read_events(export.as_bytes(), &profile.booktracker).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_write_import_schema() {
        let mut event = ReadEvent::new("1984", "George Orwell");
        event.isbn13 = "9780451524935".to_string();
        event.read_date = NaiveDate::from_ymd_opt(2025, 3, 15);

        let bytes = write_import(std::slice::from_ref(&event)).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "title;authors;isbn10;isbn13;readingStatus;startReading;endReading;userRating;pages"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1984;Orwell,George;;9780451524935;read;;2025-03-15;;"
        );
    }
}
