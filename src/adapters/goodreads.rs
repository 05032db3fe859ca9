use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::adapters::parse_date;
use crate::config::profile::PlatformConfig;
use crate::domain::model::ReadEvent;
use crate::utils::error::{Result, SyncError};

const IMPORT_FIELDS: [&str; 20] = [
    "Title",
    "Author",
    "ISBN",
    "ISBN13",
    "My Rating",
    "Average Rating",
    "Publisher",
    "Binding",
    "Number of Pages",
    "Year Published",
    "Original Publication Year",
    "Date Read",
    "Date Added",
    "Bookshelves",
    "Exclusive Shelf",
    "My Review",
    "Spoiler",
    "Private Notes",
    "Read Count",
    "Owned Copies",
];

// Goodreads guards ISBN cells against spreadsheet auto-formatting: ="0385351402"
fn isbn_wrapper_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^="?([^"]*)"?$"#).unwrap())
}

/// Reduce a Goodreads ISBN cell to the bare digit string.
pub fn unwrap_isbn(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    match isbn_wrapper_re().captures(value) {
        Some(caps) => caps[1].trim().to_string(),
        None => value.trim().to_string(),
    }
}

/// Parse a Goodreads library export. Keeps only rows shelved as read;
/// the platform records a single date, so `start_date` is always absent.
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
                title = raw.get("Title").map(String::as_str).unwrap_or(""),
                status,
                "skipping row, not shelved as read"
            );
            continue;
        }

        let title = raw
            .get("Title")
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        if title.is_empty() {
            return Err(SyncError::ProcessingError {
                message: format!("Goodreads export row {}: required Title column is empty", row),
            });
        }

        let read_date = parse_date(
            raw.get("Date Read").map(String::as_str).unwrap_or(""),
            &config.date_formats,
        );

        events.push(ReadEvent {
            title,
            author: raw.get("Author").map(|s| s.trim().to_string()).unwrap_or_default(),
            isbn10: unwrap_isbn(raw.get("ISBN").map(String::as_str).unwrap_or("")),
            isbn13: unwrap_isbn(raw.get("ISBN13").map(String::as_str).unwrap_or("")),
            read_date,
            start_date: None,
            raw,
        });
    }
    Ok(events)
}

/// Serialize events into the Goodreads import schema. Bookkeeping columns
/// the events never carried get the platform's expected defaults.
pub fn write_import(events: &[ReadEvent]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(IMPORT_FIELDS)?;

    let today = chrono::Local::now().date_naive();
    for event in events {
        let date_read = event
            .read_date
            .map(|d| d.format("%Y/%m/%d").to_string())
            .unwrap_or_default();
        let wrap = |isbn: &str| {
            if isbn.is_empty() {
                r#"="""#.to_string()
            } else {
                format!(r#"="{}""#, isbn)
            }
        };
        // Goodreads wants plain "First Last"; flatten a leftover
        // "Lastname,Firstname" without reordering
        let author = if event.author.contains(',') {
            event.author.replace(',', " ")
        } else {
            event.author.clone()
        };

        writer.write_record([
            event.title.as_str(),
            author.as_str(),
            wrap(&event.isbn10).as_str(),
            wrap(&event.isbn13).as_str(),
            "0",
            "",
            "",
            "",
            "",
            "",
            "",
            date_read.as_str(),
            today.format("%Y/%m/%d").to_string().as_str(),
            "",
            "read",
            "",
            "",
            "",
            "1",
            "0",
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| SyncError::ProcessingError {
            message: format!("Failed to finalize Goodreads import CSV: {}", e),
        })
}
