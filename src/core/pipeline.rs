use serde::Serialize;

use crate::adapters::{booktracker, goodreads};
use crate::config::profile::SyncProfile;
use crate::core::diff::reconcile;
use crate::core::{ConfigProvider, Pipeline, ReadEvent, Storage, SyncOutcome};
use crate::utils::error::Result;

pub const MISSING_FROM_GOODREADS: &str = "missing_from_goodreads.csv";
pub const MISSING_FROM_BOOKTRACKER: &str = "missing_from_booktracker.csv";
pub const SYNC_REPORT: &str = "sync_report.json";

/// Run summary written next to the import files.
#[derive(Debug, Serialize)]
struct SyncReport {
    generated_at: String,
    booktracker_csv: String,
    goodreads_csv: String,
    tolerance_days: i64,
    missing_from_goodreads: usize,
    missing_from_booktracker: usize,
    outputs: Vec<String>,
}

pub struct SyncPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    profile: SyncProfile,
}

impl<S: Storage, C: ConfigProvider> SyncPipeline<S, C> {
    pub fn new(storage: S, config: C, profile: SyncProfile) -> Self {
        Self {
            storage,
            config,
            profile,
        }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for SyncPipeline<S, C> {
    fn extract(&self) -> Result<(Vec<ReadEvent>, Vec<ReadEvent>)> {
        tracing::debug!(
            "Loading Book Tracker export from: {}",
            self.config.booktracker_path()
        );
        let data = self.storage.read_file(self.config.booktracker_path())?;
        let booktracker = booktracker::read_events(&data, &self.profile.booktracker)?;
        tracing::info!("Found {} read books in Book Tracker", booktracker.len());

        tracing::debug!(
            "Loading Goodreads export from: {}",
            self.config.goodreads_path()
        );
        let data = self.storage.read_file(self.config.goodreads_path())?;
        let goodreads = goodreads::read_events(&data, &self.profile.goodreads)?;
        tracing::info!("Found {} read books in Goodreads", goodreads.len());

        Ok((booktracker, goodreads))
    }

    fn compare(
        &self,
        booktracker: Vec<ReadEvent>,
        goodreads: Vec<ReadEvent>,
    ) -> Result<SyncOutcome> {
        let tolerance = self.config.tolerance_days();
        tracing::info!("Comparing libraries using {}-day date tolerance", tolerance);
        Ok(reconcile(&booktracker, &goodreads, tolerance))
    }

    fn load(&self, outcome: SyncOutcome) -> Result<String> {
        let mut outputs = Vec::new();

        // 空清單不產生匯入檔
        if outcome.missing_from_goodreads.is_empty() {
            tracing::info!("No books to write to {}", MISSING_FROM_GOODREADS);
        } else {
            let data = goodreads::write_import(&outcome.missing_from_goodreads)?;
            self.storage.write_file(MISSING_FROM_GOODREADS, &data)?;
            tracing::info!(
                "Wrote {} books to {}",
                outcome.missing_from_goodreads.len(),
                MISSING_FROM_GOODREADS
            );
            outputs.push(MISSING_FROM_GOODREADS.to_string());
        }

        if outcome.missing_from_booktracker.is_empty() {
            tracing::info!("No books to write to {}", MISSING_FROM_BOOKTRACKER);
        } else {
            let data = booktracker::write_import(&outcome.missing_from_booktracker)?;
            self.storage.write_file(MISSING_FROM_BOOKTRACKER, &data)?;
            tracing::info!(
                "Wrote {} books to {}",
                outcome.missing_from_booktracker.len(),
                MISSING_FROM_BOOKTRACKER
            );
            outputs.push(MISSING_FROM_BOOKTRACKER.to_string());
        }

        let report = SyncReport {
            generated_at: chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            booktracker_csv: self.config.booktracker_path().to_string(),
            goodreads_csv: self.config.goodreads_path().to_string(),
            tolerance_days: self.config.tolerance_days(),
            missing_from_goodreads: outcome.missing_from_goodreads.len(),
            missing_from_booktracker: outcome.missing_from_booktracker.len(),
            outputs,
        };
        let json = serde_json::to_string_pretty(&report)?;
        self.storage.write_file(SYNC_REPORT, json.as_bytes())?;

        Ok(self.config.output_dir().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct MockStorage {
        inputs: HashMap<String, Vec<u8>>,
        written: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                inputs: HashMap::new(),
                written: RefCell::new(HashMap::new()),
            }
        }
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.inputs.get(path).cloned().ok_or_else(|| {
                crate::utils::error::SyncError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.written
                .borrow_mut()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct TestConfig;

    impl ConfigProvider for TestConfig {
        fn booktracker_path(&self) -> &str {
            "booktracker.csv"
        }
        fn goodreads_path(&self) -> &str {
            "goodreads.csv"
        }
        fn output_dir(&self) -> &str {
            "./out"
        }
        fn tolerance_days(&self) -> i64 {
            30
        }
    }

    const BOOKTRACKER: &str = "\
title;authors;isbn10;isbn13;readingStatus;startReading;endReading
1984;Orwell,George;;9780451524935;read;2025-03-01;2025-03-15
Only Here;Nobody,Else;;;read;;2025-06-01
";

    const GOODREADS: &str = "\
Title,Author,ISBN,ISBN13,Exclusive Shelf,Date Read
1984,George Orwell,,\"=\"\"9780451524935\"\"\",read,2025/03/20
Only There,Someone Else,,,read,2025/01/05
";

    fn pipeline_with_fixtures() -> SyncPipeline<MockStorage, TestConfig> {
        let mut storage = MockStorage::new();
        storage
            .inputs
            .insert("booktracker.csv".to_string(), BOOKTRACKER.as_bytes().to_vec());
        storage
            .inputs
            .insert("goodreads.csv".to_string(), GOODREADS.as_bytes().to_vec());
        SyncPipeline::new(storage, TestConfig, SyncProfile::default())
    }

    #[test]
    fn test_extract_both_sources() {
        let pipeline = pipeline_with_fixtures();
        let (booktracker, goodreads) = pipeline.extract().unwrap();
        assert_eq!(booktracker.len(), 2);
        assert_eq!(goodreads.len(), 2);
    }

    #[test]
    fn test_full_run_partitions_events() {
        let pipeline = pipeline_with_fixtures();
        let (booktracker, goodreads) = pipeline.extract().unwrap();
        let outcome = pipeline.compare(booktracker, goodreads).unwrap();

        // 1984 matches by isbn13 within tolerance; the singletons do not
        let missing_gr: Vec<&str> = outcome
            .missing_from_goodreads
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(missing_gr, vec!["Only Here"]);
        let missing_bt: Vec<&str> = outcome
            .missing_from_booktracker
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(missing_bt, vec!["Only There"]);

        pipeline.load(outcome).unwrap();
        let written = pipeline.storage.written.borrow();
        assert!(written.contains_key(MISSING_FROM_GOODREADS));
        assert!(written.contains_key(MISSING_FROM_BOOKTRACKER));
        assert!(written.contains_key(SYNC_REPORT));

        let report: serde_json::Value =
            serde_json::from_slice(written.get(SYNC_REPORT).unwrap()).unwrap();
        assert_eq!(report["missing_from_goodreads"], 1);
        assert_eq!(report["tolerance_days"], 30);
    }

    #[test]
    fn test_empty_directions_skip_import_files() {
        let mut storage = MockStorage::new();
        storage
            .inputs
            .insert("booktracker.csv".to_string(), BOOKTRACKER.as_bytes().to_vec());
        // Same library on both sides, re-expressed in Goodreads schema
        let same = "\
Title,Author,ISBN,ISBN13,Exclusive Shelf,Date Read
1984,George Orwell,,\"=\"\"9780451524935\"\"\",read,2025/03/20
Only Here,Else Nobody,,,read,2025/06/01
";
        storage
            .inputs
            .insert("goodreads.csv".to_string(), same.as_bytes().to_vec());
        let pipeline = SyncPipeline::new(storage, TestConfig, SyncProfile::default());

        let (booktracker, goodreads) = pipeline.extract().unwrap();
        let outcome = pipeline.compare(booktracker, goodreads).unwrap();
        pipeline.load(outcome).unwrap();

        let written = pipeline.storage.written.borrow();
        assert!(!written.contains_key(MISSING_FROM_GOODREADS));
        assert!(!written.contains_key(MISSING_FROM_BOOKTRACKER));
        assert!(written.contains_key(SYNC_REPORT));
    }
}
