use crate::domain::model::{ReadEvent, SyncOutcome};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn booktracker_path(&self) -> &str;
    fn goodreads_path(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn tolerance_days(&self) -> i64;
}

/// The three sync phases. Everything is synchronous: the whole
/// reconciliation is a pure function of the two loaded event lists.
pub trait Pipeline {
    /// Load (booktracker, goodreads) read events.
    fn extract(&self) -> Result<(Vec<ReadEvent>, Vec<ReadEvent>)>;
    fn compare(&self, booktracker: Vec<ReadEvent>, goodreads: Vec<ReadEvent>)
        -> Result<SyncOutcome>;
    fn load(&self, outcome: SyncOutcome) -> Result<String>;
}
