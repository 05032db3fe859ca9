pub mod cli;
pub mod profile;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_input_file, validate_path, validate_range, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "shelf-sync")]
#[command(about = "Reconcile Goodreads and Book Tracker reading-history exports")]
pub struct CliConfig {
    /// Path to the Book Tracker CSV export
    pub booktracker_csv: String,

    /// Path to the Goodreads CSV export
    pub goodreads_csv: String,

    #[arg(long, default_value = ".", help = "Directory to write import files")]
    pub output_dir: String,

    /// Date tolerance in days for matching reads. Defaults to 30, or to
    /// the profile's value when a profile is given.
    #[arg(long)]
    pub tolerance_days: Option<i64>,

    #[arg(long, help = "Optional TOML profile overriding parse settings")]
    pub profile: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn booktracker_path(&self) -> &str {
        &self.booktracker_csv
    }

    fn goodreads_path(&self) -> &str {
        &self.goodreads_csv
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn tolerance_days(&self) -> i64 {
        self.tolerance_days
            .unwrap_or(profile::MatchingConfig::default().tolerance_days)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_input_file("booktracker_csv", &self.booktracker_csv)?;
        validate_input_file("goodreads_csv", &self.goodreads_csv)?;
        validate_path("output_dir", &self.output_dir)?;
        validate_range("tolerance_days", ConfigProvider::tolerance_days(self), 0, 3650)?;
        Ok(())
    }
}
