use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct SyncEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SyncEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<String> {
        println!("Starting library sync...");

        // Extract
        println!("Loading exports...");
        let (booktracker, goodreads) = self.pipeline.extract()?;
        println!("  Found {} read books in Book Tracker", booktracker.len());
        println!("  Found {} read books in Goodreads", goodreads.len());

        // Compare
        println!("\nComparing libraries...");
        let outcome = self.pipeline.compare(booktracker, goodreads)?;
        println!(
            "  Books in Book Tracker missing from Goodreads: {}",
            outcome.missing_from_goodreads.len()
        );
        println!(
            "  Books in Goodreads missing from Book Tracker: {}",
            outcome.missing_from_booktracker.len()
        );

        // Load
        println!("\nWriting output files...");
        let has_goodreads_import = !outcome.missing_from_goodreads.is_empty();
        let has_booktracker_import = !outcome.missing_from_booktracker.is_empty();
        let output_dir = self.pipeline.load(outcome)?;
        println!("Output saved to: {}", output_dir);

        if has_goodreads_import {
            println!("  Import the Goodreads file at: https://www.goodreads.com/review/import");
        }
        if has_booktracker_import {
            println!("  Import the Book Tracker file via the app's import feature");
        }

        Ok(output_dir)
    }
}
