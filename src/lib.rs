pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, profile::SyncProfile, CliConfig};
pub use core::{engine::SyncEngine, pipeline::SyncPipeline};
pub use domain::model::{MatchKey, ReadEvent, SyncOutcome};
pub use utils::error::{Result, SyncError};
