pub mod dates;
pub mod diff;
pub mod engine;
pub mod matcher;
pub mod normalize;
pub mod pipeline;

pub use crate::domain::model::{MatchKey, ReadEvent, SyncOutcome};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
