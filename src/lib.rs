pub mod attribute_lists;
pub mod config;
pub mod core;
pub mod error;
pub mod ingest;
pub mod split;
pub mod tasks;
pub mod ui;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use config::{SliqConfig, SortStrategy};
pub use error::{ErrorKind, SliqError};
pub use split::{SplitSelector, SplitTest};
pub use tasks::{FindBestSplitTask, SplitOutcome};
