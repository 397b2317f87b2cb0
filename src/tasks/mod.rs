mod find_best_split;

pub use find_best_split::{FindBestSplitTask, SplitOutcome};
