mod cancellation;
mod parallelism;
pub mod scanner;
pub mod selector;
pub mod split_criteria;

pub use cancellation::CancellationToken;
pub use parallelism::Parallelism;
pub use scanner::{ScanOutcome, ScanState, ScanSummary, SplitScanner, scan_attribute};
pub use selector::{AttributeEvaluation, SplitSelector, best_of};
pub use split_criteria::{EntropySplitCriterion, SplitCriterion};
pub use split_test::SplitTest;
