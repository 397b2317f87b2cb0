mod failing_lists;

pub use failing_lists::FailingAttributeLists;
