mod entropy_split_criterion;
mod split_criterion;

pub use entropy_split_criterion::EntropySplitCriterion;
pub use split_criterion::SplitCriterion;
