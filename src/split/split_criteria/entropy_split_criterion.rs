use crate::core::{Histogram, HistogramPair};
use crate::split::split_criteria::split_criterion::SplitCriterion;
use crate::utils::math::{entropy_term, max_entropy};

/// Shannon entropy in bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropySplitCriterion;

impl EntropySplitCriterion {
    pub fn new() -> Self {
        Self
    }

    /// Entropy of one class distribution; `0.0` for an empty histogram.
    pub fn entropy(&self, histogram: &Histogram) -> f64 {
        let sum = histogram.total();
        if sum == 0 {
            return 0.0;
        }
        let sum = sum as f64;
        histogram
            .counts()
            .iter()
            .map(|&c| entropy_term(c as f64 / sum))
            .sum()
    }

    pub fn weighted_split_entropy(&self, pair: &HistogramPair) -> f64 {
        self.split_impurity(pair)
    }
}

impl SplitCriterion for EntropySplitCriterion {
    fn impurity(&self, distribution: &Histogram) -> f64 {
        self.entropy(distribution)
    }

    fn range_of_merit(&self, pre_split_distribution: &Histogram) -> f64 {
        max_entropy(pre_split_distribution.non_empty_classes())
    }
}
