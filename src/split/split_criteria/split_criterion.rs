use crate::core::{Histogram, HistogramPair};

/// Impurity measure used to score a two-way split. Lower is purer.
pub trait SplitCriterion: Send + Sync {
    fn impurity(&self, distribution: &Histogram) -> f64;

    /// Largest impurity a histogram with this class support can have.
    fn range_of_merit(&self, pre_split_distribution: &Histogram) -> f64;

    /// Size-weighted impurity of the two partitions. Empty partitions carry no weight.
    fn split_impurity(&self, pair: &HistogramPair) -> f64 {
        let left_total = pair.left().total();
        let right_total = pair.right().total();
        let total = left_total + right_total;
        if total == 0 {
            return 0.0;
        }
        let total = total as f64;
        self.impurity(pair.left()) * left_total as f64 / total
            + self.impurity(pair.right()) * right_total as f64 / total
    }
}
