use crate::attribute_lists::AttributeListSource;
use crate::core::{DatasetHeader, NodeContext};
use crate::error::SliqError;
use crate::split::scanner::{ScanOutcome, scan_attribute};
use crate::split::split_criteria::{EntropySplitCriterion, SplitCriterion};
use crate::split::{CancellationToken, Parallelism, SplitTest};
use log::debug;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use std::time::Duration;

/// Scan result for one numeric attribute.
#[derive(Debug, Clone)]
pub struct AttributeEvaluation {
    pub attribute: String,
    pub outcome: ScanOutcome,
}

/// Runs one scan per numeric attribute and keeps the global minimum.
///
/// Attributes are scanned in declaration order (or concurrently, see
/// [`Parallelism`]); results are always reduced in declaration order, so the
/// first attribute wins a tie regardless of which scan finished first.
pub struct SplitSelector {
    criterion: Box<dyn SplitCriterion>,
    parallelism: Parallelism,
    budget: Option<Duration>,
}

impl SplitSelector {
    pub fn new() -> Self {
        Self {
            criterion: Box::new(EntropySplitCriterion::new()),
            parallelism: Parallelism::Sequential,
            budget: None,
        }
    }

    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Cancels every scan still running once `budget` has elapsed.
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_criterion(mut self, criterion: Box<dyn SplitCriterion>) -> Self {
        self.criterion = criterion;
        self
    }

    pub fn parallelism(&self) -> Parallelism {
        self.parallelism
    }

    /// Best split over all numeric attributes, or `None` if no attribute has one.
    pub fn select(
        &self,
        header: &DatasetHeader,
        context: &NodeContext,
        source: &dyn AttributeListSource,
    ) -> Result<Option<SplitTest>, SliqError> {
        let evaluations = self.evaluate(header, context, source)?;
        Ok(best_of(&evaluations).cloned())
    }

    /// Scans every numeric attribute. Fails with the first error in declaration order.
    pub fn evaluate(
        &self,
        header: &DatasetHeader,
        context: &NodeContext,
        source: &dyn AttributeListSource,
    ) -> Result<Vec<AttributeEvaluation>, SliqError> {
        let attributes: Vec<&str> = header
            .numeric_attributes()
            .map(|a| a.name.as_str())
            .collect();
        let token = match self.budget {
            Some(budget) => CancellationToken::with_budget(budget),
            None => CancellationToken::new(),
        };
        let criterion = self.criterion.as_ref();
        let scan_one = |attribute: &str| -> Result<ScanOutcome, SliqError> {
            let stream = source.open(attribute)?;
            scan_attribute(attribute, stream, context, criterion, &token)
        };

        let results: Vec<Result<ScanOutcome, SliqError>> =
            match self.parallelism.for_attributes(attributes.len()) {
                Parallelism::Sequential => attributes.iter().map(|&a| scan_one(a)).collect(),
                Parallelism::Parallel(threads) => {
                    let pool = ThreadPoolBuilder::new()
                        .num_threads(threads)
                        .build()
                        .map_err(|e| SliqError::ThreadPool(e.to_string()))?;
                    pool.install(|| attributes.par_iter().map(|&a| scan_one(a)).collect())
                }
            };

        let mut evaluations = Vec::with_capacity(results.len());
        for (attribute, result) in attributes.into_iter().zip(results) {
            let outcome = result?;
            match &outcome.split {
                Some(split) => debug!(
                    "{attribute}: best {split} entropy={:.6} ({} records, {} candidates)",
                    split.entropy(),
                    outcome.summary.records,
                    outcome.summary.candidates
                ),
                None => debug!(
                    "{attribute}: no candidate ({} distinct values)",
                    outcome.summary.distinct_values
                ),
            }
            evaluations.push(AttributeEvaluation {
                attribute: attribute.to_string(),
                outcome,
            });
        }
        Ok(evaluations)
    }
}

impl Default for SplitSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimum-entropy split; on ties the earliest evaluation wins.
pub fn best_of(evaluations: &[AttributeEvaluation]) -> Option<&SplitTest> {
    evaluations
        .iter()
        .filter_map(|e| e.outcome.split.as_ref())
        .fold(None, |best: Option<&SplitTest>, candidate| match best {
            Some(b) if candidate.entropy() >= b.entropy() => Some(b),
            _ => Some(candidate),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute_lists::{AttributeEntry, InMemoryAttributeLists};
    use crate::core::AttributeSpec;
    use crate::error::{ConsistencyError, ErrorKind};
    use crate::testing::dummies::random_dataset;
    use crate::testing::stubs::FailingAttributeLists;

    fn header(attrs: Vec<AttributeSpec>) -> DatasetHeader {
        let class_index = attrs.len() - 1;
        DatasetHeader::new(attrs, class_index).unwrap()
    }

    #[test]
    fn picks_the_attribute_with_minimum_entropy() {
        let ctx = NodeContext::from_labels(["no", "no", "yes", "yes"]).unwrap();
        let mut lists = InMemoryAttributeLists::new();
        lists.insert_column("noisy", &[1.0, 3.0, 2.0, 4.0]);
        lists.insert_column("clean", &[1.0, 2.0, 3.0, 4.0]);
        let h = header(vec![
            AttributeSpec::numeric("noisy"),
            AttributeSpec::numeric("clean"),
            AttributeSpec::categorical("class"),
        ]);

        let best = SplitSelector::new().select(&h, &ctx, &lists).unwrap().unwrap();
        assert_eq!(best.attribute(), "clean");
        assert_eq!(best.threshold(), 2.0);
        assert_eq!(best.entropy(), 0.0);
    }

    #[test]
    fn single_class_node_returns_first_attribute() {
        let ctx = NodeContext::from_labels(["yes", "yes", "yes"]).unwrap();
        let mut lists = InMemoryAttributeLists::new();
        lists.insert_column("b", &[3.0, 2.0, 1.0]);
        lists.insert_column("a", &[1.0, 2.0, 3.0]);
        let h = header(vec![
            AttributeSpec::numeric("b"),
            AttributeSpec::numeric("a"),
            AttributeSpec::categorical("class"),
        ]);

        for p in [Parallelism::Sequential, Parallelism::Parallel(2)] {
            let best = SplitSelector::new()
                .with_parallelism(p)
                .select(&h, &ctx, &lists)
                .unwrap()
                .unwrap();
            assert_eq!(best.attribute(), "b");
            assert_eq!(best.entropy(), 0.0);
        }
    }

    #[test]
    fn categorical_attributes_are_skipped() {
        let ctx = NodeContext::from_labels(["no", "yes"]).unwrap();
        let lists = InMemoryAttributeLists::new();
        let h = header(vec![
            AttributeSpec::categorical("color"),
            AttributeSpec::categorical("class"),
        ]);
        let evaluations = SplitSelector::new().evaluate(&h, &ctx, &lists).unwrap();
        assert!(evaluations.is_empty());
        assert!(SplitSelector::new().select(&h, &ctx, &lists).unwrap().is_none());
    }

    #[test]
    fn no_split_when_every_attribute_is_constant() {
        let ctx = NodeContext::from_labels(["no", "yes"]).unwrap();
        let mut lists = InMemoryAttributeLists::new();
        lists.insert_column("x", &[1.0, 1.0]);
        let h = header(vec![
            AttributeSpec::numeric("x"),
            AttributeSpec::categorical("class"),
        ]);
        let evaluations = SplitSelector::new().evaluate(&h, &ctx, &lists).unwrap();
        assert_eq!(evaluations.len(), 1);
        assert!(evaluations[0].outcome.split.is_none());
        assert!(best_of(&evaluations).is_none());
    }

    #[test]
    fn consistency_error_is_not_treated_as_no_candidate() {
        let ctx = NodeContext::from_labels(["no", "yes"]).unwrap();
        let mut lists = InMemoryAttributeLists::new();
        lists.insert_column("good", &[1.0, 2.0]);
        lists.insert("bad", vec![AttributeEntry::new(0, 1.0), AttributeEntry::new(42, 2.0)]);
        let h = header(vec![
            AttributeSpec::numeric("good"),
            AttributeSpec::numeric("bad"),
            AttributeSpec::categorical("class"),
        ]);

        for p in [Parallelism::Sequential, Parallelism::Parallel(2)] {
            let err = SplitSelector::new()
                .with_parallelism(p)
                .select(&h, &ctx, &lists)
                .unwrap_err();
            assert!(matches!(
                err,
                SliqError::Consistency(ConsistencyError::UnknownRid { rid: 42, .. })
            ));
        }
    }

    #[test]
    fn collaborator_failure_surfaces_with_its_own_kind() {
        let ctx = NodeContext::from_labels(["no", "yes"]).unwrap();
        let h = header(vec![
            AttributeSpec::numeric("x"),
            AttributeSpec::categorical("class"),
        ]);
        let err = SplitSelector::new()
            .select(&h, &ctx, &FailingAttributeLists)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Collaborator);
    }

    #[test]
    fn exhausted_budget_cancels_instead_of_returning_partial_results() {
        let data = random_dataset(3, 50, 2, 2);
        let err = SplitSelector::new()
            .with_budget(Duration::ZERO)
            .select(&data.header, &data.context, &data.lists)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }

    #[test]
    fn parallel_and_sequential_agree_and_are_repeatable() {
        for seed in 0..8 {
            let data = random_dataset(seed, 400, 6, 3);
            let sequential = SplitSelector::new()
                .select(&data.header, &data.context, &data.lists)
                .unwrap();
            for _ in 0..3 {
                let parallel = SplitSelector::new()
                    .with_parallelism(Parallelism::Parallel(4))
                    .select(&data.header, &data.context, &data.lists)
                    .unwrap();
                match (&sequential, &parallel) {
                    (Some(s), Some(p)) => {
                        assert_eq!(s.attribute(), p.attribute());
                        assert_eq!(s.threshold(), p.threshold());
                        assert_eq!(s.entropy().to_bits(), p.entropy().to_bits());
                    }
                    (None, None) => {}
                    other => panic!("selectors disagree: {other:?}"),
                }
            }
        }
    }

    #[test]
    fn best_entropy_lies_within_bounds() {
        let data = random_dataset(21, 250, 3, 4);
        let evaluations = SplitSelector::new()
            .evaluate(&data.header, &data.context, &data.lists)
            .unwrap();
        let root_entropy = EntropySplitCriterion.entropy(data.context.root());
        for e in &evaluations {
            if let Some(split) = &e.outcome.split {
                assert!(split.entropy() >= 0.0);
                assert!(split.entropy() <= root_entropy + 1e-12);
            }
        }
    }
}
