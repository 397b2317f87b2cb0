use crate::core::class_labels::{ClassId, ClassLabels};
use crate::error::ConsistencyError;
use std::collections::BTreeMap;
use std::ops::Deref;
use std::sync::Arc;

/// Class label -> record count over a fixed set of classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    labels: Arc<ClassLabels>,
    counts: Vec<u64>,
}

impl Histogram {
    /// All-zero histogram over every class in `labels`.
    pub fn zeroed(labels: Arc<ClassLabels>) -> Self {
        let counts = vec![0; labels.len()];
        Self { labels, counts }
    }

    pub(crate) fn from_counts(labels: Arc<ClassLabels>, counts: Vec<u64>) -> Self {
        debug_assert_eq!(labels.len(), counts.len());
        Self { labels, counts }
    }

    pub fn count(&self, class: ClassId) -> u64 {
        self.counts.get(class).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// `(class, count)` pairs in class id order, zero counts included.
    pub fn iter(&self) -> impl Iterator<Item = (ClassId, u64)> + '_ {
        self.counts.iter().copied().enumerate()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Number of classes with a non-zero count.
    pub fn non_empty_classes(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn labels(&self) -> &ClassLabels {
        &self.labels
    }

    pub(crate) fn shared_labels(&self) -> Arc<ClassLabels> {
        Arc::clone(&self.labels)
    }

    pub fn to_label_map(&self) -> BTreeMap<String, u64> {
        self.labels
            .enumerate_values()
            .map(|(id, label)| (label.to_string(), self.count(id)))
            .collect()
    }

    fn label_of(&self, class: ClassId) -> String {
        self.labels
            .label(class)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{class}"))
    }
}

/// Global class distribution of the node being split. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootHistogram(Histogram);

impl RootHistogram {
    pub(crate) fn new(histogram: Histogram) -> Self {
        Self(histogram)
    }

    pub fn histogram(&self) -> &Histogram {
        &self.0
    }
}

impl Deref for RootHistogram {
    type Target = Histogram;

    fn deref(&self) -> &Histogram {
        &self.0
    }
}

/// Left/right class distributions for one attribute scan.
///
/// `left[c] + right[c] == root[c]` holds for every class at all times; the only
/// mutation is [`HistogramPair::move_to_left`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramPair {
    left: Histogram,
    right: Histogram,
}

impl HistogramPair {
    pub fn new(root: &RootHistogram) -> Self {
        Self {
            left: Histogram::zeroed(root.shared_labels()),
            right: root.histogram().clone(),
        }
    }

    pub fn left(&self) -> &Histogram {
        &self.left
    }

    pub fn right(&self) -> &Histogram {
        &self.right
    }

    /// Moves one record of `class` from the right partition to the left one.
    pub fn move_to_left(&mut self, class: ClassId) -> Result<(), ConsistencyError> {
        let Some(right) = self.right.counts.get_mut(class) else {
            return Err(ConsistencyError::UnknownClass { class });
        };
        if *right == 0 {
            return Err(ConsistencyError::NegativeCount {
                class: self.right.label_of(class),
            });
        }
        *right -= 1;
        self.left.counts[class] += 1;
        Ok(())
    }

    pub fn is_conserved(&self, root: &RootHistogram) -> bool {
        root.counts().len() == self.left.counts.len()
            && root.counts().len() == self.right.counts.len()
            && root
                .counts()
                .iter()
                .zip(self.left.counts.iter().zip(&self.right.counts))
                .all(|(&r, (&l, &rt))| l + rt == r)
    }
}
