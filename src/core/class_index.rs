use crate::core::class_labels::{ClassId, ClassLabels};
use crate::core::histogram::{Histogram, RootHistogram};
use crate::error::ConsistencyError;
use std::sync::Arc;

/// Record id. Dense and zero-based, assigned at ingestion.
pub type Rid = usize;

/// rid -> class lookup. Read-only once published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassIndex {
    classes: Vec<Option<ClassId>>,
    labels: Arc<ClassLabels>,
    records: usize,
}

impl ClassIndex {
    pub fn class_of(&self, rid: Rid) -> Option<ClassId> {
        self.classes.get(rid).copied().flatten()
    }

    pub fn label_of(&self, rid: Rid) -> Option<&str> {
        self.class_of(rid).and_then(|c| self.labels.label(c))
    }

    pub fn labels(&self) -> &ClassLabels {
        &self.labels
    }

    /// Number of records with a class label.
    pub fn len(&self) -> usize {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }
}

/// Builds the [`ClassIndex`] and [`RootHistogram`] together in one pass.
#[derive(Debug, Default)]
pub struct ClassIndexBuilder {
    classes: Vec<Option<ClassId>>,
    labels: ClassLabels,
    counts: Vec<u64>,
    records: usize,
}

impl ClassIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(records: usize) -> Self {
        Self {
            classes: Vec::with_capacity(records),
            ..Self::default()
        }
    }

    /// Records that `rid` belongs to `label`. A rid may only be observed once.
    pub fn observe(&mut self, rid: Rid, label: &str) -> Result<ClassId, ConsistencyError> {
        if self.classes.get(rid).copied().flatten().is_some() {
            return Err(ConsistencyError::DuplicateRid { rid });
        }
        let class = self.labels.intern(label);
        if class == self.counts.len() {
            self.counts.push(0);
        }
        if rid >= self.classes.len() {
            self.classes.resize(rid + 1, None);
        }
        self.classes[rid] = Some(class);
        self.counts[class] += 1;
        self.records += 1;
        Ok(class)
    }

    /// Observes `label` under the next dense rid and returns that rid.
    pub fn push(&mut self, label: &str) -> Result<Rid, ConsistencyError> {
        let rid = self.classes.len();
        self.observe(rid, label)?;
        Ok(rid)
    }

    pub fn records(&self) -> usize {
        self.records
    }

    /// Publishes the structures as shared, immutable data.
    pub fn finish(self) -> NodeContext {
        let labels = Arc::new(self.labels);
        let root = RootHistogram::new(Histogram::from_counts(Arc::clone(&labels), self.counts));
        let class_index = ClassIndex {
            classes: self.classes,
            labels,
            records: self.records,
        };
        NodeContext {
            class_index: Arc::new(class_index),
            root: Arc::new(root),
        }
    }
}

/// Read-only state shared by every attribute scan at one tree node.
#[derive(Debug, Clone)]
pub struct NodeContext {
    class_index: Arc<ClassIndex>,
    root: Arc<RootHistogram>,
}

impl NodeContext {
    /// Context for records labelled in rid order.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, ConsistencyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = ClassIndexBuilder::new();
        for label in labels {
            builder.push(label.as_ref())?;
        }
        Ok(builder.finish())
    }

    pub fn class_index(&self) -> &ClassIndex {
        &self.class_index
    }

    pub fn root(&self) -> &RootHistogram {
        &self.root
    }

    pub fn records(&self) -> usize {
        self.class_index.len()
    }

    pub fn class_values(&self) -> Vec<String> {
        self.class_index
            .labels()
            .enumerate_values()
            .map(|(_, l)| l.to_string())
            .collect()
    }
}
