pub mod class_index;
pub mod class_labels;
pub mod dataset;
pub mod histogram;

pub use class_index::{ClassIndex, ClassIndexBuilder, NodeContext, Rid};
pub use class_labels::{ClassId, ClassLabels};
pub use dataset::{AttributeKind, AttributeSpec, DatasetHeader};
pub use histogram::{Histogram, HistogramPair, RootHistogram};
