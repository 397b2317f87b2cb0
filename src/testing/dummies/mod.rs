mod datasets;

pub use datasets::{RandomDataset, SMALL_CSV, labelled_column, random_dataset};
