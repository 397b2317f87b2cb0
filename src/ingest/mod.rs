mod ingestor;

pub use ingestor::{Ingestion, Ingestor};
