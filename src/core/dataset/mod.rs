mod attribute;
mod header;

pub use attribute::{AttributeKind, AttributeSpec};
pub use header::DatasetHeader;
