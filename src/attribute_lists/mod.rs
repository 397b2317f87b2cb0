mod entry;
pub mod file;
mod in_memory;
pub mod sorting;
mod source;

pub use entry::{AttributeEntry, parse_value};
pub use file::{FileAttributeLists, attribute_file};
pub use in_memory::InMemoryAttributeLists;
pub use source::{AttributeListSource, AttributeStream};
