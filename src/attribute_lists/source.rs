use crate::attribute_lists::AttributeEntry;
use crate::error::SliqError;

/// Sequential read over one attribute list, ascending by value.
pub type AttributeStream<'a> = Box<dyn Iterator<Item = Result<AttributeEntry, SliqError>> + Send + 'a>;

/// Provider of sorted attribute lists.
///
/// Implementations decide how sortedness is achieved (external merge sort, an
/// OS utility, a database `ORDER BY`, ...). Every stream returned by
/// [`open`](AttributeListSource::open) must yield entries in non-decreasing
/// value order; ties may come in any order.
pub trait AttributeListSource: Sync {
    fn open(&self, attribute: &str) -> Result<AttributeStream<'_>, SliqError>;
}
