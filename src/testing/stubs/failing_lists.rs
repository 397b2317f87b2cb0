use crate::attribute_lists::{AttributeListSource, AttributeStream};
use crate::error::SliqError;
use std::io::{Error, ErrorKind};

/// Source whose every list is unreadable.
pub struct FailingAttributeLists;

impl AttributeListSource for FailingAttributeLists {
    fn open(&self, attribute: &str) -> Result<AttributeStream<'_>, SliqError> {
        Err(Error::new(
            ErrorKind::UnexpectedEof,
            format!("sorted list for '{attribute}' is truncated"),
        )
        .into())
    }
}
