use crate::attribute_lists::{AttributeEntry, AttributeListSource, AttributeStream};
use crate::core::Rid;
use crate::error::SliqError;
use std::collections::HashMap;
use std::io::{Error, ErrorKind};

/// Attribute lists held in memory, sorted when inserted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttributeLists {
    lists: HashMap<String, Vec<AttributeEntry>>,
}

impl InMemoryAttributeLists {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<N: Into<String>>(&mut self, attribute: N, mut entries: Vec<AttributeEntry>) {
        entries.sort_by(|a, b| a.value.total_cmp(&b.value));
        self.lists.insert(attribute.into(), entries);
    }

    /// Inserts a column given in rid order (`values[rid]`).
    pub fn insert_column<N: Into<String>>(&mut self, attribute: N, values: &[f64]) {
        let entries = values
            .iter()
            .enumerate()
            .map(|(rid, &value)| AttributeEntry::new(rid as Rid, value))
            .collect();
        self.insert(attribute, entries);
    }

    /// Inserts a list exactly as given, without sorting it.
    pub fn insert_presorted<N: Into<String>>(&mut self, attribute: N, entries: Vec<AttributeEntry>) {
        self.lists.insert(attribute.into(), entries);
    }

    pub fn get(&self, attribute: &str) -> Option<&[AttributeEntry]> {
        self.lists.get(attribute).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

impl AttributeListSource for InMemoryAttributeLists {
    fn open(&self, attribute: &str) -> Result<AttributeStream<'_>, SliqError> {
        let list = self.lists.get(attribute).ok_or_else(|| {
            Error::new(
                ErrorKind::NotFound,
                format!("no attribute list for '{attribute}'"),
            )
        })?;
        Ok(Box::new(list.iter().copied().map(Ok)))
    }
}
