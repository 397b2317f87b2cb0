use crate::attribute_lists::AttributeEntry;
use crate::attribute_lists::file::read_entries;
use crate::attribute_lists::sorting::{AttributeSorter, replace_file};
use crate::error::SliqError;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Loads the whole file, sorts it and writes it back. For lists that fit in memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct InMemorySorter;

impl AttributeSorter for InMemorySorter {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn sort_file(&self, _attribute: &str, path: &Path) -> Result<(), SliqError> {
        let reader = BufReader::new(File::open(path)?);
        let mut entries = read_entries(reader, path.display().to_string())
            .collect::<Result<Vec<AttributeEntry>, _>>()?;
        entries.sort_by(|a, b| a.value.total_cmp(&b.value));

        replace_file(path, |w| {
            for e in &entries {
                writeln!(w, "{e}")?;
            }
            Ok(())
        })
    }
}
