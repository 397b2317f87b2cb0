//! Sorting of materialized attribute files.
//!
//! The split engine only ever reads attribute lists in ascending value order;
//! these sorters produce that order in place, each with a different mechanism.

mod command_sorter;
mod in_memory_sorter;
mod merge_sorter;

pub use command_sorter::{CommandSorter, DEFAULT_SORT_COMMAND};
pub use in_memory_sorter::InMemorySorter;
pub use merge_sorter::{DEFAULT_RUN_SIZE, MergeSorter};

use crate::error::SliqError;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Sorts one `"<rid> <value>"` file in place, ascending numerically by value.
pub trait AttributeSorter: Send + Sync {
    fn name(&self) -> &'static str;

    fn sort_file(&self, attribute: &str, path: &Path) -> Result<(), SliqError>;
}

/// Writes a replacement next to `path` and atomically moves it over `path`.
pub(crate) fn replace_file<F>(path: &Path, write: F) -> Result<(), SliqError>
where
    F: FnOnce(&mut dyn Write) -> Result<(), SliqError>,
{
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut out = match dir {
        Some(dir) => NamedTempFile::new_in(dir)?,
        None => NamedTempFile::new_in(".")?,
    };
    {
        let mut w = BufWriter::new(out.as_file_mut());
        write(&mut w)?;
        w.flush()?;
    }
    out.persist(path).map_err(|e| SliqError::Io(e.error))?;
    Ok(())
}
