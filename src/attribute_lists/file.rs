use crate::attribute_lists::{AttributeEntry, AttributeListSource, AttributeStream};
use crate::error::SliqError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Location of the materialized list for `attribute` inside `dir`.
pub fn attribute_file(dir: &Path, attribute: &str) -> PathBuf {
    dir.join(format!("{attribute}.txt"))
}

/// Attribute lists stored as `"<rid> <value>"` lines, one file per attribute.
///
/// The files must already be sorted (see [`crate::attribute_lists::sorting`]).
#[derive(Debug, Clone)]
pub struct FileAttributeLists {
    dir: PathBuf,
}

impl FileAttributeLists {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl AttributeListSource for FileAttributeLists {
    fn open(&self, attribute: &str) -> Result<AttributeStream<'_>, SliqError> {
        let path = attribute_file(&self.dir, attribute);
        let reader = BufReader::new(File::open(&path)?);
        let resource = path.display().to_string();
        Ok(Box::new(read_entries(reader, resource)))
    }
}

/// Parses every non-blank line of `reader`; `resource` names the source in errors.
pub(crate) fn read_entries<R: BufRead>(
    reader: R,
    resource: String,
) -> impl Iterator<Item = Result<AttributeEntry, SliqError>> {
    reader
        .lines()
        .enumerate()
        .filter_map(move |(i, line)| match line {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(AttributeEntry::parse(&line, &resource, i + 1)),
            Err(e) => Some(Err(SliqError::Io(e))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reads_entries_in_file_order() {
        let dir = TempDir::new().unwrap();
        fs::write(attribute_file(dir.path(), "doors"), "3 1\n0 2\n\n1 2.5\n").unwrap();

        let lists = FileAttributeLists::new(dir.path());
        let got: Vec<_> = lists
            .open("doors")
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(
            got,
            vec![
                AttributeEntry::new(3, 1.0),
                AttributeEntry::new(0, 2.0),
                AttributeEntry::new(1, 2.5)
            ]
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let lists = FileAttributeLists::new(dir.path());
        assert!(matches!(lists.open("ghost").err(), Some(SliqError::Io(_))));
    }

    #[test]
    fn corrupt_line_reports_its_line_number() {
        let dir = TempDir::new().unwrap();
        fs::write(attribute_file(dir.path(), "x"), "0 1\n1 oops\n").unwrap();
        let lists = FileAttributeLists::new(dir.path());
        let results: Vec<_> = lists.open("x").unwrap().collect();
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(SliqError::Parse { line: 2, .. })));
    }
}
