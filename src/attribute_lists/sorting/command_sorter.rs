use crate::attribute_lists::sorting::AttributeSorter;
use crate::error::SliqError;
use std::path::Path;
use std::process::Command;

pub const DEFAULT_SORT_COMMAND: &str = "sort";

/// Delegates to a POSIX `sort` utility, which performs its own disk-based merge sort.
///
/// Runs `<program> -g -k 2,2 -o <file> <file>` with `LC_ALL=C`. General numeric
/// comparison (`-g`) is used so that exponent notation orders correctly.
#[derive(Debug, Clone)]
pub struct CommandSorter {
    program: String,
}

impl CommandSorter {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for CommandSorter {
    fn default() -> Self {
        Self::new(DEFAULT_SORT_COMMAND)
    }
}

impl AttributeSorter for CommandSorter {
    fn name(&self) -> &'static str {
        "command"
    }

    fn sort_file(&self, attribute: &str, path: &Path) -> Result<(), SliqError> {
        let output = Command::new(&self.program)
            .env("LC_ALL", "C")
            .args(["-g", "-k", "2,2", "-o"])
            .arg(path)
            .arg(path)
            .output()
            .map_err(|e| SliqError::Sort {
                attribute: attribute.to_string(),
                message: format!("could not run '{}': {e}", self.program),
            })?;

        if !output.status.success() {
            return Err(SliqError::Sort {
                attribute: attribute.to_string(),
                message: format!(
                    "'{}' exited with {}: {}",
                    self.program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute_lists::sorting::test_support::{UNSORTED, values_of};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_program_is_a_sort_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("x.txt");
        fs::write(&path, "0 1\n").unwrap();

        let err = CommandSorter::new("/definitely/not/a/sort")
            .sort_file("x", &path)
            .unwrap_err();
        assert!(matches!(err, SliqError::Sort { ref attribute, .. } if attribute == "x"));
    }

    #[cfg(unix)]
    #[test]
    fn sorts_with_system_sort() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("x.txt");
        fs::write(&path, UNSORTED).unwrap();

        CommandSorter::default().sort_file("x", &path).unwrap();
        assert_eq!(values_of(&path), vec![-2.5, -2.5, 0.0, 3.0, 5.0, 10.0, 10.0]);
    }
}
