use crate::attribute_lists::AttributeEntry;
use crate::attribute_lists::sorting::{AttributeSorter, replace_file};
use crate::error::SliqError;
use log::debug;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Lines, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_RUN_SIZE: usize = 100_000;

/// Two-phase multiway merge sort.
///
/// Phase one cuts the file into runs of at most `run_size` records, sorts each
/// in memory and spills it to an anonymous temporary file. Phase two merges
/// all runs through a min-heap keyed on value. Original lines are copied
/// through untouched, so value formatting survives the sort.
#[derive(Debug, Clone)]
pub struct MergeSorter {
    run_size: usize,
    spill_dir: Option<PathBuf>,
}

impl MergeSorter {
    pub fn new(run_size: usize) -> Result<Self, SliqError> {
        if run_size == 0 {
            return Err(SliqError::InvalidParameter("run_size must be > 0".into()));
        }
        Ok(Self {
            run_size,
            spill_dir: None,
        })
    }

    pub fn with_spill_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.spill_dir = Some(dir.into());
        self
    }

    fn spill(&self, run: &mut Vec<(f64, String)>) -> Result<Run, SliqError> {
        run.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mut file = match &self.spill_dir {
            Some(dir) => tempfile::tempfile_in(dir)?,
            None => tempfile::tempfile()?,
        };
        {
            let mut w = BufWriter::new(&mut file);
            for (_, line) in run.drain(..) {
                writeln!(w, "{line}")?;
            }
            w.flush()?;
        }
        file.seek(SeekFrom::Start(0))?;
        Ok(Run {
            lines: BufReader::new(file).lines(),
        })
    }
}

impl Default for MergeSorter {
    fn default() -> Self {
        Self {
            run_size: DEFAULT_RUN_SIZE,
            spill_dir: None,
        }
    }
}

struct Run {
    lines: Lines<BufReader<File>>,
}

impl Run {
    fn next_head(&mut self, index: usize, resource: &str) -> Result<Option<Head>, SliqError> {
        match self.lines.next() {
            None => Ok(None),
            Some(line) => {
                let line = line?;
                let value = AttributeEntry::parse(&line, resource, 0)?.value;
                Ok(Some(Head {
                    value,
                    run: index,
                    line,
                }))
            }
        }
    }
}

struct Head {
    value: f64,
    run: usize,
    line: String,
}

// Reversed so that `BinaryHeap` pops the smallest value first; equal values
// come out in run order, which keeps the merge stable.
impl Ord for Head {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .value
            .total_cmp(&self.value)
            .then_with(|| other.run.cmp(&self.run))
    }
}

impl PartialOrd for Head {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Head {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Head {}

impl AttributeSorter for MergeSorter {
    fn name(&self) -> &'static str {
        "merge"
    }

    fn sort_file(&self, attribute: &str, path: &Path) -> Result<(), SliqError> {
        let resource = path.display().to_string();
        let input = BufReader::new(File::open(path)?);

        let mut runs = Vec::new();
        let mut buffer: Vec<(f64, String)> = Vec::with_capacity(self.run_size.min(DEFAULT_RUN_SIZE));
        for (i, line) in input.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let value = AttributeEntry::parse(&line, &resource, i + 1)?.value;
            buffer.push((value, line));
            if buffer.len() == self.run_size {
                runs.push(self.spill(&mut buffer)?);
            }
        }
        if !buffer.is_empty() {
            runs.push(self.spill(&mut buffer)?);
        }
        debug!("{attribute}: merging {} sorted run(s)", runs.len());

        let mut heap = BinaryHeap::with_capacity(runs.len());
        for (index, run) in runs.iter_mut().enumerate() {
            if let Some(head) = run.next_head(index, &resource)? {
                heap.push(head);
            }
        }

        replace_file(path, |w| {
            while let Some(head) = heap.pop() {
                writeln!(w, "{}", head.line)?;
                if let Some(next) = runs[head.run].next_head(head.run, &resource)? {
                    heap.push(next);
                }
            }
            Ok(())
        })
    }
}
