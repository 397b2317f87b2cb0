use crate::attribute_lists::{FileAttributeLists, attribute_file};
use crate::config::SliqConfig;
use crate::error::SliqError;
use crate::ingest::{Ingestion, Ingestor};
use crate::split::{SplitSelector, SplitTest, best_of};
use log::{debug, info};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tempfile::TempDir;

/// Result of one split search over a whole dataset.
#[derive(Debug, Clone, Serialize)]
pub struct SplitOutcome {
    pub split: Option<SplitTest>,
    pub class_values: Vec<String>,
    pub records: usize,
    pub numeric_attributes: Vec<String>,
    /// Best split per numeric attribute, in declaration order.
    pub candidates: Vec<SplitTest>,
}

impl Display for SplitOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.split {
            Some(split) => write!(f, "{split} (entropy={:.6})", split.entropy()),
            None => write!(f, "no split possible"),
        }
    }
}

/// Ingest, sort, then select: the full pipeline for one node.
pub struct FindBestSplitTask {
    config: SliqConfig,
}

impl FindBestSplitTask {
    pub fn new(config: SliqConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SliqConfig {
        &self.config
    }

    pub fn run(&self) -> Result<SplitOutcome, SliqError> {
        self.config.validate()?;
        let started = Instant::now();

        // Owns the scratch directory when none was configured.
        let (_scratch, work_dir) = self.work_dir()?;

        let phase = Instant::now();
        let Ingestion {
            header,
            context,
            records,
            ..
        } = Ingestor::new(self.config.class_index)
            .with_delimiters(self.config.delimiters.clone())
            .ingest_file(&self.config.input, &work_dir)?;
        info!(
            "ingestion took {:.3}s, attribute files in {}",
            phase.elapsed().as_secs_f64(),
            work_dir.display()
        );

        let numeric_attributes: Vec<String> =
            header.numeric_attributes().map(|a| a.name.clone()).collect();

        let phase = Instant::now();
        let sorter = self.config.sorter()?;
        for attribute in &numeric_attributes {
            debug!("sorting '{attribute}' with the {} sorter", sorter.name());
            sorter.sort_file(attribute, &attribute_file(&work_dir, attribute))?;
        }
        info!(
            "sorted {} attribute file(s) in {:.3}s",
            numeric_attributes.len(),
            phase.elapsed().as_secs_f64()
        );

        let phase = Instant::now();
        let mut selector = SplitSelector::new().with_parallelism(self.config.parallelism());
        if let Some(budget) = self.config.budget() {
            selector = selector.with_budget(budget);
        }
        let evaluations =
            selector.evaluate(&header, &context, &FileAttributeLists::new(&work_dir))?;
        let split = best_of(&evaluations).cloned();
        info!(
            "split search took {:.3}s ({:.3}s in total)",
            phase.elapsed().as_secs_f64(),
            started.elapsed().as_secs_f64()
        );

        Ok(SplitOutcome {
            split,
            class_values: context.class_values(),
            records,
            numeric_attributes,
            candidates: evaluations
                .into_iter()
                .filter_map(|e| e.outcome.split)
                .collect(),
        })
    }

    fn work_dir(&self) -> Result<(Option<TempDir>, PathBuf), SliqError> {
        match &self.config.work_dir {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                Ok((None, dir.clone()))
            }
            None => {
                let scratch = TempDir::new()?;
                let dir = scratch.path().to_path_buf();
                Ok((Some(scratch), dir))
            }
        }
    }
}
