use crate::attribute_lists::sorting::{
    AttributeSorter, CommandSorter, DEFAULT_RUN_SIZE, DEFAULT_SORT_COMMAND, InMemorySorter,
    MergeSorter,
};
use crate::error::SliqError;
use crate::split::Parallelism;
use crate::utils::file_parsing::DEFAULT_DELIMITERS;
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

fn default_delimiters() -> String {
    DEFAULT_DELIMITERS.to_string()
}

fn default_sort_command() -> String {
    DEFAULT_SORT_COMMAND.to_string()
}

fn default_run_size() -> usize {
    DEFAULT_RUN_SIZE
}

fn default_log_level() -> String {
    "info".to_string()
}

/// How attribute files are brought into ascending value order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SortStrategy {
    /// External multiway merge with bounded memory.
    #[default]
    Merge,
    /// Delegate to a system `sort` binary.
    Command,
    /// Load the whole file and sort it in memory.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SliqConfig {
    #[schemars(
        with = "String",
        title = "Input",
        description = "Delimited dataset with a header line",
        extend("format" = "path", "x-file" = true, "x-must-exist" = true)
    )]
    pub input: PathBuf,

    #[schemars(
        title = "Class Index",
        description = "Zero-based index of the class column",
        range(min = 0)
    )]
    pub class_index: usize,

    #[serde(default = "default_delimiters")]
    #[schemars(
        title = "Delimiters",
        description = "Characters that separate fields; runs of them count as one",
        default = "default_delimiters"
    )]
    pub delimiters: String,

    #[serde(default)]
    #[schemars(title = "Sort Strategy", description = "How attribute files are sorted")]
    pub sort: SortStrategy,

    #[serde(default = "default_sort_command")]
    #[schemars(
        title = "Sort Command",
        description = "Program used by the command strategy",
        default = "default_sort_command"
    )]
    pub sort_command: String,

    #[serde(default = "default_run_size")]
    #[schemars(
        title = "Run Size",
        description = "Entries held in memory per run by the merge strategy",
        range(min = 1),
        default = "default_run_size"
    )]
    pub run_size: usize,

    #[serde(default)]
    #[schemars(
        with = "Option<String>",
        title = "Work Directory",
        description = "Where attribute files are written; a temporary directory when absent"
    )]
    pub work_dir: Option<PathBuf>,

    #[serde(default)]
    #[schemars(
        title = "Threads",
        description = "Attribute scans in flight: 0 uses every core, 1 scans sequentially"
    )]
    pub threads: usize,

    #[serde(default)]
    #[schemars(
        title = "Time Budget",
        description = "Seconds the split search may take before it is cancelled"
    )]
    pub max_seconds: Option<u64>,

    #[serde(default = "default_log_level")]
    #[schemars(
        title = "Log Level",
        description = "error, warn, info, debug or trace",
        default = "default_log_level"
    )]
    pub log_level: String,
}

impl Default for SliqConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            class_index: 0,
            delimiters: default_delimiters(),
            sort: SortStrategy::default(),
            sort_command: default_sort_command(),
            run_size: default_run_size(),
            work_dir: None,
            threads: 0,
            max_seconds: None,
            log_level: default_log_level(),
        }
    }
}

impl SliqConfig {
    pub fn new<P: Into<PathBuf>>(input: P, class_index: usize) -> Self {
        Self {
            input: input.into(),
            class_index,
            ..Self::default()
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self, SliqError> {
        let text = fs::read_to_string(path)?;
        let config: SliqConfig = serde_json::from_str(&text).map_err(|e| {
            SliqError::InvalidParameter(format!("{}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SliqError> {
        if self.input.as_os_str().is_empty() {
            return Err(SliqError::InvalidParameter("input path is empty".into()));
        }
        if self.delimiters.is_empty() {
            return Err(SliqError::InvalidParameter("delimiters must not be empty".into()));
        }
        if self.run_size == 0 {
            return Err(SliqError::InvalidParameter("run_size must be > 0".into()));
        }
        if self.sort == SortStrategy::Command && self.sort_command.trim().is_empty() {
            return Err(SliqError::InvalidParameter(
                "sort_command must name a program".into(),
            ));
        }
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(SliqError::InvalidParameter(format!(
                "unknown log level '{}'",
                self.log_level
            )));
        }
        Ok(())
    }

    pub fn sorter(&self) -> Result<Box<dyn AttributeSorter>, SliqError> {
        Ok(match self.sort {
            SortStrategy::Merge => {
                let sorter = MergeSorter::new(self.run_size)?;
                match &self.work_dir {
                    Some(dir) => Box::new(sorter.with_spill_dir(dir.clone())),
                    None => Box::new(sorter),
                }
            }
            SortStrategy::Command => Box::new(CommandSorter::new(self.sort_command.clone())),
            SortStrategy::Memory => Box::new(InMemorySorter),
        })
    }

    pub fn parallelism(&self) -> Parallelism {
        Parallelism::from_threads(self.threads)
    }

    pub fn budget(&self) -> Option<Duration> {
        self.max_seconds.map(Duration::from_secs)
    }

    pub fn schema_json() -> Result<String, SliqError> {
        serde_json::to_string_pretty(&schema_for!(SliqConfig))
            .map_err(|e| SliqError::InvalidParameter(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use tempfile::TempDir;

    #[test]
    fn minimal_json_fills_defaults() {
        let config: SliqConfig =
            serde_json::from_str(r#"{"input": "car.csv", "class_index": 6}"#).unwrap();
        assert_eq!(config, SliqConfig::new("car.csv", 6));
        assert_eq!(config.delimiters, "\t, ");
        assert_eq!(config.sort, SortStrategy::Merge);
        assert_eq!(config.run_size, DEFAULT_RUN_SIZE);
        assert_eq!(config.parallelism(), Parallelism::from_threads(0));
        assert_eq!(config.budget(), None);
    }

    #[test]
    fn sort_strategy_uses_kebab_case_names() {
        let config: SliqConfig = serde_json::from_str(
            r#"{"input": "a.csv", "class_index": 0, "sort": "command", "max_seconds": 3}"#,
        )
        .unwrap();
        assert_eq!(config.sort, SortStrategy::Command);
        assert_eq!(config.budget(), Some(Duration::from_secs(3)));
        assert_eq!(SortStrategy::from_str("memory").unwrap(), SortStrategy::Memory);
        assert_eq!(SortStrategy::Merge.to_string(), "merge");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = SliqConfig::new("a.csv", 0);
        assert!(config.validate().is_ok());

        config.run_size = 0;
        assert!(config.validate().is_err());
        config.run_size = 10;

        config.log_level = "loud".into();
        assert!(config.validate().is_err());
        config.log_level = "debug".into();

        config.sort = SortStrategy::Command;
        config.sort_command = " ".into();
        assert!(config.validate().is_err());

        assert!(SliqConfig::default().validate().is_err());
    }

    #[test]
    fn sorter_matches_strategy() {
        let mut config = SliqConfig::new("a.csv", 0);
        assert_eq!(config.sorter().unwrap().name(), "merge");
        config.sort = SortStrategy::Command;
        assert_eq!(config.sorter().unwrap().name(), "command");
        config.sort = SortStrategy::Memory;
        assert_eq!(config.sorter().unwrap().name(), "memory");
    }

    #[test]
    fn from_json_file_reports_path_on_bad_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.json");
        fs::write(&path, "{ not json").unwrap();
        let err = SliqConfig::from_json_file(&path).unwrap_err();
        assert!(err.to_string().contains("run.json"));

        fs::write(&path, r#"{"input": "x.csv", "class_index": 2, "threads": 1}"#).unwrap();
        let config = SliqConfig::from_json_file(&path).unwrap();
        assert_eq!(config.parallelism(), Parallelism::Sequential);
    }

    #[test]
    fn schema_lists_every_field() {
        let schema = SliqConfig::schema_json().unwrap();
        for field in ["input", "class_index", "sort", "run_size", "max_seconds"] {
            assert!(schema.contains(field), "missing {field}");
        }
    }
}
