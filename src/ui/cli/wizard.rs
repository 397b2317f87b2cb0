use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

use crate::config::{SliqConfig, SortStrategy};
use crate::ui::cli::drivers::PromptDriver;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Asks for every [`SliqConfig`] field, starting from the defaults.
pub fn prompt_config<D: PromptDriver>(driver: &D) -> Result<SliqConfig> {
    let defaults = SliqConfig::default();

    let input = prompt_path_until_ok(
        driver,
        "Input",
        "Delimited dataset whose first line names the attributes",
        "",
    )?;

    let class_index = driver.ask_u64(
        "Class Index",
        "Zero-based index of the class column",
        0,
        Some(0),
        None,
    )? as usize;

    let delimiters = loop {
        let answer = driver.ask_string(
            "Delimiters",
            "Characters that separate fields",
            &defaults.delimiters,
        )?;
        if !answer.is_empty() {
            break answer;
        }
        eprintln!("✗ At least one delimiter is required");
    };

    let strategies: Vec<&'static str> = SortStrategy::iter().map(Into::into).collect();
    let sort: SortStrategy = driver
        .ask_choice(
            "Sort Strategy",
            "How attribute files are brought into value order",
            &strategies,
            0,
        )?
        .parse()
        .context("unknown sort strategy")?;

    let mut config = SliqConfig {
        input,
        class_index,
        delimiters,
        sort,
        ..defaults
    };

    match sort {
        SortStrategy::Merge => {
            config.run_size = driver.ask_u64(
                "Run Size",
                "Entries held in memory per sorted run",
                config.run_size as u64,
                Some(1),
                None,
            )? as usize;
        }
        SortStrategy::Command => {
            config.sort_command = driver.ask_string(
                "Sort Command",
                "Program invoked as `<cmd> -g -k 2,2 -o <file> <file>`",
                &config.sort_command,
            )?;
        }
        SortStrategy::Memory => {}
    }

    config.work_dir = optional(driver.ask_string(
        "Work Directory",
        "Where attribute files are kept\n(leave blank for a temporary directory)",
        "",
    )?)
    .map(PathBuf::from);

    config.threads = driver.ask_u64(
        "Threads",
        "0 uses every core, 1 scans attributes sequentially",
        0,
        Some(0),
        None,
    )? as usize;

    config.max_seconds = optional(driver.ask_string(
        "Time Budget",
        "Seconds the split search may take\n(leave blank for none)",
        "",
    )?)
    .map(|s| s.parse::<u64>())
    .transpose()
    .context("invalid integer for Time Budget")?;

    let default_level = LOG_LEVELS
        .iter()
        .position(|l| *l == config.log_level)
        .unwrap_or(2);
    config.log_level = driver
        .ask_choice("Log Level", "Messages below this level are dropped", &LOG_LEVELS, default_level)?
        .to_string();

    config.validate()?;
    Ok(config)
}

fn optional(answer: String) -> Option<String> {
    let trimmed = answer.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn validate_path_str(input: &str) -> Result<(), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Path cannot be empty".into());
    }
    let p = Path::new(trimmed);
    if !p.exists() {
        return Err(format!("Path does not exist: {}", p.display()));
    }
    if !p.is_file() {
        return Err("Expected a file path, not a directory".into());
    }
    Ok(())
}

fn prompt_path_until_ok<D: PromptDriver>(
    driver: &D,
    title: &str,
    help: &str,
    default: &str,
) -> Result<PathBuf> {
    loop {
        let answer = driver.ask_string(title, help, default)?;
        match validate_path_str(&answer) {
            Ok(()) => return Ok(PathBuf::from(answer.trim())),
            Err(msg) => eprintln!("✗ {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::fs;
    use tempfile::TempDir;

    /// Replays canned answers in order; an empty answer takes the default.
    struct ScriptedDriver {
        answers: RefCell<VecDeque<String>>,
    }

    impl ScriptedDriver {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().map(|s| s.to_string()).collect()),
            }
        }

        fn next(&self, title: &str) -> Result<String> {
            self.answers
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| anyhow!("no answer scripted for '{title}'"))
        }
    }

    impl PromptDriver for ScriptedDriver {
        fn ask_string(&self, title: &str, _help: &str, default: &str) -> Result<String> {
            let answer = self.next(title)?;
            Ok(if answer == "<default>" {
                default.to_string()
            } else {
                answer
            })
        }

        fn ask_u64(
            &self,
            title: &str,
            _help: &str,
            default: u64,
            _min: Option<u64>,
            _max: Option<u64>,
        ) -> Result<u64> {
            let answer = self.next(title)?;
            if answer.is_empty() {
                Ok(default)
            } else {
                Ok(answer.parse()?)
            }
        }

        fn ask_choice(
            &self,
            title: &str,
            _help: &str,
            options: &[&'static str],
            default: usize,
        ) -> Result<&'static str> {
            let answer = self.next(title)?;
            if answer.is_empty() {
                return Ok(options[default]);
            }
            options
                .iter()
                .find(|o| **o == answer)
                .copied()
                .ok_or_else(|| anyhow!("'{answer}' is not an option"))
        }
    }

    fn dataset() -> (TempDir, String) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("car.csv");
        fs::write(&path, "a,class\n1,x\n").unwrap();
        let path = path.to_string_lossy().into_owned();
        (dir, path)
    }

    #[test]
    fn merge_strategy_with_defaults() {
        let (_dir, path) = dataset();
        let driver = ScriptedDriver::new(&[&path, "1", "<default>", "", "500", "", "", "", ""]);
        let config = prompt_config(&driver).unwrap();

        assert_eq!(config.input, PathBuf::from(&path));
        assert_eq!(config.class_index, 1);
        assert_eq!(config.delimiters, "\t, ");
        assert_eq!(config.sort, SortStrategy::Merge);
        assert_eq!(config.run_size, 500);
        assert_eq!(config.work_dir, None);
        assert_eq!(config.threads, 0);
        assert_eq!(config.max_seconds, None);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn command_strategy_asks_for_program() {
        let (_dir, path) = dataset();
        let driver = ScriptedDriver::new(&[
            &path, "1", ";", "command", "gsort", "/tmp/lists", "1", "30", "debug",
        ]);
        let config = prompt_config(&driver).unwrap();

        assert_eq!(config.delimiters, ";");
        assert_eq!(config.sort, SortStrategy::Command);
        assert_eq!(config.sort_command, "gsort");
        assert_eq!(config.work_dir, Some(PathBuf::from("/tmp/lists")));
        assert_eq!(config.threads, 1);
        assert_eq!(config.max_seconds, Some(30));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn reprompts_until_path_exists() {
        let (dir, path) = dataset();
        let missing = dir.path().join("nope.csv").to_string_lossy().into_owned();
        let dir_path = dir.path().to_string_lossy().into_owned();
        let driver = ScriptedDriver::new(&[
            &missing, &dir_path, "", &path, "0", "<default>", "memory", "", "", "", "",
        ]);
        let config = prompt_config(&driver).unwrap();
        assert_eq!(config.input, PathBuf::from(&path));
        assert_eq!(config.sort, SortStrategy::Memory);
    }

    #[test]
    fn bad_budget_is_an_error() {
        let (_dir, path) = dataset();
        let driver =
            ScriptedDriver::new(&[&path, "1", "<default>", "memory", "", "", "soon", ""]);
        assert!(prompt_config(&driver).is_err());
    }
}
