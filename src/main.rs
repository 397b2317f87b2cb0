use anyhow::{Context, Result, bail};
use sliq::ui::cli::{drivers::InquireDriver, prompt_config};
use sliq::utils::logging;
use sliq::{FindBestSplitTask, SliqConfig};
use std::path::PathBuf;

const USAGE: &str = "usage: sliq [--config <file.json>] [--json] [--schema]";

struct Args {
    config: Option<PathBuf>,
    json: bool,
    schema: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config: None,
        json: false,
        schema: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = it.next().context("--config needs a file")?;
                args.config = Some(PathBuf::from(path));
            }
            "--json" => args.json = true,
            "--schema" => args.schema = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unexpected argument '{other}'\n{USAGE}"),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    let args = parse_args()?;

    if args.schema {
        println!("{}", SliqConfig::schema_json()?);
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => SliqConfig::from_json_file(path)
            .with_context(|| format!("could not load {}", path.display()))?,
        None => prompt_config(&InquireDriver)?,
    };
    let _logger = logging::start(&config.log_level).context("could not start logger")?;

    let outcome = FindBestSplitTask::new(config)
        .run()
        .context("split search failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("Class values are: {:?}", outcome.class_values);
        println!("{outcome}");
    }
    Ok(())
}
