use chrono::Local;
use flexi_logger::{DeferredNow, FlexiLoggerError, Logger, LoggerHandle};
use log::Record;
use std::io::Write;

/// Log specification for this crate at `level`. Other crates stay silent.
pub fn log_spec(level: &str) -> String {
    format!("sliq={level}")
}

/// One line per record: local timestamp, level, target, message.
pub fn format_line(
    w: &mut dyn Write,
    _now: &mut DeferredNow,
    record: &Record<'_>,
) -> std::io::Result<()> {
    write!(
        w,
        "{} {:<5} [{}] {}",
        Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.target(),
        record.args()
    )
}

/// Starts logging to stderr. `RUST_LOG` takes precedence over `level`.
/// The returned handle must stay alive for as long as logging is wanted.
pub fn start(level: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(log_spec(level))?
        .format(format_line)
        .start()
}
