// Log sink setup. The core only talks to the `log` facade; this wires the facade
// to an append-only file through flexi_logger.

use flexi_logger::{DeferredNow, Duplicate, FileSpec, FlexiLoggerError, Logger, LoggerHandle};
use std::path::PathBuf;

/// Default log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "system.log";

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// flexi_logger spec string, e.g. `info` or `boundq=trace`.
    pub level: String,
    pub file: PathBuf,
    /// Also print warnings and errors on stderr.
    pub duplicate_to_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: PathBuf::from(DEFAULT_LOG_FILE),
            duplicate_to_stderr: true,
        }
    }
}

/// Start the global logger.
///
/// Keep the returned handle alive for as long as records should be written;
/// dropping it flushes and shuts the writer down. Write errors inside the logger
/// are reported on stderr by flexi_logger and never reach the caller's code path.
pub fn init_logging(config: &LogConfig) -> Result<LoggerHandle, FlexiLoggerError> {
    let file_spec = FileSpec::try_from(config.file.as_path())?.suppress_timestamp();

    let duplicate = if config.duplicate_to_stderr {
        Duplicate::Warn
    } else {
        Duplicate::None
    };

    Logger::try_with_str(&config.level)?
        .log_to_file(file_spec)
        .append()
        .duplicate_to_stderr(duplicate)
        .format(line_format)
        .start()
}

// Format: "YYYY-MM-DD HH:MM:SS.mmm INF [consumer-3] Data dequeued"
pub(crate) fn line_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    let level_abbr = match record.level() {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    };

    let thread = std::thread::current();
    write!(
        w,
        "{} {} [{}] {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr,
        thread.name().unwrap_or("unnamed"),
        record.args()
    )
}
