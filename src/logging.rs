// src/logging.rs

use crate::config::Config;
use crate::errors::QuarryResult;
use flexi_logger::{FileSpec, Logger, LoggerHandle};

/// Starts the file logger. The TUI owns the terminal, so everything goes to
/// a log file under `config.log_dir`; the handle must stay alive for the
/// lifetime of the program.
pub fn init(config: &Config) -> QuarryResult<LoggerHandle> {
    let handle = Logger::try_with_str(&config.log_level)?
        .log_to_file(
            FileSpec::default()
                .directory(&config.log_dir)
                .basename("quarry"),
        )
        .append()
        .start()?;
    Ok(handle)
}
