//! File logging for hosts that own the terminal.

use std::fs::File;
use std::io;
use std::path::Path;

use simplelog::{Config, LevelFilter, WriteLogger};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log file: {0}")]
    Io(#[from] io::Error),

    #[error("a logger is already installed")]
    AlreadySet(#[from] log::SetLoggerError),
}

/// Send all `log` output at or above `level` to a file.
pub fn init_file_logger(path: impl AsRef<Path>, level: LevelFilter) -> Result<(), LoggingError> {
    let log_file = File::create(path)?;
    WriteLogger::init(level, Config::default(), log_file)?;
    Ok(())
}
