//! File logging setup for demos and hosts.

use std::fs::File;
use std::io;
use std::path::Path;

pub use simplelog::LevelFilter;
use simplelog::{Config, WriteLogger};

/// Route `log` output to a file. Call once at startup.
pub fn init_file_logger(path: impl AsRef<Path>, level: LevelFilter) -> io::Result<()> {
    let file = File::create(path)?;
    WriteLogger::init(level, Config::default(), file)
        .map_err(|err| io::Error::other(err.to_string()))
}
