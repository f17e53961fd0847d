//! Run report sink
//!
//! Report lines are user-facing output, separate from the `log` diagnostics
//! controlled by `RUST_LOG` and `--verbose`.

use crate::error::Result;
use chrono::Local;
use log::LevelFilter;
use std::fs::{self, File, OpenOptions};
use std::io::{IsTerminal, Write};
use std::path::Path;

/// Destination for one-line run report messages
pub trait Reporter {
    fn log(&mut self, message: &str);
}

/// Collects messages in memory
impl Reporter for Vec<String> {
    fn log(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// Timestamped report lines to stdout and, optionally, an append-only file.
///
/// The file is opened once on construction and closed when the logger drops.
#[derive(Debug)]
pub struct RunLogger {
    file: Option<File>,
    prefix: String,
    console: bool,
    color: bool,
}

impl RunLogger {
    pub fn new(log_file: Option<&Path>, prefix: impl Into<String>) -> Result<Self> {
        let file = match log_file {
            Some(path) => Some(open_append(path)?),
            None => None,
        };

        Ok(Self {
            file,
            prefix: prefix.into(),
            console: true,
            color: std::io::stdout().is_terminal(),
        })
    }

    /// Stop echoing messages to stdout
    pub fn without_console(mut self) -> Self {
        self.console = false;
        self
    }
}

impl Reporter for RunLogger {
    fn log(&mut self, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let line = format_line(&timestamp, &self.prefix, message);

        if let Some(file) = self.file.as_mut() {
            if let Err(e) = writeln!(file, "{}", line) {
                log::warn!("Failed to write to log file: {}", e);
            }
        }

        if self.console {
            if self.color {
                println!("\x1b[32m{}\x1b[0m \x1b[31m{}\x1b[0m {}", timestamp, self.prefix, message);
            } else {
                println!("{}", line);
            }
        }
    }
}

/// Diagnostics logger configured from `RUST_LOG`, with the default level
/// raised to debug when `verbose` is set
pub fn diagnostics_builder(verbose: bool) -> env_logger::Builder {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    builder
}

/// Install the diagnostics logger for the process
pub fn init_diagnostics(verbose: bool) {
    diagnostics_builder(verbose).init();
}

fn format_line(timestamp: &str, prefix: &str, message: &str) -> String {
    format!("{} {} {}", timestamp, prefix, message)
}

fn open_append(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}
