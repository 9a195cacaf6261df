//! Per-module record of prompts and responses.

use crate::error::ModuleError;
use chrono::{DateTime, Local, SecondsFormat};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const PROMPT: &str = "PROMPT";
pub const RESPONSE: &str = "RESPONSE";

/// Echoes events to stdout and/or appends them to `<dir>/<module>.log`
#[derive(Debug, Clone)]
pub struct EventLog {
    dir: PathBuf,
    to_stdout: bool,
    to_file: bool,
}

impl EventLog {
    pub fn new(dir: impl Into<PathBuf>, to_stdout: bool, to_file: bool) -> Self {
        Self {
            dir: dir.into(),
            to_stdout,
            to_file,
        }
    }

    pub fn path_for(&self, module_name: &str) -> PathBuf {
        self.dir.join(format!("{module_name}.log"))
    }

    pub fn record(&self, module_name: &str, label: &str, content: &str) -> Result<(), ModuleError> {
        if !self.to_stdout && !self.to_file {
            return Ok(());
        }

        let block = format_event(label, content, Local::now());
        if self.to_stdout {
            println!("{block}");
        }
        if self.to_file {
            append(&self.path_for(module_name), &block)?;
        }
        Ok(())
    }
}

/// Render one labelled, timestamped block
pub fn format_event(label: &str, content: &str, at: DateTime<Local>) -> String {
    format!(
        "--- {label} [{}] ---\n{content}\n",
        at.to_rfc3339_opts(SecondsFormat::Secs, false)
    )
}

fn append(path: &Path, block: &str) -> Result<(), ModuleError> {
    let io_err = |source| ModuleError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)?;
    file.write_all(block.as_bytes()).map_err(io_err)
}
