//! On-disk module files.

use crate::error::ModuleError;
use crate::log_debug;
use std::fs;
use std::path::PathBuf;

/// File extension of generated modules
pub const MODULE_EXTENSION: &str = "py";

/// Module names must be importable identifiers
pub fn validate_module_name(name: &str) -> Result<(), ModuleError> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(ModuleError::InvalidName(name.to_string()))
    }
}

/// Reads and writes `<dir>/<module>.py`
#[derive(Debug, Clone)]
pub struct ModuleStore {
    dir: PathBuf,
}

impl ModuleStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, module_name: &str) -> PathBuf {
        self.dir
            .join(format!("{module_name}.{MODULE_EXTENSION}"))
    }

    pub fn exists(&self, module_name: &str) -> bool {
        self.path_for(module_name).is_file()
    }

    pub fn read(&self, module_name: &str) -> Result<String, ModuleError> {
        let path = self.path_for(module_name);
        if !path.is_file() {
            return Err(ModuleError::NotFound(path));
        }
        fs::read_to_string(&path).map_err(|source| ModuleError::Io { path, source })
    }

    /// Write (or overwrite) the module, creating the directory if needed
    pub fn write(&self, module_name: &str, source: &str) -> Result<PathBuf, ModuleError> {
        fs::create_dir_all(&self.dir).map_err(|source| ModuleError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(module_name);
        fs::write(&path, source).map_err(|source| ModuleError::Io {
            path: path.clone(),
            source,
        })?;
        log_debug!("Wrote {} bytes to {}", source.len(), path.display());
        Ok(path)
    }
}
