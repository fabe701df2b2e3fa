//! Output sink for an assembly run.

use crate::error::{BuildError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of persisted shader artifacts.
pub const ARTIFACT_EXTENSION: &str = "glsl";

/// Named, clearable, appendable text buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputDocument {
    name: String,
    text: String,
}

impl OutputDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn write(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Write the buffer to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
        }
        fs::write(path, &self.text).map_err(|e| BuildError::io(path, e))?;
        log::info!("saved {} to {}", self.name, path.display());
        Ok(())
    }
}

/// `<prepend><table>.glsl`, with `prepend` used as a plain string prefix.
pub fn artifact_path(prepend: &str, table: &str) -> PathBuf {
    PathBuf::from(format!("{prepend}{table}.{ARTIFACT_EXTENSION}"))
}
