use anyhow::{Context, Result};
use log::debug;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempPath;

/// Temporary `@file` argument files owned by a single action run.
///
/// Files are removed when the value is dropped, whatever way the run ended.
/// Removal failures are ignored.
pub struct ArgsFiles {
    dir: PathBuf,
    files: Vec<TempPath>,
}

impl ArgsFiles {
    pub fn new() -> Self {
        Self::new_in(env::temp_dir())
    }

    /// Creates the files in `dir` instead of the system temp directory.
    pub fn new_in(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            files: Vec::new(),
        }
    }

    /// Writes `content` to a fresh file and returns its absolute path.
    pub fn create(&mut self, content: &str) -> Result<PathBuf> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("jpm-args-").suffix(".txt");

        let mut file = builder
            .tempfile_in(&self.dir)
            .context("Failed to create args file")?;

        file.write_all(content.as_bytes())
            .and_then(|_| file.flush())
            .context("Failed to write args file")?;

        let temp_path = file.into_temp_path();
        let path = std::path::absolute(&temp_path).context("Failed to resolve args file path")?;
        debug!("Created args file {} ({} bytes)", path.display(), content.len());

        self.files.push(temp_path);
        Ok(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Default for ArgsFiles {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ArgsFiles {
    fn drop(&mut self) {
        for temp_path in self.files.drain(..) {
            let shown = temp_path.to_path_buf();
            match temp_path.close() {
                Ok(()) => debug!("Removed args file {}", shown.display()),
                Err(e) => debug!("Could not remove args file {}: {}", shown.display(), e),
            }
        }
    }
}
