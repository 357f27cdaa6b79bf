use anyhow::{Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Supplies the ordered classpath substituted for `{{deps}}`.
pub trait ClasspathResolver {
    fn resolve(&self) -> Result<Vec<PathBuf>>;
}

/// Classpath made of the jars synced into the project's deps directory.
pub struct DepsDirResolver {
    dir: PathBuf,
}

impl DepsDirResolver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ClasspathResolver for DepsDirResolver {
    fn resolve(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            warn!("Dependency directory {:?} does not exist, classpath is empty", self.dir);
            return Ok(Vec::new());
        }

        let dir = std::path::absolute(&self.dir)
            .with_context(|| format!("Failed to resolve {:?}", self.dir))?;
        let escaped = glob::Pattern::escape(&dir.to_string_lossy());
        let pattern = Path::new(&escaped).join("*.jar");

        // glob yields entries in alphabetical order
        let mut jars = Vec::new();
        for entry in glob::glob(&pattern.to_string_lossy()).context("Invalid dependency directory")? {
            let path = entry?;
            if path.is_file() {
                jars.push(path);
            }
        }

        info!("Resolved {} jar(s) from {:?}", jars.len(), dir);
        Ok(jars)
    }
}
