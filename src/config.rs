use anyhow::{Context, Result};
use colored::*;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_INFO_FILE: &str = "app.toml";
const DEFAULT_DEPS_DIR: &str = "deps";

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub project: ProjectConfig,
    /// groupId:artifactId -> version, resolved into the deps directory
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    /// Action name -> command template
    #[serde(default)]
    pub actions: BTreeMap<String, String>,
    #[serde(default)]
    pub env: HashMap<String, String>,
    #[serde(skip)]
    pub root: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectConfig {
    pub name: Option<String>,
    pub deps_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn action(&self, name: &str) -> Option<&str> {
        self.actions.get(name).map(String::as_str)
    }

    pub fn deps_dir(&self) -> PathBuf {
        let dir = self
            .project
            .deps_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DEPS_DIR));
        if dir.is_absolute() { dir } else { self.root.join(dir) }
    }
}

/// Loads `app.toml` from `dir`. A missing file gives an empty configuration.
pub fn load_config(dir: &Path) -> Result<AppConfig> {
    let config_path = dir.join(APP_INFO_FILE);

    // 1. Parse app.toml (Base Layer)
    let mut config: AppConfig = if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", APP_INFO_FILE))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", APP_INFO_FILE))?
    } else {
        log::debug!("No {} in {:?}, using empty configuration", APP_INFO_FILE, dir);
        AppConfig::default()
    };
    config.root = dir.to_path_buf();

    // 2. Load .env using dotenvy (Override Layer)
    // Determines filename: .env or .env.prod based on JPM_ENV
    let env_filename = env::var("JPM_ENV")
        .map(|v| format!(".env.{}", v))
        .unwrap_or_else(|_| ".env".to_string());

    let env_path = dir.join(&env_filename);

    if env_path.exists() {
        eprintln!("{} Loading environment from: {}", "🌿".green(), env_filename.bold());

        for item in dotenvy::from_path_iter(&env_path)? {
            let (key, val) = item?;
            // .env overrides app.toml
            config.env.insert(key, val);
        }
    }

    Ok(config)
}
