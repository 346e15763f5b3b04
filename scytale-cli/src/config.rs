//! CLI configuration
//!
//! Built-in defaults, overridden by the JSON config file, then by
//! `SCYTALE_*` environment variables, then by command-line flags.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_DICTIONARY: &str = "SCYTALE_DICTIONARY";
pub const ENV_WORKERS: &str = "SCYTALE_WORKERS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Word list; the bundled English list when unset
    pub dictionary: Option<PathBuf>,
    /// Brute force threads
    pub workers: usize,
    /// Percent of recognised words for a result to count as English
    pub english_threshold: f64,
    /// Candidates shown by `crack`
    pub top: usize,
    /// Bound on the substitution cracker's mapping set
    pub search_limit: usize,
    /// Rendered in place of unresolved substitution letters
    pub mark_unresolved: Option<char>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: None,
            workers: num_cpus::get(),
            english_threshold: scytale_cipher::scorer::DEFAULT_ENGLISH_THRESHOLD,
            top: 5,
            search_limit: scytale_cipher::cracker::DEFAULT_SEARCH_LIMIT,
            mark_unresolved: None,
        }
    }
}

impl Config {
    /// `<config dir>/scytale/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scytale").join("config.json"))
    }

    /// An explicit path must exist; the default one may be absent
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Apply environment overrides, looked up through `var`
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(path) = var(ENV_DICTIONARY).filter(|v| !v.is_empty()) {
            self.dictionary = Some(PathBuf::from(path));
        }
        if let Some(workers) = var(ENV_WORKERS).filter(|v| !v.is_empty()) {
            self.workers = workers
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number, got '{}'", ENV_WORKERS, workers))?;
        }
        Ok(())
    }
}
