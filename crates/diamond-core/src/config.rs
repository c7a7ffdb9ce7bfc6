//! User configuration: API host, cache lifetime and the default chart range.
//!
//! Stored as JSON at `<config_dir>/diamond-standings/config.json`. Every
//! field is optional; unset fields fall back to the defaults below, and a
//! missing file is the same as an empty one.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;
use crate::series::DEFAULT_EXPIRY_DAYS;

const APP_NAME: &str = "diamond-standings";

const CONFIG_FILE: &str = "config.json";

/// First season charted when nothing else is configured
pub const DEFAULT_START_YEAR: i32 = 2000;

/// Last season charted when nothing else is configured
pub const DEFAULT_END_YEAR: i32 = 2024;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub cache_expiry_days: Option<u32>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    #[serde(default)]
    pub exclude_years: Vec<i32>,
    pub cache_dir: Option<PathBuf>,
}

impl Config {
    /// Read the user's config file, or defaults when there is none.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Reject settings the builder can't act on.
    pub fn validate(&self) -> Result<()> {
        let (start, end) = self.year_range();
        if start > end {
            bail!("start_year {} is after end_year {}", start, end);
        }
        if self.cache_expiry_days == Some(0) {
            bail!("cache_expiry_days must be at least 1");
        }
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not find config directory")?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.cache_dir {
            return Ok(dir.clone());
        }
        let cache_dir = dirs::cache_dir().context("Could not find cache directory")?;
        Ok(cache_dir.join(APP_NAME))
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn expiry_days(&self) -> u32 {
        self.cache_expiry_days.unwrap_or(DEFAULT_EXPIRY_DAYS)
    }

    pub fn year_range(&self) -> (i32, i32) {
        (
            self.start_year.unwrap_or(DEFAULT_START_YEAR),
            self.end_year.unwrap_or(DEFAULT_END_YEAR),
        )
    }
}
