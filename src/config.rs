//! Service configuration.
//!
//! Values are layered: built-in defaults, then the JSON file at
//! `<config dir>/solution-builder/config.json`, then environment variables:
//!
//! - `SOLUTION_BUILDER_CATALOG_URL` - upstream master-data API base URL
//! - `SOLUTION_BUILDER_CATALOG_API_KEY` - bearer token for the upstream API
//! - `SOLUTION_BUILDER_RATE` - flat hourly rate used by the canvas estimator
//! - `SOLUTION_BUILDER_SEED_COUNT` - activities placed on a fresh canvas
//! - `SOLUTION_BUILDER_PAGE_SIZE` - catalog page size
//! - `SOLUTION_BUILDER_ADMIN_GROUPS`, `SOLUTION_BUILDER_ARCHITECT_GROUPS`,
//!   `SOLUTION_BUILDER_CATALOG_GROUPS` - comma-separated directory groups

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::access::RoleGroups;
use crate::builder::{DEFAULT_FLAT_RATE, DEFAULT_SEED_COUNT};
use crate::catalog::DEFAULT_PAGE_SIZE;

const APP_NAME: &str = "solution-builder";
const CONFIG_FILE: &str = "config.json";
const ENV_PREFIX: &str = "SOLUTION_BUILDER_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the upstream catalog API, e.g. `http://localhost:8000/api/v1`.
    pub catalog_url: Option<String>,
    pub catalog_api_key: Option<String>,
    /// Placeholder hourly rate for canvas costs and the budget export.
    pub default_rate: f64,
    pub seed_count: usize,
    pub page_size: usize,
    pub role_groups: RoleGroups,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_url: None,
            catalog_api_key: None,
            default_rate: DEFAULT_FLAT_RATE,
            seed_count: DEFAULT_SEED_COUNT,
            page_size: DEFAULT_PAGE_SIZE,
            role_groups: RoleGroups::default(),
        }
    }
}

impl AppConfig {
    /// Load from the user's config directory and the environment.
    /// Falls back to defaults if the file is missing or unreadable.
    pub fn load() -> Self {
        let base = match config_path().and_then(|path| Self::from_file(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        base.with_overrides(|name| std::env::var(name).ok())
    }

    /// Read a JSON config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Apply `SOLUTION_BUILDER_*` overrides looked up through `var`.
    /// Unparseable numbers are ignored with a warning.
    pub fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| var(&format!("{}{}", ENV_PREFIX, key));

        if let Some(url) = get("CATALOG_URL") {
            self.catalog_url = Some(url);
        }
        if let Some(key) = get("CATALOG_API_KEY") {
            self.catalog_api_key = Some(key);
        }
        if let Some(rate) = get("RATE") {
            match rate.parse::<f64>() {
                Ok(rate) if rate >= 0.0 => self.default_rate = rate,
                _ => tracing::warn!("Ignoring invalid {}RATE: {}", ENV_PREFIX, rate),
            }
        }
        if let Some(count) = get("SEED_COUNT") {
            match count.parse() {
                Ok(count) => self.seed_count = count,
                Err(_) => tracing::warn!("Ignoring invalid {}SEED_COUNT: {}", ENV_PREFIX, count),
            }
        }
        if let Some(size) = get("PAGE_SIZE") {
            match size.parse::<usize>() {
                Ok(size) if size > 0 => self.page_size = size,
                _ => tracing::warn!("Ignoring invalid {}PAGE_SIZE: {}", ENV_PREFIX, size),
            }
        }
        if let Some(groups) = get("ADMIN_GROUPS") {
            self.role_groups.admin = split_list(&groups);
        }
        if let Some(groups) = get("ARCHITECT_GROUPS") {
            self.role_groups.solution_architect = split_list(&groups);
        }
        if let Some(groups) = get("CATALOG_GROUPS") {
            self.role_groups.catalog = split_list(&groups);
        }
        self
    }
}

/// Split a comma-separated list, dropping blanks.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn config_path() -> Result<PathBuf> {
    let mut path =
        dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
