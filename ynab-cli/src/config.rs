use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::state::{app_home, ensure_app_home};

pub const DEFAULT_BASE_URL: &str = "https://api.youneedabudget.com";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiSection,
    pub import: ImportSection,
    pub webhook: WebhookSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Used when `-b` is not given
    pub budget_id: Option<String>,
    /// Used when `-a` is not given
    pub account_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSection {
    /// Prefix of generated import ids. Changing it makes every
    /// previously pushed transaction look new to the API.
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookSection {
    pub url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            budget_id: None,
            account_id: None,
        }
    }
}

impl Default for ImportSection {
    fn default() -> Self {
        Self {
            namespace: ynab_ingest::DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl Default for WebhookSection {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: 10,
        }
    }
}

impl ApiSection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl WebhookSection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Path of the config file: `explicit` if given, else `~/.ynab-push/config.toml`.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(p) => Ok(p.to_path_buf()),
        None => Ok(app_home()?.join("config.toml")),
    }
}

/// Load the config. A missing default file yields defaults; a missing
/// explicitly requested file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let p = config_path(explicit)?;
    if !p.exists() {
        if explicit.is_some() {
            bail!("config file not found: {}", p.display());
        }
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    let cfg = toml::from_str(&s).with_context(|| format!("parse {}", p.display()))?;
    tracing::debug!(path = %p.display(), "loaded config");
    Ok(cfg)
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(explicit: Option<&Path>) -> Result<PathBuf> {
    let p = match explicit {
        Some(p) => p.to_path_buf(),
        None => ensure_app_home()?.join("config.toml"),
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(p);
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(p)
}
