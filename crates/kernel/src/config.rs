//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::menu::HOME_MODULE;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Menu configuration file (TOML, YAML or JSON). When `None`, the
    /// built-in reference menu is used.
    pub menu_config: Option<PathBuf>,

    /// Module rendered first without a dropdown (default: home).
    pub home_module: String,

    /// Reject configurations with any validation issue, including
    /// dependencies on undefined modules (default: false).
    pub strict: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let menu_config = env::var("NAVGATE_CONFIG")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let home_module = env::var("NAVGATE_HOME_MODULE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| HOME_MODULE.to_string());

        let strict = env::var("NAVGATE_STRICT")
            .map(|v| parse_bool(&v))
            .unwrap_or(Ok(false))
            .context("NAVGATE_STRICT must be true/false, 1/0 or yes/no")?;

        Ok(Self {
            menu_config,
            home_module,
            strict,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            menu_config: None,
            home_module: HOME_MODULE.to_string(),
            strict: false,
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("invalid boolean '{other}'"),
    }
}
