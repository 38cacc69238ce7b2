//! Loading menu configuration files.
//!
//! A configuration file lists modules in declaration order:
//!
//! ```toml
//! [[modules]]
//! name = "lesxon"
//! display_name = "LesXon"
//! route_prefix = "lesxon."
//! depends_on = ["products"]
//!
//! [[modules.sections]]
//! header = "ETL.EXTRACT:"
//! order = 1
//!
//! [[modules.sections.items]]
//! permission = "lesxon_view"
//! description = "View data and reports"
//! ```
//!
//! TOML, YAML and JSON are accepted, picked by file extension.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ConfigurationStore;
use crate::models::Module;

/// On-disk shape of a configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreFile {
    #[serde(default)]
    pub modules: Vec<Module>,
}

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Yaml,
    Json,
}

impl Format {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "yml" | "yaml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl ConfigurationStore {
    /// Load and validate a configuration file.
    ///
    /// Dependency cycles and duplicate permissions are rejected; other
    /// validation issues are logged and tolerated.
    pub fn from_path(path: &Path) -> Result<Self> {
        let Some(format) = Format::from_path(path) else {
            bail!(
                "unsupported menu config extension at {} (expected .toml, .yml, .yaml or .json)",
                path.display()
            );
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read menu config file: {}", path.display()))?;

        let file = parse_str(&content, format)
            .with_context(|| format!("failed to parse menu config at {}", path.display()))?;

        debug!(
            path = %path.display(),
            modules = file.modules.len(),
            "loaded menu config"
        );

        Self::from_file(file)
    }

    /// Parse a TOML configuration string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_file(parse_str(content, Format::Toml)?)
    }

    /// Parse a YAML configuration string.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Self::from_file(parse_str(content, Format::Yaml)?)
    }

    /// Parse a JSON configuration string.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::from_file(parse_str(content, Format::Json)?)
    }

    /// Build a store from a parsed file and validate it.
    pub fn from_file(file: StoreFile) -> Result<Self> {
        let store = Self::from_modules(file.modules);
        let report = store.validate();

        for issue in report.warnings() {
            warn!(issue = %issue, "menu config issue");
        }

        if let Some(error) = report.errors().next() {
            bail!("invalid menu config: {error}");
        }

        Ok(store)
    }

    /// Export the store in its on-disk shape.
    pub fn to_file(&self) -> StoreFile {
        StoreFile {
            modules: self.to_modules(),
        }
    }
}

fn parse_str(content: &str, format: Format) -> Result<StoreFile> {
    let file = match format {
        Format::Toml => toml::from_str(content).context("invalid TOML")?,
        Format::Yaml => serde_yml::from_str(content).context("invalid YAML")?,
        Format::Json => serde_json::from_str(content).context("invalid JSON")?,
    };
    Ok(file)
}
