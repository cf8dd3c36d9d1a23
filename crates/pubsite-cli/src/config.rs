//! Configuration loading from TOML files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use pubsite_core::{DisclosureConfig, PipelineConfig, Source};

/// Global configuration for pubsite
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub journal: ListConfig,
    pub proceedings: ListConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Remote document; takes precedence over `path` when set
    #[serde(deserialize_with = "deserialize_env_var")]
    pub url: Option<String>,
    pub path: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: None,
            path: PathBuf::from("data/publications.json"),
        }
    }
}

/// Per-list overrides; unset fields keep the bucket's defaults.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ListConfig {
    pub container_id: Option<String>,
    pub toggle_id: Option<String>,
    pub initial_show: Option<usize>,
    pub expanded_label: Option<String>,
    pub collapsed_label: Option<String>,
}

impl ListConfig {
    fn resolve(&self, base: DisclosureConfig) -> DisclosureConfig {
        DisclosureConfig {
            container_id: self.container_id.clone().unwrap_or(base.container_id),
            toggle_id: self.toggle_id.clone().unwrap_or(base.toggle_id),
            initial_show: self.initial_show.unwrap_or(base.initial_show),
            expanded_label: self.expanded_label.clone().unwrap_or(base.expanded_label),
            collapsed_label: self.collapsed_label.clone().unwrap_or(base.collapsed_label),
        }
    }
}

/// Deserialize a string that may contain environment variable reference like ${VAR}
fn deserialize_env_var<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| expand_env_var(&s)))
}

/// Expand ${VAR} to environment variable value
fn expand_env_var(s: &str) -> Option<String> {
    if let Some(var_name) = s.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
        std::env::var(var_name).ok()
    } else {
        Some(s.to_string())
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./pubsite.toml (current directory)
    /// 2. ~/.config/pubsite/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("pubsite.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "pubsite") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Document location: the URL when configured, else the local path.
    pub fn source(&self) -> Source {
        match &self.source.url {
            Some(url) => Source::parse(url),
            None => Source::File(self.source.path.clone()),
        }
    }

    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            journal: self.journal.resolve(DisclosureConfig::journal()),
            proceedings: self.proceedings.resolve(DisclosureConfig::proceedings()),
        }
    }
}
