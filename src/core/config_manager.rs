// src/core/config_manager.rs
//! Configuration: optional `resumatch.yaml` plus environment overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "resumatch.yaml";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_THRESHOLD: u8 = 70;
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigManager {
    pub environment: String,
    pub service: ServiceConfig,
    pub server: ServerSettings,
    pub default_threshold: u8,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub port: u16,
}

/// One environment section of the YAML file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct EnvironmentSection {
    api_url: Option<String>,
    timeout_seconds: Option<u64>,
    default_threshold: Option<u8>,
    port: Option<u16>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: EnvironmentSection,
    #[serde(default)]
    production: EnvironmentSection,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            environment: "local".to_string(),
            service: ServiceConfig {
                base_url: DEFAULT_API_URL.to_string(),
                timeout_seconds: DEFAULT_TIMEOUT_SECS,
            },
            server: ServerSettings { port: DEFAULT_PORT },
            default_threshold: DEFAULT_THRESHOLD,
            log_file: None,
        }
    }
}

impl ConfigManager {
    /// Load from `path` (or `resumatch.yaml` when present), then apply
    /// environment variable overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let environment = Self::get_environment();

        let section = match path {
            Some(explicit) => Self::read_section(explicit, &environment)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::read_section(&default_path, &environment)?
                } else {
                    EnvironmentSection::default()
                }
            }
        };

        let mut config = Self::from_section(environment, section)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("RESUMATCH_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn read_section(path: &Path, environment: &str) -> Result<EnvironmentSection> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse_section(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn parse_section(content: &str, environment: &str) -> Result<EnvironmentSection> {
        let file: ConfigFile = serde_yaml::from_str(content)?;
        Ok(match environment {
            "production" => file.production,
            _ => file.local,
        })
    }

    fn from_section(environment: String, section: EnvironmentSection) -> Result<Self> {
        let defaults = Self::default();
        let default_threshold = section
            .default_threshold
            .unwrap_or(defaults.default_threshold);
        if default_threshold > 100 {
            anyhow::bail!(
                "default_threshold must be between 0 and 100, got {}",
                default_threshold
            );
        }

        Ok(Self {
            environment,
            service: ServiceConfig {
                base_url: section.api_url.unwrap_or(defaults.service.base_url),
                timeout_seconds: section
                    .timeout_seconds
                    .unwrap_or(defaults.service.timeout_seconds),
            },
            server: ServerSettings {
                port: section.port.unwrap_or(defaults.server.port),
            },
            default_threshold,
            log_file: section.log_file,
        })
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("RESUMATCH_API_URL") {
            self.service.base_url = url;
        }

        if let Ok(timeout) = std::env::var("RESUMATCH_TIMEOUT_SECS") {
            self.service.timeout_seconds = timeout
                .parse()
                .context("RESUMATCH_TIMEOUT_SECS must be a number of seconds")?;
        }

        if let Ok(port) = std::env::var("ROCKET_PORT") {
            self.server.port = port
                .parse()
                .context("ROCKET_PORT must be a valid port number")?;
        }

        Ok(())
    }
}
