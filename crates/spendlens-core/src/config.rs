//! Configuration loading
//!
//! Config is resolved in three layers:
//! 1. Embedded defaults (compiled into the binary)
//! 2. Override file: an explicit path, or the data dir
//!    (~/.local/share/spendlens/config.toml)
//! 3. Environment variables

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/spendlens.toml");

pub const ENV_BACKEND: &str = "SPENDLENS_AI_BACKEND";
pub const ENV_OLLAMA_HOST: &str = "OLLAMA_HOST";
pub const ENV_OLLAMA_MODEL: &str = "OLLAMA_MODEL";
pub const ENV_TIMEOUT_SECS: &str = "SPENDLENS_AI_TIMEOUT_SECS";

/// Which text-generation backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    Disabled,
    Ollama,
    Mock,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Ollama => "ollama",
            Self::Mock => "mock",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disabled" | "none" | "off" => Ok(Self::Disabled),
            "ollama" => Ok(Self::Ollama),
            "mock" => Ok(Self::Mock),
            _ => Err(format!("Unknown generation backend: {}", s)),
        }
    }
}

/// Settings for the optional text-generation capability
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub backend: BackendKind,
    /// Base URL of the backend server (required for ollama)
    pub host: Option<String>,
    pub model: String,
    /// Upper bound on a single generation call
    pub timeout: Duration,
    /// Maximum number of tokens to generate
    pub max_length: u32,
    pub temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Disabled,
            host: None,
            model: "llama3.2".to_string(),
            timeout: Duration::from_secs(20),
            max_length: 256,
            temperature: 0.7,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub default_user: String,
    pub generation: GenerationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("spendlens.db"),
            default_user: "local".to_string(),
            generation: GenerationConfig::default(),
        }
    }
}

impl Config {
    /// Load config (override file first, then embedded default), then apply env vars
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let content = match override_path {
            Some(path) if path.exists() => read_config(path)?,
            Some(path) => {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )))
            }
            None => match default_config_path() {
                Some(path) if path.exists() => read_config(&path)?,
                _ => DEFAULT_CONFIG.to_string(),
            },
        };

        let mut config = parse_config(&content)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment overrides using the given lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup(ENV_BACKEND) {
            self.generation.backend = backend.parse().map_err(Error::Config)?;
        }
        if let Some(host) = lookup(ENV_OLLAMA_HOST) {
            self.generation.host = Some(host);
        }
        if let Some(model) = lookup(ENV_OLLAMA_MODEL) {
            self.generation.model = model;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs
                .parse()
                .map_err(|_| Error::Config(format!("{} must be a number: {}", ENV_TIMEOUT_SECS, secs)))?;
            self.generation.timeout = Duration::from_secs(secs);
        }
        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("spendlens").join("config.toml"))
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    database: Option<RawDatabase>,
    generation: Option<RawGeneration>,
}

#[derive(Debug, Deserialize)]
struct RawDatabase {
    path: Option<PathBuf>,
    default_user: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawGeneration {
    backend: Option<String>,
    host: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
    max_length: Option<u32>,
    temperature: Option<f32>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = Config::default();

    if let Some(db) = raw.database {
        if let Some(path) = db.path {
            config.database_path = path;
        }
        if let Some(user) = db.default_user {
            config.default_user = user;
        }
    }

    if let Some(generation) = raw.generation {
        let target = &mut config.generation;
        if let Some(backend) = generation.backend {
            target.backend = backend.parse().map_err(Error::Config)?;
        }
        if generation.host.is_some() {
            target.host = generation.host;
        }
        if let Some(model) = generation.model {
            target.model = model;
        }
        if let Some(timeout) = generation.timeout_secs {
            target.timeout = Duration::from_secs(timeout);
        }
        if let Some(max_length) = generation.max_length {
            target.max_length = max_length;
        }
        if let Some(temperature) = generation.temperature {
            target.temperature = temperature;
        }
    }

    Ok(config)
}
