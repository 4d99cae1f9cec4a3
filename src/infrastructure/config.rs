use crate::domain::error::GistError;
use crate::infrastructure::storage::MAX_TTL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpstreamConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_gist_base")]
    pub gist_base: String,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            gist_base: default_gist_base(),
            per_page: default_per_page(),
            timeout_secs: default_timeout_secs(),
            concurrency: default_concurrency(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: default_log_level(),
        }
    }
}

// Defaults
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_ttl_secs() -> u64 {
    300
}
fn default_sweep_interval_secs() -> u64 {
    60
}
fn default_api_base() -> String {
    "https://api.github.com".to_string()
}
fn default_gist_base() -> String {
    "https://gist.github.com".to_string()
}
fn default_per_page() -> u32 {
    10
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_concurrency() -> usize {
    8
}
fn default_user_agent() -> String {
    format!("gistapi/{}", env!("CARGO_PKG_VERSION"))
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "INFO".to_string()
}

impl Config {
    pub fn bind_addr(&self) -> Result<SocketAddr, GistError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| {
                GistError::Config(format!(
                    "Invalid bind address {}:{}: {}",
                    self.server.host, self.server.port, e
                ))
            })
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }

    /// Apply `GISTAPI_*` overrides. `lookup` is usually `std::env::var(..).ok()`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), GistError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("GISTAPI_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("GISTAPI_PORT") {
            self.server.port = parse_env("GISTAPI_PORT", &port)?;
        }
        if let Some(ttl) = lookup("GISTAPI_CACHE_TTL") {
            self.cache.ttl_secs = parse_env("GISTAPI_CACHE_TTL", &ttl)?;
        }
        if let Some(api_base) = lookup("GISTAPI_API_BASE") {
            self.upstream.api_base = api_base;
        }
        if let Some(level) = lookup("GISTAPI_LOG_LEVEL") {
            self.logging.level = level;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), GistError> {
        if !(1..=100).contains(&self.upstream.per_page) {
            return Err(GistError::Config(format!(
                "upstream.per_page must be between 1 and 100, got {}",
                self.upstream.per_page
            )));
        }
        if self.upstream.concurrency == 0 {
            return Err(GistError::Config(
                "upstream.concurrency must be at least 1".to_string(),
            ));
        }
        if self.cache.ttl_secs > MAX_TTL.as_secs() {
            return Err(GistError::Config(format!(
                "cache.ttl_secs must be at most {}, got {}",
                MAX_TTL.as_secs(),
                self.cache.ttl_secs
            )));
        }
        if self.upstream.timeout_secs == 0 {
            return Err(GistError::Config(
                "upstream.timeout_secs must be at least 1".to_string(),
            ));
        }
        self.bind_addr()?;
        Ok(())
    }
}

impl Logging {
    /// Map the configured level name onto a tracing filter directive.
    pub fn filter_directive(&self) -> &'static str {
        match self.level.to_ascii_uppercase().as_str() {
            "TRACE" => "trace",
            "DEBUG" => "debug",
            "INFO" => "info",
            "WARN" => "warn",
            "ERROR" => "error",
            _ => "warn",
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, GistError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| GistError::Config(format!("{}={:?}: {}", name, value, e)))
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("gistapi").join("config.toml"))
}

/// Parse a config file. A malformed file falls back to defaults with a warning.
pub fn load_config_from(path: &Path) -> Result<Config, GistError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    match toml::from_str::<Config>(&content) {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!(
                "Warning: Failed to parse config file {}: {}. Using defaults.",
                path.display(),
                e
            );
            Ok(Config::default())
        }
    }
}

/// Load the config file (if any) and apply environment overrides.
pub fn load_config() -> Result<Config, GistError> {
    let mut config = match get_config_path() {
        Some(path) => load_config_from(&path)?,
        None => Config::default(),
    };
    config.apply_env(|name| std::env::var(name).ok())?;
    Ok(config)
}

/// Write a sample config to `path` unless one already exists.
///
/// Returns `false` when the file was left untouched.
pub fn write_config_sample(path: &Path) -> Result<bool, GistError> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let sample = Config::default();
    let toml_content = toml::to_string_pretty(&sample)
        .map_err(|e| GistError::Config(format!("Failed to serialize config: {}", e)))?;
    fs::write(path, toml_content)
        .map_err(|e| GistError::Config(format!("Failed to write config file: {}", e)))?;
    Ok(true)
}

pub fn generate_config_sample() -> Result<(), GistError> {
    let path = get_config_path()
        .ok_or_else(|| GistError::Config("Cannot determine config directory".to_string()))?;

    if write_config_sample(&path)? {
        println!("Generated config file at: {}", path.display());
    } else {
        eprintln!("Config file already exists at: {}", path.display());
    }
    Ok(())
}
