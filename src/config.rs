use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Url;
use serde::Deserialize;

use crate::lookup::LookupConfig;
use crate::upstream::PoolConfig;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_POOL_IDLE_TIMEOUT_MS: u64 = 1000;
const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 32;

/// Top-level application configuration loaded from file + environment.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamSection,
    pub logging: LoggingSection,
}

impl AppConfig {
    /// Load configuration from disk and environment.
    pub fn load() -> Result<Self> {
        let config_path =
            env::var("POKEDEX_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Load configuration from `path` (skipped if missing), overlaid by
    /// `POKEDEX_*` environment variables.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut builder = config::Config::builder();

        if path.exists() {
            builder = builder.add_source(config::File::from(PathBuf::from(path)));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("POKEDEX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build()?;
        let mut config: Self = settings.try_deserialize()?;

        if config.logging.level.trim().is_empty() {
            config.logging.level = "info".to_string();
        }

        config.validate()?;

        Ok(config)
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.upstream.to_runtime().map(|_| ())
    }

    /// Resolve the connection pool and lookup settings.
    pub fn upstream_runtime(&self) -> Result<(PoolConfig, LookupConfig)> {
        self.upstream.to_runtime()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamSection {
    pub base_url: String,
    pub language: String,
    pub pool_idle_timeout_ms: u64,
    pub pool_max_idle_per_host: usize,
    pub user_agent: String,
}

impl UpstreamSection {
    pub fn to_runtime(&self) -> Result<(PoolConfig, LookupConfig)> {
        let base_url = Url::parse(self.base_url.trim())
            .with_context(|| format!("upstream.base_url '{}' is not a valid URL", self.base_url))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            bail!(
                "upstream.base_url must use http or https, got '{}'",
                base_url.scheme()
            );
        }
        if base_url.cannot_be_a_base() {
            bail!("upstream.base_url must be a hierarchical URL");
        }

        let language = self.language.trim();
        if language.is_empty() {
            bail!("upstream.language must not be empty");
        }

        if self.pool_idle_timeout_ms == 0 {
            bail!("upstream.pool_idle_timeout_ms must be greater than zero");
        }

        let pool = PoolConfig {
            idle_timeout: Duration::from_millis(self.pool_idle_timeout_ms),
            max_idle_per_host: self.pool_max_idle_per_host,
            user_agent: self.user_agent.clone(),
        };
        let lookup = LookupConfig {
            base_url,
            language: language.to_string(),
        };

        Ok((pool, lookup))
    }
}

impl Default for UpstreamSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            pool_idle_timeout_ms: DEFAULT_POOL_IDLE_TIMEOUT_MS,
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            user_agent: concat!("pokedex-gateway/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}
