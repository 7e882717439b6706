use crate::error::{config_error, env_error, AppResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Default time zone used to decide which calendar day is "today"
pub const DEFAULT_TIMEZONE: &str = "Europe/Amsterdam";

/// Default locale for user-facing notices
pub const DEFAULT_LOCALE: &str = "nl";

/// Optional file toggling the fallback cache per resource
pub const CACHE_CONFIG_PATH: &str = "config/cache.toml";

/// Resources mirrored into the fallback cache unless configured otherwise
const DEFAULT_CACHED_RESOURCES: [&str; 2] = ["programs", "teachers"];

/// Main configuration structure for the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the administration API, e.g. `https://school.example/api`
    pub api_url: String,
    /// Bearer token sent with every request, if any
    pub api_token: Option<String>,
    /// Redis URL for the fallback cache; in-memory cache when absent
    pub redis_url: Option<String>,
    /// Time zone name for calendar "today"
    pub timezone: String,
    /// Locale for notices and table headers
    pub locale: String,
    /// Map of resource names to whether their lists are cached for offline use
    pub cached_resources: HashMap<String, bool>,
    /// File the cache toggles are read from and saved to
    #[serde(default = "default_cache_config_path")]
    pub cache_config_path: PathBuf,
}

fn default_cache_config_path() -> PathBuf {
    PathBuf::from(CACHE_CONFIG_PATH)
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let api_url = env::var("MADRASSA_API_URL").map_err(|_| env_error("MADRASSA_API_URL"))?;
        let api_token = env::var("MADRASSA_API_TOKEN").ok().filter(|t| !t.is_empty());
        let redis_url = env::var("MADRASSA_REDIS_URL").ok().filter(|u| !u.is_empty());
        let timezone =
            env::var("MADRASSA_TIMEZONE").unwrap_or_else(|_| String::from(DEFAULT_TIMEZONE));
        let locale = env::var("MADRASSA_LOCALE").unwrap_or_else(|_| String::from(DEFAULT_LOCALE));

        let cache_config_path = default_cache_config_path();
        let mut cached_resources = Self::default_cached_resources();
        if let Ok(content) = fs::read_to_string(&cache_config_path) {
            // Merge with defaults
            for (key, value) in toml::from_str::<HashMap<String, bool>>(&content)? {
                cached_resources.insert(key, value);
            }
        }

        let config = Config {
            api_url,
            api_token,
            redis_url,
            timezone,
            locale,
            cached_resources,
            cache_config_path,
        };
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration for the given API URL with every other value defaulted
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_token: None,
            redis_url: None,
            timezone: DEFAULT_TIMEZONE.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            cached_resources: Self::default_cached_resources(),
            cache_config_path: default_cache_config_path(),
        }
    }

    fn default_cached_resources() -> HashMap<String, bool> {
        DEFAULT_CACHED_RESOURCES
            .iter()
            .map(|name| (name.to_string(), true))
            .collect()
    }

    fn validate(&self) -> AppResult<()> {
        if url::Url::parse(&self.api_url).is_err() {
            return Err(config_error(&format!("Invalid API URL: {}", self.api_url)));
        }
        self.tz()?;
        Ok(())
    }

    /// Parsed time zone
    pub fn tz(&self) -> AppResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Invalid timezone: {}", self.timezone)))
    }

    /// Check if a resource list is mirrored into the fallback cache
    pub fn is_cached(&self, resource: &str) -> bool {
        *self.cached_resources.get(resource).unwrap_or(&false)
    }

    /// Update the cache toggle for a resource and persist the toggles
    pub fn set_cached(&mut self, resource: &str, enabled: bool) -> AppResult<()> {
        self.cached_resources.insert(resource.to_string(), enabled);
        self.save_cache_toggles()
    }

    fn save_cache_toggles(&self) -> AppResult<()> {
        // Create config directory if it doesn't exist
        if let Some(dir) = self.cache_config_path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let toml_str = toml::to_string(&self.cached_resources)
            .map_err(|e| config_error(&e.to_string()))?;
        fs::write(&self.cache_config_path, toml_str)?;

        Ok(())
    }
}
