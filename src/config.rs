use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3/coins/markets";

/// CoinGecko caps `per_page` at 250.
const MAX_PER_PAGE: u32 = 250;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    pub vs_currency: String,
    pub per_page: u32,
    pub page: u32,
    pub update_interval_seconds: u64,
    pub top_n: usize,
    pub output_path: String,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            vs_currency: "usd".to_string(),
            per_page: 50,
            page: 1,
            update_interval_seconds: 300,
            top_n: 5,
            output_path: "live_cryptocurrency_data.xlsx".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(ConfigError::Invalid(format!(
                "per_page must be between 1 and {}, got {}",
                MAX_PER_PAGE, self.per_page
            )));
        }
        if self.page == 0 {
            return Err(ConfigError::Invalid("page is 1-based, got 0".into()));
        }
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be at least 1".into()));
        }
        if self.request_timeout_seconds == 0 {
            return Err(ConfigError::Invalid("request_timeout_seconds must be at least 1".into()));
        }
        if self.vs_currency.trim().is_empty() {
            return Err(ConfigError::Invalid("vs_currency is empty".into()));
        }
        Ok(())
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Like `load_config`, but a missing file means "run with defaults".
pub fn load_config_or_default(path: &str) -> Result<AppConfig, ConfigError> {
    if Path::new(path).exists() {
        load_config(path)
    } else {
        Ok(AppConfig::default())
    }
}
