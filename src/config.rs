use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::catalog::{Catalog, Stock, StockBin};
use crate::constants;
use crate::error::ConfigError;

#[derive(Clone, Deserialize)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_llm_base_url")]
    pub base_url: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
}

// The credential must never reach the logs.
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_llm_base_url(),
            model: default_model(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: default_bind_addr() }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AnalyticsConfig {
    pub base_url: String,
    #[serde(default = "default_analytics_timeout")]
    pub timeout_secs: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ChartsConfig {
    #[serde(default = "default_charts_base_url")]
    pub base_url: String,
    pub app_key: Option<String>,
    #[serde(default = "default_palette")]
    pub palette: String,
    #[serde(default = "default_chart_width")]
    pub width: u32,
    #[serde(default = "default_chart_height")]
    pub height: u32,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            base_url: default_charts_base_url(),
            app_key: None,
            palette: default_palette(),
            width: default_chart_width(),
            height: default_chart_height(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default = "default_queue_size")]
    pub llm_queue_size: usize,
    #[serde(default = "default_max_concurrent")]
    pub llm_max_concurrent: usize,

    #[serde(default)]
    pub server: ServerConfig,
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub charts: ChartsConfig,

    pub catalog: Vec<StockBin>,
    pub default_stock_id: Option<u32>,
}

fn default_llm_base_url() -> Option<String> {
    Some(constants::llm::DEFAULT_BASE_URL.to_string())
}
fn default_model() -> String {
    constants::llm::DEFAULT_MODEL.to_string()
}
fn default_bind_addr() -> String {
    constants::server::DEFAULT_BIND_ADDR.to_string()
}
fn default_analytics_timeout() -> u64 {
    10
}
fn default_charts_base_url() -> String {
    constants::charts::DEFAULT_BASE_URL.to_string()
}
fn default_palette() -> String {
    constants::charts::DEFAULT_PALETTE.to_string()
}
fn default_chart_width() -> u32 {
    constants::charts::DEFAULT_WIDTH
}
fn default_chart_height() -> u32 {
    constants::charts::DEFAULT_HEIGHT
}
fn default_queue_size() -> usize {
    32
}
fn default_max_concurrent() -> usize {
    4
}

impl AppConfig {
    /// Load from `$STOCK_PULSE_CONFIG` (or `config.yaml`) and apply
    /// environment overrides for the credential.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(constants::server::CONFIG_PATH_ENV)
            .unwrap_or_else(|_| constants::server::DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        // Strip BOM if present
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let config: AppConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        for var in constants::llm::API_KEY_ENV_VARS {
            if let Ok(key) = std::env::var(var) {
                if !key.trim().is_empty() {
                    self.llm.api_key = Some(key);
                    return;
                }
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.llm_queue_size == 0 {
            return Err(ConfigError::Invalid("llm_queue_size must be > 0".to_string()));
        }
        if self.llm_max_concurrent == 0 {
            return Err(ConfigError::Invalid("llm_max_concurrent must be > 0".to_string()));
        }
        let catalog = self.catalog()?;
        if let Some(id) = self.default_stock_id {
            if catalog.find(id).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "default_stock_id {} is not in the catalog",
                    id
                )));
            }
        }
        Ok(())
    }

    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        Catalog::new(self.catalog.clone())
    }

    /// The stock selected when the dashboard starts
    pub fn initial_stock(&self, catalog: &Catalog) -> Option<Stock> {
        self.default_stock_id
            .and_then(|id| catalog.find(id))
            .or_else(|| catalog.first())
            .cloned()
    }

    /// True when a non-blank credential is configured
    pub fn has_credential(&self) -> bool {
        self.llm
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }
}
