use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::form::{DEFAULT_FROM_CURRENCY, DEFAULT_TO_CURRENCY};

pub const DEFAULT_API_BASE_URL: &str = "https://interview.switcheo.com";
pub const DEFAULT_PRICES_PATH: &str = "/prices.json";
pub const DEFAULT_ICON_BASE_URL: &str =
    "https://raw.githubusercontent.com/Switcheo/token-icons/main/tokens/";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub prices_path: String,
    pub icon_base_url: String,
    pub request_timeout_secs: u64,
    pub submit_delay_ms: u64,
    pub default_from_currency: String,
    pub default_to_currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            prices_path: DEFAULT_PRICES_PATH.to_string(),
            icon_base_url: DEFAULT_ICON_BASE_URL.to_string(),
            request_timeout_secs: 10,
            submit_delay_ms: 2000,
            default_from_currency: DEFAULT_FROM_CURRENCY.to_string(),
            default_to_currency: DEFAULT_TO_CURRENCY.to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_yaml(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace base URLs with values supplied on the command line or environment.
    pub fn with_overrides(
        mut self,
        api_base_url: Option<String>,
        icon_base_url: Option<String>,
    ) -> Result<Self> {
        if let Some(url) = api_base_url {
            self.api_base_url = url;
        }
        if let Some(url) = icon_base_url {
            self.icon_base_url = url;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        for (key, url) in [
            ("api_base_url", &self.api_base_url),
            ("icon_base_url", &self.icon_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!("{} must be an http(s) URL, got '{}'", key, url);
            }
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }
        if self.default_from_currency.is_empty() || self.default_to_currency.is_empty() {
            anyhow::bail!("default_from_currency and default_to_currency must be set");
        }
        if self.default_from_currency == self.default_to_currency {
            anyhow::bail!(
                "default_from_currency and default_to_currency are both '{}'",
                self.default_from_currency
            );
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}
