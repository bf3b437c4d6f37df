//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use crate::constants;
use crate::error::{Error, Result};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Directory holding saved decks and share records
    pub data_dir: PathBuf,
    /// Autoplay scheduler period
    pub tick_period: Duration,
    /// How long a share link stays resolvable
    pub share_retention_days: i64,
    /// Base URL share ids are appended to
    pub share_base_url: String,
    /// Generative-language API key for the assistant
    pub assistant_api_key: String,
    /// Assistant model name
    pub assistant_model: String,
    /// Optional log file for the terminal front end
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: default_data_dir(),
            tick_period: Duration::from_millis(constants::playback::TICK_PERIOD_MS),
            share_retention_days: constants::share::DEFAULT_RETENTION_DAYS,
            share_base_url: constants::share::DEFAULT_BASE_URL.to_string(),
            assistant_api_key: String::new(),
            assistant_model: constants::assistant::DEFAULT_MODEL.to_string(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(dir) = env::var("WRAPDECK_DATA_DIR") {
            config.data_dir = expand(&dir);
        }

        if let Ok(ms) = env::var("WRAPDECK_TICK_MS") {
            let ms = ms.parse::<u64>().map_err(|_| {
                Error::config(format!("WRAPDECK_TICK_MS={ms} is not a number"), "Use a period in milliseconds, e.g. 50")
            })?;
            if ms == 0 {
                return Err(Error::config("WRAPDECK_TICK_MS must be positive", "Use a period in milliseconds, e.g. 50"));
            }
            config.tick_period = Duration::from_millis(ms);
        }

        if let Ok(days) = env::var("WRAPDECK_SHARE_RETENTION_DAYS") {
            if let Ok(days) = days.parse::<i64>() {
                config.share_retention_days = days.max(1);
            }
        }

        if let Ok(url) = env::var("WRAPDECK_SHARE_BASE_URL") {
            config.share_base_url = url.trim_end_matches('/').to_string();
        }

        if let Ok(key) = env::var("GEMINI_API_KEY") {
            config.assistant_api_key = key;
        }

        if let Ok(model) = env::var("WRAPDECK_ASSISTANT_MODEL") {
            if !model.trim().is_empty() {
                config.assistant_model = model;
            }
        }

        config.log_file = env::var("WRAPDECK_LOG").ok().map(|p| expand(&p));

        Ok(config)
    }

    /// Check if the assistant is configured
    pub fn has_assistant_credentials(&self) -> bool {
        !self.assistant_api_key.is_empty()
    }

    /// Build the public link for a share id.
    pub fn share_link(&self, share_id: &crate::types::ShareId) -> String {
        format!("{}/{}", self.share_base_url, share_id)
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

/// Default location for saved decks
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("wrapdeck"))
        .unwrap_or_else(|| PathBuf::from(".wrapdeck"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShareId;

    #[test]
    fn defaults_follow_constants() {
        let config = Config::default();
        assert_eq!(config.tick_period, Duration::from_millis(50));
        assert_eq!(config.share_retention_days, 28);
        assert!(!config.has_assistant_credentials());
        assert_eq!(config.app_name(), "wrapdeck");
    }

    #[test]
    fn share_link_appends_id() {
        let mut config = Config::default();
        config.share_base_url = "https://example.test/view".to_string();
        let link = config.share_link(&ShareId::new("abc"));
        assert_eq!(link, "https://example.test/view/abc");
    }
}
