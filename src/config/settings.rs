//! Application settings

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;
use crate::i18n::DEFAULT_LANGUAGE;
use crate::table::DEFAULT_PAGE_SIZE;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Backend base URL, including the `/api` prefix
    pub api_base_url: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Rows per table page
    pub page_size: usize,

    /// Preferred UI language
    pub language: String,

    /// Theme name
    pub theme: String,

    /// Log level
    pub log_level: String,

    /// Log file path
    pub log_file: String,

    /// Company to manage instead of the signed-in user's own
    pub company_id: Option<i64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 15,
            page_size: DEFAULT_PAGE_SIZE.get(),
            language: DEFAULT_LANGUAGE.to_string(),
            theme: "default".to_string(),
            log_level: "info".to_string(),
            log_file: Self::default_log_path().to_string_lossy().to_string(),
            company_id: None,
        }
    }
}

impl Settings {
    /// Load settings from file or create default
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_config_path);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Self = serde_json::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to file
    pub fn save(&self, path: Option<&str>) -> Result<()> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_config_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Page size to use; zero falls back to the default
    pub fn page_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.page_size).unwrap_or_else(|| {
            tracing::warn!(
                "page_size 0 is invalid, using {}",
                DEFAULT_PAGE_SIZE.get()
            );
            DEFAULT_PAGE_SIZE
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Get default config directory
    pub fn config_dir() -> PathBuf {
        ProjectDirs::from("com", "bizcore", "bizcore-tui")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".config")
                    .join("bizcore-tui")
            })
    }

    /// Get default config file path
    pub fn default_config_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    /// Get default log file path
    pub fn default_log_path() -> PathBuf {
        Self::config_dir().join("bizcore-tui.log")
    }
}
