use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::paths::PathManager;

/// Top-level service configuration, loaded from a TOML file and then
/// overlaid with environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    // Channel sections are optional: a missing section disables the
    // live integration and the service falls back where §6 allows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostaway: Option<HostawayConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google: Option<GoogleConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approvals: Option<ApprovalsConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostawayConfig {
    // Hostaway account id, doubles as the OAuth client_id
    #[serde(default)]
    pub account_id: String,

    // API key, doubles as the OAuth client_secret
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_hostaway_base_url")]
    pub base_url: String,

    // Rows fetched per page when walking the review listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
}

impl Default for HostawayConfig {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            api_key: String::new(),
            base_url: default_hostaway_base_url(),
            page_size: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    #[serde(default)]
    pub api_key: String,

    // Place served when a request does not name one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,

    #[serde(default = "default_google_base_url")]
    pub base_url: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            place_id: None,
            base_url: default_google_base_url(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApprovalsConfig {
    // Path of the JSON approvals file. When the section is present but
    // the path is not, the platform data directory is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_hostaway_base_url() -> String {
    "https://api.hostaway.com/v1".to_string()
}

fn default_google_base_url() -> String {
    "https://maps.googleapis.com/maps/api/place".to_string()
}

impl Config {
    /// Load configuration from an explicit path, or from the platform
    /// config directory when none is given, then apply environment
    /// overrides. A missing default file yields the built-in defaults;
    /// a missing explicit file is an error.
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => {
                let default_path = PathManager::default().config_file();
                if default_path.exists() {
                    Self::load_from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Environment variables beat file values so containers can inject
    /// credentials without baking them into an image.
    pub fn apply_env_overrides(&mut self) {
        if let Some(account_id) = env_var("HOSTAWAY_ACCOUNT_ID") {
            self.hostaway.get_or_insert_with(HostawayConfig::default).account_id = account_id;
        }
        if let Some(api_key) = env_var("HOSTAWAY_API_KEY") {
            self.hostaway.get_or_insert_with(HostawayConfig::default).api_key = api_key;
        }
        if let Some(api_key) = env_var("GOOGLE_API_KEY") {
            self.google.get_or_insert_with(GoogleConfig::default).api_key = api_key;
        }
        if let Some(place_id) = env_var("GOOGLE_PLACE_ID") {
            self.google.get_or_insert_with(GoogleConfig::default).place_id = Some(place_id);
        }
        if let Some(port) = env_var("STAYDECK_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
    }

    /// Reject half-configured channel sections. Absent sections are
    /// fine; a present section must carry its required fields.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            anyhow::bail!("Server host cannot be empty");
        }

        if let Some(hostaway) = &self.hostaway {
            if hostaway.account_id.is_empty() {
                anyhow::bail!("Hostaway account_id cannot be empty");
            }
            if hostaway.api_key.is_empty() {
                anyhow::bail!("Hostaway api_key cannot be empty");
            }
            if hostaway.base_url.is_empty() {
                anyhow::bail!("Hostaway base_url cannot be empty");
            }
            if let Some(page_size) = hostaway.page_size {
                if page_size < 1 {
                    anyhow::bail!("Hostaway page_size must be at least 1");
                }
            }
        }

        if let Some(google) = &self.google {
            if google.api_key.is_empty() {
                anyhow::bail!("Google api_key cannot be empty");
            }
            if google.base_url.is_empty() {
                anyhow::bail!("Google base_url cannot be empty");
            }
        }

        Ok(())
    }

    pub fn is_hostaway_configured(&self) -> bool {
        self.hostaway
            .as_ref()
            .map(|hostaway| !hostaway.account_id.is_empty() && !hostaway.api_key.is_empty())
            .unwrap_or(false)
    }

    pub fn is_google_configured(&self) -> bool {
        self.google
            .as_ref()
            .map(|google| !google.api_key.is_empty())
            .unwrap_or(false)
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
