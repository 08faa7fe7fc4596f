//! Application configuration for the campaign workspace.
//!
//! User config lives at `~/.campaign/campaign.toml`.
//! CLI flags and a few environment variables override config file values,
//! which override defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CampaignError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "campaign.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".campaign";

/// Environment variable that overrides the server port at serve time.
pub const PORT_ENV: &str = "PORT";

// ---------------------------------------------------------------------------
// Config structs (matching campaign.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP shell settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Document ingestion settings.
    #[serde(default)]
    pub ingest: IngestSettings,

    /// Persistence sink settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Agent catalog settings.
    #[serde(default)]
    pub agents: AgentsConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port (the `PORT` env var takes precedence).
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS origins; `"*"` allows any.
    #[serde(default = "default_allow_origins")]
    pub allow_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allow_origins: default_allow_origins(),
        }
    }
}

impl ServerConfig {
    /// Resolve the port, preferring a valid `PORT` value when one is given.
    pub fn resolve_port(&self, env_port: Option<&str>) -> u16 {
        match env_port.map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => match raw.parse::<u16>() {
                Ok(port) => port,
                Err(_) => {
                    tracing::warn!(value = raw, "ignoring invalid {PORT_ENV} value");
                    self.port
                }
            },
            None => self.port,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8000
}
fn default_allow_origins() -> Vec<String> {
    vec!["*".into()]
}

/// `[ingest]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestSettings {
    /// User-Agent sent with every document fetch.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout. Unset means the transport default (no timeout).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

fn default_user_agent() -> String {
    concat!("campaign-agents/", env!("CARGO_PKG_VERSION")).into()
}

/// `[storage]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the libSQL database file. A leading `~/` expands to the home dir.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

impl StorageConfig {
    /// The database path with `~/` expanded.
    pub fn resolved_path(&self) -> Result<PathBuf> {
        expand_home(&self.database_path)
    }
}

fn default_database_path() -> String {
    format!("~/{CONFIG_DIR_NAME}/campaign.db")
}

/// `[agents]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentsConfig {
    /// Model identifier assigned to every agent in the catalog.
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.0-flash-exp".into()
}

// ---------------------------------------------------------------------------
// Ingest config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime ingestion configuration.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// User-Agent header value.
    pub user_agent: String,
    /// Optional request timeout; `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for IngestConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.ingest.user_agent.clone(),
            timeout: config.ingest.timeout_secs.map(Duration::from_secs),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.campaign/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CampaignError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.campaign/campaign.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| CampaignError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        CampaignError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| CampaignError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| CampaignError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| CampaignError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Expand a leading `~/` to the user's home directory.
fn expand_home(raw: &str) -> Result<PathBuf> {
    match raw.strip_prefix("~/") {
        Some(rest) => {
            let home = dirs::home_dir()
                .ok_or_else(|| CampaignError::config("could not determine home directory"))?;
            Ok(home.join(rest))
        }
        None => Ok(PathBuf::from(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("database_path"));
        assert!(toml_str.contains("gemini-2.0-flash-exp"));
        // unset timeout stays out of the file
        assert!(!toml_str.contains("timeout_secs"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.server.port, 8000);
        assert_eq!(parsed.server.host, "0.0.0.0");
        assert_eq!(parsed.server.allow_origins, vec!["*".to_string()]);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[ingest]
timeout_secs = 45

[agents]
model = "gemini-1.5-pro"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.ingest.timeout_secs, Some(45));
        assert_eq!(config.agents.model, "gemini-1.5-pro");
        assert_eq!(config.server.port, 8000);
        assert!(config.ingest.user_agent.starts_with("campaign-agents/"));
    }

    #[test]
    fn ingest_config_from_app_config() {
        let mut app = AppConfig::default();
        assert!(IngestConfig::from(&app).timeout.is_none());

        app.ingest.timeout_secs = Some(30);
        let ingest = IngestConfig::from(&app);
        assert_eq!(ingest.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn port_env_override() {
        let server = ServerConfig::default();
        assert_eq!(server.resolve_port(None), 8000);
        assert_eq!(server.resolve_port(Some("8080")), 8080);
        assert_eq!(server.resolve_port(Some(" 9999 ")), 9999);
        assert_eq!(server.resolve_port(Some("")), 8000);
        assert_eq!(server.resolve_port(Some("not-a-port")), 8000);
    }

    #[test]
    fn database_path_expansion() {
        let storage = StorageConfig {
            database_path: "/var/lib/campaign/campaign.db".into(),
        };
        assert_eq!(
            storage.resolved_path().unwrap(),
            PathBuf::from("/var/lib/campaign/campaign.db")
        );

        let default = StorageConfig::default().resolved_path().unwrap();
        assert!(default.ends_with(".campaign/campaign.db"));
    }
}
