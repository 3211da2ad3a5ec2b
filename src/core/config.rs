//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.chatbox/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatboxConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    pub api_token: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    pub role: Option<String>,
    pub free_form: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ArchiveConfig {
    pub enabled: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
    /// `None` when no non-empty role was given anywhere.
    pub role: Option<String>,
    pub free_form: bool,
    pub archive_enabled: bool,
}

/// Values that came from CLI flags (`None`/`false` = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub role: Option<String>,
    pub base_url: Option<String>,
    pub free_form: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.chatbox`.
pub fn chatbox_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".chatbox"))
}

/// Returns the path to `~/.chatbox/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    chatbox_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.chatbox/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ChatboxConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ChatboxConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(ChatboxConfig::default());
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ChatboxConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ChatboxConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ChatboxConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# chatbox configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# base_url = "http://localhost:5000"   # Or set CHATBOX_BASE_URL
# api_token = "..."                    # Or set CHATBOX_API_TOKEN
# timeout_secs = 30

# [session]
# role = "student"                     # Or set CHATBOX_ROLE, or pass --role
# free_form = false                    # Start with guided collection complete

# [archive]
# enabled = true                       # Save transcripts to ~/.chatbox/transcripts/
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_TEMPLATE) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ChatboxConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("CHATBOX_BASE_URL").ok())
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // API token: env → config
    let api_token = std::env::var("CHATBOX_API_TOKEN")
        .ok()
        .or_else(|| config.server.api_token.clone())
        .filter(|t| !t.is_empty());

    // Role: CLI → env → config. Empty strings count as "no role".
    let role = cli
        .role
        .clone()
        .or_else(|| std::env::var("CHATBOX_ROLE").ok())
        .or_else(|| config.session.role.clone())
        .filter(|r| !r.is_empty());

    ResolvedConfig {
        base_url,
        api_token,
        timeout: Duration::from_secs(
            config.server.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        ),
        role,
        free_form: cli.free_form || config.session.free_form.unwrap_or(false),
        archive_enabled: config.archive.enabled.unwrap_or(true),
    }
}
