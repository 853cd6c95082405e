//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.persona-chat/config.toml`. If missing on first run, a
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
pub struct PersonaChatConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub downloads: DownloadsConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DownloadsConfig {
    pub dir: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

pub const ENV_BASE_URL: &str = "PERSONA_CHAT_BASE_URL";
pub const ENV_DOWNLOAD_DIR: &str = "PERSONA_CHAT_DOWNLOAD_DIR";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    /// `None` means requests never time out.
    pub request_timeout: Option<Duration>,
    pub download_dir: PathBuf,
}

/// Values from CLI flags (None = not specified).
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides<'a> {
    pub base_url: Option<&'a str>,
    pub download_dir: Option<&'a Path>,
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

/// Returns the path to `~/.persona-chat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".persona-chat").join("config.toml"))
}

/// Load config from `~/.persona-chat/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PersonaChatConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<PersonaChatConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(PersonaChatConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(PersonaChatConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<PersonaChatConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Persona Chat Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# base_url = "http://127.0.0.1:8000"    # Or set PERSONA_CHAT_BASE_URL, or --base-url
# request_timeout_secs = 60             # Unset = wait forever

# [downloads]
# dir = "~/Downloads"                   # Or set PERSONA_CHAT_DOWNLOAD_DIR, or --download-dir
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &PersonaChatConfig, cli: CliOverrides<'_>) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &PersonaChatConfig,
    cli: CliOverrides<'_>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .map(str::to_string)
        .or_else(|| env(ENV_BASE_URL))
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Download dir: CLI → env → config → OS download dir → cwd
    let download_dir = cli
        .download_dir
        .map(Path::to_path_buf)
        .or_else(|| env(ENV_DOWNLOAD_DIR).map(|d| expand_home(&d)))
        .or_else(|| config.downloads.dir.as_deref().map(expand_home))
        .or_else(dirs::download_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let request_timeout = config
        .server
        .request_timeout_secs
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    ResolvedConfig {
        base_url,
        request_timeout,
        download_dir,
    }
}

/// Expands a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = PersonaChatConfig::default();
        assert!(config.server.base_url.is_none());
        assert!(config.downloads.dir.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = PersonaChatConfig::default();
        let resolved = resolve_with_env(&config, CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.request_timeout, None);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = PersonaChatConfig {
            server: ServerConfig {
                base_url: Some("http://persona.local:9000".to_string()),
                request_timeout_secs: Some(30),
            },
            downloads: DownloadsConfig {
                dir: Some("/srv/personas".to_string()),
            },
        };
        let resolved = resolve_with_env(&config, CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, "http://persona.local:9000");
        assert_eq!(resolved.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(resolved.download_dir, PathBuf::from("/srv/personas"));
    }

    #[test]
    fn test_env_wins_over_config() {
        let config = PersonaChatConfig {
            server: ServerConfig {
                base_url: Some("http://from-config".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, CliOverrides::default(), |key| {
            (key == ENV_BASE_URL).then(|| "http://from-env".to_string())
        });
        assert_eq!(resolved.base_url, "http://from-env");
    }

    #[test]
    fn test_cli_wins_over_env() {
        let config = PersonaChatConfig::default();
        let cli = CliOverrides {
            base_url: Some("http://from-cli"),
            download_dir: Some(Path::new("/tmp/cli")),
        };
        let resolved = resolve_with_env(&config, cli, |_| Some("http://from-env".to_string()));
        assert_eq!(resolved.base_url, "http://from-cli");
        assert_eq!(resolved.download_dir, PathBuf::from("/tmp/cli"));
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let config = PersonaChatConfig {
            server: ServerConfig {
                request_timeout_secs: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, CliOverrides::default(), no_env);
        assert_eq!(resolved.request_timeout, None);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config = parse_config("[server]\nbase_url = \"http://x:1\"\n").unwrap();
        assert_eq!(config.server.base_url.as_deref(), Some("http://x:1"));
        assert!(config.server.request_timeout_secs.is_none());
        assert!(config.downloads.dir.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = parse_config("[server\nbase_url = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_expand_home_leaves_absolute_paths() {
        assert_eq!(expand_home("/var/tmp"), PathBuf::from("/var/tmp"));
    }
}
