//! Configuration management for the catalog pages server.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Values are collected once into a [`Settings`]
//! object that is handed to the components that need it.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory, then one in the working directory
//! 3. Application defaults (where applicable)

use std::{env, fmt, net::SocketAddr, path::Path, path::PathBuf, str::FromStr, time::Duration};

use reqwest::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_ARTIST_ID: &str = "3IW7ScrzXmPvZhB27hmfgy";
pub const DEFAULT_TRACK_ID: &str = "0EzNyXyU7gHzj2TN8qYThj";
pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Loads environment variables from `.env` files.
///
/// Looks for the file in the platform-specific local data directory under
/// `tunepage/.env` first, then in the working directory. Missing files are
/// skipped; variables that are already set are never overridden.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/tunepage/.env`
/// - macOS: `~/Library/Application Support/tunepage/.env`
/// - Windows: `%LOCALAPPDATA%/tunepage/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tunepage/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    load_env_file(&path)?;
    load_env_file(Path::new(".env"))
}

/// Loads a single dotenv file if it exists.
pub fn load_env_file(path: &Path) -> Result<(), String> {
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(path)
        .map_err(|e| format!("failed to load {}: {}", path.display(), e))
}

/// Runtime configuration of the server and its upstream client.
#[derive(Clone)]
pub struct Settings {
    pub client_id: String,
    pub client_secret: String,
    pub api_url: String,
    pub token_url: String,
    pub artist_id: String,
    pub track_id: String,
    pub timeout: Duration,
    pub token_cache: bool,
    pub server_addr: SocketAddr,
}

impl Settings {
    /// Reads the settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the settings through an arbitrary key lookup.
    ///
    /// Blank values are treated like unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let timeout_secs = match get("SPOTIFY_API_TIMEOUT_SECS") {
            Some(raw) => parse::<u64>("SPOTIFY_API_TIMEOUT_SECS", raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "SPOTIFY_API_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }

        let token_cache = match get("TOKEN_CACHE") {
            Some(raw) => parse_bool("TOKEN_CACHE", raw)?,
            None => true,
        };

        let server_addr = parse::<SocketAddr>(
            "SERVER_ADDRESS",
            or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
        )?;

        let api_url = url_setting(
            "SPOTIFY_API_URL",
            or_default("SPOTIFY_API_URL", DEFAULT_API_URL),
        )?;
        let token_url = url_setting(
            "SPOTIFY_API_TOKEN_URL",
            or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
        )?;

        Ok(Self {
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            api_url: api_url.trim_end_matches('/').to_string(),
            token_url,
            artist_id: or_default("SPOTIFY_ARTIST_ID", DEFAULT_ARTIST_ID),
            track_id: or_default("SPOTIFY_TRACK_ID", DEFAULT_TRACK_ID),
            timeout: Duration::from_secs(timeout_secs),
            token_cache,
            server_addr,
        })
    }
}

// The client secret must never end up in logs.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("token_url", &self.token_url)
            .field("artist_id", &self.artist_id)
            .field("track_id", &self.track_id)
            .field("timeout", &self.timeout)
            .field("token_cache", &self.token_cache)
            .field("server_addr", &self.server_addr)
            .finish()
    }
}

fn parse<T: FromStr>(name: &'static str, raw: String) -> Result<T, ConfigError> {
    raw.parse::<T>()
        .map_err(|_| ConfigError::Invalid { name, value: raw })
}

// Only absolute http(s) URLs can serve as upstream endpoints.
fn url_setting(name: &'static str, raw: String) -> Result<String, ConfigError> {
    match Url::parse(&raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(raw),
        _ => Err(ConfigError::Invalid { name, value: raw }),
    }
}

fn parse_bool(name: &'static str, raw: String) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { name, value: raw }),
    }
}
