//! Configuration management for the Spotify metadata provider.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Every value has a built-in default matching the
//! production endpoints, so an empty environment yields a working plugin.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults

use std::{env, path::PathBuf};

use crate::Res;

/// Application directory name under the platform data directory
pub const APP_NAME: &str = "spotube-plugin-spotify";

/// Storage key holding the serialized credentials
pub const CREDENTIALS_KEY: &str = "credentials";

const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com/";
const DEFAULT_NUANCE_URL: &str =
    "https://codeberg.org/sonic-liberation/blubber-junkyard-elitism/raw/branch/main/nuances.json";
const DEFAULT_SERVER_TIME_URL: &str = "https://open.spotify.com/api/server-time";
const DEFAULT_TOKEN_URL: &str = "https://open.spotify.com/api/token";
const DEFAULT_RELEASE_URL: &str =
    "https://api.github.com/repos/sonic-liberation/spotube-plugin-spotify/releases/latest";
const DEFAULT_UPDATE_ASSET: &str = "plugin.smplug";
const DEFAULT_TIMEZONE: &str = "UTC";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory structure if it doesn't exist. A missing `.env` file
/// is fine: every setting has a default.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotube-plugin-spotify/.env`
/// - macOS: `~/Library/Application Support/spotube-plugin-spotify/.env`
/// - Windows: `%LOCALAPPDATA%/spotube-plugin-spotify/.env`
///
/// # Errors
///
/// Fails if the directory cannot be created or an existing `.env` file
/// cannot be parsed.
pub async fn load_env() -> Res<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)
            .map_err(|e| crate::Error::Io(std::io::Error::other(e.to_string())))?;
    }
    Ok(())
}

/// Platform local data directory for the plugin.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_NAME);
    path
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Spotify accounts page the login web view starts on (`SPOTIFY_ACCOUNTS_URL`).
pub fn accounts_url() -> String {
    var_or("SPOTIFY_ACCOUNTS_URL", DEFAULT_ACCOUNTS_URL)
}

/// Feed of rotating TOTP secrets (`SPOTIFY_NUANCE_URL`).
pub fn nuance_url() -> String {
    var_or("SPOTIFY_NUANCE_URL", DEFAULT_NUANCE_URL)
}

/// Spotify server time endpoint (`SPOTIFY_SERVER_TIME_URL`).
pub fn server_time_url() -> String {
    var_or("SPOTIFY_SERVER_TIME_URL", DEFAULT_SERVER_TIME_URL)
}

/// Web player token endpoint (`SPOTIFY_TOKEN_URL`).
pub fn token_url() -> String {
    var_or("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Latest-release feed of the plugin (`SPOTIFY_PLUGIN_RELEASE_URL`).
pub fn release_url() -> String {
    var_or("SPOTIFY_PLUGIN_RELEASE_URL", DEFAULT_RELEASE_URL)
}

/// Release asset holding the plugin bundle (`SPOTIFY_PLUGIN_UPDATE_ASSET`).
pub fn update_asset() -> String {
    var_or("SPOTIFY_PLUGIN_UPDATE_ASSET", DEFAULT_UPDATE_ASSET)
}

/// Directory of the native key/value store (`SPOTIFY_PLUGIN_STORAGE_DIR`).
pub fn storage_dir() -> PathBuf {
    match env::var("SPOTIFY_PLUGIN_STORAGE_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => data_dir().join("storage"),
    }
}

/// IANA time zone reported to the home feed (`SPOTIFY_PLUGIN_TIMEZONE`, then `TZ`).
pub fn timezone() -> String {
    env::var("SPOTIFY_PLUGIN_TIMEZONE")
        .or_else(|_| env::var("TZ"))
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string())
}

/// Resolved endpoint configuration handed to the auth and core endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConfig {
    pub accounts_url: String,
    pub nuance_url: String,
    pub server_time_url: String,
    pub token_url: String,
    pub release_url: String,
    pub update_asset: String,
    pub storage_dir: PathBuf,
    pub timezone: String,
}

impl PluginConfig {
    pub fn from_env() -> Self {
        Self {
            accounts_url: accounts_url(),
            nuance_url: nuance_url(),
            server_time_url: server_time_url(),
            token_url: token_url(),
            release_url: release_url(),
            update_asset: update_asset(),
            storage_dir: storage_dir(),
            timezone: timezone(),
        }
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            accounts_url: DEFAULT_ACCOUNTS_URL.to_string(),
            nuance_url: DEFAULT_NUANCE_URL.to_string(),
            server_time_url: DEFAULT_SERVER_TIME_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            release_url: DEFAULT_RELEASE_URL.to_string(),
            update_asset: DEFAULT_UPDATE_ASSET.to_string(),
            storage_dir: data_dir().join("storage"),
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}
