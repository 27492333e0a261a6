//! Spotify Metadata Provider for Spotube
//!
//! This library adapts the Spotify web player's private GraphQL API to the
//! object schema Spotube expects from a metadata provider plugin. It owns the
//! session lifecycle (cookie capture, TOTP-seeded token issuance, background
//! refresh) and reshapes upstream catalog objects into host objects.
//!
//! # Modules
//!
//! - `cli` - Developer commands driving the auth and core endpoints
//! - `config` - Configuration management and environment variables
//! - `converter` - Upstream → host object mapping and pagination envelopes
//! - `error` - Crate-wide error type
//! - `gql` - Contract of the upstream GraphQL client
//! - `host` - Capabilities the host supplies (HTTP, storage, web view, time zone)
//! - `management` - Persisted credential handling
//! - `plugin` - Plugin entry point composing every endpoint
//! - `spotify` - Auth, core and resource endpoints
//! - `types` - Host schema objects
//! - `utils` - Small helpers shared by endpoints
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use spotube_plugin_spotify::{config::PluginConfig, host::Host, plugin::SpotifyMetadataProviderPlugin};
//!
//! async fn load(api: Arc<dyn spotube_plugin_spotify::gql::GqlClient>) -> spotube_plugin_spotify::Res<()> {
//!     let config = PluginConfig::from_env();
//!     let host = Host::native(&config)?;
//!     let plugin = SpotifyMetadataProviderPlugin::new(host, api, config).await;
//!     println!("authenticated: {}", plugin.auth.is_authenticated());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod gql;
pub mod host;
pub mod management;
pub mod plugin;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::Error;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation in the crate reports an [`Error`], so host
/// bindings can match on the failure kind instead of parsing messages.
///
/// # Example
///
/// ```
/// use spotube_plugin_spotify::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Opening the Spotify login page...");
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Logged in, token valid until {}", expires_at);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for the binary: library code returns [`Error`] instead.
///
/// # Example
///
/// ```
/// error!("Login failed: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Stored session expired, refreshing");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
