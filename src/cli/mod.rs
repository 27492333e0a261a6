//! # CLI Module
//!
//! Developer harness around the plugin. The host runtime normally drives the
//! endpoints; these commands run the same code against native bindings
//! (reqwest, the file system and the system browser) so a session can be
//! created, inspected and refreshed from a terminal.
//!
//! ## Commands
//!
//! - [`login`] - interactive login through the browser
//! - [`logout`] - forget the stored session
//! - [`refresh`] - derive a fresh token from the stored cookies
//! - [`status`] - show the stored session as a table
//! - [`token`] - print the current access token
//! - [`update`] - check the release feed for a newer plugin build
//! - [`support`] - print the support text
//!
//! ## Usage
//!
//! ```bash
//! spotube-spotify auth login
//! spotube-spotify auth status
//! spotube-spotify update --current 0.1.0
//! ```
//!
//! Failures are reported with the crate's colored status macros and end the
//! process with a non-zero exit code.

mod auth;
mod update;

pub use auth::login;
pub use auth::logout;
pub use auth::refresh;
pub use auth::status;
pub use auth::token;
pub use update::support;
pub use update::update;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Res, config::PluginConfig, host::Host, spotify::AuthEndpoint};

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// Auth endpoint over the native bindings, with any stored session restored.
async fn native_auth() -> Res<AuthEndpoint> {
    let config = PluginConfig::from_env();
    let host = Host::native(&config)?;
    let auth = AuthEndpoint::new(&host, config);
    auth.initialize().await;
    Ok(auth)
}
