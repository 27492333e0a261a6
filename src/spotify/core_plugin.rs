use std::sync::Arc;

use semver::Version;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    Error, Res,
    config::PluginConfig,
    host::{HttpClient, HttpRequest},
    types::{PluginConfiguration, PluginUpdateAvailable, ScrobbleDetails},
};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const NO_CHANGELOG: &str = "No changelog available";

pub const SUPPORT_TEXT: &str = "Just use this plugin and I am good. No need for supporting me.

**But support the artists.** \n
Stop feeding megacorp with money. Directly donate to artists or buy their merch or go to their concerts.
The 30% streaming service cut and other e.g. record labels cut is ridiculous.
Artists (only ones directly involved in making the music) deserve 100% of the money you pay for their music.
Not some greedy corporations and stupid middlemen.
";

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
    body: Option<String>,
    #[serde(default)]
    assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Deserialize)]
struct ReleaseAsset {
    name: String,
    browser_download_url: Option<String>,
}

/// Accepts `1.2.3`, ` v1.2.3 ` and `=1.2.3`.
pub fn parse_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('='))
        .unwrap_or(trimmed);
    Version::parse(trimmed).ok()
}

/// Strict semver precedence, build metadata ignored.
pub fn is_newer(candidate: &Version, current: &Version) -> bool {
    (candidate.major, candidate.minor, candidate.patch, &candidate.pre)
        > (current.major, current.minor, current.patch, &current.pre)
}

pub struct CorePlugin {
    http: Arc<dyn HttpClient>,
    release_url: String,
    update_asset: String,
}

impl CorePlugin {
    pub fn new(http: Arc<dyn HttpClient>, config: &PluginConfig) -> Self {
        Self {
            http,
            release_url: config.release_url.clone(),
            update_asset: config.update_asset.clone(),
        }
    }

    /// Compares the running plugin against the latest published release.
    pub async fn check_update(
        &self,
        plugin_config: &PluginConfiguration,
    ) -> Res<Option<PluginUpdateAvailable>> {
        let current = parse_version(&plugin_config.version).ok_or_else(|| {
            Error::Version("Invalid version format in current plugin configuration.".to_string())
        })?;

        let request = HttpRequest::get(&self.release_url).header("Accept", GITHUB_ACCEPT);
        let release: Release = self.http.send(request).await?.error_for_status()?.json()?;

        let latest = parse_version(&release.tag_name).ok_or_else(|| {
            Error::Version(format!(
                "Invalid version format from GitHub API. Expected format: <major>.<minor>.<patch>. Got: {}",
                release.tag_name
            ))
        })?;

        if !is_newer(&latest, &current) {
            debug!(current = %current, latest = %latest, "Plugin is up to date");
            return Ok(None);
        }

        let download_url = release
            .assets
            .into_iter()
            .find(|asset| asset.name == self.update_asset)
            .and_then(|asset| asset.browser_download_url)
            .ok_or(Error::MissingUpdateAsset)?;

        info!(current = %current, latest = %latest, "Plugin update available");
        Ok(Some(PluginUpdateAvailable {
            download_url,
            version: release.tag_name,
            changelog: release.body.unwrap_or_else(|| NO_CHANGELOG.to_string()),
        }))
    }

    /// Scrobbling is left to the host's own scrobblers.
    pub async fn scrobble(&self, details: &ScrobbleDetails) -> Res<()> {
        debug!(track = %details.id, "Ignoring scrobble");
        Ok(())
    }

    pub fn support(&self) -> &'static str {
        SUPPORT_TEXT
    }
}
