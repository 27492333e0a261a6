use std::sync::Arc;

use crate::{
    config::PluginConfig,
    error, info,
    host::ReqwestHttpClient,
    spotify::{CorePlugin, core_plugin::SUPPORT_TEXT},
    success,
    types::PluginConfiguration,
};

use super::spinner;

/// Checks the release feed; `current` defaults to this build's version.
pub async fn update(current: Option<String>) {
    let config = PluginConfig::from_env();
    let http = match ReqwestHttpClient::new() {
        Ok(http) => http,
        Err(e) => error!("Cannot create HTTP client. Err: {}", e),
    };
    let core = CorePlugin::new(Arc::new(http), &config);

    let version = current.unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    let plugin = PluginConfiguration::with_version(version.clone());

    let pb = spinner("Checking for plugin updates...");
    let result = core.check_update(&plugin).await;
    pb.finish_and_clear();

    match result {
        Ok(Some(update)) => {
            success!("Version {} is available (running {})", update.version, version);
            info!("Download: {}", update.download_url);
            println!();
            println!("{}", update.changelog);
        }
        Ok(None) => info!("Version {} is up to date", version),
        Err(e) => error!("Update check failed. Err: {}", e),
    }
}

pub fn support() {
    print!("{SUPPORT_TEXT}");
}
