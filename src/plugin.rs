use std::sync::Arc;

use tracing::debug;

use crate::{
    config::PluginConfig,
    gql::GqlClient,
    host::Host,
    spotify::{
        AlbumEndpoint, ArtistEndpoint, AuthEndpoint, BrowseEndpoint, CorePlugin, PlaylistEndpoint,
        SearchEndpoint, TrackEndpoint, UserEndpoint,
    },
};

/// Entry point handed to the host runtime.
///
/// Construction wires every endpoint to one GraphQL client and keeps the
/// client's bearer token in sync with the auth session.
pub struct SpotifyMetadataProviderPlugin {
    pub auth: AuthEndpoint,
    pub api: Arc<dyn GqlClient>,
    pub album: AlbumEndpoint,
    pub artist: ArtistEndpoint,
    pub browse: BrowseEndpoint,
    pub playlist: PlaylistEndpoint,
    pub search: SearchEndpoint,
    pub track: TrackEndpoint,
    pub user: UserEndpoint,
    pub core: CorePlugin,
}

impl SpotifyMetadataProviderPlugin {
    /// Builds the plugin and recovers any persisted session.
    pub async fn new(host: Host, api: Arc<dyn GqlClient>, config: PluginConfig) -> Self {
        let auth = AuthEndpoint::new(&host, config.clone());

        let token_sink = Arc::clone(&api);
        auth.on_event(move |event, credentials| {
            debug!(?event, "Updating GraphQL access token");
            token_sink.set_access_token(credentials.map(|c| c.access_token.as_str()));
        });

        let plugin = Self {
            album: AlbumEndpoint::new(Arc::clone(&api)),
            artist: ArtistEndpoint::new(Arc::clone(&api)),
            browse: BrowseEndpoint::new(Arc::clone(&api), auth.clone(), Arc::clone(&host.timezone)),
            playlist: PlaylistEndpoint::new(Arc::clone(&api)),
            search: SearchEndpoint::new(Arc::clone(&api)),
            track: TrackEndpoint::new(Arc::clone(&api)),
            user: UserEndpoint::new(Arc::clone(&api)),
            core: CorePlugin::new(Arc::clone(&host.http), &config),
            auth,
            api,
        };

        plugin.auth.initialize().await;
        plugin
    }
}
