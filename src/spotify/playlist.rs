use std::sync::Arc;

use crate::{
    Res, converter,
    gql::{GqlClient, PlaylistDetails},
    types::{SpotubeFullPlaylist, SpotubePaginationResponse, SpotubeTrack},
    utils,
};

use super::{DEFAULT_LIMIT, page};

pub struct PlaylistEndpoint {
    client: Arc<dyn GqlClient>,
}

impl PlaylistEndpoint {
    pub fn new(client: Arc<dyn GqlClient>) -> Self {
        Self { client }
    }

    pub async fn get_playlist(&self, id: &str) -> Res<SpotubeFullPlaylist> {
        Ok(converter::full_playlist(self.client.playlist(id).await?))
    }

    /// Local files have no id and cannot be played by the host, so they are
    /// dropped. Pagination counters still describe the upstream page.
    pub async fn tracks(
        &self,
        id: &str,
        offset: Option<u32>,
        limit: Option<u32>,
    ) -> Res<SpotubePaginationResponse<SpotubeTrack>> {
        let data = self
            .client
            .playlist_tracks(id, page(offset, limit, DEFAULT_LIMIT))
            .await?;

        let mut response = converter::paginated(data, |track| track);
        response.items.retain(|track| track.id.is_some());
        Ok(response.map_items(converter::full_track))
    }

    pub async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: Option<&str>,
        public: Option<bool>,
        collaborative: Option<bool>,
    ) -> Res<SpotubeFullPlaylist> {
        let details = PlaylistDetails {
            name: Some(name.to_string()),
            description: description.map(str::to_string),
            public,
            collaborative,
        };
        let playlist = self.client.create_playlist(user_id, details).await?;
        Ok(converter::full_playlist(playlist))
    }

    pub async fn update_playlist(
        &self,
        playlist_id: &str,
        name: Option<&str>,
        description: Option<&str>,
        public: Option<bool>,
        collaborative: Option<bool>,
    ) -> Res<()> {
        let details = PlaylistDetails {
            name: name.map(str::to_string),
            description: description.map(str::to_string),
            public,
            collaborative,
        };
        self.client.update_playlist(playlist_id, details).await
    }

    /// Spotify has no playlist deletion; unfollowing removes it from the library.
    pub async fn delete_playlist(&self, playlist_id: &str) -> Res<()> {
        self.unsave(playlist_id).await
    }

    pub async fn add_tracks(
        &self,
        playlist_id: &str,
        track_ids: &[String],
        position: Option<u32>,
    ) -> Res<()> {
        let uris = track_ids.iter().map(|id| utils::track_uri(id)).collect();
        self.client
            .add_playlist_tracks(playlist_id, uris, position)
            .await
    }

    pub async fn remove_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Res<()> {
        let uris = track_ids.iter().map(|id| utils::track_uri(id)).collect();
        self.client.remove_playlist_tracks(playlist_id, uris).await
    }

    pub async fn save(&self, playlist_id: &str) -> Res<()> {
        self.client.follow_playlist(playlist_id).await
    }

    pub async fn unsave(&self, playlist_id: &str) -> Res<()> {
        self.client.unfollow_playlist(playlist_id).await
    }
}
