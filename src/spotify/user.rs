use std::sync::Arc;

use crate::{
    Res, converter,
    gql::{GqlClient, LibraryItemType},
    types::{
        SpotubeFullAlbum, SpotubeFullArtist, SpotubeFullPlaylist, SpotubePaginationResponse,
        SpotubeTrack, SpotubeUser,
    },
};

use super::{DEFAULT_LIMIT, page};

pub struct UserEndpoint {
    client: Arc<dyn GqlClient>,
}

impl UserEndpoint {
    pub fn new(client: Arc<dyn GqlClient>) -> Self {
        Self { client }
    }

    pub async fn me(&self) -> Res<SpotubeUser> {
        Ok(converter::simple_user(self.client.me().await?))
    }

    pub async fn saved_tracks(
        &self,
        offset: Option<u32>,
        limit: Option<u32>,
    ) -> Res<SpotubePaginationResponse<SpotubeTrack>> {
        let data = self
            .client
            .saved_tracks(page(offset, limit, DEFAULT_LIMIT))
            .await?;
        Ok(converter::paginated(data, converter::full_track))
    }

    pub async fn saved_playlists(
        &self,
        offset: Option<u32>,
        limit: Option<u32>,
    ) -> Res<SpotubePaginationResponse<SpotubeFullPlaylist>> {
        let data = self
            .client
            .saved_playlists(page(offset, limit, DEFAULT_LIMIT))
            .await?;
        Ok(converter::paginated(data, converter::full_playlist))
    }

    pub async fn saved_albums(
        &self,
        offset: Option<u32>,
        limit: Option<u32>,
    ) -> Res<SpotubePaginationResponse<SpotubeFullAlbum>> {
        let data = self
            .client
            .saved_albums(page(offset, limit, DEFAULT_LIMIT))
            .await?;
        Ok(converter::paginated(data, converter::full_album))
    }

    pub async fn saved_artists(
        &self,
        offset: Option<u32>,
        limit: Option<u32>,
    ) -> Res<SpotubePaginationResponse<SpotubeFullArtist>> {
        let data = self
            .client
            .saved_artists(page(offset, limit, DEFAULT_LIMIT))
            .await?;
        Ok(converter::paginated(data, converter::full_artist))
    }

    pub async fn is_saved_playlist(&self, playlist_id: &str) -> Res<bool> {
        self.client.is_playlist_saved(playlist_id).await
    }

    pub async fn is_saved_tracks(&self, track_ids: &[String]) -> Res<Vec<bool>> {
        self.client.is_tracks_saved(track_ids).await
    }

    pub async fn is_saved_albums(&self, album_ids: &[String]) -> Res<Vec<bool>> {
        self.client
            .is_in_library(album_ids, LibraryItemType::Album)
            .await
    }

    pub async fn is_saved_artists(&self, artist_ids: &[String]) -> Res<Vec<bool>> {
        self.client
            .is_in_library(artist_ids, LibraryItemType::Artist)
            .await
    }
}
