use std::sync::Arc;

use crate::{
    Res, converter,
    gql::GqlClient,
    types::{
        SpotubeFullAlbum, SpotubeFullArtist, SpotubeFullPlaylist, SpotubePaginationResponse,
        SpotubeSearchResponse, SpotubeTrack,
    },
};

use super::{DEFAULT_LIMIT, page};

/// Number of results per kind in the combined search.
const SEARCH_ALL_LIMIT: u32 = 20;

pub struct SearchEndpoint {
    client: Arc<dyn GqlClient>,
}

impl SearchEndpoint {
    pub fn new(client: Arc<dyn GqlClient>) -> Self {
        Self { client }
    }

    pub fn chips(&self) -> Vec<&'static str> {
        vec!["all", "tracks", "albums", "artists", "playlists"]
    }

    pub async fn all(&self, query: &str) -> Res<SpotubeSearchResponse> {
        let data = self.client.search_all(query, SEARCH_ALL_LIMIT).await?;
        Ok(converter::search_response(data))
    }

    pub async fn albums(
        &self,
        query: &str,
        offset: Option<u32>,
        limit: Option<u32>,
    ) -> Res<SpotubePaginationResponse<SpotubeFullAlbum>> {
        let data = self
            .client
            .search_albums(query, page(offset, limit, DEFAULT_LIMIT))
            .await?;
        Ok(converter::paginated(data, converter::full_album))
    }

    pub async fn artists(
        &self,
        query: &str,
        offset: Option<u32>,
        limit: Option<u32>,
    ) -> Res<SpotubePaginationResponse<SpotubeFullArtist>> {
        let data = self
            .client
            .search_artists(query, page(offset, limit, DEFAULT_LIMIT))
            .await?;
        Ok(converter::paginated(data, converter::full_artist))
    }

    pub async fn tracks(
        &self,
        query: &str,
        offset: Option<u32>,
        limit: Option<u32>,
    ) -> Res<SpotubePaginationResponse<SpotubeTrack>> {
        let data = self
            .client
            .search_tracks(query, page(offset, limit, DEFAULT_LIMIT))
            .await?;
        Ok(converter::paginated(data, converter::full_track))
    }

    pub async fn playlists(
        &self,
        query: &str,
        offset: Option<u32>,
        limit: Option<u32>,
    ) -> Res<SpotubePaginationResponse<SpotubeFullPlaylist>> {
        let data = self
            .client
            .search_playlists(query, page(offset, limit, DEFAULT_LIMIT))
            .await?;
        Ok(converter::paginated(data, converter::full_playlist))
    }
}
