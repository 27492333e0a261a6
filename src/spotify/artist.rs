use std::sync::Arc;

use crate::{
    Res, converter,
    gql::GqlClient,
    types::{SpotubeFullArtist, SpotubePaginationResponse, SpotubeSimpleAlbum, SpotubeTrack},
};

use super::{DEFAULT_LIMIT, page};

pub struct ArtistEndpoint {
    client: Arc<dyn GqlClient>,
}

impl ArtistEndpoint {
    pub fn new(client: Arc<dyn GqlClient>) -> Self {
        Self { client }
    }

    pub async fn get_artist(&self, id: &str) -> Res<SpotubeFullArtist> {
        Ok(converter::full_artist(self.client.artist(id).await?))
    }

    /// Upstream returns the complete list, so `offset` and `limit` are ignored.
    pub async fn top_tracks(
        &self,
        id: &str,
        _offset: Option<u32>,
        _limit: Option<u32>,
    ) -> Res<SpotubePaginationResponse<SpotubeTrack>> {
        let tracks = self.client.artist_top_tracks(id).await?;
        Ok(converter::fake_paginated(tracks, converter::full_track))
    }

    pub async fn albums(
        &self,
        id: &str,
        offset: Option<u32>,
        limit: Option<u32>,
    ) -> Res<SpotubePaginationResponse<SpotubeSimpleAlbum>> {
        let data = self
            .client
            .artist_albums(id, page(offset, limit, DEFAULT_LIMIT))
            .await?;
        Ok(converter::paginated(data, converter::simple_album))
    }

    /// Follows the artists.
    pub async fn save(&self, artist_ids: &[String]) -> Res<()> {
        self.client.follow_artists(artist_ids).await
    }

    pub async fn unsave(&self, artist_ids: &[String]) -> Res<()> {
        self.client.unfollow_artists(artist_ids).await
    }

    /// Like [`ArtistEndpoint::top_tracks`], a single synthetic page.
    pub async fn related(
        &self,
        id: &str,
        _offset: Option<u32>,
        _limit: Option<u32>,
    ) -> Res<SpotubePaginationResponse<SpotubeFullArtist>> {
        let artists = self.client.related_artists(id).await?;
        Ok(converter::fake_paginated(artists, converter::full_artist))
    }
}
