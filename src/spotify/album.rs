use std::sync::Arc;

use crate::{
    Res, converter,
    gql::GqlClient,
    types::{SpotubeFullAlbum, SpotubePaginationResponse, SpotubeTrack},
};

use super::{DEFAULT_LIMIT, page};

pub struct AlbumEndpoint {
    client: Arc<dyn GqlClient>,
}

impl AlbumEndpoint {
    pub fn new(client: Arc<dyn GqlClient>) -> Self {
        Self { client }
    }

    pub async fn get_album(&self, id: &str) -> Res<SpotubeFullAlbum> {
        Ok(converter::full_album(self.client.album(id).await?))
    }

    pub async fn tracks(
        &self,
        id: &str,
        offset: Option<u32>,
        limit: Option<u32>,
    ) -> Res<SpotubePaginationResponse<SpotubeTrack>> {
        let data = self
            .client
            .album_tracks(id, page(offset, limit, DEFAULT_LIMIT))
            .await?;
        Ok(converter::paginated(data, converter::full_track))
    }

    /// New releases.
    pub async fn releases(
        &self,
        offset: Option<u32>,
        limit: Option<u32>,
    ) -> Res<SpotubePaginationResponse<SpotubeFullAlbum>> {
        let data = self
            .client
            .album_releases(page(offset, limit, DEFAULT_LIMIT))
            .await?;
        Ok(converter::paginated(data, converter::full_album))
    }

    pub async fn save(&self, album_ids: &[String]) -> Res<()> {
        self.client.save_albums(album_ids).await
    }

    pub async fn unsave(&self, album_ids: &[String]) -> Res<()> {
        self.client.unsave_albums(album_ids).await
    }
}
