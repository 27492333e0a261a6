use std::sync::Arc;

use tracing::debug;

use crate::{
    Res, converter,
    gql::{GqlClient, PageParams},
    types::SpotubeTrack,
};

const RADIO_SEARCH_LIMIT: u32 = 20;
const RADIO_TRACK_LIMIT: u32 = 50;

pub struct TrackEndpoint {
    client: Arc<dyn GqlClient>,
}

impl TrackEndpoint {
    pub fn new(client: Arc<dyn GqlClient>) -> Self {
        Self { client }
    }

    pub async fn get_track(&self, id: &str) -> Res<SpotubeTrack> {
        Ok(converter::full_track(self.client.track(id).await?))
    }

    pub async fn save(&self, track_ids: &[String]) -> Res<()> {
        self.client.save_tracks(track_ids).await
    }

    pub async fn unsave(&self, track_ids: &[String]) -> Res<()> {
        self.client.unsave_tracks(track_ids).await
    }

    /// Tracks of Spotify's generated "<name> Radio" playlist for the track,
    /// or nothing when no playlist with exactly that name is found.
    pub async fn radio(&self, track_id: &str) -> Res<Vec<SpotubeTrack>> {
        let track = self.client.track(track_id).await?;
        let query = format!("{} Radio", track.name);

        let candidates = self
            .client
            .search_playlists(&query, PageParams::new(0, RADIO_SEARCH_LIMIT))
            .await?;
        let Some(radio) = candidates.items.into_iter().find(|p| p.name == query) else {
            debug!(query = %query, "No radio playlist found");
            return Ok(Vec::new());
        };

        let tracks = self
            .client
            .playlist_tracks(&radio.id, PageParams::new(0, RADIO_TRACK_LIMIT))
            .await?;
        Ok(tracks.items.into_iter().map(converter::full_track).collect())
    }
}
