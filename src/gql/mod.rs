//! # Upstream GraphQL Client Contract
//!
//! The plugin does not implement Spotify's private GraphQL API itself; an
//! external client does. This module pins down the calls the endpoints make
//! and the objects they get back, so any client (or a test double) can be
//! plugged in behind `Arc<dyn GqlClient>`.

mod types;

use async_trait::async_trait;

use crate::Res;

pub use types::*;

#[async_trait]
pub trait GqlClient: Send + Sync {
    /// Bearer token used for subsequent calls; `None` clears it.
    fn set_access_token(&self, token: Option<&str>);

    // album
    async fn album(&self, id: &str) -> Res<GqlAlbum>;
    async fn album_tracks(&self, id: &str, page: PageParams) -> Res<GqlPage<GqlTrack>>;
    async fn album_releases(&self, page: PageParams) -> Res<GqlPage<GqlAlbum>>;
    async fn save_albums(&self, ids: &[String]) -> Res<()>;
    async fn unsave_albums(&self, ids: &[String]) -> Res<()>;

    // artist
    async fn artist(&self, id: &str) -> Res<GqlArtist>;
    async fn artist_top_tracks(&self, id: &str) -> Res<Vec<GqlTrack>>;
    async fn artist_albums(&self, id: &str, page: PageParams) -> Res<GqlPage<GqlAlbum>>;
    async fn follow_artists(&self, ids: &[String]) -> Res<()>;
    async fn unfollow_artists(&self, ids: &[String]) -> Res<()>;
    async fn related_artists(&self, id: &str) -> Res<Vec<GqlArtist>>;

    // browse
    async fn browse_home(&self, params: HomeParams) -> Res<Vec<GqlBrowseSection>>;
    async fn browse_home_section(
        &self,
        id: &str,
        params: HomeParams,
    ) -> Res<GqlPage<GqlBrowseItem>>;

    // playlist
    async fn playlist(&self, id: &str) -> Res<GqlPlaylist>;
    async fn playlist_tracks(&self, id: &str, page: PageParams) -> Res<GqlPage<GqlTrack>>;
    async fn create_playlist(&self, user_id: &str, details: PlaylistDetails)
    -> Res<GqlPlaylist>;
    async fn update_playlist(&self, id: &str, details: PlaylistDetails) -> Res<()>;
    async fn add_playlist_tracks(
        &self,
        id: &str,
        uris: Vec<String>,
        position: Option<u32>,
    ) -> Res<()>;
    async fn remove_playlist_tracks(&self, id: &str, uris: Vec<String>) -> Res<()>;
    async fn follow_playlist(&self, id: &str) -> Res<()>;
    async fn unfollow_playlist(&self, id: &str) -> Res<()>;

    // search
    async fn search_all(&self, query: &str, limit: u32) -> Res<GqlSearchAll>;
    async fn search_albums(&self, query: &str, page: PageParams) -> Res<GqlPage<GqlAlbum>>;
    async fn search_artists(&self, query: &str, page: PageParams) -> Res<GqlPage<GqlArtist>>;
    async fn search_tracks(&self, query: &str, page: PageParams) -> Res<GqlPage<GqlTrack>>;
    async fn search_playlists(
        &self,
        query: &str,
        page: PageParams,
    ) -> Res<GqlPage<GqlPlaylist>>;

    // track
    async fn track(&self, id: &str) -> Res<GqlTrack>;
    async fn save_tracks(&self, ids: &[String]) -> Res<()>;
    async fn unsave_tracks(&self, ids: &[String]) -> Res<()>;

    // user
    async fn me(&self) -> Res<GqlUser>;
    async fn saved_tracks(&self, page: PageParams) -> Res<GqlPage<GqlTrack>>;
    async fn saved_playlists(&self, page: PageParams) -> Res<GqlPage<GqlPlaylist>>;
    async fn saved_albums(&self, page: PageParams) -> Res<GqlPage<GqlAlbum>>;
    async fn saved_artists(&self, page: PageParams) -> Res<GqlPage<GqlArtist>>;
    async fn is_playlist_saved(&self, id: &str) -> Res<bool>;
    async fn is_tracks_saved(&self, ids: &[String]) -> Res<Vec<bool>>;
    async fn is_in_library(&self, ids: &[String], item_type: LibraryItemType)
    -> Res<Vec<bool>>;
}
