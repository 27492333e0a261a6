use serde::{Deserialize, Serialize};

/// Discriminant carried by every host object as `typeName`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeName {
    Track,
    AlbumFull,
    AlbumSimple,
    ArtistFull,
    ArtistSimple,
    User,
    PlaylistFull,
    PlaylistSimple,
    Image,
    BrowseSection,
    SearchResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotubeImage {
    pub type_name: TypeName,
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotubeTrack {
    pub type_name: TypeName,
    pub id: String,
    pub name: String,
    pub external_uri: String,
    pub explicit: bool,
    pub duration_ms: u64,
    pub isrc: String,
    pub artists: Vec<SpotubeSimpleArtist>,
    pub album: SpotubeSimpleAlbum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotubeFullAlbum {
    pub type_name: TypeName,
    pub id: String,
    pub name: String,
    pub external_uri: String,
    pub release_date: String,
    pub total_tracks: u32,
    pub artists: Vec<SpotubeSimpleArtist>,
    pub images: Vec<SpotubeImage>,
    pub album_type: String,
    pub record_label: Option<String>,
    pub genres: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotubeSimpleAlbum {
    pub type_name: TypeName,
    pub id: String,
    pub name: String,
    pub external_uri: String,
    pub release_date: Option<String>,
    pub artists: Vec<SpotubeSimpleArtist>,
    pub images: Vec<SpotubeImage>,
    pub album_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotubeFullArtist {
    pub type_name: TypeName,
    pub id: String,
    pub name: String,
    pub external_uri: String,
    pub images: Vec<SpotubeImage>,
    pub genres: Option<Vec<String>>,
    pub followers: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotubeSimpleArtist {
    pub type_name: TypeName,
    pub id: String,
    pub name: String,
    pub external_uri: String,
    pub images: Option<Vec<SpotubeImage>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotubeUser {
    pub type_name: TypeName,
    pub id: String,
    pub name: String,
    pub images: Vec<SpotubeImage>,
    pub external_uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotubeSimplePlaylist {
    pub type_name: TypeName,
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub images: Vec<SpotubeImage>,
    pub external_uri: String,
    pub owner: SpotubeUser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotubeFullPlaylist {
    pub type_name: TypeName,
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub images: Vec<SpotubeImage>,
    pub external_uri: String,
    pub owner: SpotubeUser,
    pub collaborators: Vec<SpotubeUser>,
    pub collaborative: bool,
    pub public: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotubePaginationResponse<T> {
    pub limit: u32,
    pub next_offset: Option<u32>,
    pub has_more: bool,
    pub total: u32,
    pub items: Vec<T>,
}

impl<T> SpotubePaginationResponse<T> {
    /// Converts the items, keeping the pagination metadata untouched.
    pub fn map_items<R>(self, f: impl FnMut(T) -> R) -> SpotubePaginationResponse<R> {
        SpotubePaginationResponse {
            limit: self.limit,
            next_offset: self.next_offset,
            has_more: self.has_more,
            total: self.total,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// An entry of a browse section; the wrapped object carries its own `typeName`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BrowseSectionItem {
    Playlist(SpotubeSimplePlaylist),
    Album(SpotubeSimpleAlbum),
    Artist(SpotubeFullArtist),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotubeBrowseSection {
    pub type_name: TypeName,
    pub id: String,
    pub title: String,
    pub external_uri: String,
    pub browse_more: bool,
    pub items: Vec<BrowseSectionItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotubeSearchResponse {
    pub type_name: TypeName,
    pub artists: Vec<SpotubeFullArtist>,
    pub albums: Vec<SpotubeSimpleAlbum>,
    pub tracks: Vec<SpotubeTrack>,
    pub playlists: Vec<SpotubeSimplePlaylist>,
}

/// The host's view of the installed plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginConfiguration {
    pub name: String,
    pub description: String,
    pub version: String,
    pub author: String,
    pub entry_point: String,
    pub plugin_api_version: String,
    pub repository: Option<String>,
}

impl PluginConfiguration {
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginUpdateAvailable {
    pub download_url: String,
    pub version: String,
    pub changelog: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScrobbleDetails {
    pub id: String,
    pub title: String,
    pub artists: Vec<String>,
    pub album: String,
    pub timestamp: Option<i64>,
    pub duration_ms: Option<u64>,
    pub isrc: Option<String>,
}
