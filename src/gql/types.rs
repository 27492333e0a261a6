//! Objects returned by the upstream GraphQL client.
//!
//! The client unifies Spotify's full and simplified variants into one struct
//! per entity, so fields only present on one variant are optional here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GqlImage {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalIds {
    #[serde(default)]
    pub isrc: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Followers {
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GqlArtist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_urls: Option<ExternalUrls>,
    #[serde(default)]
    pub images: Option<Vec<GqlImage>>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub followers: Option<Followers>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GqlAlbum {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_urls: Option<ExternalUrls>,
    #[serde(default)]
    pub artists: Vec<GqlArtist>,
    #[serde(default)]
    pub images: Vec<GqlImage>,
    #[serde(default)]
    pub album_type: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub total_tracks: Option<u32>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GqlTrack {
    /// `None` for local files, which the host cannot play.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub external_urls: Option<ExternalUrls>,
    #[serde(default)]
    pub explicit: Option<bool>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub external_ids: Option<ExternalIds>,
    #[serde(default)]
    pub artists: Vec<GqlArtist>,
    pub album: GqlAlbum,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GqlUser {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub external_urls: Option<ExternalUrls>,
    #[serde(default)]
    pub images: Option<Vec<GqlImage>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GqlPlaylist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<GqlImage>,
    #[serde(default)]
    pub external_urls: Option<ExternalUrls>,
    pub owner: GqlUser,
    #[serde(default)]
    pub collaborative: Option<bool>,
    #[serde(default)]
    pub public: Option<bool>,
}

/// A page of upstream results. Some calls return plain lists wrapped without
/// pagination metadata, hence the optional counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GqlPage<T> {
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    pub items: Vec<T>,
}

impl<T> GqlPage<T> {
    pub fn new(total: u32, offset: u32, limit: u32, items: Vec<T>) -> Self {
        Self {
            total: Some(total),
            offset: Some(offset),
            limit: Some(limit),
            items,
        }
    }

    /// A page without pagination metadata.
    pub fn unpaged(items: Vec<T>) -> Self {
        Self {
            total: None,
            offset: None,
            limit: None,
            items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "objectType")]
pub enum GqlBrowseItem {
    Playlist(GqlPlaylist),
    Album(GqlAlbum),
    Artist(GqlArtist),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GqlBrowseSection {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub items: Vec<GqlBrowseItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GqlSearchAll {
    #[serde(default)]
    pub artists: Vec<GqlArtist>,
    #[serde(default)]
    pub albums: Vec<GqlAlbum>,
    #[serde(default)]
    pub tracks: Vec<GqlTrack>,
    #[serde(default)]
    pub playlists: Vec<GqlPlaylist>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub offset: u32,
    pub limit: u32,
}

impl PageParams {
    pub fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }
}

/// Parameters of the personalized home feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeParams {
    pub time_zone: String,
    pub sp_t_cookie: Option<String>,
    pub offset: u32,
    pub limit: u32,
}

/// Editable playlist attributes; `None` leaves the attribute untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistDetails {
    pub name: Option<String>,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub collaborative: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryItemType {
    Album,
    Artist,
}
