//! Upstream → host object conversion.
//!
//! Every function here is pure. The defaults applied for missing upstream
//! fields are part of the host contract: external URIs fall back to the
//! public web URL of the entity, counters to `0`, and optional collections to
//! `null` or `[]` depending on what the host schema expects.

use crate::{
    gql::{
        GqlAlbum, GqlArtist, GqlBrowseItem, GqlBrowseSection, GqlImage, GqlPage, GqlPlaylist,
        GqlSearchAll, GqlTrack, GqlUser,
    },
    types::{
        BrowseSectionItem, SpotubeBrowseSection, SpotubeFullAlbum, SpotubeFullArtist,
        SpotubeFullPlaylist, SpotubeImage, SpotubePaginationResponse, SpotubeSearchResponse,
        SpotubeSimpleAlbum, SpotubeSimpleArtist, SpotubeSimplePlaylist, SpotubeTrack, SpotubeUser,
        TypeName,
    },
};

const WEB_URL: &str = "https://open.spotify.com";

fn external_uri(explicit: Option<&str>, kind: &str, id: &str) -> String {
    match explicit {
        Some(url) => url.to_string(),
        None => format!("{WEB_URL}/{kind}/{id}"),
    }
}

/// Wraps an upstream page. A page without counters is a single full page.
pub fn paginated<T, R>(page: GqlPage<T>, convert: impl FnMut(T) -> R) -> SpotubePaginationResponse<R> {
    let count = page.items.len() as u32;
    let total = page.total.unwrap_or(count);
    let offset = page.offset.unwrap_or(0);
    let limit = page.limit.unwrap_or(count);
    let has_more = total > offset + count;

    SpotubePaginationResponse {
        limit,
        next_offset: has_more.then_some(offset + limit),
        has_more,
        total,
        items: page.items.into_iter().map(convert).collect(),
    }
}

/// Wraps an already complete list as a single page.
pub fn fake_paginated<T, R>(items: Vec<T>, convert: impl FnMut(T) -> R) -> SpotubePaginationResponse<R> {
    let count = items.len() as u32;
    SpotubePaginationResponse {
        limit: count,
        next_offset: None,
        has_more: false,
        total: count,
        items: items.into_iter().map(convert).collect(),
    }
}

/// `"ep"` is reported as a compilation; a missing type is an album.
pub fn album_type(raw: Option<&str>) -> String {
    match raw {
        Some("ep") => "compilation".to_string(),
        Some(other) => other.to_string(),
        None => "album".to_string(),
    }
}

pub fn image(image: GqlImage) -> SpotubeImage {
    SpotubeImage {
        type_name: TypeName::Image,
        url: image.url,
        width: image.width,
        height: image.height,
    }
}

fn images(list: Vec<GqlImage>) -> Vec<SpotubeImage> {
    list.into_iter().map(image).collect()
}

pub fn full_track(track: GqlTrack) -> SpotubeTrack {
    let id = track.id.unwrap_or_default();
    SpotubeTrack {
        type_name: TypeName::Track,
        external_uri: external_uri(
            track.external_urls.as_ref().and_then(|u| u.spotify.as_deref()),
            "track",
            &id,
        ),
        id,
        name: track.name,
        explicit: track.explicit.unwrap_or(false),
        duration_ms: track.duration_ms.unwrap_or(0),
        isrc: track.external_ids.and_then(|e| e.isrc).unwrap_or_default(),
        artists: track.artists.into_iter().map(simple_artist).collect(),
        album: simple_album(track.album),
    }
}

pub fn full_album(album: GqlAlbum) -> SpotubeFullAlbum {
    SpotubeFullAlbum {
        type_name: TypeName::AlbumFull,
        external_uri: external_uri(
            album.external_urls.as_ref().and_then(|u| u.spotify.as_deref()),
            "album",
            &album.id,
        ),
        id: album.id,
        name: album.name,
        release_date: album.release_date.unwrap_or_default(),
        total_tracks: album.total_tracks.unwrap_or(0),
        artists: album.artists.into_iter().map(simple_artist).collect(),
        images: images(album.images),
        album_type: album_type(album.album_type.as_deref()),
        record_label: album.label,
        genres: album.genres,
    }
}

pub fn simple_album(album: GqlAlbum) -> SpotubeSimpleAlbum {
    SpotubeSimpleAlbum {
        type_name: TypeName::AlbumSimple,
        external_uri: external_uri(
            album.external_urls.as_ref().and_then(|u| u.spotify.as_deref()),
            "album",
            &album.id,
        ),
        id: album.id,
        name: album.name,
        release_date: album.release_date,
        artists: album.artists.into_iter().map(simple_artist).collect(),
        images: images(album.images),
        album_type: album_type(album.album_type.as_deref()),
    }
}

pub fn full_artist(artist: GqlArtist) -> SpotubeFullArtist {
    SpotubeFullArtist {
        type_name: TypeName::ArtistFull,
        external_uri: external_uri(
            artist.external_urls.as_ref().and_then(|u| u.spotify.as_deref()),
            "artist",
            &artist.id,
        ),
        id: artist.id,
        name: artist.name,
        images: images(artist.images.unwrap_or_default()),
        genres: artist.genres,
        followers: artist.followers.and_then(|f| f.total),
    }
}

pub fn simple_artist(artist: GqlArtist) -> SpotubeSimpleArtist {
    SpotubeSimpleArtist {
        type_name: TypeName::ArtistSimple,
        external_uri: external_uri(
            artist.external_urls.as_ref().and_then(|u| u.spotify.as_deref()),
            "artist",
            &artist.id,
        ),
        id: artist.id,
        name: artist.name,
        images: artist.images.map(images),
    }
}

pub fn simple_user(user: GqlUser) -> SpotubeUser {
    SpotubeUser {
        type_name: TypeName::User,
        external_uri: external_uri(
            user.external_urls.as_ref().and_then(|u| u.spotify.as_deref()),
            "user",
            &user.id,
        ),
        id: user.id,
        name: user.display_name.unwrap_or_default(),
        images: images(user.images.unwrap_or_default()),
    }
}

pub fn simple_playlist(playlist: GqlPlaylist) -> SpotubeSimplePlaylist {
    SpotubeSimplePlaylist {
        type_name: TypeName::PlaylistSimple,
        external_uri: external_uri(
            playlist.external_urls.as_ref().and_then(|u| u.spotify.as_deref()),
            "playlist",
            &playlist.id,
        ),
        id: playlist.id,
        name: playlist.name,
        description: playlist.description,
        images: images(playlist.images),
        owner: simple_user(playlist.owner),
    }
}

/// Library and search results use the same simplified playlist shape.
pub fn simple_playlist_from_library(playlist: GqlPlaylist) -> SpotubeSimplePlaylist {
    simple_playlist(playlist)
}

pub fn full_playlist(playlist: GqlPlaylist) -> SpotubeFullPlaylist {
    SpotubeFullPlaylist {
        type_name: TypeName::PlaylistFull,
        external_uri: external_uri(
            playlist.external_urls.as_ref().and_then(|u| u.spotify.as_deref()),
            "playlist",
            &playlist.id,
        ),
        id: playlist.id,
        name: playlist.name,
        description: playlist.description,
        images: images(playlist.images),
        owner: simple_user(playlist.owner),
        collaborators: Vec::new(),
        collaborative: playlist.collaborative.unwrap_or(false),
        public: playlist.public.unwrap_or(false),
    }
}

pub fn search_response(all: GqlSearchAll) -> SpotubeSearchResponse {
    SpotubeSearchResponse {
        type_name: TypeName::SearchResponse,
        artists: all.artists.into_iter().map(full_artist).collect(),
        albums: all.albums.into_iter().map(simple_album).collect(),
        tracks: all.tracks.into_iter().map(full_track).collect(),
        playlists: all
            .playlists
            .into_iter()
            .map(simple_playlist_from_library)
            .collect(),
    }
}

/// `None` for object types the host cannot display.
/// `None` for upstream object types the host has no schema for.
pub fn browse_item(item: GqlBrowseItem) -> Option<BrowseSectionItem> {
    match item {
        GqlBrowseItem::Playlist(p) => Some(BrowseSectionItem::Playlist(simple_playlist_from_library(p))),
        GqlBrowseItem::Album(a) => Some(BrowseSectionItem::Album(simple_album(a))),
        GqlBrowseItem::Artist(a) => Some(BrowseSectionItem::Artist(full_artist(a))),
        GqlBrowseItem::Other => None,
    }
}

/// Regroups a section as playlists, then albums, then artists.
pub fn browse_section(section: GqlBrowseSection) -> SpotubeBrowseSection {
    let mut playlists = Vec::new();
    let mut albums = Vec::new();
    let mut artists = Vec::new();
    for item in section.items.into_iter().filter_map(browse_item) {
        match item {
            BrowseSectionItem::Playlist(_) => playlists.push(item),
            BrowseSectionItem::Album(_) => albums.push(item),
            BrowseSectionItem::Artist(_) => artists.push(item),
        }
    }
    playlists.append(&mut albums);
    playlists.append(&mut artists);

    SpotubeBrowseSection {
        type_name: TypeName::BrowseSection,
        external_uri: external_uri(section.external_urls.spotify.as_deref(), "section", &section.id),
        id: section.id,
        title: section.title,
        browse_more: true,
        items: playlists,
    }
}
