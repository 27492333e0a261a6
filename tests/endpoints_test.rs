mod common;

use std::sync::Arc;

use common::*;
use spotube_plugin_spotify::{
    gql::{ExternalUrls, GqlBrowseItem, GqlBrowseSection, LibraryItemType, PageParams},
    plugin::SpotifyMetadataProviderPlugin,
    spotify::{
        AlbumEndpoint, ArtistEndpoint, AuthEndpoint, BrowseEndpoint, PlaylistEndpoint,
        SearchEndpoint, TrackEndpoint, UserEndpoint,
    },
    types::{BrowseSectionItem, TypeName},
};

fn gql() -> Arc<FakeGql> {
    Arc::new(FakeGql::default())
}

#[tokio::test]
async fn test_playlist_tracks_drop_local_files() {
    let api = gql();
    *api.playlist_tracks.lock().unwrap() = vec![
        track(Some("a"), "A"),
        track(None, "local.mp3"),
        track(Some("c"), "C"),
    ];
    let playlist = PlaylistEndpoint::new(api.clone());

    let page = playlist.tracks("pl1", None, None).await.unwrap();

    let ids: Vec<&str> = page.items.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert_eq!(page.total, 3);
    assert!(!page.has_more);
    assert_eq!(*api.pages.lock().unwrap(), vec![PageParams::new(0, 50)]);
}

#[tokio::test]
async fn test_playlist_tracks_pagination_counts_upstream_items() {
    let api = gql();
    *api.playlist_tracks.lock().unwrap() = vec![track(Some("a"), "A"), track(None, "local.mp3")];
    *api.playlist_tracks_total.lock().unwrap() = Some(10);
    let playlist = PlaylistEndpoint::new(api.clone());

    let page = playlist.tracks("pl1", Some(4), Some(2)).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert!(page.has_more);
    assert_eq!(page.next_offset, Some(6));
    assert_eq!(page.limit, 2);
}

#[tokio::test]
async fn test_playlist_editing_calls() {
    let api = gql();
    let playlist = PlaylistEndpoint::new(api.clone());
    let ids = vec!["a".to_string(), "b".to_string()];

    playlist.add_tracks("pl1", &ids, Some(2)).await.unwrap();
    playlist.remove_tracks("pl1", &ids).await.unwrap();
    playlist.delete_playlist("pl1").await.unwrap();
    playlist.save("pl2").await.unwrap();
    playlist
        .update_playlist("pl1", Some("Renamed"), None, None, None)
        .await
        .unwrap();

    assert_eq!(
        api.calls(),
        vec![
            "add_playlist_tracks pl1 spotify:track:a,spotify:track:b Some(2)",
            "remove_playlist_tracks pl1 spotify:track:a,spotify:track:b",
            "unfollow_playlist pl1",
            "follow_playlist pl2",
            "update_playlist pl1 Some(\"Renamed\")",
        ]
    );
}

#[tokio::test]
async fn test_create_playlist_returns_full_playlist() {
    let api = gql();
    let playlist = PlaylistEndpoint::new(api.clone());

    let created = playlist
        .create_playlist("me", "Road trip", Some("long drives"), Some(true), None)
        .await
        .unwrap();

    assert_eq!(created.type_name, TypeName::PlaylistFull);
    assert_eq!(created.name, "Road trip");
    assert_eq!(created.description.as_deref(), Some("long drives"));
    assert!(created.public);
    assert!(!created.collaborative);
    assert_eq!(api.calls(), vec!["create_playlist me"]);
}

#[tokio::test]
async fn test_radio_without_exact_match_is_empty() {
    let api = gql();
    api.tracks
        .lock()
        .unwrap()
        .insert("t1".to_string(), track(Some("t1"), "Song"));
    *api.playlist_search.lock().unwrap() = vec![
        playlist("p1", "Song Radio Mix"),
        playlist("p2", "song radio"),
    ];
    let tracks = TrackEndpoint::new(api.clone());

    let radio = tracks.radio("t1").await.unwrap();

    assert!(radio.is_empty());
    assert_eq!(api.calls(), vec!["track t1", "search_playlists Song Radio"]);
    assert_eq!(*api.pages.lock().unwrap(), vec![PageParams::new(0, 20)]);
}

#[tokio::test]
async fn test_radio_uses_exact_match() {
    let api = gql();
    api.tracks
        .lock()
        .unwrap()
        .insert("t1".to_string(), track(Some("t1"), "Song"));
    *api.playlist_search.lock().unwrap() =
        vec![playlist("p1", "Song Radio Mix"), playlist("p2", "Song Radio")];
    *api.playlist_tracks.lock().unwrap() = vec![track(Some("r1"), "R1"), track(Some("r2"), "R2")];
    let tracks = TrackEndpoint::new(api.clone());

    let radio = tracks.radio("t1").await.unwrap();

    let ids: Vec<&str> = radio.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r2"]);
    assert_eq!(api.calls().last().unwrap(), "playlist_tracks p2");
    assert_eq!(api.pages.lock().unwrap()[1], PageParams::new(0, 50));
}

#[tokio::test]
async fn test_artist_synthetic_pages() {
    let api = gql();
    *api.top_tracks.lock().unwrap() = vec![
        track(Some("a"), "A"),
        track(Some("b"), "B"),
        track(Some("c"), "C"),
    ];
    *api.related.lock().unwrap() = vec![artist("r1")];
    let artists = ArtistEndpoint::new(api.clone());

    let top = artists.top_tracks("ar1", Some(10), Some(1)).await.unwrap();
    assert_eq!(top.total, 3);
    assert_eq!(top.limit, 3);
    assert!(!top.has_more);
    assert_eq!(top.next_offset, None);
    assert_eq!(top.items.len(), 3);

    let related = artists.related("ar1", None, None).await.unwrap();
    assert_eq!(related.items[0].type_name, TypeName::ArtistFull);
    assert_eq!(related.total, 1);
}

#[tokio::test]
async fn test_artist_albums_and_follow() {
    let api = gql();
    let artists = ArtistEndpoint::new(api.clone());

    let albums = artists.albums("ar1", None, None).await.unwrap();
    assert_eq!(albums.items[0].type_name, TypeName::AlbumSimple);
    assert_eq!(albums.items[0].album_type, "album");

    artists.save(&["ar1".to_string()]).await.unwrap();
    artists.unsave(&["ar2".to_string()]).await.unwrap();
    assert_eq!(
        api.calls(),
        vec!["artist_albums ar1", "follow_artists ar1", "unfollow_artists ar2"]
    );
}

#[tokio::test]
async fn test_album_endpoint_defaults() {
    let api = gql();
    let albums = AlbumEndpoint::new(api.clone());

    let album = albums.get_album("al1").await.unwrap();
    assert_eq!(album.type_name, TypeName::AlbumFull);
    assert_eq!(album.external_uri, "https://open.spotify.com/album/al1");

    albums.tracks("al1", None, None).await.unwrap();
    albums.releases(Some(50), Some(10)).await.unwrap();
    assert_eq!(
        *api.pages.lock().unwrap(),
        vec![PageParams::new(0, 50), PageParams::new(50, 10)]
    );
}

#[tokio::test]
async fn test_search_endpoint() {
    let api = gql();
    let search = SearchEndpoint::new(api.clone());

    assert_eq!(
        search.chips(),
        vec!["all", "tracks", "albums", "artists", "playlists"]
    );

    let all = search.all("daft").await.unwrap();
    assert_eq!(all.type_name, TypeName::SearchResponse);
    assert_eq!(all.artists[0].type_name, TypeName::ArtistFull);
    assert_eq!(all.albums[0].type_name, TypeName::AlbumSimple);
    assert_eq!(all.playlists[0].type_name, TypeName::PlaylistSimple);
    assert_eq!(*api.search_all_limits.lock().unwrap(), vec![20]);

    api.playlist_search
        .lock()
        .unwrap()
        .push(playlist("pl9", "Daft Punk Radio"));

    let playlists = search.playlists("daft", None, None).await.unwrap();
    assert_eq!(playlists.total, 1);
    assert!(!playlists.has_more);
    assert_eq!(playlists.next_offset, None);
    assert_eq!(playlists.items[0].type_name, TypeName::PlaylistFull);
    assert_eq!(playlists.items[0].id, "pl9");
    assert_eq!(playlists.items[0].name, "Daft Punk Radio");
    assert!(playlists.items[0].collaborators.is_empty());
}

#[tokio::test]
async fn test_user_library_lookups() {
    let api = gql();
    let user = UserEndpoint::new(api.clone());
    let ids = vec!["x".to_string()];

    let me = user.me().await.unwrap();
    assert_eq!(me.name, "Listener");
    assert_eq!(me.external_uri, "https://open.spotify.com/user/me");

    assert!(user.is_saved_playlist("pl1").await.unwrap());
    assert_eq!(user.is_saved_tracks(&ids).await.unwrap(), vec![true]);
    assert_eq!(user.is_saved_albums(&ids).await.unwrap(), vec![false]);
    assert_eq!(user.is_saved_artists(&ids).await.unwrap(), vec![false]);
    assert_eq!(
        *api.library_types.lock().unwrap(),
        vec![LibraryItemType::Album, LibraryItemType::Artist]
    );

    let saved = user.saved_playlists(None, None).await.unwrap();
    assert_eq!(saved.items[0].type_name, TypeName::PlaylistFull);
}

async fn logged_in_auth(fake: &FakeHost) -> AuthEndpoint {
    fake.store_credentials(&credentials("stored", in_secs(3600)));
    let auth = AuthEndpoint::new(&fake.host(), config());
    auth.initialize().await;
    auth
}

#[tokio::test]
async fn test_browse_sections_group_items() {
    let fake = FakeHost::new();
    let auth = logged_in_auth(&fake).await;
    let api = gql();
    *api.home.lock().unwrap() = vec![
        GqlBrowseSection {
            id: "s1".to_string(),
            title: "Made for you".to_string(),
            items: vec![
                GqlBrowseItem::Artist(artist("ar1")),
                GqlBrowseItem::Playlist(playlist("pl1", "Mix")),
                GqlBrowseItem::Album(album("al1")),
                GqlBrowseItem::Playlist(playlist("pl2", "Mix 2")),
            ],
            ..GqlBrowseSection::default()
        },
        GqlBrowseSection {
            id: "s2".to_string(),
            title: "Charts".to_string(),
            external_urls: ExternalUrls {
                spotify: Some("https://open.spotify.com/genre/charts".to_string()),
            },
            items: Vec::new(),
        },
    ];
    let browse = BrowseEndpoint::new(api.clone(), auth, fake.host().timezone);

    let page = browse.sections(Some(5), None).await.unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(page.limit, 20);
    assert!(!page.has_more);
    assert_eq!(page.next_offset, None);

    let first = &page.items[0];
    assert_eq!(first.type_name, TypeName::BrowseSection);
    assert!(first.browse_more);
    assert_eq!(first.external_uri, "https://open.spotify.com/section/s1");
    let kinds: Vec<&str> = first
        .items
        .iter()
        .map(|item| match item {
            BrowseSectionItem::Playlist(p) => p.id.as_str(),
            BrowseSectionItem::Album(a) => a.id.as_str(),
            BrowseSectionItem::Artist(a) => a.id.as_str(),
        })
        .collect();
    assert_eq!(kinds, vec!["pl1", "pl2", "al1", "ar1"]);
    assert_eq!(page.items[1].external_uri, "https://open.spotify.com/genre/charts");

    let params = &api.home_params.lock().unwrap()[0];
    assert_eq!(params.time_zone, "Europe/Berlin");
    assert_eq!(params.sp_t_cookie.as_deref(), Some("t-cookie"));
    assert_eq!(params.limit, 20);
}

#[tokio::test]
async fn test_browse_section_items_keep_order_and_drop_unknown_types() {
    let fake = FakeHost::new();
    let auth = logged_in_auth(&fake).await;
    let api = gql();
    *api.home_section.lock().unwrap() = vec![
        GqlBrowseItem::Album(album("al1")),
        GqlBrowseItem::Other,
        GqlBrowseItem::Playlist(playlist("pl1", "Mix")),
    ];
    let browse = BrowseEndpoint::new(api.clone(), auth, fake.host().timezone);

    let page = browse.section_items("s1", Some(20), Some(10)).await.unwrap();

    assert_eq!(page.items.len(), 2);
    assert!(matches!(page.items[0], BrowseSectionItem::Album(_)));
    assert!(matches!(page.items[1], BrowseSectionItem::Playlist(_)));
    assert_eq!(page.total, 3);
    assert!(!page.has_more);
    let params = &api.home_params.lock().unwrap()[0];
    assert_eq!((params.offset, params.limit), (20, 10));
}

#[tokio::test]
async fn test_browse_without_session_sends_no_cookie() {
    let fake = FakeHost::new();
    let auth = AuthEndpoint::new(&fake.host(), config());
    let api = gql();
    let browse = BrowseEndpoint::new(api.clone(), auth, fake.host().timezone);

    browse.sections(None, Some(5)).await.unwrap();

    let params = &api.home_params.lock().unwrap()[0];
    assert_eq!(params.sp_t_cookie, None);
    assert_eq!(params.limit, 5);
}

#[tokio::test]
async fn test_plugin_keeps_client_token_in_sync() {
    let fake = FakeHost::new();
    fake.store_credentials(&credentials("stored", in_secs(3600)));
    let api = gql();

    let plugin = SpotifyMetadataProviderPlugin::new(fake.host(), api.clone(), config()).await;
    assert_eq!(api.token().as_deref(), Some("stored"));

    plugin.auth.logout().await.unwrap();
    assert_eq!(api.token(), None);
}
