#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use spotube_plugin_spotify::{
    Error, Res,
    config::{CREDENTIALS_KEY, PluginConfig},
    gql::{
        GqlAlbum, GqlArtist, GqlBrowseItem, GqlBrowseSection, GqlClient, GqlPage, GqlPlaylist,
        GqlSearchAll, GqlTrack, GqlUser, HomeParams, LibraryItemType, PageParams, PlaylistDetails,
    },
    host::{
        Cookie, Host, HttpClient, HttpRequest, HttpResponse, KeyValueStorage, SystemTimeZone,
        WebView, WebViewFactory,
    },
    management::Credentials,
};

pub const NUANCE_URL: &str = "https://nuance.test/nuances.json";
pub const SERVER_TIME_URL: &str = "https://open.test/api/server-time";
pub const TOKEN_URL: &str = "https://open.test/api/token";
pub const RELEASE_URL: &str = "https://api.github.test/releases/latest";
pub const ACCOUNTS_URL: &str = "https://accounts.spotify.com/";

/// base32 of "12345678901234567890"
pub const SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

pub fn config() -> PluginConfig {
    PluginConfig {
        accounts_url: ACCOUNTS_URL.to_string(),
        nuance_url: NUANCE_URL.to_string(),
        server_time_url: SERVER_TIME_URL.to_string(),
        token_url: TOKEN_URL.to_string(),
        release_url: RELEASE_URL.to_string(),
        update_asset: "plugin.smplug".to_string(),
        storage_dir: std::env::temp_dir(),
        timezone: "Europe/Berlin".to_string(),
    }
}

/// HTTP responses scripted per URL. Each URL holds a queue: responses are
/// consumed in order and the last one keeps answering.
#[derive(Default)]
pub struct FakeHttp {
    routes: Mutex<HashMap<String, VecDeque<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeHttp {
    pub fn push(&self, url: &str, status: u16, body: impl Into<String>) {
        self.routes
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(HttpResponse::new(status, body));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, url: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.url == url)
            .collect()
    }
}

#[async_trait]
impl HttpClient for FakeHttp {
    async fn send(&self, request: HttpRequest) -> Res<HttpResponse> {
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);

        let mut routes = self.routes.lock().unwrap();
        let response = match routes.get_mut(&url) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        Ok(response.unwrap_or_else(|| HttpResponse::new(404, "not found")))
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn get(&self, key: &str) -> Option<String> {
        self.items.lock().unwrap().get(key).cloned()
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn stored_credentials(&self) -> Option<Credentials> {
        self.get(CREDENTIALS_KEY)
            .map(|json| serde_json::from_str(&json).unwrap())
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Res<Option<String>> {
        Ok(self.get(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Res<()> {
        self.insert(key, value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Res<()> {
        self.items.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Web view that walks through a fixed list of URLs.
pub struct ScriptedWebView {
    urls: VecDeque<String>,
    cookies: Vec<Cookie>,
    closed: Arc<AtomicBool>,
}

#[async_trait]
impl WebView for ScriptedWebView {
    async fn open(&mut self) -> Res<()> {
        Ok(())
    }

    async fn next_url(&mut self) -> Option<String> {
        self.urls.pop_front()
    }

    async fn cookies(&mut self, _url: &str) -> Res<Vec<Cookie>> {
        Ok(self.cookies.clone())
    }

    async fn close(&mut self) -> Res<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub struct ScriptedWebViewFactory {
    pub urls: Mutex<Vec<String>>,
    pub cookies: Mutex<Vec<Cookie>>,
    pub opened_with: Mutex<Vec<String>>,
    pub closed: Arc<AtomicBool>,
}

impl ScriptedWebViewFactory {
    pub fn script(&self, urls: &[&str], cookies: Vec<Cookie>) {
        *self.urls.lock().unwrap() = urls.iter().map(|u| u.to_string()).collect();
        *self.cookies.lock().unwrap() = cookies;
    }

    pub fn was_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WebViewFactory for ScriptedWebViewFactory {
    async fn create(&self, url: &str) -> Res<Box<dyn WebView>> {
        self.opened_with.lock().unwrap().push(url.to_string());
        Ok(Box::new(ScriptedWebView {
            urls: self.urls.lock().unwrap().iter().cloned().collect(),
            cookies: self.cookies.lock().unwrap().clone(),
            closed: Arc::clone(&self.closed),
        }))
    }
}

pub struct FakeHost {
    pub http: Arc<FakeHttp>,
    pub storage: Arc<MemoryStorage>,
    pub webview: Arc<ScriptedWebViewFactory>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            http: Arc::new(FakeHttp::default()),
            storage: Arc::new(MemoryStorage::default()),
            webview: Arc::new(ScriptedWebViewFactory::default()),
        }
    }

    pub fn host(&self) -> Host {
        Host {
            http: self.http.clone(),
            storage: self.storage.clone(),
            webview: self.webview.clone(),
            timezone: Arc::new(SystemTimeZone::new("Europe/Berlin")),
        }
    }

    /// Scripts the nuance feed, server time and a queue of token responses.
    pub fn script_token_flow(&self, tokens: &[(&str, i64)]) {
        self.http.push(
            NUANCE_URL,
            200,
            format!(r#"[{{"v":60,"s":"AAAA"}},{{"v":61,"s":"{SECRET}"}}]"#),
        );
        self.http
            .push(SERVER_TIME_URL, 200, r#"{"serverTime":1700000000}"#);
        for (token, expiration) in tokens {
            self.http.push(TOKEN_URL, 200, token_body(token, *expiration));
        }
    }

    pub fn store_credentials(&self, credentials: &Credentials) {
        self.storage
            .insert(CREDENTIALS_KEY, &serde_json::to_string(credentials).unwrap());
    }
}

pub fn token_body(token: &str, expiration: i64) -> String {
    format!(
        r#"{{"clientId":"client","accessToken":"{token}","accessTokenExpirationTimestampMs":{expiration},"isAnonymous":false}}"#
    )
}

pub fn in_secs(secs: i64) -> i64 {
    (Utc::now() + Duration::seconds(secs)).timestamp_millis()
}

pub fn login_cookies() -> Vec<Cookie> {
    vec![Cookie::new("sp_dc", "dc-cookie"), Cookie::new("sp_t", "t-cookie")]
}

pub fn credentials(token: &str, expiration: i64) -> Credentials {
    Credentials {
        cookies: login_cookies(),
        access_token: token.to_string(),
        expiration,
    }
}

pub fn track(id: Option<&str>, name: &str) -> GqlTrack {
    GqlTrack {
        id: id.map(str::to_string),
        name: name.to_string(),
        ..GqlTrack::default()
    }
}

pub fn playlist(id: &str, name: &str) -> GqlPlaylist {
    GqlPlaylist {
        id: id.to_string(),
        name: name.to_string(),
        ..GqlPlaylist::default()
    }
}

pub fn artist(id: &str) -> GqlArtist {
    GqlArtist {
        id: id.to_string(),
        name: format!("Artist {id}"),
        ..GqlArtist::default()
    }
}

pub fn album(id: &str) -> GqlAlbum {
    GqlAlbum {
        id: id.to_string(),
        name: format!("Album {id}"),
        ..GqlAlbum::default()
    }
}

/// GraphQL client double. Records every call and serves canned data.
#[derive(Default)]
pub struct FakeGql {
    pub calls: Mutex<Vec<String>>,
    pub access_token: Mutex<Option<String>>,
    pub tracks: Mutex<HashMap<String, GqlTrack>>,
    pub top_tracks: Mutex<Vec<GqlTrack>>,
    pub related: Mutex<Vec<GqlArtist>>,
    pub playlist_search: Mutex<Vec<GqlPlaylist>>,
    pub playlist_tracks: Mutex<Vec<GqlTrack>>,
    pub playlist_tracks_total: Mutex<Option<u32>>,
    pub home: Mutex<Vec<GqlBrowseSection>>,
    pub home_section: Mutex<Vec<GqlBrowseItem>>,
    pub home_params: Mutex<Vec<HomeParams>>,
    pub pages: Mutex<Vec<PageParams>>,
    pub search_all_limits: Mutex<Vec<u32>>,
    pub library_types: Mutex<Vec<LibraryItemType>>,
}

impl FakeGql {
    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn page<T>(&self, page: PageParams, items: Vec<T>) -> GqlPage<T> {
        self.pages.lock().unwrap().push(page);
        let total = items.len() as u32;
        GqlPage::new(total, page.offset, page.limit, items)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.access_token.lock().unwrap().clone()
    }
}

#[async_trait]
impl GqlClient for FakeGql {
    fn set_access_token(&self, token: Option<&str>) {
        *self.access_token.lock().unwrap() = token.map(str::to_string);
    }

    async fn album(&self, id: &str) -> Res<GqlAlbum> {
        self.record(format!("album {id}"));
        Ok(album(id))
    }

    async fn album_tracks(&self, id: &str, page: PageParams) -> Res<GqlPage<GqlTrack>> {
        self.record(format!("album_tracks {id}"));
        Ok(self.page(page, vec![track(Some("t1"), "One")]))
    }

    async fn album_releases(&self, page: PageParams) -> Res<GqlPage<GqlAlbum>> {
        self.record("album_releases");
        Ok(self.page(page, vec![album("new")]))
    }

    async fn save_albums(&self, ids: &[String]) -> Res<()> {
        self.record(format!("save_albums {}", ids.join(",")));
        Ok(())
    }

    async fn unsave_albums(&self, ids: &[String]) -> Res<()> {
        self.record(format!("unsave_albums {}", ids.join(",")));
        Ok(())
    }

    async fn artist(&self, id: &str) -> Res<GqlArtist> {
        self.record(format!("artist {id}"));
        Ok(artist(id))
    }

    async fn artist_top_tracks(&self, id: &str) -> Res<Vec<GqlTrack>> {
        self.record(format!("artist_top_tracks {id}"));
        Ok(self.top_tracks.lock().unwrap().clone())
    }

    async fn artist_albums(&self, id: &str, page: PageParams) -> Res<GqlPage<GqlAlbum>> {
        self.record(format!("artist_albums {id}"));
        Ok(self.page(page, vec![album("a1")]))
    }

    async fn follow_artists(&self, ids: &[String]) -> Res<()> {
        self.record(format!("follow_artists {}", ids.join(",")));
        Ok(())
    }

    async fn unfollow_artists(&self, ids: &[String]) -> Res<()> {
        self.record(format!("unfollow_artists {}", ids.join(",")));
        Ok(())
    }

    async fn related_artists(&self, id: &str) -> Res<Vec<GqlArtist>> {
        self.record(format!("related_artists {id}"));
        Ok(self.related.lock().unwrap().clone())
    }

    async fn browse_home(&self, params: HomeParams) -> Res<Vec<GqlBrowseSection>> {
        self.record("browse_home");
        self.home_params.lock().unwrap().push(params);
        Ok(self.home.lock().unwrap().clone())
    }

    async fn browse_home_section(
        &self,
        id: &str,
        params: HomeParams,
    ) -> Res<GqlPage<GqlBrowseItem>> {
        self.record(format!("browse_home_section {id}"));
        let items = self.home_section.lock().unwrap().clone();
        let page = PageParams::new(params.offset, params.limit);
        self.home_params.lock().unwrap().push(params);
        Ok(self.page(page, items))
    }

    async fn playlist(&self, id: &str) -> Res<GqlPlaylist> {
        self.record(format!("playlist {id}"));
        Ok(playlist(id, "Playlist"))
    }

    async fn playlist_tracks(&self, id: &str, page: PageParams) -> Res<GqlPage<GqlTrack>> {
        self.record(format!("playlist_tracks {id}"));
        let items = self.playlist_tracks.lock().unwrap().clone();
        let total = self
            .playlist_tracks_total
            .lock()
            .unwrap()
            .unwrap_or(items.len() as u32);
        self.pages.lock().unwrap().push(page);
        Ok(GqlPage::new(total, page.offset, page.limit, items))
    }

    async fn create_playlist(&self, user_id: &str, details: PlaylistDetails) -> Res<GqlPlaylist> {
        self.record(format!("create_playlist {user_id}"));
        let mut created = playlist("created", details.name.as_deref().unwrap_or_default());
        created.description = details.description;
        created.public = details.public;
        created.collaborative = details.collaborative;
        Ok(created)
    }

    async fn update_playlist(&self, id: &str, details: PlaylistDetails) -> Res<()> {
        self.record(format!("update_playlist {id} {:?}", details.name));
        Ok(())
    }

    async fn add_playlist_tracks(
        &self,
        id: &str,
        uris: Vec<String>,
        position: Option<u32>,
    ) -> Res<()> {
        self.record(format!(
            "add_playlist_tracks {id} {} {position:?}",
            uris.join(",")
        ));
        Ok(())
    }

    async fn remove_playlist_tracks(&self, id: &str, uris: Vec<String>) -> Res<()> {
        self.record(format!("remove_playlist_tracks {id} {}", uris.join(",")));
        Ok(())
    }

    async fn follow_playlist(&self, id: &str) -> Res<()> {
        self.record(format!("follow_playlist {id}"));
        Ok(())
    }

    async fn unfollow_playlist(&self, id: &str) -> Res<()> {
        self.record(format!("unfollow_playlist {id}"));
        Ok(())
    }

    async fn search_all(&self, query: &str, limit: u32) -> Res<GqlSearchAll> {
        self.record(format!("search_all {query}"));
        self.search_all_limits.lock().unwrap().push(limit);
        Ok(GqlSearchAll {
            artists: vec![artist("ar1")],
            albums: vec![album("al1")],
            tracks: vec![track(Some("t1"), "One")],
            playlists: vec![playlist("pl1", "Mix")],
        })
    }

    async fn search_albums(&self, query: &str, page: PageParams) -> Res<GqlPage<GqlAlbum>> {
        self.record(format!("search_albums {query}"));
        Ok(self.page(page, vec![album("al1")]))
    }

    async fn search_artists(&self, query: &str, page: PageParams) -> Res<GqlPage<GqlArtist>> {
        self.record(format!("search_artists {query}"));
        Ok(self.page(page, vec![artist("ar1")]))
    }

    async fn search_tracks(&self, query: &str, page: PageParams) -> Res<GqlPage<GqlTrack>> {
        self.record(format!("search_tracks {query}"));
        Ok(self.page(page, vec![track(Some("t1"), "One")]))
    }

    async fn search_playlists(
        &self,
        query: &str,
        page: PageParams,
    ) -> Res<GqlPage<GqlPlaylist>> {
        self.record(format!("search_playlists {query}"));
        let items = self.playlist_search.lock().unwrap().clone();
        Ok(self.page(page, items))
    }

    async fn track(&self, id: &str) -> Res<GqlTrack> {
        self.record(format!("track {id}"));
        self.tracks
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::Upstream(format!("unknown track {id}")))
    }

    async fn save_tracks(&self, ids: &[String]) -> Res<()> {
        self.record(format!("save_tracks {}", ids.join(",")));
        Ok(())
    }

    async fn unsave_tracks(&self, ids: &[String]) -> Res<()> {
        self.record(format!("unsave_tracks {}", ids.join(",")));
        Ok(())
    }

    async fn me(&self) -> Res<GqlUser> {
        self.record("me");
        Ok(GqlUser {
            id: "me".to_string(),
            display_name: Some("Listener".to_string()),
            ..GqlUser::default()
        })
    }

    async fn saved_tracks(&self, page: PageParams) -> Res<GqlPage<GqlTrack>> {
        self.record("saved_tracks");
        Ok(self.page(page, vec![track(Some("t1"), "One")]))
    }

    async fn saved_playlists(&self, page: PageParams) -> Res<GqlPage<GqlPlaylist>> {
        self.record("saved_playlists");
        Ok(self.page(page, vec![playlist("pl1", "Mix")]))
    }

    async fn saved_albums(&self, page: PageParams) -> Res<GqlPage<GqlAlbum>> {
        self.record("saved_albums");
        Ok(self.page(page, vec![album("al1")]))
    }

    async fn saved_artists(&self, page: PageParams) -> Res<GqlPage<GqlArtist>> {
        self.record("saved_artists");
        Ok(self.page(page, vec![artist("ar1")]))
    }

    async fn is_playlist_saved(&self, id: &str) -> Res<bool> {
        self.record(format!("is_playlist_saved {id}"));
        Ok(true)
    }

    async fn is_tracks_saved(&self, ids: &[String]) -> Res<Vec<bool>> {
        self.record(format!("is_tracks_saved {}", ids.join(",")));
        Ok(ids.iter().map(|_| true).collect())
    }

    async fn is_in_library(&self, ids: &[String], item_type: LibraryItemType) -> Res<Vec<bool>> {
        self.record(format!("is_in_library {}", ids.join(",")));
        self.library_types.lock().unwrap().push(item_type);
        Ok(ids.iter().map(|_| false).collect())
    }
}
