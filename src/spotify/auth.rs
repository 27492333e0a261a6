use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use chrono::Utc;
use serde::Deserialize;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::nuance::{self, Nuance};
use crate::{
    Error, Res,
    config::PluginConfig,
    host::{Cookie, Host, HttpClient, HttpRequest, WebViewFactory},
    management::{CredentialStore, Credentials},
    utils,
};

const SP_DC_COOKIE: &str = "sp_dc";

/// Lower bound of the refresh timer, so an overdue token does not spin.
const MIN_REFRESH_DELAY_MS: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    LoggedOut,
    Authenticating,
    Authenticated,
    Refreshing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    Login,
    Logout,
    Refreshed,
    Recovered,
}

/// Session events as the host runtime understands them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAuthEvent {
    Login,
    Logout,
    RefreshSession,
}

impl From<AuthEvent> for HostAuthEvent {
    fn from(event: AuthEvent) -> Self {
        match event {
            AuthEvent::Login => HostAuthEvent::Login,
            AuthEvent::Logout => HostAuthEvent::Logout,
            AuthEvent::Refreshed | AuthEvent::Recovered => HostAuthEvent::RefreshSession,
        }
    }
}

/// Sent as the `reason` of a token request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMode {
    Transport,
    Login,
}

impl TokenMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenMode::Transport => "transport",
            TokenMode::Login => "login",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TokenParams<'a> {
    pub mode: TokenMode,
    pub totp: &'a str,
    pub totp_version: u32,
    /// Raw `sp_dc` cookie value, may be empty.
    pub sp_dc: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthTokenResponse {
    pub client_id: String,
    pub access_token: String,
    pub access_token_expiration_timestamp_ms: i64,
    pub is_anonymous: bool,
    #[serde(rename = "_notes")]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServerTimeResponse {
    #[serde(rename = "serverTime")]
    server_time: u64,
}

type EventObserver = Arc<dyn Fn(AuthEvent, Option<&Credentials>) + Send + Sync>;
type HostHook = Arc<dyn Fn(HostAuthEvent) + Send + Sync>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns the web player session: login through the web view, token issuance,
/// persistence, and the single background refresh timer.
///
/// Cloning is cheap and every clone drives the same session.
#[derive(Clone)]
pub struct AuthEndpoint {
    inner: Arc<AuthInner>,
}

struct AuthInner {
    http: Arc<dyn HttpClient>,
    webview: Arc<dyn WebViewFactory>,
    store: CredentialStore,
    config: PluginConfig,
    credentials: Mutex<Option<Credentials>>,
    state: Mutex<AuthState>,
    observer: Mutex<Option<EventObserver>>,
    host_hook: Mutex<Option<HostHook>>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for AuthInner {
    fn drop(&mut self) {
        let timer = self.timer.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = timer.take() {
            handle.abort();
        }
    }
}

impl AuthEndpoint {
    /// Creates a logged out endpoint. Call [`AuthEndpoint::initialize`] to
    /// recover a persisted session.
    pub fn new(host: &Host, config: PluginConfig) -> Self {
        Self {
            inner: Arc::new(AuthInner {
                http: Arc::clone(&host.http),
                webview: Arc::clone(&host.webview),
                store: CredentialStore::new(Arc::clone(&host.storage)),
                config,
                credentials: Mutex::new(None),
                state: Mutex::new(AuthState::LoggedOut),
                observer: Mutex::new(None),
                host_hook: Mutex::new(None),
                timer: Mutex::new(None),
            }),
        }
    }

    /// Registers the plugin-side observer, replacing any previous one.
    pub fn on_event(&self, observer: impl Fn(AuthEvent, Option<&Credentials>) + Send + Sync + 'static) {
        *lock(&self.inner.observer) = Some(Arc::new(observer));
    }

    /// Registers the host runtime's session hook, replacing any previous one.
    pub fn on_host_event(&self, hook: impl Fn(HostAuthEvent) + Send + Sync + 'static) {
        *lock(&self.inner.host_hook) = Some(Arc::new(hook));
    }

    pub fn credentials(&self) -> Option<Credentials> {
        lock(&self.inner.credentials).clone()
    }

    pub fn access_token(&self) -> Option<String> {
        lock(&self.inner.credentials)
            .as_ref()
            .map(|c| c.access_token.clone())
    }

    /// Value of a session cookie, e.g. `sp_t` for the home feed.
    pub fn cookie(&self, name: &str) -> Option<String> {
        lock(&self.inner.credentials)
            .as_ref()
            .and_then(|c| c.cookie(name).map(str::to_string))
    }

    pub fn state(&self) -> AuthState {
        *lock(&self.inner.state)
    }

    /// Whether a refresh is currently scheduled.
    pub fn has_refresh_timer(&self) -> bool {
        lock(&self.inner.timer)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn is_expired(&self) -> bool {
        match lock(&self.inner.credentials).as_ref() {
            Some(credentials) => credentials.is_expired_at(Utc::now()),
            None => true,
        }
    }

    /// Milliseconds until the next refresh is due (`0` without credentials).
    pub fn expiration_duration(&self) -> i64 {
        lock(&self.inner.credentials)
            .as_ref()
            .map_or(0, |c| c.expiration_duration_at(Utc::now()))
    }

    pub fn is_authenticated(&self) -> bool {
        !self.is_expired()
    }

    /// Restores the persisted session. Unexpired credentials are recovered
    /// without network I/O; expired ones are refreshed from their cookies.
    /// Failures are logged and leave the endpoint logged out.
    pub async fn initialize(&self) {
        let stored = match self.inner.store.load().await {
            Ok(Some(credentials)) => credentials,
            Ok(None) => {
                debug!("No stored credentials");
                return;
            }
            Err(e) => {
                error!(error = %e, "[initialize] Cannot read stored credentials");
                return;
            }
        };

        let expired = stored.is_expired_at(Utc::now());
        self.replace_credentials(Some(stored));

        if expired {
            info!("Stored credentials expired, refreshing");
            if let Err(e) = self.refresh_credentials().await {
                error!(error = %e, "[initialize] Cannot refresh stored credentials");
            }
        } else {
            self.set_state(AuthState::Authenticated);
            info!("Recovered stored credentials");
            self.fire_event(AuthEvent::Recovered);
        }
    }

    /// Fetches the rotating secret feed and keeps the highest version.
    pub async fn get_latest_nuance(&self) -> Res<Nuance> {
        let response = self
            .inner
            .http
            .send(HttpRequest::get(&self.inner.config.nuance_url))
            .await?
            .error_for_status()?;
        nuance::latest_nuance(response.json()?)
    }

    /// Spotify's clock in epoch seconds; the local clock may be skewed.
    pub async fn server_time(&self) -> Res<u64> {
        let response = self
            .inner
            .http
            .send(HttpRequest::get(&self.inner.config.server_time_url))
            .await?
            .error_for_status()?;
        let body: ServerTimeResponse = response.json()?;
        Ok(body.server_time)
    }

    pub async fn generate_timed_one_time_password(&self, secret: &str) -> Res<String> {
        let server_time = self.server_time().await?;
        nuance::generate_totp(secret, server_time)
    }

    pub async fn get_token(&self, params: TokenParams<'_>) -> Res<AuthTokenResponse> {
        debug!(
            mode = params.mode.as_str(),
            totp_version = params.totp_version,
            has_sp_dc = !params.sp_dc.is_empty(),
            "Requesting access token"
        );

        let request = HttpRequest::get(&self.inner.config.token_url)
            .query("reason", params.mode.as_str())
            .query("productType", "web-player")
            .query("totp", params.totp)
            .query("totpServer", params.totp)
            .query("totpVer", params.totp_version.to_string())
            .header("Cookie", format!("{SP_DC_COOKIE}={};", params.sp_dc))
            .header("User-Agent", utils::random_user_agent());

        let response = self.inner.http.send(request).await?;
        response.json()
    }

    /// Derives a fresh session from the login cookies.
    ///
    /// An empty access token is not an error: the credentials are returned
    /// anyway and the plugin keeps running with a token the API will reject.
    pub async fn credentials_from_cookies(&self, cookies: Vec<Cookie>) -> Res<Credentials> {
        let sp_dc = utils::cookie_value(&cookies, SP_DC_COOKIE)
            .unwrap_or_default()
            .to_string();
        let nuance = self.get_latest_nuance().await?;
        let totp = self.generate_timed_one_time_password(&nuance.s).await?;
        let token = self
            .get_token(TokenParams {
                mode: TokenMode::Transport,
                totp: &totp,
                totp_version: nuance.v,
                sp_dc: &sp_dc,
            })
            .await?;

        if token.access_token.is_empty() {
            warn!(
                totp_version = nuance.v,
                "The access token is empty. Your authentication probably doesn't work"
            );
        } else if token.is_anonymous {
            warn!("Spotify issued an anonymous token, the sp_dc cookie was not accepted");
        }

        Ok(Credentials {
            cookies,
            access_token: token.access_token,
            expiration: token.access_token_expiration_timestamp_ms,
        })
    }

    pub async fn login(&self, cookies: Vec<Cookie>) -> Res<()> {
        let credentials = self.credentials_from_cookies(cookies).await?;
        self.inner.store.persist(&credentials).await?;
        self.replace_credentials(Some(credentials));
        self.set_state(AuthState::Authenticated);
        info!("Logged in");
        self.fire_event(AuthEvent::Login);
        Ok(())
    }

    /// Re-derives the session from the stored cookies without user interaction.
    pub async fn refresh_credentials(&self) -> Res<()> {
        let Some(cookies) = self.credentials().map(|c| c.cookies) else {
            info!("[refresh_credentials] No cookie found. Cannot refresh credentials.");
            return Ok(());
        };

        let previous = self.replace_state(AuthState::Refreshing);
        let refreshed = match self.credentials_from_cookies(cookies).await {
            Ok(credentials) => self
                .inner
                .store
                .persist(&credentials)
                .await
                .map(|_| credentials),
            Err(e) => Err(e),
        };

        match refreshed {
            Ok(credentials) => {
                self.replace_credentials(Some(credentials));
                self.set_state(AuthState::Authenticated);
                info!("Refreshed credentials");
                self.fire_event(AuthEvent::Refreshed);
                Ok(())
            }
            Err(e) => {
                self.set_state(previous);
                Err(e)
            }
        }
    }

    /// Interactive login: opens the accounts page in a web view and logs in
    /// with its cookies once the view reaches the post-login status page.
    pub async fn authenticate(&self) -> Res<()> {
        let previous = self.replace_state(AuthState::Authenticating);
        let result = self.run_login_view().await;
        if result.is_err() {
            self.set_state(previous);
        }
        result
    }

    async fn run_login_view(&self) -> Res<()> {
        let accounts_url = &self.inner.config.accounts_url;
        let pattern = utils::login_status_pattern(accounts_url)?;

        let mut view = self.inner.webview.create(accounts_url).await?;
        view.open().await?;

        while let Some(url) = view.next_url().await {
            if !pattern.is_match(utils::strip_trailing_slash(&url)) {
                debug!(url = %url, "Login view navigated");
                continue;
            }

            let cookies = view.cookies(&url).await;
            if let Err(e) = view.close().await {
                warn!(error = %e, "Cannot close login view");
            }
            return self.login(cookies?).await;
        }

        Err(Error::WebView(
            "login view closed before the login completed".to_string(),
        ))
    }

    pub async fn logout(&self) -> Res<()> {
        self.replace_credentials(None);
        let cleared = self.inner.store.clear().await;
        self.set_state(AuthState::LoggedOut);
        info!("Logged out");
        self.fire_event(AuthEvent::Logout);
        cleared
    }

    fn replace_credentials(&self, credentials: Option<Credentials>) {
        *lock(&self.inner.credentials) = credentials;
    }

    fn set_state(&self, state: AuthState) {
        *lock(&self.inner.state) = state;
    }

    fn replace_state(&self, state: AuthState) -> AuthState {
        std::mem::replace(&mut *lock(&self.inner.state), state)
    }

    fn fire_event(&self, event: AuthEvent) {
        let observer = lock(&self.inner.observer).clone();
        if let Some(observer) = observer {
            let credentials = self.credentials();
            observer(event, credentials.as_ref());
        }

        let hook = lock(&self.inner.host_hook).clone();
        if let Some(hook) = hook {
            hook(event.into());
        }

        match event {
            AuthEvent::Login | AuthEvent::Recovered | AuthEvent::Refreshed => {
                self.arm_refresh_timer()
            }
            AuthEvent::Logout => self.disarm_refresh_timer(),
        }
    }

    /// Cancels the pending refresh, if any, and schedules a new one.
    fn arm_refresh_timer(&self) {
        let delay_ms = self.expiration_duration().max(MIN_REFRESH_DELAY_MS);
        let delay = Duration::from_millis(delay_ms as u64);
        let handle = tokio::spawn(refresh_loop(Arc::downgrade(&self.inner), delay));

        if let Some(previous) = lock(&self.inner.timer).replace(handle) {
            previous.abort();
        }
        debug!(delay_ms, "Armed credential refresh timer");
    }

    fn disarm_refresh_timer(&self) {
        if let Some(handle) = lock(&self.inner.timer).take() {
            handle.abort();
            debug!("Disarmed credential refresh timer");
        }
    }
}

/// Body of the refresh timer. A successful refresh re-arms the timer, which
/// aborts this task; a failed one is retried after the same delay.
async fn refresh_loop(auth: Weak<AuthInner>, delay: Duration) {
    loop {
        tokio::time::sleep(delay).await;

        let Some(inner) = auth.upgrade() else {
            break;
        };
        let endpoint = AuthEndpoint { inner };
        if let Err(e) = endpoint.refresh_credentials().await {
            warn!(error = %e, "Scheduled credential refresh failed");
        }
    }
}
