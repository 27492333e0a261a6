//! # Host Capabilities
//!
//! The plugin never talks to the network, the disk or a browser directly. It
//! goes through the capabilities below, which the host runtime supplies. The
//! crate ships native bindings for each so the developer binary and the tests
//! can run the same code paths a host would.
//!
//! ```text
//! Endpoints (auth, core, browse)
//!          ↓
//! Capabilities: HttpClient · KeyValueStorage · WebViewFactory · TimeZoneProvider
//!          ↓
//! Bindings: ReqwestHttpClient · FileStorage · BrowserWebView · SystemTimeZone
//! ```

mod http;
mod storage;
mod webview;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Error, Res, config::PluginConfig};

pub use http::ReqwestHttpClient;
pub use storage::FileStorage;
pub use webview::{BrowserWebView, BrowserWebViewFactory};

/// A cookie captured from the login web view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
        }
    }
}

/// A GET request to an upstream HTTP endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Value of a query parameter, first occurrence wins.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value of a header, compared case-insensitively.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn error_for_status(self) -> Res<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::http(self.status, &self.body))
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Res<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Performs HTTP requests on behalf of the plugin.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Res<HttpResponse>;
}

/// Durable string key/value storage, the plugin's only persisted state.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    async fn get_item(&self, key: &str) -> Res<Option<String>>;
    async fn set_item(&self, key: &str, value: &str) -> Res<()>;
    async fn remove_item(&self, key: &str) -> Res<()>;
}

/// An embedded browser view used for the login flow.
#[async_trait]
pub trait WebView: Send {
    async fn open(&mut self) -> Res<()>;

    /// Next URL the view navigated to, `None` once the view is gone.
    async fn next_url(&mut self) -> Option<String>;

    async fn cookies(&mut self, url: &str) -> Res<Vec<Cookie>>;

    async fn close(&mut self) -> Res<()>;
}

#[async_trait]
pub trait WebViewFactory: Send + Sync {
    async fn create(&self, url: &str) -> Res<Box<dyn WebView>>;
}

#[async_trait]
pub trait TimeZoneProvider: Send + Sync {
    async fn local_time_zone(&self) -> Res<String>;
}

/// Time zone taken from configuration.
#[derive(Debug, Clone)]
pub struct SystemTimeZone {
    name: String,
}

impl SystemTimeZone {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl TimeZoneProvider for SystemTimeZone {
    async fn local_time_zone(&self) -> Res<String> {
        Ok(self.name.clone())
    }
}

/// The full capability set handed to the plugin.
#[derive(Clone)]
pub struct Host {
    pub http: Arc<dyn HttpClient>,
    pub storage: Arc<dyn KeyValueStorage>,
    pub webview: Arc<dyn WebViewFactory>,
    pub timezone: Arc<dyn TimeZoneProvider>,
}

impl Host {
    /// Native bindings: reqwest, files under the configured storage
    /// directory, the system browser and the configured time zone.
    pub fn native(config: &PluginConfig) -> Res<Self> {
        Ok(Self {
            http: Arc::new(ReqwestHttpClient::new()?),
            storage: Arc::new(FileStorage::new(config.storage_dir.clone())),
            webview: Arc::new(BrowserWebView::factory(config.accounts_url.clone())),
            timezone: Arc::new(SystemTimeZone::new(config.timezone.clone())),
        })
    }
}
